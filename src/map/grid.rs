//! Passable grid extraction and cell classification.

use super::header::{HeaderScan, MapHeader};
use crate::error::ApiError;
use crate::types::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Conventional passable characters for the allow-list rule.
pub const DEFAULT_PASSABLE_CHARS: &str = ".GS_";

/// Default impassable characters for the deny-list rule.
pub const DEFAULT_OBSTACLE_CHARS: &str = "@";

/// How map characters are classified as passable or blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "chars", rename_all = "lowercase")]
pub enum CellRule {
    /// Listed characters are blocked, everything else is passable.
    Obstacles(BTreeSet<char>),
    /// Only listed characters are passable.
    Passable(BTreeSet<char>),
}

impl CellRule {
    pub fn obstacles(chars: &str) -> Self {
        CellRule::Obstacles(chars.chars().collect())
    }

    pub fn passable(chars: &str) -> Self {
        CellRule::Passable(chars.chars().collect())
    }

    pub fn is_passable(&self, c: char) -> bool {
        match self {
            CellRule::Obstacles(set) => !set.contains(&c),
            CellRule::Passable(set) => set.contains(&c),
        }
    }
}

impl Default for CellRule {
    fn default() -> Self {
        CellRule::obstacles(DEFAULT_OBSTACLE_CHARS)
    }
}

/// Map header plus a `[height][width]` passability grid.
#[derive(Debug, Clone)]
pub struct GridMap {
    header: MapHeader,
    passable: Vec<Vec<bool>>,
}

impl GridMap {
    /// Build from already-classified rows; rows must match the header exactly.
    pub fn from_rows(header: MapHeader, passable: Vec<Vec<bool>>) -> Result<Self, ApiError> {
        check_shape(
            &header,
            passable.len(),
            passable.iter().map(|row| row.len()),
        )?;
        Ok(Self { header, passable })
    }

    pub fn header(&self) -> MapHeader {
        self.header
    }

    pub fn width(&self) -> usize {
        self.header.width
    }

    pub fn height(&self) -> usize {
        self.header.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.header.contains(cell.x, cell.y)
    }

    /// Out-of-range cells are never passable.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.contains(cell) && self.passable[cell.y as usize][cell.x as usize]
    }

    pub fn passable_count(&self) -> usize {
        self.passable
            .iter()
            .map(|row| row.iter().filter(|p| **p).count())
            .sum()
    }
}

/// Parse a full map: header, `map` marker, and exactly `height` grid rows.
pub fn read_map(text: &str, rule: &CellRule) -> Result<GridMap, ApiError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut scan = HeaderScan::default();
    let mut marker = None;
    for (idx, line) in lines.iter().enumerate() {
        if line.trim().eq_ignore_ascii_case("map") {
            marker = Some(idx);
            break;
        }
        scan.observe(line, idx + 1)?;
    }
    let header = scan.finish()?;

    let rows: &[&str] = match marker {
        Some(idx) => {
            let start = idx + 1;
            let end = start.saturating_add(header.height).min(lines.len());
            &lines[start..end]
        }
        None => &[],
    };
    check_shape(&header, rows.len(), rows.iter().map(|r| r.chars().count()))?;

    let passable = rows
        .iter()
        .map(|row| row.chars().map(|c| rule.is_passable(c)).collect())
        .collect();
    Ok(GridMap { header, passable })
}

fn check_shape(
    header: &MapHeader,
    rows: usize,
    mut widths: impl Iterator<Item = usize>,
) -> Result<(), ApiError> {
    let mismatch = |actual_width| ApiError::GridSizeMismatch {
        declared_width: header.width,
        declared_height: header.height,
        actual_rows: rows,
        actual_width,
    };
    if let Some(width) = widths.find(|&w| w != header.width) {
        return Err(mismatch(width));
    }
    if rows != header.height {
        let actual_width = if rows == 0 { 0 } else { header.width };
        return Err(mismatch(actual_width));
    }
    Ok(())
}
