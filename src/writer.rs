//! Visualizer Output
//!
//! Rendering is pure and happens fully in memory; [`write_output`] only
//! touches the filesystem once a complete buffer exists.

use crate::error::ApiError;
use crate::normalize::NormalizedPaths;
use crate::types::{AgentId, AgentPath, Cell};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Slow-motion and goal-hold settings for agent-major output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playback {
    /// Copies of each step; values below 1 behave as 1.
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    /// Extra copies of the final cell.
    #[serde(default)]
    pub pad: usize,
}

fn default_repeat() -> usize {
    1
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            repeat: default_repeat(),
            pad: 0,
        }
    }
}

impl Playback {
    /// Expand a path with repeats and goal-hold padding.
    pub fn expand(&self, cells: &[Cell]) -> Vec<Cell> {
        let repeat = self.repeat.max(1);
        let mut out = Vec::with_capacity(cells.len() * repeat + self.pad);
        for &cell in cells {
            out.extend(std::iter::repeat(cell).take(repeat));
        }
        if let Some(&last) = out.last() {
            out.extend(std::iter::repeat(last).take(self.pad));
        }
        out
    }
}

/// `t:(x,y),(x,y),...,` for every step, agents in set order.
pub fn render_time_major(paths: &NormalizedPaths) -> String {
    let mut out = String::new();
    for t in 0..paths.horizon() {
        let _ = write!(out, "{}:", t);
        for path in paths.paths() {
            let _ = write!(out, "{},", path.cells[t]);
        }
        out.push('\n');
    }
    out
}

/// `id:(x,y),(x,y),...` per agent, in the order given.
pub fn render_agent_major<'a, I>(lines: I, playback: &Playback) -> String
where
    I: IntoIterator<Item = (AgentId, &'a [Cell])>,
{
    let mut out = String::new();
    for (id, cells) in lines {
        let expanded = playback.expand(cells);
        let _ = write!(out, "{}:", id);
        let joined: Vec<String> = expanded.iter().map(Cell::to_string).collect();
        out.push_str(&joined.join(","));
        out.push('\n');
    }
    out
}

/// Agent-major lines labelled with dense ids `id_offset + rank`.
///
/// Fails before rendering anything when the last id does not fit an [`AgentId`].
pub fn render_agent_major_relabelled(
    paths: &[AgentPath],
    id_offset: u32,
    playback: &Playback,
) -> Result<String, ApiError> {
    let overflow = || ApiError::IdOverflow {
        id_offset,
        agents: paths.len(),
    };
    let ids = paths
        .iter()
        .enumerate()
        .map(|(rank, _)| {
            u32::try_from(rank)
                .ok()
                .and_then(|rank| id_offset.checked_add(rank))
                .ok_or_else(overflow)
        })
        .collect::<Result<Vec<AgentId>, ApiError>>()?;
    Ok(render_agent_major(
        ids.into_iter()
            .zip(paths)
            .map(|(id, p)| (id, p.cells.as_slice())),
        playback,
    ))
}

/// Write a rendered buffer, creating missing parent directories first.
pub fn write_output(path: &Path, contents: &str) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::file_access(parent, e))?;
        }
    }
    std::fs::write(path, contents).map_err(|e| ApiError::file_access(path, e))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote output");
    Ok(())
}
