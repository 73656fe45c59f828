//! Core types shared by the parsers, normalizer, validator and writer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// AgentId: non-negative agent identifier, unique within one input file
pub type AgentId = u32;

/// Coordinate pair exactly as parsed, before its axis convention is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawPair(pub u32, pub u32);

impl RawPair {
    /// Interpret the pair as a grid cell.
    ///
    /// With `swap` the pair is read as `(row, col)` and becomes `x = col, y = row`;
    /// otherwise it is already `(x, y)`.
    pub fn orient(self, swap: bool) -> Cell {
        if swap {
            Cell::new(self.1, self.0)
        } else {
            Cell::new(self.0, self.1)
        }
    }
}

/// Oriented grid cell: `x` indexes columns, `y` indexes rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// L1 distance between two cells.
    pub fn manhattan(&self, other: &Cell) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// Whether `other` is reachable in one 4-neighbor move.
    pub fn is_four_neighbor(&self, other: &Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<Cell> for RawPair {
    fn from(cell: Cell) -> Self {
        RawPair(cell.x, cell.y)
    }
}

/// Raw per-agent sequences keyed by id; iteration is ascending by id.
pub type AgentPaths = BTreeMap<AgentId, Vec<RawPair>>;

/// One agent's oriented path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPath {
    pub agent: AgentId,
    pub cells: Vec<Cell>,
}

impl AgentPath {
    pub fn new(agent: AgentId, cells: Vec<Cell>) -> Self {
        Self { agent, cells }
    }
}
