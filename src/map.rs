//! Map Reading
//!
//! Reads MovingAI-style grid maps: a `type`/`height`/`width` header, a `map`
//! marker line, then `height` rows of `width` characters. The header alone is
//! enough for conversion; validation additionally needs the passable grid.

pub mod grid;
pub mod header;

pub use grid::{read_map, CellRule, GridMap};
pub use header::{read_header, MapHeader};

use crate::error::ApiError;
use std::path::Path;

/// Read a map file's declared dimensions.
pub fn load_header(path: &Path) -> Result<MapHeader, ApiError> {
    let text = read_text(path)?;
    read_header(&text)
}

/// Read a map file including its passable grid.
pub fn load_map(path: &Path, rule: &CellRule) -> Result<GridMap, ApiError> {
    let text = read_text(path)?;
    read_map(&text, rule)
}

pub(crate) fn read_text(path: &Path) -> Result<String, ApiError> {
    let bytes = std::fs::read(path).map_err(|e| ApiError::file_access(path, e))?;
    // Map and path files are ASCII in practice; stray bytes are not fatal.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
