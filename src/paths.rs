//! Path Extraction
//!
//! Pattern-based readers for the two path text formats: solver output
//! (`Agent <id>: (a,b)->(a,b)->...`) and visualizer lines (`<id>:(x,y),...`).
//! Pairs are pulled out by pattern regardless of the separators between them.

pub mod solver;
pub mod visualizer;

pub use solver::extract_solver_paths;
pub use visualizer::parse_visualizer_paths;

use crate::error::ApiError;
use crate::map::read_text;
use crate::types::{AgentId, AgentPaths, RawPair};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Read and parse a solver output file.
pub fn load_solver_paths(path: &Path) -> Result<AgentPaths, ApiError> {
    let text = read_text(path)?;
    extract_solver_paths(&text)
}

/// Read and parse a visualizer file.
pub fn load_visualizer_paths(path: &Path) -> Result<Vec<(AgentId, Vec<RawPair>)>, ApiError> {
    let text = read_text(path)?;
    parse_visualizer_paths(&text)
}

fn pair_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*\)").expect("static pair pattern"))
}

/// Every `(a,b)` pair in `text`, in order of appearance.
pub(crate) fn extract_pairs(text: &str, line_no: usize) -> Result<Vec<RawPair>, ApiError> {
    pair_regex()
        .captures_iter(text)
        .map(|caps| {
            let a = parse_number(&caps[1], line_no, "coordinate")?;
            let b = parse_number(&caps[2], line_no, "coordinate")?;
            Ok(RawPair(a, b))
        })
        .collect()
}

pub(crate) fn parse_number(digits: &str, line_no: usize, what: &str) -> Result<u32, ApiError> {
    digits.parse::<u32>().map_err(|e| ApiError::MalformedInput {
        line: line_no,
        message: format!("{} {}: {}", what, digits, e),
    })
}
