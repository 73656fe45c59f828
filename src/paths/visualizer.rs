//! Visualizer line reader (`<id>:(x,y),(x,y),...`).

use super::{extract_pairs, parse_number};
use crate::error::ApiError;
use crate::types::{AgentId, RawPair};
use regex::Regex;
use std::sync::OnceLock;

fn indexed_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\s*:(.*)$").expect("static index pattern"))
}

/// Parse `<index>:(x,y),...` lines in file order.
///
/// The leading index is an agent id for agent-major files and a time step for
/// time-major files; trailing commas are tolerated.
pub fn parse_visualizer_paths(text: &str) -> Result<Vec<(AgentId, Vec<RawPair>)>, ApiError> {
    let mut lines = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let Some(caps) = indexed_line_regex().captures(line) else {
            continue;
        };
        let line_no = idx + 1;
        let index = parse_number(&caps[1], line_no, "line index")?;
        lines.push((index, extract_pairs(&caps[2], line_no)?));
    }
    if lines.is_empty() {
        return Err(ApiError::NoPathsFound);
    }
    Ok(lines)
}
