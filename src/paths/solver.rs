//! Solver output reader (`Agent <id>: (a,b)->(a,b)->...`).

use super::{extract_pairs, parse_number};
use crate::error::ApiError;
use crate::types::AgentPaths;
use regex::Regex;
use std::sync::OnceLock;

fn agent_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*Agent\s*(\d+)\s*:\s*(.*)$").expect("static agent pattern"))
}

/// Parse solver output into per-agent raw pair sequences.
///
/// Lines that are not agent lines are skipped. An id seen on several lines
/// accumulates its pairs in file order. A matched line with no pairs still
/// registers the agent, so emptiness is decided later by the normalizer.
pub fn extract_solver_paths(text: &str) -> Result<AgentPaths, ApiError> {
    let mut paths = AgentPaths::new();
    let mut matched_lines = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let Some(caps) = agent_line_regex().captures(line) else {
            continue;
        };
        let line_no = idx + 1;
        let agent = parse_number(&caps[1], line_no, "agent id")?;
        let pairs = extract_pairs(&caps[2], line_no)?;
        matched_lines += 1;
        paths.entry(agent).or_default().extend(pairs);
    }

    if matched_lines == 0 {
        return Err(ApiError::NoPathsFound);
    }
    tracing::debug!(
        agents = paths.len(),
        lines = matched_lines,
        "Extracted solver paths"
    );
    Ok(paths)
}
