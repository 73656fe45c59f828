//! Path Normalization
//!
//! Turns raw per-agent sequences into a rectangular set: ascending agent order,
//! optional agent cap, one orientation applied everywhere, empty paths handled
//! by policy, and every path padded to the common horizon `T` by holding its
//! final cell.

use crate::error::ApiError;
use crate::orientation::OrientationDecision;
use crate::types::{AgentPath, AgentPaths, Cell};
use serde::{Deserialize, Serialize};

/// What to do with an agent whose path has no points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPathPolicy {
    /// Remove the agent (with a warning).
    #[default]
    Drop,
    /// Replace the path with this single cell (with a warning).
    Fill(Cell),
}

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Keep only the first K agents by ascending id.
    pub max_agents: Option<usize>,
    pub empty_paths: EmptyPathPolicy,
}

/// Equal-length path set; every path has exactly `horizon` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPaths {
    paths: Vec<AgentPath>,
    horizon: usize,
}

impl NormalizedPaths {
    /// Pad (or, for over-length input, truncate) every path to `horizon` cells.
    ///
    /// Paths must be non-empty.
    pub fn with_horizon(mut paths: Vec<AgentPath>, horizon: usize) -> Result<Self, ApiError> {
        if paths.is_empty() || paths.iter().any(|p| p.cells.is_empty()) {
            return Err(ApiError::NoValidPaths);
        }
        for path in &mut paths {
            let len = path.cells.len();
            if len < horizon {
                if let Some(&last) = path.cells.last() {
                    path.cells.resize(horizon, last);
                }
            } else if len > horizon {
                tracing::warn!(
                    agent = path.agent,
                    length = len,
                    horizon,
                    "Path longer than horizon; truncating"
                );
                path.cells.truncate(horizon);
            }
        }
        Ok(Self { paths, horizon })
    }

    pub fn paths(&self) -> &[AgentPath] {
        &self.paths
    }

    /// Common path length `T`.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn agent_count(&self) -> usize {
        self.paths.len()
    }
}

/// Keep agents in ascending id order, at most `cap` of them.
pub fn select_agents(paths: AgentPaths, cap: Option<usize>) -> Result<AgentPaths, ApiError> {
    let selected: AgentPaths = match cap {
        Some(k) => paths.into_iter().take(k).collect(),
        None => paths,
    };
    if selected.is_empty() {
        return Err(ApiError::NoAgents { cap });
    }
    Ok(selected)
}

/// Apply one orientation decision to every pair of every path.
pub fn orient(paths: AgentPaths, decision: &OrientationDecision) -> Vec<AgentPath> {
    paths
        .into_iter()
        .map(|(agent, pairs)| {
            let cells = pairs.into_iter().map(|p| p.orient(decision.swap)).collect();
            AgentPath::new(agent, cells)
        })
        .collect()
}

/// Drop or fill empty paths; fails when nothing is left.
pub fn apply_empty_policy(
    paths: Vec<AgentPath>,
    policy: EmptyPathPolicy,
) -> Result<Vec<AgentPath>, ApiError> {
    let mut kept = Vec::with_capacity(paths.len());
    for mut path in paths {
        if !path.cells.is_empty() {
            kept.push(path);
            continue;
        }
        match policy {
            EmptyPathPolicy::Drop => {
                tracing::warn!(agent = path.agent, "Agent has an empty path; dropping");
            }
            EmptyPathPolicy::Fill(cell) => {
                tracing::warn!(agent = path.agent, fill = %cell, "Agent has an empty path; filling");
                path.cells.push(cell);
                kept.push(path);
            }
        }
    }
    if kept.is_empty() {
        return Err(ApiError::NoValidPaths);
    }
    Ok(kept)
}

/// Pad every path to the longest path's length.
pub fn pad_to_horizon(paths: Vec<AgentPath>) -> Result<NormalizedPaths, ApiError> {
    let horizon = paths.iter().map(|p| p.cells.len()).max().unwrap_or(0);
    NormalizedPaths::with_horizon(paths, horizon)
}

/// Select, orient, filter and pad.
///
/// The decision should be resolved over the same selection (see
/// [`select_agents`]); selecting twice with the same cap is a no-op.
pub fn normalize(
    paths: AgentPaths,
    decision: &OrientationDecision,
    options: &NormalizeOptions,
) -> Result<NormalizedPaths, ApiError> {
    let selected = select_agents(paths, options.max_agents)?;
    let oriented = orient(selected, decision);
    let kept = apply_empty_policy(oriented, options.empty_paths)?;
    let normalized = pad_to_horizon(kept)?;
    tracing::info!(
        agents = normalized.agent_count(),
        horizon = normalized.horizon(),
        "Normalized paths"
    );
    Ok(normalized)
}
