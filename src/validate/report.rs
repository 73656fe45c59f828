use crate::error::ApiError;
use crate::types::{AgentId, Cell};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One non-fatal problem found in a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Cell outside `[0, width) x [0, height)`.
    OutOfRange { agent: AgentId, t: usize, cell: Cell },
    /// In-range cell that the map marks as blocked.
    Impassable { agent: AgentId, t: usize, cell: Cell },
    /// Move from `t - 1` to `t` that is neither a stay nor a 4-neighbor move.
    IllegalStep {
        agent: AgentId,
        t: usize,
        from: Cell,
        to: Cell,
    },
    /// Stay from `t - 1` to `t` while waiting is not allowed.
    Stay { agent: AgentId, t: usize, cell: Cell },
}

impl ValidationIssue {
    pub fn agent(&self) -> AgentId {
        match self {
            ValidationIssue::OutOfRange { agent, .. }
            | ValidationIssue::Impassable { agent, .. }
            | ValidationIssue::IllegalStep { agent, .. }
            | ValidationIssue::Stay { agent, .. } => *agent,
        }
    }

    pub fn time(&self) -> usize {
        match self {
            ValidationIssue::OutOfRange { t, .. }
            | ValidationIssue::Impassable { t, .. }
            | ValidationIssue::IllegalStep { t, .. }
            | ValidationIssue::Stay { t, .. } => *t,
        }
    }

    pub fn kind_slug(&self) -> &'static str {
        match self {
            ValidationIssue::OutOfRange { .. } => "out_of_range",
            ValidationIssue::Impassable { .. } => "impassable",
            ValidationIssue::IllegalStep { .. } => "illegal_step",
            ValidationIssue::Stay { .. } => "stay",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::OutOfRange { agent, t, cell } => {
                write!(f, "Agent {} t={} out-of-range {}", agent, t, cell)
            }
            ValidationIssue::Impassable { agent, t, cell } => {
                write!(f, "Agent {} t={} on obstacle {}", agent, t, cell)
            }
            ValidationIssue::IllegalStep { agent, t, from, to } => write!(
                f,
                "Agent {} step {}->{} not 4-neighbor: {}->{}",
                agent,
                t - 1,
                t,
                from,
                to
            ),
            ValidationIssue::Stay { agent, t, cell } => write!(
                f,
                "Agent {} step {}->{} stays on {} without allow-wait",
                agent,
                t - 1,
                t,
                cell
            ),
        }
    }
}

/// Accumulated validation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub agents: usize,
    pub cells_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue counts per kind slug, in a fixed order.
    pub fn counts_by_kind(&self) -> Vec<(&'static str, usize)> {
        ["out_of_range", "impassable", "illegal_step", "stay"]
            .into_iter()
            .map(|slug| {
                let n = self.issues.iter().filter(|i| i.kind_slug() == slug).count();
                (slug, n)
            })
            .collect()
    }

    /// Fail in strict mode when any issue was found; otherwise succeed.
    pub fn enforce(&self, strict: bool) -> Result<(), ApiError> {
        if strict && !self.is_clean() {
            return Err(ApiError::ValidationFailed {
                issues: self.issue_count(),
            });
        }
        Ok(())
    }
}
