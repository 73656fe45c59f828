//! Path Validation
//!
//! Checks oriented paths against a map: every cell in bounds, every in-range
//! cell passable when a grid is loaded, and every consecutive pair either a
//! 4-neighbor move or a permitted stay. Issues are accumulated, never fatal on
//! their own; the strict/lenient decision belongs to the caller.

pub mod report;

pub use report::{ValidationIssue, ValidationReport};

use crate::map::{GridMap, MapHeader};
use crate::types::AgentPath;
use serde::{Deserialize, Serialize};

/// Validation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Consecutive identical cells are legal.
    #[serde(default)]
    pub allow_wait: bool,
    /// Any issue fails the run.
    #[serde(default)]
    pub strict: bool,
}

/// Path validator bound to one map.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    header: MapHeader,
    grid: Option<&'a GridMap>,
    allow_wait: bool,
}

impl<'a> Validator<'a> {
    /// Bounds and adjacency checks only.
    pub fn new(header: MapHeader) -> Self {
        Self {
            header,
            grid: None,
            allow_wait: false,
        }
    }

    /// Bounds, passability and adjacency checks.
    pub fn with_grid(grid: &'a GridMap) -> Self {
        Self {
            header: grid.header(),
            grid: Some(grid),
            allow_wait: false,
        }
    }

    pub fn allow_wait(mut self, allow: bool) -> Self {
        self.allow_wait = allow;
        self
    }

    /// Check every path and collect all issues.
    pub fn validate(&self, paths: &[AgentPath]) -> ValidationReport {
        let mut report = ValidationReport {
            agents: paths.len(),
            ..Default::default()
        };
        for path in paths {
            self.check_path(path, &mut report);
        }
        if report.is_clean() {
            tracing::info!(
                agents = report.agents,
                cells = report.cells_checked,
                "Validation passed"
            );
        } else {
            tracing::warn!(
                agents = report.agents,
                issues = report.issue_count(),
                "Validation found issues"
            );
        }
        report
    }

    fn check_path(&self, path: &AgentPath, report: &mut ValidationReport) {
        let agent = path.agent;
        for (t, &cell) in path.cells.iter().enumerate() {
            report.cells_checked += 1;
            if !self.header.contains(cell.x, cell.y) {
                report.add_issue(ValidationIssue::OutOfRange { agent, t, cell });
            } else if let Some(grid) = self.grid {
                if !grid.is_passable(cell) {
                    report.add_issue(ValidationIssue::Impassable { agent, t, cell });
                }
            }

            if t == 0 {
                continue;
            }
            let prev = path.cells[t - 1];
            if prev == cell {
                if !self.allow_wait {
                    report.add_issue(ValidationIssue::Stay { agent, t, cell });
                }
            } else if !prev.is_four_neighbor(&cell) {
                report.add_issue(ValidationIssue::IllegalStep {
                    agent,
                    t,
                    from: prev,
                    to: cell,
                });
            }
        }
    }
}
