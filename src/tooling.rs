//! Tooling Layer
//!
//! Command-line surface over the pipelines plus text/JSON result formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
