//! mapf-bridge: MAPF Solver Output Bridge
//!
//! Converts multi-agent path finding solver output into the line formats read
//! by grid visualizers, and validates paths against MovingAI-style maps.
//! Solver pairs are oriented into `(x, y)` by an out-of-bounds heuristic,
//! normalized to a common horizon and rendered time-major or agent-major.

pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod normalize;
pub mod orientation;
pub mod paths;
pub mod pipeline;
pub mod tooling;
pub mod types;
pub mod validate;
pub mod writer;
