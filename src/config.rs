//! Configuration
//!
//! Layered tool configuration: built-in defaults, the global config file, a
//! local `mapf-bridge.toml`, and `MAPF_BRIDGE__*` environment variables.
//! Command-line flags are applied on top by the CLI layer.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::map::CellRule;
use crate::orientation::SwapMode;
use crate::validate::ValidationOptions;
use crate::writer::Playback;
use serde::{Deserialize, Serialize};

/// Local config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mapf-bridge.toml";

/// Effective configuration for all tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub validation: ValidationOptions,
    #[serde(default)]
    pub playback: Playback,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Map cell classification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Characters treated as blocked.
    #[serde(default = "default_obstacles")]
    pub obstacles: String,

    /// When set, only these characters are passable and `obstacles` is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passable: Option<String>,
}

fn default_obstacles() -> String {
    crate::map::grid::DEFAULT_OBSTACLE_CHARS.to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            obstacles: default_obstacles(),
            passable: None,
        }
    }
}

impl MapConfig {
    pub fn cell_rule(&self) -> CellRule {
        match &self.passable {
            Some(chars) => CellRule::passable(chars),
            None => CellRule::obstacles(&self.obstacles),
        }
    }
}

/// Solver-to-visualizer conversion settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Orientation used by the time-major converter.
    #[serde(default)]
    pub swap: SwapMode,

    /// Default agent cap; absent or zero means all agents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_agents: Option<usize>,
}
