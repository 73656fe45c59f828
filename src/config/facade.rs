//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::BridgeConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the standard files and environment.
    pub fn load(working_dir: &Path) -> Result<BridgeConfig, ApiError> {
        Ok(MergeService::load(working_dir)?)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<BridgeConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Ok(MergeService::load_from_file(path)?)
    }
}
