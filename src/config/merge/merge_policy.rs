//! Built-in defaults applied beneath every other source.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder pre-seeded with the default value of every leaf key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("map.obstacles", crate::map::grid::DEFAULT_OBSTACLE_CHARS)?
        .set_default("conversion.swap", "auto")?
        .set_default("validation.allow_wait", false)?
        .set_default("validation.strict", false)?
        .set_default("playback.repeat", 1i64)?
        .set_default("playback.pad", 0i64)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}
