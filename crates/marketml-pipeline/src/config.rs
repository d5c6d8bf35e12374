//! Configuration loading.

use std::path::Path;

use ::config::{Config, Environment, File};
use marketml_core::config::PipelineConfig;
use marketml_core::error::ConfigError;

/// Load pipeline configuration from a file and environment overrides.
///
/// Environment variables use the `MARKETML` prefix with `__` separators,
/// e.g. `MARKETML__LABEL__LOOKAHEAD=10`. The loaded configuration is
/// validated before being returned.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("MARKETML")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let pipeline_config: PipelineConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    pipeline_config.validate()?;
    Ok(pipeline_config)
}
