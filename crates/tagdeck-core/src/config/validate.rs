//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

impl Config {
    /// Validate configuration values are usable.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery.supported_suffixes.is_empty() {
            return Err(ConfigError::ValidationError(
                "discovery.supported_suffixes must not be empty".into(),
            ));
        }
        if self
            .discovery
            .supported_suffixes
            .iter()
            .any(|s| s.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(
                "discovery.supported_suffixes must not contain blank entries".into(),
            ));
        }
        if self.encoder.tags_column.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "encoder.tags_column must not be blank".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {}",
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}
