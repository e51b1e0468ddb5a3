//! Inspection settings loaded from TOML and `STVIEW_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::reader::DEFAULT_MAX_HEADER_LEN;

/// Highest value accepted for [`InspectConfig::max_header_len`].
pub const MAX_HEADER_LEN_CEILING: u64 = u32::MAX as u64;

/// Settings for reading a header from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Largest declared header length accepted before reading.
    /// Override: `STVIEW_MAX_HEADER_BYTES`
    pub max_header_len: u64,

    /// Check tensor offsets against the file size and dtype sizes.
    /// Override: `STVIEW_STRICT`
    pub strict: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self { max_header_len: DEFAULT_MAX_HEADER_LEN, strict: false }
    }
}

/// Errors that can occur when loading or validating an [`InspectConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid environment override {key}={value}: {reason}")]
    EnvOverride { key: String, value: String, reason: String },
}

impl InspectConfig {
    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from a TOML string, then apply environment overrides.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut cfg: InspectConfig = toml::from_str(toml_str)?;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_header_len == 0 {
            return Err(ConfigError::Validation("max_header_len must be > 0".into()));
        }
        if self.max_header_len > MAX_HEADER_LEN_CEILING {
            return Err(ConfigError::Validation(format!(
                "max_header_len must be <= {MAX_HEADER_LEN_CEILING}, got {}",
                self.max_header_len
            )));
        }
        Ok(())
    }

    /// Apply `STVIEW_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("STVIEW_MAX_HEADER_BYTES") {
            self.max_header_len = val.parse::<u64>().map_err(|e| ConfigError::EnvOverride {
                key: "STVIEW_MAX_HEADER_BYTES".into(),
                value: val.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Ok(val) = std::env::var("STVIEW_STRICT") {
            self.strict = matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        Ok(())
    }
}
