//! # Converter Configuration Module
//!
//! This module defines the settings of the conversion engine: rendering
//! precision, fraction output for scaled ingredients and the size at which
//! recipe scaling goes parallel.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::measurement_types::DEFAULT_PRECISION;

// Constants for converter configuration
pub const MAX_PRECISION: usize = 6;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16;
pub const CONFIG_PATH_ENV: &str = "RECIPE_UNITS_CONFIG";

/// Configuration structure for the converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Decimal places used when rendering converted quantities
    pub precision: usize,
    /// Rewrite decimals of scaled ingredient lines as fractions ("0.5" -> "1/2")
    pub fraction_output: bool,
    /// Minimum number of ingredient lines before scaling runs in parallel
    pub parallel_threshold: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            fraction_output: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ConverterConfig {
    /// Check every field, naming the first one out of range
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            bail!(
                "precision must be at most {}, got {}",
                MAX_PRECISION,
                self.precision
            );
        }
        if self.parallel_threshold == 0 {
            bail!("parallel_threshold must be at least 1");
        }
        Ok(())
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ConverterConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!("Loaded converter config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Load from the file named by `RECIPE_UNITS_CONFIG`, or fall back to
    /// the defaults when it is unset or unusable.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_PATH_ENV) else {
            info!("{} not set, using default converter config", CONFIG_PATH_ENV);
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Falling back to default converter config: {:#}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConverterConfig::default();
        assert_eq!(config.precision, 2);
        assert!(config.fraction_output);
        assert_eq!(config.parallel_threshold, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let too_precise = ConverterConfig {
            precision: 7,
            ..Default::default()
        };
        let err = too_precise.validate().unwrap_err();
        assert!(err.to_string().contains("precision"), "got: {err}");

        let never_parallel = ConverterConfig {
            parallel_threshold: 0,
            ..Default::default()
        };
        let err = never_parallel.validate().unwrap_err();
        assert!(err.to_string().contains("parallel_threshold"), "got: {err}");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ConverterConfig = serde_json::from_str(r#"{"precision": 3}"#).unwrap();
        assert_eq!(config.precision, 3);
        assert!(config.fraction_output);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }
}
