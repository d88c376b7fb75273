// Configuration module
//
// Application configuration for the optimizer CLI, loaded from YAML with
// ${VAR} environment substitution. Every section is optional.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::DEFAULT_MAX_CONCURRENCY;
use crate::image_optimizer::{OptimizationConfig, OptimizationOverrides};
use crate::logging::LoggingConfig;

/// Errors raised while loading or validating the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Partial optimizer settings applied over the defaults
    #[serde(default)]
    pub optimizer: OptimizationOverrides,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

/// Batch processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Files optimized at the same time
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        let substituted = substitute_env_vars(yaml)?;
        let config: Config = serde_yaml::from_str(&substituted)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Default optimizer settings with the file's overrides applied
    pub fn optimization_config(&self) -> OptimizationConfig {
        OptimizationConfig::default().with_overrides(&self.optimizer)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.optimization_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.batch.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "batch.max_concurrency must be at least 1".to_string(),
            ));
        }

        self.logging
            .validate()
            .map_err(ConfigError::Invalid)?;

        Ok(())
    }
}

/// Replace `${VAR_NAME}` with environment variable values
///
/// Fails on the first referenced variable that is not set.
fn substitute_env_vars(yaml: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

    for caps in re.captures_iter(yaml) {
        let var_name = &caps[1];
        if std::env::var(var_name).is_err() {
            return Err(ConfigError::MissingEnvVar(var_name.to_string()));
        }
    }

    let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    });

    Ok(substituted.into_owned())
}
