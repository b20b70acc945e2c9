//! Configuration loading and typed config structures for the R2med engine.
//!
//! The canonical configuration lives in `r2med-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file, applies environment
//! overrides, and resolves an optional named preset.

use std::path::Path;

use r2med_types::SimulationConfig;
use serde::Deserialize;

use crate::presets::find_preset;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configured preset id does not exist.
    #[error("unknown scenario preset: {id}")]
    UnknownPreset {
        /// The id that was requested.
        id: String,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidEnv {
        /// Name of the environment variable.
        var: &'static str,
        /// The raw value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `r2med-config.yaml`. All sections are optional
/// and default to the null scenario with `a = c' = 0.5`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Model parameters and replication counts.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Optional preset id. When set, its path coefficients replace those in
    /// `simulation`.
    #[serde(default)]
    pub preset: Option<String>,

    /// Run-level settings.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `R2MED_SEED` overrides `run.seed`
    /// - `R2MED_PRESET` overrides `preset`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Unlike [`from_file`](Self::from_file), no environment overrides are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Override settings with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `R2MED_SEED` is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("R2MED_SEED") {
            let seed = val.trim().parse::<u64>().map_err(|_parse| ConfigError::InvalidEnv {
                var: "R2MED_SEED",
                value: val.clone(),
            })?;
            self.run.seed = Some(seed);
        }
        if let Ok(val) = std::env::var("R2MED_PRESET") {
            self.preset = Some(val);
        }
        Ok(())
    }

    /// The simulation parameters with the configured preset applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPreset`] if `preset` names no preset.
    pub fn resolved_simulation(&self) -> Result<SimulationConfig, ConfigError> {
        match self.preset.as_deref() {
            None => Ok(self.simulation),
            Some(id) => find_preset(id)
                .map(|preset| preset.apply_to(self.simulation))
                .ok_or_else(|| ConfigError::UnknownPreset { id: id.to_owned() }),
        }
    }
}

/// Run-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Seed for the random source. `None` seeds from OS entropy, so runs are
    /// not reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.simulation.n, 200);
        assert_eq!(config.simulation.replications, 1000);
        assert_eq!(config.simulation.bootstrap_samples, 1000);
        assert!(config.preset.is_none());
        assert!(config.run.seed.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
simulation:
  n: 150
  replications: 500
  bootstrap_samples: 250
  a: -0.5
  c_prime: 0.1
  b: 0.0
  sigma_em: 1.0

run:
  seed: 123

logging:
  level: "debug"
"#;

        let config = EngineConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.simulation.n, 150);
        assert_eq!(config.simulation.replications, 500);
        assert_eq!(config.simulation.bootstrap_samples, 250);
        assert_eq!(config.simulation.a, -0.5);
        assert_eq!(config.simulation.c_prime, 0.1);
        assert_eq!(config.run.seed, Some(123));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "simulation:\n  n: 40\n";
        let config = EngineConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // n is overridden
        assert_eq!(config.simulation.n, 40);
        // Everything else uses defaults
        assert_eq!(config.simulation.replications, 1000);
        assert_eq!(config.simulation.sigma_em, 1.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = EngineConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn parse_invalid_yaml() {
        let config = EngineConfig::parse("simulation: [1, 2");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn preset_overrides_coefficients_but_keeps_counts() {
        let yaml = "preset: u1\nsimulation:\n  n: 60\n  a: 0.2\n";
        let config = EngineConfig::parse(yaml).ok().unwrap_or_default();
        let resolved = config.resolved_simulation();
        assert!(resolved.is_ok());
        let resolved = resolved.ok().unwrap_or_default();
        assert_eq!(resolved.n, 60);
        assert_eq!(resolved.a, 0.9);
        assert_eq!(resolved.sigma_em, 0.1);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = EngineConfig {
            preset: Some("s9".to_owned()),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.resolved_simulation(),
            Err(ConfigError::UnknownPreset { id }) if id == "s9"
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("r2med-config.yaml");
        if path.exists() {
            let config = EngineConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
