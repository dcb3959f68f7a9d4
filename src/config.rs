//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/swarm/swarm.toml`
//! 3. Explicit config file passed on the command line (`--config`)
//! 4. Environment variables: `SWARM_*` prefix, `__` as section separator
//!
//! Command line `--min-key` / `--max-key` flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{KeyRange, RobotId, DEFAULT_MAX_KEY, DEFAULT_MIN_KEY};

/// Bounds of the accepted robot ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyRangeConfig {
    pub min: RobotId,
    pub max: RobotId,
}

impl Default for KeyRangeConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_KEY,
            max: DEFAULT_MAX_KEY,
        }
    }
}

/// Raw key range for intermediate parsing (`None` → inherit from base layer).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawKeyRangeConfig {
    pub min: Option<RobotId>,
    pub max: Option<RobotId>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub key_range: RawKeyRangeConfig,
}

/// Unified configuration for swarm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub key_range: KeyRangeConfig,
}

/// Get the XDG config directory for swarm.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "swarm").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("swarm.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Validated key range.
    pub fn key_range(&self) -> Result<KeyRange, ApplicationError> {
        Ok(KeyRange::new(self.key_range.min, self.key_range.max)?)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            key_range: KeyRangeConfig {
                min: overlay.key_range.min.unwrap_or(self.key_range.min),
                max: overlay.key_range.max.unwrap_or(self.key_range.max),
            },
        }
    }

    /// Apply explicit overrides, e.g. from command line flags.
    pub fn with_overrides(mut self, min: Option<RobotId>, max: Option<RobotId>) -> Self {
        if let Some(min) = min {
            self.key_range.min = min;
        }
        if let Some(max) = max {
            self.key_range.max = max;
        }
        self
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist when given
    ///
    /// The key range is not validated here: later layers (command line flags)
    /// may still complete it. Call [`Settings::key_range`] on the final result.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading config file");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, None)?;

        Ok(current)
    }

    /// Apply SWARM_* environment variables as explicit overrides.
    ///
    /// `SWARM_KEY_RANGE__MIN=10000` sets `key_range.min`. `vars` replaces the
    /// process environment when given.
    fn apply_env_overrides(
        mut settings: Self,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SWARM")
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_int("key_range.min") {
            settings.key_range.min = to_robot_id("key_range.min", val)?;
        }
        if let Ok(val) = config.get_int("key_range.max") {
            settings.key_range.max = to_robot_id("key_range.max", val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# swarm configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/swarm/swarm.toml
#   File:   swarm --config <file>
#   Env:    SWARM_KEY_RANGE__MIN / SWARM_KEY_RANGE__MAX
#   Flags:  --min-key / --max-key

[key_range]
# Lowest accepted robot id (inclusive)
# min = 0

# Highest accepted robot id (inclusive)
# max = 99999
"#
        .to_string()
    }
}

fn to_robot_id(key: &str, val: i64) -> Result<RobotId, ApplicationError> {
    RobotId::try_from(val).map_err(|_| ApplicationError::Config {
        message: format!("{key}: {val} does not fit a robot id"),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
