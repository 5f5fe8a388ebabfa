//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$FORKLINE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/forkline/config.toml`
//! 3. `~/.forkline/config.toml`
//!
//! # Repo Config
//!
//! Located at `<git dir>/forkline/config.toml`.
//!
//! # Validation
//!
//! Values are validated after parsing: branch names must be valid, and
//! unknown keys are rejected at parse time.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;

/// When to color the `(detached)` annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// color = "never"
/// mainline = ["main", "develop"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Color preference
    pub color: Option<ColorChoice>,

    /// Mainline branch names (trunk fallback order)
    pub mainline: Option<Vec<String>>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_mainline(self.mainline.as_deref())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// trunk = "main"
/// max_depth = 5000
/// mainline = ["main", "release"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Trunk branch name
    pub trunk: Option<String>,

    /// History walk cap per branch; 0 disables the cap
    pub max_depth: Option<usize>,

    /// Mainline branch names, overriding the global list
    pub mainline: Option<Vec<String>>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(trunk) = &self.trunk {
            BranchName::new(trunk).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid trunk branch name: {}", e))
            })?;
        }

        validate_mainline(self.mainline.as_deref())
    }
}

fn validate_mainline(names: Option<&[String]>) -> Result<(), ConfigError> {
    for name in names.unwrap_or_default() {
        BranchName::new(name.as_str()).map_err(|e| {
            ConfigError::InvalidValue(format!("invalid mainline branch name: {}", e))
        })?;
    }
    Ok(())
}
