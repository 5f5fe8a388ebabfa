//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! forkline has two configuration scopes:
//! - **Global**: User-level settings (color, mainline names)
//! - **Repo**: Repository-level settings (trunk, walk depth, mainline names)
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$FORKLINE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/forkline/config.toml`
//! 3. `~/.forkline/config.toml`
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `<git dir>/forkline/config.toml` (canonical)
//! 2. `<work dir>/.forkline.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use forkline::core::config::{Config, RepoLocation};
//! use std::path::Path;
//!
//! let location = RepoLocation {
//!     git_dir: Path::new("/path/to/repo/.git"),
//!     work_dir: Some(Path::new("/path/to/repo")),
//! };
//! let config = Config::load(Some(location)).unwrap().config;
//!
//! if let Some(trunk) = config.trunk() {
//!     println!("Trunk branch: {}", trunk);
//! }
//! println!("Walk cap: {:?}", config.max_depth());
//! ```

pub mod schema;

pub use schema::{ColorChoice, GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::graph::default_mainline;
use crate::core::infer::DEFAULT_MAX_DEPTH;
use crate::core::types::BranchName;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Where a repository keeps its files.
#[derive(Debug, Clone, Copy)]
pub struct RepoLocation<'a> {
    /// The `.git` directory (or the repository itself when bare)
    pub git_dir: &'a Path,
    /// The working tree, absent for bare repositories
    pub work_dir: Option<&'a Path>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: repo config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing files are not an error.
    pub fn load(repo: Option<RepoLocation<'_>>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match Self::global_candidates().into_iter().find(|p| p.exists())
        {
            Some(path) => (read_toml::<GlobalConfig>(&path)?, Some(path)),
            None => (GlobalConfig::default(), None),
        };

        let (repo, repo_path) = match repo {
            Some(location) => Self::load_repo(location, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Global config paths in lookup order.
    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("FORKLINE_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("forkline/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".forkline/config.toml"));
        }
        candidates
    }

    fn load_repo(
        location: RepoLocation<'_>,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let canonical = Self::repo_config_path(location.git_dir);
        if canonical.exists() {
            let config = read_toml(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        if let Some(work_dir) = location.work_dir {
            let compat = work_dir.join(".forkline.toml");
            if compat.exists() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "Using deprecated config location. Please move to '{}'",
                        canonical.display()
                    ),
                    path: compat.clone(),
                });
                let config = read_toml(&compat)?;
                return Ok((Some(config), Some(compat)));
            }
        }

        Ok((None, None))
    }

    /// Canonical repo config path for a git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("forkline/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the configured trunk branch name.
    pub fn trunk(&self) -> Option<&str> {
        self.repo.as_ref().and_then(|r| r.trunk.as_deref())
    }

    /// Get the history walk cap.
    ///
    /// Defaults to [`DEFAULT_MAX_DEPTH`]; a configured 0 means unlimited.
    pub fn max_depth(&self) -> Option<usize> {
        match self.repo.as_ref().and_then(|r| r.max_depth) {
            Some(0) => None,
            Some(depth) => Some(depth),
            None => Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// Get the mainline branch names.
    ///
    /// Repo list overrides global list, which overrides the built-in one.
    pub fn mainline(&self) -> Vec<BranchName> {
        let configured = self
            .repo
            .as_ref()
            .and_then(|r| r.mainline.as_ref())
            .or(self.global.mainline.as_ref());

        match configured {
            Some(names) => names
                .iter()
                .filter_map(|n| BranchName::new(n.as_str()).ok())
                .collect(),
            None => default_mainline(),
        }
    }

    /// Get the color preference. Defaults to `auto`.
    pub fn color(&self) -> ColorChoice {
        self.global.color.unwrap_or_default()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
