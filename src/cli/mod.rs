//! cli
//!
//! Command-line interface layer for forkline.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and open the repository
//! - Delegate to command handlers and print their results
//!
//! # Architecture
//!
//! The CLI layer is thin. It resolves settings (CLI flags over repo config
//! over global config over defaults), reads the repository through
//! [`crate::git::Git`], and hands the commit graph to
//! [`crate::core::infer`]. It never writes to the repository.

pub mod args;
pub mod commands;

pub use args::{Cli, ColorMode, Command, Shell};

use std::path::PathBuf;

use anyhow::Result;

use crate::core::config::ColorChoice;
use crate::ui::output::Verbosity;

/// Execution context built from global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (results and errors only).
    pub quiet: bool,
    /// Trunk override.
    pub trunk: Option<String>,
    /// History walk cap override; 0 means unlimited.
    pub max_depth: Option<usize>,
    /// Color override.
    pub color: Option<ColorChoice>,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

impl From<&Cli> for Context {
    fn from(cli: &Cli) -> Self {
        Self {
            cwd: cli.cwd.clone(),
            debug: cli.debug,
            quiet: cli.quiet,
            trunk: cli.trunk.clone(),
            max_depth: cli.max_depth,
            color: cli.color.map(ColorChoice::from),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let ctx = Context::from(&cli);

    commands::dispatch(cli.command.unwrap_or_default(), &ctx)
}
