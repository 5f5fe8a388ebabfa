//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Print inference notes to stderr
//! - `--quiet` / `-q`: Suppress warnings
//! - `--trunk <branch>`: Override the trunk branch
//! - `--max-depth <n>`: Cap the history walk per branch (0 = unlimited)
//! - `--color <when>`: Color the `(detached)` annotation

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::config::ColorChoice;

/// forkline - Infer and draw the fork structure of local Git branches
#[derive(Parser, Debug)]
#[command(name = "forkline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if forkline was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; results and errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use this branch as trunk instead of the configured or mainline one
    #[arg(long, global = true, value_name = "BRANCH")]
    pub trunk: Option<String>,

    /// Walk at most this many commits back per branch (0 = unlimited)
    #[arg(long, global = true, value_name = "N")]
    pub max_depth: Option<usize>,

    /// When to color output
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Draw the branch forest (default)
    #[command(
        name = "tree",
        long_about = "Draw every local branch under the branch it was forked from.\n\n\
            Each branch is placed under the branch whose tip is the nearest point \
            where the two histories meet. When that parent has since been rewritten \
            or gained new commits, the branch and everything above it are drawn as a \
            separate tree marked (detached).",
        after_help = "\
EXAMPLES:
    # Draw the forest
    forkline

    # Include short commit ids and fork points
    forkline tree --long

    # Machine-readable output
    forkline tree --json"
    )]
    Tree {
        /// Show tip commits, fork points and detachment reasons
        #[arg(short, long)]
        long: bool,

        /// Print the forest as JSON
        #[arg(long, conflicts_with = "long")]
        json: bool,
    },

    /// Print a branch's inferred parent
    #[command(
        name = "parent",
        long_about = "Print the branch the given branch was forked from.\n\n\
            Prints nothing when the branch is a root: the trunk, a mainline branch, \
            or a detached branch."
    )]
    Parent {
        /// Branch to query
        branch: String,
    },

    /// Print a branch's inferred children
    #[command(
        name = "children",
        long_about = "Print the branches forked from the given branch, one per line.\n\n\
            A branch can have multiple children if several branches diverge from it."
    )]
    Children {
        /// Branch to query
        branch: String,
    },

    /// Print the trunk branch
    #[command(
        name = "trunk",
        long_about = "Print the branch used as trunk.\n\n\
            The trunk is taken from --trunk, then the repo config, then the first \
            existing mainline branch (main, master, develop, dev, local-dev)."
    )]
    Trunk,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash
    forkline completion bash > ~/.local/share/bash-completion/completions/forkline

    # Zsh
    forkline completion zsh > \"${fpath[1]}/_forkline\"

    # Fish
    forkline completion fish > ~/.config/fish/completions/forkline.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Tree {
            long: false,
            json: false,
        }
    }
}

/// Supported shells for completion
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Color flag values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}
