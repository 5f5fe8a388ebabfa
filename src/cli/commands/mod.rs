//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository and loads configuration through [`Session`]
//! 2. Runs inference (or just trunk resolution)
//! 3. Formats and displays output
//!
//! Handlers never modify the repository.

mod completion;
mod relationships;
mod tree;
mod trunk;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use relationships::{children, parent};
pub use tree::tree;
pub use trunk::trunk;

use anyhow::{Context as _, Result};

use super::args::Command;
use super::Context;
use crate::core::config::{ColorChoice, Config, RepoLocation};
use crate::core::graph::{CommitGraph, TrunkPolicy};
use crate::core::infer::{infer_branches, InferOptions, InferResult};
use crate::core::types::BranchName;
use crate::git::Git;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Tree { long, json } => tree::tree(ctx, long, json),
        Command::Parent { branch } => relationships::parent(ctx, &branch),
        Command::Children { branch } => relationships::children(ctx, &branch),
        Command::Trunk => trunk::trunk(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// An opened repository with its merged configuration.
pub(crate) struct Session {
    git: Git,
    config: Config,
    trunk_policy: TrunkPolicy,
    max_depth: Option<usize>,
}

impl Session {
    /// Open the repository at the context's working directory.
    ///
    /// Config warnings and skipped branch names are reported here.
    pub(crate) fn open(ctx: &Context) -> Result<Self> {
        let verbosity = ctx.verbosity();
        let cwd = match &ctx.cwd {
            Some(path) => path.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let git = Git::open(&cwd).context("Failed to open repository")?;

        let info = git.info();
        let loaded = Config::load(Some(RepoLocation {
            git_dir: &info.git_dir,
            work_dir: info.work_dir.as_deref(),
        }))
        .context("Failed to load configuration")?;
        for warning in &loaded.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                verbosity,
            );
        }
        let config = loaded.config;
        if let Some(path) = config.repo_config_loaded_from() {
            output::debug(format!("repo config: {}", path.display()), verbosity);
        }
        if let Some(path) = config.global_config_loaded_from() {
            output::debug(format!("global config: {}", path.display()), verbosity);
        }

        let explicit = ctx
            .trunk
            .as_deref()
            .or(config.trunk())
            .map(BranchName::new)
            .transpose()
            .context("Invalid trunk branch name")?;
        let trunk_policy = TrunkPolicy {
            explicit,
            mainline: config.mainline(),
        };
        let git = git.with_trunk_policy(trunk_policy.clone());

        let max_depth = match ctx.max_depth {
            Some(0) => None,
            Some(depth) => Some(depth),
            None => config.max_depth(),
        };

        Ok(Self {
            git,
            config,
            trunk_policy,
            max_depth,
        })
    }

    /// Infer the branch forest, printing inference notes in debug mode.
    ///
    /// Branches are listed once; trunk resolution and inference share that
    /// listing.
    pub(crate) fn infer(&self, ctx: &Context) -> Result<InferResult> {
        let verbosity = ctx.verbosity();

        let listing = self
            .git
            .branch_listing()
            .context("Failed to list branches")?;
        for name in &listing.skipped {
            output::warn(
                format!("skipping branch '{}': unsupported name or target", name),
                verbosity,
            );
        }

        let options = InferOptions {
            max_depth: self.max_depth,
            mainline: self.config.mainline(),
        };
        let trunk = self
            .trunk_policy
            .resolve(&listing.branches)
            .context("Failed to resolve trunk branch")?;
        let result = infer_branches(&self.git, &listing.branches, &trunk, &options)
            .context("Failed to infer branch relationships")?;
        for note in &result.notes {
            output::debug(note, verbosity);
        }
        Ok(result)
    }

    /// The resolved trunk branch.
    pub(crate) fn trunk(&self) -> Result<BranchName> {
        self.git
            .trunk_branch()
            .context("Failed to resolve trunk branch")
    }

    /// Color preference: flag over config.
    pub(crate) fn color(&self, ctx: &Context) -> ColorChoice {
        ctx.color.unwrap_or_else(|| self.config.color())
    }
}
