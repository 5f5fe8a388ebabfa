//! parent and children commands - Simple relationship queries

use super::Session;
use crate::cli::Context;
use crate::core::forest::Forest;
use crate::core::types::BranchName;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Print the inferred parent branch name.
///
/// Outputs nothing (exit 0) if the branch is a root. For detached roots
/// the reason is printed in debug mode.
pub fn parent(ctx: &Context, branch: &str) -> Result<()> {
    let session = Session::open(ctx)?;
    let forest = session.infer(ctx)?.forest;
    let branch = known_branch(&forest, branch)?;

    if let Some(parent) = forest.parent(&branch) {
        output::line(parent);
    } else if let Some(reason) = forest.get(&branch).and_then(|n| n.detachment()) {
        output::debug(format!("{} is detached: {}", branch, reason), ctx.verbosity());
    }

    Ok(())
}

/// Print inferred child branch names, one per line.
///
/// Outputs nothing (exit 0) if the branch has no children.
pub fn children(ctx: &Context, branch: &str) -> Result<()> {
    let session = Session::open(ctx)?;
    let forest = session.infer(ctx)?.forest;
    let branch = known_branch(&forest, branch)?;

    let children = forest.children(&branch);
    if !children.is_empty() {
        output::line(output::format_list(children, ""));
    }

    Ok(())
}

fn known_branch(forest: &Forest, name: &str) -> Result<BranchName> {
    let branch = BranchName::new(name).context("Invalid branch name")?;
    if forest.get(&branch).is_none() {
        bail!("branch '{}' not found", branch);
    }
    Ok(branch)
}
