//! tree command - Draw the inferred branch forest

use super::Session;
use crate::cli::Context;
use crate::ui::output;
use crate::ui::tree::{render, to_json, RenderOptions};
use anyhow::{Context as _, Result};

/// Draw the branch forest.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `long` - Show tip commits, fork points and detachment reasons
/// * `json` - Print JSON instead of the drawn tree
pub fn tree(ctx: &Context, long: bool, json: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    let forest = session.infer(ctx)?.forest;

    if json {
        let text = to_json(&forest).context("Failed to serialize forest")?;
        output::line(text);
        return Ok(());
    }

    let options = RenderOptions {
        color: output::use_color(session.color(ctx)),
        show_commits: long,
    };
    output::result(render(&forest, &options));
    Ok(())
}
