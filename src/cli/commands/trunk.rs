//! trunk command - Display the trunk branch

use super::Session;
use crate::cli::Context;
use crate::ui::output;
use anyhow::Result;

/// Display the resolved trunk branch.
///
/// Resolution order: `--trunk`, repo config `trunk`, first existing
/// mainline branch.
pub fn trunk(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    output::line(session.trunk()?);
    Ok(())
}
