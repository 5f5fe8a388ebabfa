//! forkline binary entry point.

use std::process::ExitCode;

use forkline::ui::output;

fn main() -> ExitCode {
    match forkline::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
