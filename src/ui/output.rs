//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Results go to stdout and are always printed; they are what the user
//! asked for. Everything else (warnings, inference notes, debug lines)
//! goes to stderr and respects the verbosity flags, so piping the
//! rendered forest never captures diagnostics.

use std::fmt::Display;
use std::io::IsTerminal;

use crate::core::config::ColorChoice;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - results and errors only
    Quiet,
    /// Normal mode - results plus warnings
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a result. Never suppressed.
///
/// `text` is written as-is; rendered trees already end with a newline.
pub fn result(text: impl Display) {
    print!("{}", text);
}

/// Print a result line. Never suppressed.
pub fn line(message: impl Display) {
    println!("{}", message);
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Decide whether stdout output gets ANSI color.
///
/// `auto` colors only a terminal, and only when `NO_COLOR` is unset.
pub fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
