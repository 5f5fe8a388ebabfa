//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing of results, warnings and errors
//! - [`tree`] - Forest rendering as box-drawn text or JSON
//!
//! # Design
//!
//! All terminal output goes through this module so the quiet and debug
//! flags apply uniformly.

pub mod output;
pub mod tree;
