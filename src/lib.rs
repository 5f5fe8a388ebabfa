//! forkline - Infer and draw the fork structure of local Git branches
//!
//! forkline reads a repository's local branches and commit graph, works
//! out which branch each one was forked from, and draws the result as a
//! forest. Branches whose parent has been rewritten or has moved on since
//! the fork are drawn as separate `(detached)` trees.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, loads config, prints)
//! - [`core`] - Domain types, the commit graph seam, inference and the forest
//! - [`git`] - Single interface for all Git reads
//! - [`ui`] - Output and forest rendering
//!
//! # Guarantees
//!
//! 1. The repository is never modified
//! 2. The same repository state always renders the same bytes
//! 3. The inferred forest never contains a cycle

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
