//! core
//!
//! Domain types, the commit graph seam, inference, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, Oid, BranchRef
//! - [`graph`] - Commit graph accessor trait, ancestor walk, in-memory graph
//! - [`infer`] - Branch relationship inference
//! - [`forest`] - The inferred forest (arena of branch nodes)
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - The repository is reached only through [`graph::CommitGraph`]
//! - Inference is deterministic: same graph, same forest

pub mod config;
pub mod forest;
pub mod graph;
pub mod infer;
pub mod types;
