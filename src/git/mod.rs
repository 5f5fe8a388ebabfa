//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. Every repository read flows
//! through this interface, and no other module imports `git2`. The core
//! sees the repository only through the
//! [`CommitGraph`](crate::core::graph::CommitGraph) trait, which [`Git`]
//! implements.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening (bare repositories included)
//! - Local branch listing with tip commits
//! - Commit parent lookup
//!
//! # Invariants
//!
//! - Nothing here writes to the repository
//! - All operations return strong types (Oid, BranchName, BranchRef)

mod interface;

pub use interface::{BranchListing, Git, GitError, RepoInfo};
