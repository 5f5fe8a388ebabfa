//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the **single doorway** to the repository. It only
//! reads: branch tips, commit parents, and repository paths. Errors are
//! normalized into [`GitError`] and, at the [`CommitGraph`] seam, into
//! [`AccessorError`] naming the operation that failed.
//!
//! # Example
//!
//! ```ignore
//! use forkline::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for branch in git.branch_listing()?.branches {
//!     println!("{} {}", branch.name, branch.tip.short(7));
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::graph::{AccessorError, CommitGraph, TrunkPolicy};
use crate::core::types::{BranchName, BranchRef, Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid branch name.
    #[error("invalid branch name: {message}")]
    InvalidBranchName {
        /// Description of the problem
        message: String,
    },

    /// Repository locked or unreadable.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with the object being read.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::ObjectNotFound {
                oid: context.to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Convert into the accessor error the core understands.
    fn into_accessor(self, operation: &'static str) -> AccessorError {
        AccessorError::Read {
            operation,
            message: self.to_string(),
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidBranchName(msg) => GitError::InvalidBranchName { message: msg },
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to .git directory (the repository itself when bare)
    pub git_dir: PathBuf,
    /// Path to working directory, `None` for bare repositories
    pub work_dir: Option<PathBuf>,
}

/// Local branches of a repository.
#[derive(Debug, Clone, Default)]
pub struct BranchListing {
    /// Branches with valid names, sorted by name
    pub branches: Vec<BranchRef>,
    /// Names that were skipped (not UTF-8 or not valid branch names)
    pub skipped: Vec<String>,
}

/// The Git interface.
///
/// Read-only: nothing here writes refs, objects, or the working tree.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// How `trunk_branch` picks the trunk
    trunk: TrunkPolicy,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .field("trunk", &self.trunk)
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository. Bare repositories are accepted.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            repo,
            trunk: TrunkPolicy::default(),
        })
    }

    /// Replace the trunk selection policy.
    pub fn with_trunk_policy(mut self, policy: TrunkPolicy) -> Self {
        self.trunk = policy;
        self
    }

    /// Get repository information (git_dir and work_dir paths).
    pub fn info(&self) -> RepoInfo {
        RepoInfo {
            git_dir: self.repo.path().to_path_buf(),
            work_dir: self.repo.workdir().map(Path::to_path_buf),
        }
    }

    /// Get the working directory, if any.
    pub fn work_dir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// List local branches with their tip commits.
    ///
    /// Branches whose names are not UTF-8 or fail validation are reported
    /// in [`BranchListing::skipped`] instead of failing the listing.
    /// Branches not pointing at a commit are skipped the same way.
    pub fn branch_listing(&self) -> Result<BranchListing, GitError> {
        let branches = self.repo.branches(Some(git2::BranchType::Local))?;

        let mut listing = BranchListing::default();
        for branch in branches {
            let (branch, _) = branch?;

            let name = match branch.name() {
                Ok(Some(name)) => name.to_string(),
                _ => {
                    let raw = branch.name_bytes().map(String::from_utf8_lossy)?;
                    listing.skipped.push(raw.into_owned());
                    continue;
                }
            };

            let tip = match branch.get().peel_to_commit() {
                Ok(commit) => commit.id(),
                Err(_) => {
                    listing.skipped.push(name);
                    continue;
                }
            };

            match BranchName::new(name.as_str()) {
                Ok(branch_name) => listing
                    .branches
                    .push(BranchRef::new(branch_name, Oid::new(tip.to_string())?)),
                Err(_) => listing.skipped.push(name),
            }
        }

        listing.branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listing)
    }

    /// Get the parent OIDs of a commit.
    ///
    /// Returns empty vec for root commits, multiple OIDs for merge commits.
    pub fn commit_parents(&self, oid: &Oid) -> Result<Vec<Oid>, GitError> {
        let git_oid =
            git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let commit = self
            .repo
            .find_commit(git_oid)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        commit
            .parent_ids()
            .map(|id| Oid::new(id.to_string()).map_err(GitError::from))
            .collect()
    }

    /// Check if `ancestor` is an ancestor of `descendant` (or the same commit).
    pub fn is_ancestor(&self, ancestor: &Oid, descendant: &Oid) -> Result<bool, GitError> {
        if ancestor == descendant {
            return Ok(true);
        }

        let ancestor_oid = git2::Oid::from_str(ancestor.as_str())
            .map_err(|e| GitError::from_git2(e, ancestor.as_str()))?;
        let descendant_oid = git2::Oid::from_str(descendant.as_str())
            .map_err(|e| GitError::from_git2(e, descendant.as_str()))?;

        Ok(self
            .repo
            .graph_descendant_of(descendant_oid, ancestor_oid)?)
    }
}

impl CommitGraph for Git {
    fn list_branches(&self) -> Result<Vec<BranchRef>, AccessorError> {
        self.branch_listing()
            .map(|listing| listing.branches)
            .map_err(|e| e.into_accessor("list branches"))
    }

    fn trunk_branch(&self) -> Result<BranchName, AccessorError> {
        self.trunk.resolve(&self.list_branches()?)
    }

    fn parents(&self, commit: &Oid) -> Result<Vec<Oid>, AccessorError> {
        self.commit_parents(commit).map_err(|e| match e {
            GitError::ObjectNotFound { .. } => AccessorError::MissingCommit(commit.clone()),
            other => other.into_accessor("read commit parents"),
        })
    }
}
