//! core::graph
//!
//! Read-only access to the commit graph.
//!
//! # Architecture
//!
//! The inferencer never talks to a repository directly. It receives a
//! [`CommitGraph`] capability exposing three reads:
//! - the local branches and their tip commits
//! - the trunk branch
//! - the parents of a commit
//!
//! [`crate::git::Git`] implements it over libgit2; [`MemoryGraph`]
//! implements it over labelled synthetic commits for tests.
//!
//! # Traversal
//!
//! [`Ancestors`] walks history breadth-first from a start commit, so
//! commits come out nearest-first with their minimal distance. Each call
//! to [`CommitGraph::ancestors`] starts a fresh walk.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use thiserror::Error;

use super::types::{BranchName, BranchRef, Oid, TypeError};

/// Mainline branch names, in trunk lookup order.
pub const DEFAULT_MAINLINE: [&str; 5] = ["main", "master", "develop", "dev", "local-dev"];

/// Errors reading the commit graph.
///
/// All of these are fatal: inference stops and nothing is rendered.
#[derive(Debug, Error)]
pub enum AccessorError {
    /// The underlying store failed while performing `operation`.
    #[error("failed to {operation}: {message}")]
    Read {
        /// What was being read, e.g. "list branches"
        operation: &'static str,
        /// Error reported by the store
        message: String,
    },

    /// A commit referenced by a branch or a parent edge does not exist.
    #[error("commit not found: {0}")]
    MissingCommit(Oid),

    /// The requested trunk branch does not exist.
    #[error("trunk branch '{0}' not found")]
    TrunkNotFound(String),

    /// No trunk was requested and no mainline branch exists.
    #[error("no trunk branch found (looked for: {tried}); pass --trunk or set `trunk` in the repo config")]
    NoTrunk {
        /// Comma-separated candidate names
        tried: String,
    },

    /// The store returned a value that is not a valid name or id.
    #[error("invalid data from repository: {0}")]
    InvalidData(#[from] TypeError),
}

/// Read-only view of a repository's branches and commit graph.
pub trait CommitGraph {
    /// All local branches with their tips, in a deterministic order.
    fn list_branches(&self) -> Result<Vec<BranchRef>, AccessorError>;

    /// The designated trunk branch.
    fn trunk_branch(&self) -> Result<BranchName, AccessorError>;

    /// Parents of a commit. Empty for root commits.
    fn parents(&self, commit: &Oid) -> Result<Vec<Oid>, AccessorError>;

    /// Walk the history of `start`, nearest first, starting with `start`
    /// itself at distance 0.
    ///
    /// With `max_depth = Some(n)` nothing farther than `n` parent edges
    /// from `start` is yielded.
    fn ancestors(&self, start: &Oid, max_depth: Option<usize>) -> Ancestors<'_, Self> {
        Ancestors::new(self, start.clone(), max_depth)
    }
}

/// Lazy breadth-first walk over a commit's history.
///
/// Yields `(commit, distance)` pairs. Each commit is yielded once, at the
/// smallest distance it is reachable at. After the first error the walk
/// ends.
pub struct Ancestors<'g, G: ?Sized> {
    graph: &'g G,
    queue: VecDeque<(Oid, usize)>,
    seen: HashSet<Oid>,
    max_depth: Option<usize>,
    truncated: bool,
    failed: bool,
}

impl<'g, G: CommitGraph + ?Sized> Ancestors<'g, G> {
    fn new(graph: &'g G, start: Oid, max_depth: Option<usize>) -> Self {
        let mut seen = HashSet::new();
        seen.insert(start.clone());
        Self {
            graph,
            queue: VecDeque::from([(start, 0)]),
            seen,
            max_depth,
            truncated: false,
            failed: false,
        }
    }

    /// Whether the walk reached the depth cap and skipped older history.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<G: CommitGraph + ?Sized> Iterator for Ancestors<'_, G> {
    type Item = Result<(Oid, usize), AccessorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (commit, distance) = self.queue.pop_front()?;

        let at_cap = self.max_depth.is_some_and(|max| distance >= max);

        match self.graph.parents(&commit) {
            Ok(parents) if at_cap => {
                self.truncated |= !parents.is_empty();
                Some(Ok((commit, distance)))
            }
            Ok(parents) => {
                for parent in parents {
                    if self.seen.insert(parent.clone()) {
                        self.queue.push_back((parent, distance + 1));
                    }
                }
                Some(Ok((commit, distance)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// How the trunk branch is chosen.
///
/// An explicit name wins; otherwise the first mainline name that exists
/// as a branch is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrunkPolicy {
    /// Trunk requested by flag or config
    pub explicit: Option<BranchName>,
    /// Fallback names, in lookup order
    pub mainline: Vec<BranchName>,
}

impl Default for TrunkPolicy {
    fn default() -> Self {
        Self {
            explicit: None,
            mainline: default_mainline(),
        }
    }
}

impl TrunkPolicy {
    /// Pick the trunk among `branches`.
    ///
    /// # Errors
    ///
    /// - [`AccessorError::TrunkNotFound`] if the explicit trunk is not a branch
    /// - [`AccessorError::NoTrunk`] if no mainline name is a branch
    pub fn resolve(&self, branches: &[BranchRef]) -> Result<BranchName, AccessorError> {
        let exists = |name: &BranchName| branches.iter().any(|b| &b.name == name);

        if let Some(explicit) = &self.explicit {
            return if exists(explicit) {
                Ok(explicit.clone())
            } else {
                Err(AccessorError::TrunkNotFound(explicit.to_string()))
            };
        }

        self.mainline
            .iter()
            .find(|name| exists(name))
            .cloned()
            .ok_or_else(|| AccessorError::NoTrunk {
                tried: self
                    .mainline
                    .iter()
                    .map(BranchName::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// The default mainline names as validated branch names.
pub fn default_mainline() -> Vec<BranchName> {
    DEFAULT_MAINLINE
        .iter()
        .filter_map(|name| BranchName::new(*name).ok())
        .collect()
}

/// An in-memory commit graph built from labelled commits.
///
/// Commit ids are derived from labels with [`Oid::from_label`], so a test
/// can refer to commits as `"M0"` or `"A1"`.
///
/// # Example
///
/// ```
/// use forkline::core::graph::{CommitGraph, MemoryGraph};
/// use forkline::core::types::Oid;
///
/// let mut graph = MemoryGraph::new();
/// graph
///     .commit("M0", &[])
///     .commit("A1", &["M0"])
///     .branch("master", "M0")
///     .unwrap()
///     .branch("feature-A", "A1")
///     .unwrap();
///
/// let history: Vec<_> = graph
///     .ancestors(&Oid::from_label("A1"), None)
///     .map(|step| step.unwrap().1)
///     .collect();
/// assert_eq!(history, vec![0, 1]);
/// assert_eq!(graph.trunk_branch().unwrap().as_str(), "master");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    parents: HashMap<Oid, Vec<Oid>>,
    branches: BTreeMap<BranchName, Oid>,
    trunk: TrunkPolicy,
}

impl MemoryGraph {
    /// Create an empty graph using the default trunk policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a commit with the given parent labels.
    pub fn commit(&mut self, label: &str, parents: &[&str]) -> &mut Self {
        let parents = parents.iter().map(|p| Oid::from_label(p)).collect();
        self.parents.insert(Oid::from_label(label), parents);
        self
    }

    /// Point a branch at a labelled commit, creating or moving it.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` for an invalid name.
    pub fn branch(&mut self, name: &str, tip: &str) -> Result<&mut Self, TypeError> {
        self.branches
            .insert(BranchName::new(name)?, Oid::from_label(tip));
        Ok(self)
    }

    /// Designate the trunk explicitly instead of using mainline lookup.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` for an invalid name.
    pub fn trunk(&mut self, name: &str) -> Result<&mut Self, TypeError> {
        self.trunk.explicit = Some(BranchName::new(name)?);
        Ok(self)
    }
}

impl CommitGraph for MemoryGraph {
    fn list_branches(&self) -> Result<Vec<BranchRef>, AccessorError> {
        Ok(self
            .branches
            .iter()
            .map(|(name, tip)| BranchRef::new(name.clone(), tip.clone()))
            .collect())
    }

    fn trunk_branch(&self) -> Result<BranchName, AccessorError> {
        self.trunk.resolve(&self.list_branches()?)
    }

    fn parents(&self, commit: &Oid) -> Result<Vec<Oid>, AccessorError> {
        self.parents
            .get(commit)
            .cloned()
            .ok_or_else(|| AccessorError::MissingCommit(commit.clone()))
    }
}
