//! core::types
//!
//! Strong types for branches and commits.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`Oid`] - Commit identifier (hex SHA)
//! - [`BranchRef`] - A branch name paired with its tip commit
//!
//! Invalid values cannot be constructed, so the inferencer and renderer
//! never have to re-check names or ids they receive.
//!
//! # Examples
//!
//! ```
//! use forkline::core::types::{BranchName, BranchRef, Oid};
//!
//! let name = BranchName::new("feature/login").unwrap();
//! let tip = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! let branch = BranchRef::new(name, tip);
//! assert_eq!(branch.tip.short(7), "abc123d");
//!
//! assert!(BranchName::new("bad..name").is_err());
//! assert!(Oid::new("xyz").is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A validated Git branch name.
///
/// Follows `git check-ref-format --branch`: no empty names, no leading
/// `.` or `-`, no trailing `/` or `.lock`, no `..`, `@{` or `//`, no
/// spaces or `~^:\?*[`, no control characters, and not exactly `@`.
///
/// Names order lexically, which is the order the renderer uses for
/// siblings and roots.
///
/// ```
/// use forkline::core::types::BranchName;
///
/// assert!(BranchName::new("feature-A").is_ok());
/// assert!(BranchName::new("user@feature").is_ok());
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` describing the first rule violated.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if let Some(problem) = Self::problem(&name) {
            return Err(TypeError::InvalidBranchName(problem));
        }
        Ok(Self(name))
    }

    fn problem(name: &str) -> Option<String> {
        const FORBIDDEN_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        const FORBIDDEN_SEQUENCES: [&str; 3] = ["..", "@{", "//"];

        if name.is_empty() {
            return Some("branch name cannot be empty".into());
        }
        if name == "@" {
            return Some("branch name cannot be '@' (reserved)".into());
        }
        if let Some(first) = name.chars().next().filter(|c| *c == '.' || *c == '-') {
            return Some(format!("branch name cannot start with '{first}'"));
        }
        if name.ends_with('/') || name.ends_with(".lock") {
            return Some("branch name cannot end with '/' or '.lock'".into());
        }
        if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|s| name.contains(*s)) {
            return Some(format!("branch name cannot contain '{seq}'"));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Some(format!("branch name cannot contain '{c}'"));
        }
        if name.chars().any(|c| c.is_ascii_control()) {
            return Some("branch name cannot contain control characters".into());
        }
        name.split('/')
            .filter(|component| !component.is_empty())
            .find(|component| component.starts_with('.') || component.ends_with(".lock"))
            .map(|component| format!("invalid path component '{component}'"))
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A commit identifier (SHA-1 or SHA-256 hex), normalized to lowercase.
///
/// Ids carry no ordering beyond equality; ancestry is only known by
/// walking the commit graph.
///
/// ```
/// use forkline::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not 40 or 64 hex characters.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid("object id must be hexadecimal".into()));
        }
        Ok(Self(oid))
    }

    /// Derive a stable SHA-256 id from an arbitrary label.
    ///
    /// Used by in-memory commit graphs, where commits are named `"M0"`,
    /// `"A1"` and so on instead of being hashed from content.
    ///
    /// ```
    /// use forkline::core::types::Oid;
    ///
    /// assert_eq!(Oid::from_label("M0"), Oid::from_label("M0"));
    /// assert_ne!(Oid::from_label("M0"), Oid::from_label("M1"));
    /// assert_eq!(Oid::from_label("M0").as_str().len(), 64);
    /// ```
    pub fn from_label(label: &str) -> Self {
        Self(hex::encode(Sha256::digest(label.as_bytes())))
    }

    /// Get the first `len` characters (the whole id if shorter).
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A branch and the commit it currently points to.
///
/// Snapshotted once per invocation; never cached across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name
    pub name: BranchName,
    /// Tip commit
    pub tip: Oid,
}

impl BranchRef {
    /// Pair a branch name with its tip.
    pub fn new(name: BranchName, tip: Oid) -> Self {
        Self { name, tip }
    }
}
