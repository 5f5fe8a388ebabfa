//! core::forest
//!
//! The inferred branch forest.
//!
//! # Architecture
//!
//! The forest is an arena: a flat map from branch name to node, where
//! each node lists its children by name. Edges point from child to parent
//! through the node's [`ForkEdge`]; nothing holds a reference to another
//! node, so rendering and queries walk by name lookup.
//!
//! Roots are:
//! - the trunk
//! - every detached branch (see [`Detachment`] for the reasons)
//! - every mainline branch that would otherwise be detached
//!
//! # Invariants
//!
//! - No branch is its own ancestor. Nested edges always point to a branch
//!   whose tip is a strict ancestor of the child's tip, which the
//!   inferencer guarantees.
//! - Children lists are sorted by name.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use super::types::{BranchName, BranchRef, Oid};

/// A branch's inferred relationship to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkEdge {
    /// The parent branch
    pub parent: BranchName,
    /// Nearest commit of the child's history that is in the parent's history
    pub fork_point: Oid,
    /// Parent edges from the child's tip to the fork point
    pub distance: usize,
}

/// Why a branch is rendered as a detached root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detachment {
    /// The branch shares no commit with any other branch.
    NoCommonHistory,
    /// The parent was rewritten or advanced past the fork point.
    ParentMoved {
        /// The inferred parent
        parent: BranchName,
        /// Where the branch left the parent's history
        fork_point: Oid,
    },
    /// The whole branch is already in the trunk, which has moved on.
    Merged {
        /// The trunk that contains the branch
        into: BranchName,
    },
    /// The branch left shared history at a commit that is no longer any
    /// branch's tip. The branches still sharing that commit are forks of
    /// the same point, so none of them is named as the parent.
    Diverged {
        /// The last commit shared with other branches
        fork_point: Oid,
    },
}

impl std::fmt::Display for Detachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detachment::NoCommonHistory => write!(f, "no common history"),
            Detachment::ParentMoved { parent, fork_point } => {
                write!(f, "{} moved past {}", parent, fork_point.short(7))
            }
            Detachment::Merged { into } => write!(f, "merged into {}", into),
            Detachment::Diverged { fork_point } => {
                write!(f, "diverged at {}", fork_point.short(7))
            }
        }
    }
}

/// Where a node sits in the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRole {
    /// The trunk root.
    Trunk,
    /// Nested under its parent.
    Nested,
    /// A long-lived mainline branch shown as a plain root.
    Mainline,
    /// A detached root.
    Detached(Detachment),
}

/// One branch in the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestNode {
    /// The branch and its tip
    pub branch: BranchRef,
    /// Inferred parent edge, kept even when the branch is a root. Absent
    /// when no branch can be named as the parent.
    pub edge: Option<ForkEdge>,
    /// Position in the forest
    pub role: NodeRole,
    children: Vec<BranchName>,
}

impl ForestNode {
    /// Create a node with no children yet.
    pub fn new(branch: BranchRef, edge: Option<ForkEdge>, role: NodeRole) -> Self {
        Self {
            branch,
            edge,
            role,
            children: Vec::new(),
        }
    }

    /// Branch name.
    pub fn name(&self) -> &BranchName {
        &self.branch.name
    }

    /// Children, sorted by name.
    pub fn children(&self) -> &[BranchName] {
        &self.children
    }

    /// Whether this node is a forest root.
    pub fn is_root(&self) -> bool {
        self.role != NodeRole::Nested
    }

    /// The detachment reason, if this is a detached root.
    pub fn detachment(&self) -> Option<&Detachment> {
        match &self.role {
            NodeRole::Detached(reason) => Some(reason),
            _ => None,
        }
    }
}

/// The branch forest produced by inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest {
    trunk: BranchName,
    nodes: BTreeMap<BranchName, ForestNode>,
}

impl Forest {
    /// Assemble a forest from nodes, linking each nested node under its
    /// parent.
    ///
    /// A nested node whose parent is missing is a programming error; it is
    /// kept in the map but not reachable from any root.
    pub fn from_nodes(trunk: BranchName, nodes: impl IntoIterator<Item = ForestNode>) -> Self {
        let mut nodes: BTreeMap<BranchName, ForestNode> = nodes
            .into_iter()
            .map(|node| (node.name().clone(), node))
            .collect();

        // Map iteration is sorted, so pushes keep children sorted too.
        let links: Vec<(BranchName, BranchName)> = nodes
            .values()
            .filter(|node| node.role == NodeRole::Nested)
            .filter_map(|node| {
                node.edge
                    .as_ref()
                    .map(|edge| (edge.parent.clone(), node.name().clone()))
            })
            .collect();

        for (parent, child) in links {
            if let Some(parent_node) = nodes.get_mut(&parent) {
                parent_node.children.push(child);
            }
        }

        Self { trunk, nodes }
    }

    /// The trunk branch.
    pub fn trunk(&self) -> &BranchName {
        &self.trunk
    }

    /// Look up a node.
    pub fn get(&self, branch: &BranchName) -> Option<&ForestNode> {
        self.nodes.get(branch)
    }

    /// Number of branches in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest has no branches at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All branches, sorted by name.
    pub fn branches(&self) -> impl Iterator<Item = &BranchName> {
        self.nodes.keys()
    }

    /// The inferred edge of a branch, whether or not it is nested.
    pub fn edge(&self, branch: &BranchName) -> Option<&ForkEdge> {
        self.get(branch).and_then(|node| node.edge.as_ref())
    }

    /// The branch this one is nested under. `None` for roots.
    pub fn parent(&self, branch: &BranchName) -> Option<&BranchName> {
        self.get(branch)
            .filter(|node| node.role == NodeRole::Nested)
            .and_then(|node| node.edge.as_ref())
            .map(|edge| &edge.parent)
    }

    /// Children of a branch, sorted by name. Empty for unknown branches.
    pub fn children(&self, branch: &BranchName) -> &[BranchName] {
        self.get(branch).map(ForestNode::children).unwrap_or(&[])
    }

    /// All roots in lexical order.
    pub fn roots(&self) -> Vec<&BranchName> {
        self.nodes
            .values()
            .filter(|node| node.is_root())
            .map(ForestNode::name)
            .collect()
    }

    /// Detached roots in lexical order.
    pub fn detached_roots(&self) -> Vec<&BranchName> {
        self.nodes
            .values()
            .filter(|node| node.detachment().is_some())
            .map(ForestNode::name)
            .collect()
    }

    /// Whether the branch lives in a detached tree (it is a detached root,
    /// or its chain of parents ends at one).
    pub fn is_detached(&self, branch: &BranchName) -> bool {
        let root = self.ancestors(branch).pop().unwrap_or_else(|| branch.clone());
        self.get(&root)
            .is_some_and(|node| node.detachment().is_some())
    }

    /// Parents of a branch from nearest to its root.
    ///
    /// # Example
    ///
    /// ```
    /// use forkline::core::forest::{Forest, ForestNode, ForkEdge, NodeRole};
    /// use forkline::core::types::{BranchName, BranchRef, Oid};
    ///
    /// let name = |n: &str| BranchName::new(n).unwrap();
    /// let node = |n: &str, parent: Option<&str>| {
    ///     let edge = parent.map(|p| ForkEdge {
    ///         parent: name(p),
    ///         fork_point: Oid::from_label(p),
    ///         distance: 1,
    ///     });
    ///     let role = if edge.is_some() { NodeRole::Nested } else { NodeRole::Trunk };
    ///     ForestNode::new(BranchRef::new(name(n), Oid::from_label(n)), edge, role)
    /// };
    ///
    /// let forest = Forest::from_nodes(
    ///     name("main"),
    ///     [node("main", None), node("a", Some("main")), node("b", Some("a"))],
    /// );
    /// assert_eq!(forest.ancestors(&name("b")), vec![name("a"), name("main")]);
    /// ```
    pub fn ancestors(&self, branch: &BranchName) -> Vec<BranchName> {
        let mut result = Vec::new();
        let mut current = self.parent(branch);

        while let Some(parent) = current {
            // Guard against malformed input looping forever.
            if result.contains(parent) {
                break;
            }
            result.push(parent.clone());
            current = self.parent(parent);
        }

        result
    }

    /// Everything nested below a branch (children, grandchildren, ...).
    pub fn descendants(&self, branch: &BranchName) -> BTreeSet<BranchName> {
        let mut result = BTreeSet::new();
        let mut queue: VecDeque<BranchName> = self.children(branch).iter().cloned().collect();

        while let Some(current) = queue.pop_front() {
            if result.insert(current.clone()) {
                queue.extend(self.children(&current).iter().cloned());
            }
        }

        result
    }

    /// Look for a cycle in the nested edges.
    ///
    /// Returns `Some(branch)` for a branch on a cycle. Inference never
    /// produces one; this exists for tests and assertions.
    pub fn find_cycle(&self) -> Option<BranchName> {
        let mut visited = HashSet::new();
        let mut path = HashSet::new();

        self.nodes
            .keys()
            .find(|branch| self.has_cycle_from(*branch, &mut visited, &mut path))
            .cloned()
    }

    fn has_cycle_from<'a>(
        &'a self,
        branch: &'a BranchName,
        visited: &mut HashSet<&'a BranchName>,
        path: &mut HashSet<&'a BranchName>,
    ) -> bool {
        if path.contains(branch) {
            return true;
        }
        if !visited.insert(branch) {
            return false;
        }

        path.insert(branch);
        let cyclic = self
            .parent(branch)
            .is_some_and(|parent| self.has_cycle_from(parent, visited, path));
        path.remove(branch);
        cyclic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: &str) -> BranchName {
        BranchName::new(n).unwrap()
    }

    fn nested(n: &str, parent: &str) -> ForestNode {
        ForestNode::new(
            BranchRef::new(name(n), Oid::from_label(n)),
            Some(ForkEdge {
                parent: name(parent),
                fork_point: Oid::from_label(parent),
                distance: 1,
            }),
            NodeRole::Nested,
        )
    }

    fn root(n: &str, role: NodeRole) -> ForestNode {
        ForestNode::new(BranchRef::new(name(n), Oid::from_label(n)), None, role)
    }

    /// main -> a -> {b -> c, d}; x detached with child y.
    fn sample() -> Forest {
        Forest::from_nodes(
            name("main"),
            [
                root("main", NodeRole::Trunk),
                nested("d", "a"),
                nested("b", "a"),
                nested("a", "main"),
                nested("c", "b"),
                root("x", NodeRole::Detached(Detachment::NoCommonHistory)),
                nested("y", "x"),
            ],
        )
    }

    #[test]
    fn children_are_sorted() {
        let forest = sample();
        assert_eq!(forest.children(&name("a")), &[name("b"), name("d")]);
        assert!(forest.children(&name("c")).is_empty());
        assert!(forest.children(&name("unknown")).is_empty());
    }

    #[test]
    fn roots_are_lexical() {
        let forest = sample();
        assert_eq!(forest.roots(), vec![&name("main"), &name("x")]);
        assert_eq!(forest.detached_roots(), vec![&name("x")]);
    }

    #[test]
    fn parent_is_none_for_roots() {
        let forest = sample();
        assert_eq!(forest.parent(&name("c")), Some(&name("b")));
        assert_eq!(forest.parent(&name("main")), None);
        assert_eq!(forest.parent(&name("x")), None);
    }

    #[test]
    fn edge_survives_on_detached_root() {
        let moved = ForestNode::new(
            BranchRef::new(name("a"), Oid::from_label("A1")),
            Some(ForkEdge {
                parent: name("main"),
                fork_point: Oid::from_label("M0"),
                distance: 1,
            }),
            NodeRole::Detached(Detachment::ParentMoved {
                parent: name("main"),
                fork_point: Oid::from_label("M0"),
            }),
        );
        let forest = Forest::from_nodes(name("main"), [root("main", NodeRole::Trunk), moved]);

        assert_eq!(forest.parent(&name("a")), None);
        assert_eq!(forest.edge(&name("a")).map(|e| &e.parent), Some(&name("main")));
        assert!(forest.children(&name("main")).is_empty());
    }

    #[test]
    fn detachment_reasons_display() {
        let m0 = Oid::from_label("M0");
        let short = m0.short(7).to_string();
        assert_eq!(Detachment::NoCommonHistory.to_string(), "no common history");
        assert_eq!(
            Detachment::ParentMoved {
                parent: name("main"),
                fork_point: m0.clone(),
            }
            .to_string(),
            format!("main moved past {short}")
        );
        assert_eq!(
            Detachment::Merged { into: name("main") }.to_string(),
            "merged into main"
        );
        assert_eq!(
            Detachment::Diverged { fork_point: m0 }.to_string(),
            format!("diverged at {short}")
        );
    }

    #[test]
    fn detached_propagates_to_subtree() {
        let forest = sample();
        assert!(forest.is_detached(&name("x")));
        assert!(forest.is_detached(&name("y")));
        assert!(!forest.is_detached(&name("c")));
        assert!(!forest.is_detached(&name("main")));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let forest = sample();
        assert_eq!(forest.ancestors(&name("c")), vec![name("b"), name("a"), name("main")]);
        assert!(forest.ancestors(&name("main")).is_empty());
    }

    #[test]
    fn descendants_cover_subtree() {
        let forest = sample();
        let below_a: Vec<_> = forest.descendants(&name("a")).into_iter().collect();
        assert_eq!(below_a, vec![name("b"), name("c"), name("d")]);
        assert!(forest.descendants(&name("c")).is_empty());
    }

    #[test]
    fn acyclic_forest_has_no_cycle() {
        assert!(sample().find_cycle().is_none());
    }

    #[test]
    fn cycle_is_detected() {
        let forest = Forest::from_nodes(
            name("main"),
            [root("main", NodeRole::Trunk), nested("p", "q"), nested("q", "p")],
        );
        assert!(forest.find_cycle().is_some());
        assert_eq!(forest.ancestors(&name("p")), vec![name("q"), name("p")]);
    }

    #[test]
    fn mainline_root_is_not_detached() {
        let forest = Forest::from_nodes(
            name("main"),
            [root("main", NodeRole::Trunk), root("develop", NodeRole::Mainline)],
        );
        assert_eq!(forest.roots(), vec![&name("develop"), &name("main")]);
        assert!(forest.detached_roots().is_empty());
        assert!(!forest.is_detached(&name("develop")));
    }
}
