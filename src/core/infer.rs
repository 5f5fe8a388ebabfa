//! core::infer
//!
//! Branch relationship inference.
//!
//! # Algorithm
//!
//! For every branch B other than trunk:
//!
//! 1. Walk B's history nearest-first (tip at distance 0).
//! 2. For every other branch P, the fork point is the first commit of B's
//!    walk that is also in P's history. Its distance from B's tip ranks P.
//! 3. Candidates whose fork point is B's own tip are skipped: P already
//!    contains B. The trunk is the exception: a trunk containing B is always
//!    a candidate at distance 0, since the trunk is never nested.
//! 4. The nearest candidate wins. Ties prefer, in order: candidates whose
//!    tip *is* the fork point, the trunk when nobody's tip is the fork
//!    point, candidates whose tip is not an ancestor of another tied
//!    candidate, the trunk, and finally the smaller name.
//! 5. If the winner's tip is not the fork point, B becomes a detached root:
//!    - merged, when the winner is the trunk at distance 0;
//!    - parent moved, when the winner is the trunk further back;
//!    - diverged, when the winner is another branch. Such a branch is a
//!      fork of the same commit, not provably B's parent, so no edge is
//!      kept.
//!
//!    Mainline branches become plain roots instead.
//! 6. Without any candidate, B is detached with no common history, or a
//!    plain root if it is a mainline branch.
//!
//! Nested edges therefore always point at a branch whose tip is a strict
//! ancestor of the child's tip (or is the trunk on the same commit), which
//! keeps the forest acyclic without runtime checks.

use std::collections::{BTreeMap, HashMap};

use super::forest::{Detachment, Forest, ForestNode, ForkEdge, NodeRole};
use super::graph::{default_mainline, AccessorError, CommitGraph};
use super::types::{BranchName, BranchRef, Oid};

/// Default cap on how far back each branch's history is walked.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Inference settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferOptions {
    /// Per-branch history walk cap; `None` walks everything
    pub max_depth: Option<usize>,
    /// Long-lived branches never annotated as detached
    pub mainline: Vec<BranchName>,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            mainline: default_mainline(),
        }
    }
}

/// Result of inference.
#[derive(Debug)]
pub struct InferResult {
    /// The branch forest.
    pub forest: Forest,
    /// Diagnostic notes (parent choices, truncated walks).
    pub notes: Vec<String>,
}

/// A branch's walked history.
struct History {
    order: Vec<Oid>,
    distance: HashMap<Oid, usize>,
}

impl History {
    fn contains(&self, commit: &Oid) -> bool {
        self.distance.contains_key(commit)
    }

    /// First commit of this walk that `other` also contains.
    fn fork_point(&self, other: &History) -> Option<(&Oid, usize)> {
        self.order
            .iter()
            .find(|commit| other.contains(commit))
            .and_then(|commit| self.distance.get(commit).map(|d| (commit, *d)))
    }
}

struct Candidate<'a> {
    parent: &'a BranchRef,
    fork_point: Oid,
    distance: usize,
    attached: bool,
}

/// Infer the branch forest from a commit graph.
///
/// # Errors
///
/// Any [`AccessorError`] from the graph is returned as-is; there is no
/// partial result.
///
/// # Example
///
/// ```
/// use forkline::core::graph::MemoryGraph;
/// use forkline::core::infer::{infer, InferOptions};
/// use forkline::core::types::BranchName;
///
/// let mut graph = MemoryGraph::new();
/// graph
///     .commit("M0", &[])
///     .commit("A1", &["M0"])
///     .commit("B1", &["A1"])
///     .branch("master", "M0").unwrap()
///     .branch("feature-A", "A1").unwrap()
///     .branch("feature-B", "B1").unwrap();
///
/// let forest = infer(&graph, &InferOptions::default()).unwrap().forest;
/// let b = BranchName::new("feature-B").unwrap();
/// assert_eq!(forest.parent(&b).unwrap().as_str(), "feature-A");
/// ```
pub fn infer<G: CommitGraph + ?Sized>(
    graph: &G,
    options: &InferOptions,
) -> Result<InferResult, AccessorError> {
    let trunk = graph.trunk_branch()?;
    let branches = graph.list_branches()?;
    infer_branches(graph, &branches, &trunk, options)
}

/// Infer the branch forest from one snapshot of the branch list.
///
/// Callers that already listed the branches pass them here so every step
/// sees the same refs. `trunk` must be one of `branches`.
///
/// # Errors
///
/// [`AccessorError::TrunkNotFound`] if `trunk` is not listed, or any
/// error from walking the graph.
pub fn infer_branches<G: CommitGraph + ?Sized>(
    graph: &G,
    branches: &[BranchRef],
    trunk: &BranchName,
    options: &InferOptions,
) -> Result<InferResult, AccessorError> {
    let mut notes = Vec::new();

    let trunk_ref = branches
        .iter()
        .find(|b| &b.name == trunk)
        .ok_or_else(|| AccessorError::TrunkNotFound(trunk.to_string()))?;

    let mut histories: BTreeMap<&BranchName, History> = BTreeMap::new();
    for branch in branches {
        let (history, truncated) = walk_history(graph, &branch.tip, options.max_depth)?;
        if truncated {
            notes.push(format!(
                "history of {} truncated at {} commits",
                branch.name,
                history.order.len()
            ));
        }
        histories.insert(&branch.name, history);
    }

    let mut nodes = vec![ForestNode::new(trunk_ref.clone(), None, NodeRole::Trunk)];

    for branch in branches.iter().filter(|b| &b.name != trunk) {
        let candidates = candidates_for(branch, branches, &histories, trunk);
        let Some(chosen) = choose(candidates, &histories, trunk) else {
            notes.push(format!("{}: no common history with any branch", branch.name));
            let role = if options.mainline.contains(&branch.name) {
                NodeRole::Mainline
            } else {
                NodeRole::Detached(Detachment::NoCommonHistory)
            };
            nodes.push(ForestNode::new(branch.clone(), None, role));
            continue;
        };

        let is_trunk = &chosen.parent.name == trunk;
        let edge = (chosen.attached || is_trunk).then(|| ForkEdge {
            parent: chosen.parent.name.clone(),
            fork_point: chosen.fork_point.clone(),
            distance: chosen.distance,
        });
        let role = if chosen.attached {
            NodeRole::Nested
        } else if options.mainline.contains(&branch.name) {
            NodeRole::Mainline
        } else if !is_trunk {
            NodeRole::Detached(Detachment::Diverged {
                fork_point: chosen.fork_point.clone(),
            })
        } else if chosen.distance == 0 {
            NodeRole::Detached(Detachment::Merged {
                into: trunk.clone(),
            })
        } else {
            NodeRole::Detached(Detachment::ParentMoved {
                parent: trunk.clone(),
                fork_point: chosen.fork_point.clone(),
            })
        };

        notes.push(match (&edge, &role) {
            (_, NodeRole::Detached(Detachment::Merged { into })) => {
                format!("{}: merged into {}, which moved on", branch.name, into)
            }
            (Some(edge), _) => format!(
                "{}: parent {} at {} ({} commit(s) back){}",
                branch.name,
                edge.parent,
                edge.fork_point.short(7),
                edge.distance,
                if chosen.attached { "" } else { ", parent moved" }
            ),
            (None, _) => format!(
                "{}: diverged at {} ({} commit(s) back), no branch tip there",
                branch.name,
                chosen.fork_point.short(7),
                chosen.distance
            ),
        });
        nodes.push(ForestNode::new(branch.clone(), edge, role));
    }

    Ok(InferResult {
        forest: Forest::from_nodes(trunk.clone(), nodes),
        notes,
    })
}

fn walk_history<G: CommitGraph + ?Sized>(
    graph: &G,
    tip: &Oid,
    max_depth: Option<usize>,
) -> Result<(History, bool), AccessorError> {
    let mut order = Vec::new();
    let mut distance = HashMap::new();

    let mut walk = graph.ancestors(tip, max_depth);
    for step in walk.by_ref() {
        let (commit, d) = step?;
        distance.insert(commit.clone(), d);
        order.push(commit);
    }

    Ok((History { order, distance }, walk.is_truncated()))
}

fn candidates_for<'a>(
    branch: &BranchRef,
    branches: &'a [BranchRef],
    histories: &BTreeMap<&BranchName, History>,
    trunk: &BranchName,
) -> Vec<Candidate<'a>> {
    let Some(own) = histories.get(&branch.name) else {
        return Vec::new();
    };

    branches
        .iter()
        .filter(|parent| parent.name != branch.name)
        .filter_map(|parent| {
            let theirs = histories.get(&parent.name)?;
            let (fork_point, distance) = own.fork_point(theirs)?;
            if distance == 0 && &parent.name != trunk {
                return None;
            }
            Some(Candidate {
                parent,
                fork_point: fork_point.clone(),
                distance,
                attached: &parent.tip == fork_point,
            })
        })
        .collect()
}

fn choose<'a>(
    candidates: Vec<Candidate<'a>>,
    histories: &BTreeMap<&BranchName, History>,
    trunk: &BranchName,
) -> Option<Candidate<'a>> {
    let nearest = candidates.iter().map(|c| c.distance).min()?;
    let tied: Vec<Candidate<'a>> = candidates
        .into_iter()
        .filter(|c| c.distance == nearest)
        .collect();

    // A tied candidate is "general" when its tip sits in another tied
    // candidate's history: the other one is more specific.
    let general: Vec<bool> = tied
        .iter()
        .map(|c| {
            tied.iter().any(|other| {
                other.parent.tip != c.parent.tip
                    && histories
                        .get(&other.parent.name)
                        .is_some_and(|h| h.contains(&c.parent.tip))
            })
        })
        .collect();

    let rank = |c: &Candidate<'a>, general: bool| {
        let is_trunk = &c.parent.name == trunk;
        (
            !c.attached,
            !c.attached && !is_trunk,
            general,
            !is_trunk,
            c.parent.name.clone(),
        )
    };

    tied.into_iter()
        .zip(general)
        .min_by_key(|(candidate, general)| rank(candidate, *general))
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::MemoryGraph;

    fn name(n: &str) -> BranchName {
        BranchName::new(n).unwrap()
    }

    fn run(graph: &MemoryGraph) -> Forest {
        infer(graph, &InferOptions::default()).unwrap().forest
    }

    fn parent_of(forest: &Forest, branch: &str) -> Option<String> {
        forest.parent(&name(branch)).map(|p| p.to_string())
    }

    /// master(M0) -> feature-A(A1) -> {feature-B(B1) -> feature-C(C1),
    /// feature-D(D1) -> feature-E(E1)}
    fn nominal() -> MemoryGraph {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["M0"])
            .commit("B1", &["A1"])
            .commit("C1", &["B1"])
            .commit("D1", &["A1"])
            .commit("E1", &["D1"]);
        for (branch, tip) in [
            ("master", "M0"),
            ("feature-A", "A1"),
            ("feature-B", "B1"),
            ("feature-C", "C1"),
            ("feature-D", "D1"),
            ("feature-E", "E1"),
        ] {
            graph.branch(branch, tip).unwrap();
        }
        graph
    }

    mod nominal_scenario {
        use super::*;

        #[test]
        fn parents_follow_fork_structure() {
            let forest = run(&nominal());
            assert_eq!(parent_of(&forest, "feature-A").as_deref(), Some("master"));
            assert_eq!(parent_of(&forest, "feature-B").as_deref(), Some("feature-A"));
            assert_eq!(parent_of(&forest, "feature-C").as_deref(), Some("feature-B"));
            assert_eq!(parent_of(&forest, "feature-D").as_deref(), Some("feature-A"));
            assert_eq!(parent_of(&forest, "feature-E").as_deref(), Some("feature-D"));
        }

        #[test]
        fn trunk_is_the_only_root() {
            let forest = run(&nominal());
            assert_eq!(forest.roots(), vec![&name("master")]);
            assert!(forest.detached_roots().is_empty());
        }

        #[test]
        fn edges_record_fork_point_and_distance() {
            let forest = run(&nominal());
            let edge = forest.edge(&name("feature-C")).unwrap();
            assert_eq!(edge.fork_point, Oid::from_label("B1"));
            assert_eq!(edge.distance, 1);
        }

        #[test]
        fn notes_explain_each_choice() {
            let result = infer(&nominal(), &InferOptions::default()).unwrap();
            assert_eq!(result.notes.len(), 5);
            assert!(result
                .notes
                .iter()
                .any(|n| n.starts_with("feature-B: parent feature-A")));
        }
    }

    #[test]
    fn most_specific_parent_wins_over_trunk() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["M0"])
            .commit("A2", &["A1"])
            .commit("B1", &["A2"])
            .branch("main", "M0")
            .unwrap()
            .branch("a", "A2")
            .unwrap()
            .branch("b", "B1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(parent_of(&forest, "b").as_deref(), Some("a"));
        assert_eq!(parent_of(&forest, "a").as_deref(), Some("main"));
    }

    #[test]
    fn new_trunk_commit_detaches_whole_subtree() {
        let mut graph = nominal();
        graph.commit("M1", &["M0"]).branch("master", "M1").unwrap();

        let forest = run(&graph);
        let a = name("feature-A");
        assert_eq!(forest.detached_roots(), vec![&a]);
        assert_eq!(
            forest.get(&a).unwrap().detachment(),
            Some(&Detachment::ParentMoved {
                parent: name("master"),
                fork_point: Oid::from_label("M0"),
            })
        );
        assert_eq!(parent_of(&forest, "feature-B").as_deref(), Some("feature-A"));
        assert_eq!(parent_of(&forest, "feature-E").as_deref(), Some("feature-D"));
        assert!(forest.is_detached(&name("feature-E")));
        assert!(forest.children(&name("master")).is_empty());
    }

    #[test]
    fn trunk_reset_detaches_child() {
        // Trunk rewritten: X is no longer in master's history.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("X", &["M0"])
            .commit("A1", &["X"])
            .commit("X2", &["M0"])
            .branch("master", "X2")
            .unwrap()
            .branch("a", "A1")
            .unwrap();

        let forest = run(&graph);
        assert!(forest.detached_roots().contains(&&name("a")));
        assert_eq!(forest.edge(&name("a")).unwrap().fork_point, Oid::from_label("M0"));
    }

    #[test]
    fn advanced_non_trunk_parent_leaves_child_diverged() {
        // b forked from a at A1, then a gained A3. From the graph alone a
        // is just another fork of A1, so b is diverged with no edge.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["M0"])
            .commit("A2", &["A1"])
            .commit("B1", &["A2"])
            .commit("A3", &["A1"])
            .branch("main", "M0")
            .unwrap()
            .branch("a", "A3")
            .unwrap()
            .branch("b", "B1")
            .unwrap();

        let forest = run(&graph);
        let b = forest.get(&name("b")).unwrap();
        assert_eq!(
            b.detachment(),
            Some(&Detachment::Diverged {
                fork_point: Oid::from_label("A1"),
            })
        );
        assert!(b.edge.is_none());
        assert_eq!(forest.detached_roots(), vec![&name("a"), &name("b")]);
    }

    #[test]
    fn amended_parent_does_not_name_a_sibling() {
        // feature-A amended from A1 to A1x; B1 and D1 still sit on A1.
        let mut graph = nominal();
        graph
            .commit("A1x", &["M0"])
            .branch("feature-A", "A1x")
            .unwrap();

        let result = infer(&graph, &InferOptions::default()).unwrap();
        let forest = &result.forest;
        let diverged = Detachment::Diverged {
            fork_point: Oid::from_label("A1"),
        };
        for branch in ["feature-B", "feature-D"] {
            let node = forest.get(&name(branch)).unwrap();
            assert_eq!(node.detachment(), Some(&diverged));
            assert!(node.edge.is_none());
        }
        assert_eq!(parent_of(forest, "feature-C").as_deref(), Some("feature-B"));
        assert_eq!(parent_of(forest, "feature-E").as_deref(), Some("feature-D"));
        assert_eq!(parent_of(forest, "feature-A").as_deref(), Some("master"));
        assert!(result
            .notes
            .iter()
            .any(|n| n.starts_with("feature-B: diverged at")));
        assert!(!result.notes.iter().any(|n| n.starts_with("feature-B: parent")));
    }

    #[test]
    fn merged_branch_is_detached_as_merged() {
        // feature-A fast-forwarded into master, which then moved on.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["M0"])
            .commit("M2", &["A1"])
            .branch("master", "M2")
            .unwrap()
            .branch("feature-A", "A1")
            .unwrap();

        let result = infer(&graph, &InferOptions::default()).unwrap();
        let a = result.forest.get(&name("feature-A")).unwrap();
        assert_eq!(
            a.detachment(),
            Some(&Detachment::Merged {
                into: name("master"),
            })
        );
        let edge = a.edge.as_ref().unwrap();
        assert_eq!(edge.parent, name("master"));
        assert_eq!(edge.fork_point, Oid::from_label("A1"));
        assert_eq!(edge.distance, 0);
        assert!(!result.notes.iter().any(|n| n.contains("no common history")));
    }

    #[test]
    fn merged_branch_keeps_unmerged_children() {
        // feature-A is in master; feature-B builds on it and is not.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["M0"])
            .commit("M2", &["A1"])
            .commit("B1", &["A1"])
            .branch("master", "M2")
            .unwrap()
            .branch("feature-A", "A1")
            .unwrap()
            .branch("feature-B", "B1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(parent_of(&forest, "feature-B").as_deref(), Some("feature-A"));
        assert_eq!(forest.detached_roots(), vec![&name("feature-A")]);
        assert!(forest.find_cycle().is_none());
    }

    #[test]
    fn branch_contained_in_another_branch_still_finds_trunk() {
        // a's tip is inside b, and main moved past the fork.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("M1", &["M0"])
            .commit("A1", &["M0"])
            .commit("B1", &["A1"])
            .branch("main", "M1")
            .unwrap()
            .branch("a", "A1")
            .unwrap()
            .branch("b", "B1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(
            forest.get(&name("a")).unwrap().detachment(),
            Some(&Detachment::ParentMoved {
                parent: name("main"),
                fork_point: Oid::from_label("M0"),
            })
        );
        assert_eq!(parent_of(&forest, "b").as_deref(), Some("a"));
    }

    #[test]
    fn amended_parent_falls_back_to_attached_ancestor() {
        // a was amended from A1 to A1x; b still carries A1. Both a and main
        // now fork from b at M0, and main's tip is M0 itself.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["M0"])
            .commit("A1x", &["M0"])
            .commit("B1", &["A1"])
            .branch("main", "M0")
            .unwrap()
            .branch("a", "A1x")
            .unwrap()
            .branch("b", "B1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(parent_of(&forest, "b").as_deref(), Some("main"));
        assert_eq!(parent_of(&forest, "a").as_deref(), Some("main"));
    }

    #[test]
    fn no_common_history_is_detached_without_edge() {
        let mut graph = nominal();
        graph
            .commit("O1", &[])
            .commit("O2", &["O1"])
            .branch("orphan", "O2")
            .unwrap();

        let forest = run(&graph);
        let orphan = forest.get(&name("orphan")).unwrap();
        assert_eq!(orphan.detachment(), Some(&Detachment::NoCommonHistory));
        assert!(orphan.edge.is_none());
        assert!(orphan.children().is_empty());
    }

    #[test]
    fn orphan_children_nest_under_orphan() {
        let mut graph = nominal();
        graph
            .commit("O1", &[])
            .commit("P1", &["O1"])
            .branch("orphan", "O1")
            .unwrap()
            .branch("orphan-child", "P1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(parent_of(&forest, "orphan-child").as_deref(), Some("orphan"));
        assert!(forest.is_detached(&name("orphan-child")));
    }

    #[test]
    fn trunk_only_forest() {
        let mut graph = MemoryGraph::new();
        graph.commit("M0", &[]).branch("main", "M0").unwrap();

        let forest = run(&graph);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.roots(), vec![&name("main")]);
    }

    #[test]
    fn branch_on_trunk_commit_nests_under_trunk() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .branch("main", "M0")
            .unwrap()
            .branch("fresh", "M0")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(parent_of(&forest, "fresh").as_deref(), Some("main"));
        assert_eq!(forest.edge(&name("fresh")).unwrap().distance, 0);
    }

    #[test]
    fn same_commit_siblings_do_not_parent_each_other() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("S1", &["M0"])
            .branch("main", "M0")
            .unwrap()
            .branch("twin-a", "S1")
            .unwrap()
            .branch("twin-b", "S1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(parent_of(&forest, "twin-a").as_deref(), Some("main"));
        assert_eq!(parent_of(&forest, "twin-b").as_deref(), Some("main"));
    }

    #[test]
    fn tie_prefers_trunk_then_name() {
        // "alias" and "main" both sit on M0; "child" forks there.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("C1", &["M0"])
            .branch("main", "M0")
            .unwrap()
            .branch("alias", "M0")
            .unwrap()
            .branch("child", "C1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(parent_of(&forest, "child").as_deref(), Some("main"));
    }

    #[test]
    fn tie_prefers_attached_sibling_parent() {
        // d forks at A1 where a sits; b also contains A1 but is a sibling.
        let forest = run(&nominal());
        assert_eq!(parent_of(&forest, "feature-D").as_deref(), Some("feature-A"));
    }

    #[test]
    fn moved_trunk_beats_diverged_sibling_on_tie() {
        // main moved to M1; x and s both fork from M0, so main and s tie
        // for x and neither tip is the fork point.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("M1", &["M0"])
            .commit("S1", &["M0"])
            .commit("X1", &["M0"])
            .branch("main", "M1")
            .unwrap()
            .branch("s", "S1")
            .unwrap()
            .branch("x", "X1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(
            forest.get(&name("x")).unwrap().detachment(),
            Some(&Detachment::ParentMoved {
                parent: name("main"),
                fork_point: Oid::from_label("M0"),
            })
        );
    }

    #[test]
    fn diverged_siblings_do_not_form_a_cycle() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("M1", &["M0"])
            .commit("X1", &["M0"])
            .commit("Y1", &["M0"])
            .branch("main", "M1")
            .unwrap()
            .branch("x", "X1")
            .unwrap()
            .branch("y", "Y1")
            .unwrap();

        let forest = run(&graph);
        assert!(forest.find_cycle().is_none());
        assert_eq!(forest.detached_roots(), vec![&name("x"), &name("y")]);
    }

    #[test]
    fn mainline_branch_is_a_plain_root() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("M1", &["M0"])
            .commit("D1", &["M0"])
            .branch("main", "M1")
            .unwrap()
            .branch("develop", "D1")
            .unwrap();

        let forest = run(&graph);
        assert_eq!(forest.get(&name("develop")).unwrap().role, NodeRole::Mainline);
        assert!(forest.detached_roots().is_empty());
        assert_eq!(forest.roots(), vec![&name("develop"), &name("main")]);
    }

    #[test]
    fn unrelated_mainline_branch_is_not_detached() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("P0", &[])
            .branch("main", "M0")
            .unwrap()
            .branch("dev", "P0")
            .unwrap();

        let forest = run(&graph);
        let dev = forest.get(&name("dev")).unwrap();
        assert_eq!(dev.role, NodeRole::Mainline);
        assert!(dev.edge.is_none());
        assert!(forest.detached_roots().is_empty());
    }

    #[test]
    fn merge_commits_do_not_create_parentage() {
        // feature merged main's later work in; it still hangs off main at M1.
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("M1", &["M0"])
            .commit("F1", &["M0"])
            .commit("F2", &["F1", "M1"])
            .branch("main", "M1")
            .unwrap()
            .branch("feature", "F2")
            .unwrap();

        let forest = run(&graph);
        let edge = forest.edge(&name("feature")).unwrap();
        assert_eq!(edge.parent, name("main"));
        assert_eq!(edge.fork_point, Oid::from_label("M1"));
        assert_eq!(parent_of(&forest, "feature").as_deref(), Some("main"));
    }

    #[test]
    fn depth_cap_hides_distant_forks() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["M0"])
            .commit("A2", &["A1"])
            .commit("A3", &["A2"])
            .branch("main", "M0")
            .unwrap()
            .branch("deep", "A3")
            .unwrap();

        let options = InferOptions {
            max_depth: Some(2),
            ..Default::default()
        };
        let result = infer(&graph, &options).unwrap();
        assert_eq!(
            result.forest.get(&name("deep")).unwrap().detachment(),
            Some(&Detachment::NoCommonHistory)
        );
        assert!(result.notes.iter().any(|n| n.contains("truncated")));
    }

    #[test]
    fn missing_commit_is_fatal() {
        let mut graph = MemoryGraph::new();
        graph
            .commit("M0", &[])
            .commit("A1", &["lost"])
            .branch("main", "M0")
            .unwrap()
            .branch("a", "A1")
            .unwrap();

        let err = infer(&graph, &InferOptions::default()).unwrap_err();
        assert!(matches!(err, AccessorError::MissingCommit(_)));
    }

    #[test]
    fn explicit_trunk_must_be_a_branch() {
        let mut graph = nominal();
        graph.trunk("release").unwrap();
        let err = infer(&graph, &InferOptions::default()).unwrap_err();
        assert!(matches!(err, AccessorError::TrunkNotFound(_)));
    }

    #[test]
    fn snapshot_inference_matches_listing() {
        let graph = nominal();
        let branches = graph.list_branches().unwrap();
        let options = InferOptions::default();

        let result = infer_branches(&graph, &branches, &name("master"), &options).unwrap();
        assert_eq!(result.forest, run(&graph));

        let err = infer_branches(&graph, &branches[..1], &name("master"), &options).unwrap_err();
        assert!(matches!(err, AccessorError::TrunkNotFound(_)));
    }

    #[test]
    fn inference_is_deterministic() {
        let graph = nominal();
        assert_eq!(run(&graph), run(&graph));
    }
}
