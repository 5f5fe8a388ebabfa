//! ui::tree
//!
//! Forest rendering.
//!
//! Every root is printed in name order, followed by its subtree drawn
//! with box connectors:
//!
//! ```text
//! (detached) feature-A
//! ├── feature-B
//! │   └── feature-C
//! └── feature-D
//!     └── feature-E
//! master
//! ```
//!
//! The output is a pure function of the forest and the options, so two
//! renders of the same repository state are byte-identical.

use serde::Serialize;

use crate::core::forest::{Forest, ForestNode, NodeRole};
use crate::core::types::BranchName;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

const DETACHED: &str = "(detached)";
const RED: &str = "\x1B[91m";
const RESET: &str = "\x1B[0m";

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap the `(detached)` annotation in bright red
    pub color: bool,
    /// Append short tip ids, fork points and detachment reasons
    pub show_commits: bool,
}

/// Render the forest as text, one line per branch.
///
/// # Example
///
/// ```
/// use forkline::core::graph::MemoryGraph;
/// use forkline::core::infer::{infer, InferOptions};
/// use forkline::ui::tree::{render, RenderOptions};
///
/// let mut graph = MemoryGraph::new();
/// graph
///     .commit("M0", &[])
///     .commit("A1", &["M0"])
///     .branch("master", "M0").unwrap()
///     .branch("feature-A", "A1").unwrap();
///
/// let forest = infer(&graph, &InferOptions::default()).unwrap().forest;
/// assert_eq!(
///     render(&forest, &RenderOptions::default()),
///     "master\n└── feature-A\n"
/// );
/// ```
pub fn render(forest: &Forest, options: &RenderOptions) -> String {
    let mut out = String::new();
    for root in forest.roots() {
        let Some(node) = forest.get(root) else {
            continue;
        };
        if node.detachment().is_some() {
            if options.color {
                out.push_str(RED);
                out.push_str(DETACHED);
                out.push_str(RESET);
            } else {
                out.push_str(DETACHED);
            }
            out.push(' ');
        }
        push_line(&mut out, node, options);
        render_children(forest, root, "", options, &mut out);
    }
    out
}

fn render_children(
    forest: &Forest,
    branch: &BranchName,
    indent: &str,
    options: &RenderOptions,
    out: &mut String,
) {
    let children = forest.children(branch);
    for (i, child) in children.iter().enumerate() {
        let Some(node) = forest.get(child) else {
            continue;
        };
        let last = i + 1 == children.len();

        out.push_str(indent);
        out.push_str(if last { LAST_BRANCH } else { BRANCH });
        push_line(out, node, options);

        let nested = format!("{}{}", indent, if last { SPACE } else { PIPE });
        render_children(forest, child, &nested, options, out);
    }
}

fn push_line(out: &mut String, node: &ForestNode, options: &RenderOptions) {
    out.push_str(node.name().as_str());
    if options.show_commits {
        out.push_str(&format!(" [{}]", node.branch.tip.short(7)));
        match (&node.role, &node.edge) {
            (NodeRole::Nested, Some(edge)) => {
                out.push_str(&format!(" (forked at {})", edge.fork_point.short(7)));
            }
            (NodeRole::Detached(reason), _) => out.push_str(&format!(" ({})", reason)),
            _ => {}
        }
    }
    out.push('\n');
}

// =============================================================================
// JSON
// =============================================================================

/// Serializable view of a forest.
#[derive(Debug, Serialize)]
pub struct ForestView<'a> {
    /// The trunk branch
    pub trunk: &'a str,
    /// Root subtrees, in name order
    pub roots: Vec<NodeView<'a>>,
}

/// Serializable view of one branch and its subtree.
#[derive(Debug, Serialize)]
pub struct NodeView<'a> {
    /// Branch name
    pub name: &'a str,
    /// Full tip commit id
    pub tip: &'a str,
    /// Whether this node is a detached root
    pub detached: bool,
    /// Detachment reason, for detached roots only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Inferred parent, also present on roots whose edge survives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'a str>,
    /// Full fork point commit id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_point: Option<&'a str>,
    /// Child subtrees, in name order
    pub children: Vec<NodeView<'a>>,
}

/// Build the serializable view of a forest.
pub fn view(forest: &Forest) -> ForestView<'_> {
    ForestView {
        trunk: forest.trunk().as_str(),
        roots: forest
            .roots()
            .into_iter()
            .filter_map(|root| node_view(forest, root))
            .collect(),
    }
}

fn node_view<'a>(forest: &'a Forest, branch: &BranchName) -> Option<NodeView<'a>> {
    let node = forest.get(branch)?;
    Some(NodeView {
        name: node.name().as_str(),
        tip: node.branch.tip.as_str(),
        detached: node.detachment().is_some(),
        reason: node.detachment().map(ToString::to_string),
        parent: node.edge.as_ref().map(|e| e.parent.as_str()),
        fork_point: node.edge.as_ref().map(|e| e.fork_point.as_str()),
        children: node
            .children()
            .iter()
            .filter_map(|child| node_view(forest, child))
            .collect(),
    })
}

/// Render the forest as pretty-printed JSON.
pub fn to_json(forest: &Forest) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&view(forest))
}
