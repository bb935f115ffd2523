//! Tree-recursion step generators: preorder, inorder, postorder.
//!
//! The three walks differ only in where the root visit sits relative to
//! the two descents. Every step carries a deep-copied snapshot of the
//! conceptual call stack (frame labels pushed on entry, popped on return)
//! so a viewer can render the recursion, plus the visit order so far.

use log::debug;

use algoviz_core::{Result, Step, StepSequence, Tree, TreeNode};

/// Which child a descent targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChildDir {
    Left,
    Right,
}

/// What happened at one instant of a tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeWalkStepKind {
    Init,
    /// The node's root-visit point was reached.
    Visit { id: usize, value: i64 },
    /// A descent into the `dir` child of node `id` is about to happen.
    Recurse { id: usize, dir: ChildDir },
    /// A descent reached an absent child (`dir` is `None` only when the
    /// whole tree is empty).
    NullNode { dir: Option<ChildDir> },
    /// The node's frame was popped.
    Return { id: usize },
    Complete { order: Vec<i64> },
}

/// One snapshot record of a tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeWalkStep {
    pub kind: TreeWalkStepKind,
    pub description: String,
    /// Active frame labels, outermost first.
    pub call_stack: Vec<String>,
    /// Values visited so far, in visit order.
    pub visited: Vec<i64>,
}

impl Step for TreeWalkStep {
    fn is_init(&self) -> bool {
        matches!(self.kind, TreeWalkStepKind::Init)
    }

    fn is_terminal(&self) -> bool {
        matches!(self.kind, TreeWalkStepKind::Complete { .. })
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Clone, Copy)]
enum Order {
    Pre,
    In,
    Post,
}

impl Order {
    fn name(self) -> &'static str {
        match self {
            Order::Pre => "preorder",
            Order::In => "inorder",
            Order::Post => "postorder",
        }
    }
}

/// Generate the step sequence of a preorder (root, left, right) walk.
pub fn preorder(tree: &Tree) -> Result<StepSequence<TreeWalkStep>> {
    walk_tree(tree, Order::Pre)
}

/// Generate the step sequence of an inorder (left, root, right) walk.
///
/// On a binary-search-tree-shaped input the visit values are ascending.
pub fn inorder(tree: &Tree) -> Result<StepSequence<TreeWalkStep>> {
    walk_tree(tree, Order::In)
}

/// Generate the step sequence of a postorder (left, right, root) walk.
pub fn postorder(tree: &Tree) -> Result<StepSequence<TreeWalkStep>> {
    walk_tree(tree, Order::Post)
}

struct Walker {
    order: Order,
    steps: Vec<TreeWalkStep>,
    stack: Vec<String>,
    visited: Vec<i64>,
}

impl Walker {
    fn record(&mut self, kind: TreeWalkStepKind, description: String) {
        self.steps.push(TreeWalkStep {
            kind,
            description,
            call_stack: self.stack.clone(),
            visited: self.visited.clone(),
        });
    }

    fn walk(&mut self, node: &Option<Box<TreeNode>>, dir: Option<ChildDir>) {
        let name = self.order.name();
        let Some(n) = node else {
            self.stack.push(format!("{name}(null)"));
            self.record(
                TreeWalkStepKind::NullNode { dir },
                "Reached an absent child".to_string(),
            );
            self.stack.pop();
            return;
        };

        self.stack.push(format!("{name}({})", n.value));

        match self.order {
            Order::Pre => {
                self.visit(n);
                self.descend(n, ChildDir::Left);
                self.descend(n, ChildDir::Right);
            }
            Order::In => {
                self.descend(n, ChildDir::Left);
                self.visit(n);
                self.descend(n, ChildDir::Right);
            }
            Order::Post => {
                self.descend(n, ChildDir::Left);
                self.descend(n, ChildDir::Right);
                self.visit(n);
            }
        }

        self.stack.pop();
        self.record(
            TreeWalkStepKind::Return { id: n.id },
            format!("Returning from node {}", n.value),
        );
    }

    fn visit(&mut self, n: &TreeNode) {
        self.visited.push(n.value);
        self.record(
            TreeWalkStepKind::Visit {
                id: n.id,
                value: n.value,
            },
            format!("Visiting node {}", n.value),
        );
    }

    fn descend(&mut self, n: &TreeNode, dir: ChildDir) {
        self.record(
            TreeWalkStepKind::Recurse { id: n.id, dir },
            format!(
                "Recursing {} from node {}",
                match dir {
                    ChildDir::Left => "left",
                    ChildDir::Right => "right",
                },
                n.value
            ),
        );
        let child = match dir {
            ChildDir::Left => &n.left,
            ChildDir::Right => &n.right,
        };
        self.walk(child, Some(dir));
    }
}

fn walk_tree(tree: &Tree, order: Order) -> Result<StepSequence<TreeWalkStep>> {
    tree.validate()?;
    debug!("{} walk over {} nodes", order.name(), tree.node_count());

    let mut walker = Walker {
        order,
        steps: Vec::new(),
        stack: Vec::new(),
        visited: Vec::new(),
    };
    walker.record(
        TreeWalkStepKind::Init,
        format!("Starting {} traversal", order.name()),
    );
    walker.walk(&tree.root, None);

    let order_snapshot = walker.visited.clone();
    walker.record(
        TreeWalkStepKind::Complete {
            order: order_snapshot,
        },
        format!("{} traversal complete", order.name()),
    );
    StepSequence::new(walker.steps)
}
