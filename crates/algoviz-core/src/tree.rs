//! Owned binary trees for the tree-recursion visualizers.

use std::collections::HashSet;

use crate::error::Error;

/// A binary tree node. Children are exclusively owned, so the shape is
/// always a proper tree (no sharing, no cycles).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    pub id: usize,
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn leaf(id: usize, value: i64) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
        }
    }
}

/// Draw position for one node: `depth` is the row, `col` the inorder index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeLayout {
    pub id: usize,
    pub value: i64,
    pub depth: usize,
    pub col: usize,
}

/// A binary tree with an owned root. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    pub root: Option<Box<TreeNode>>,
}

impl Tree {
    /// The empty tree.
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Wrap an existing root node.
    pub fn with_root(root: TreeNode) -> Self {
        Self {
            root: Some(Box::new(root)),
        }
    }

    /// Build a tree by inserting `values` in order using binary-search-tree
    /// placement. Node ids are assigned sequentially in insertion order.
    /// Duplicate values go right.
    pub fn from_bst_values(values: &[i64]) -> Self {
        let mut tree = Self::empty();
        for (id, &value) in values.iter().enumerate() {
            tree.bst_insert(id, value);
        }
        tree
    }

    fn bst_insert(&mut self, id: usize, value: i64) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            if value < node.value {
                slot = &mut node.left;
            } else {
                slot = &mut node.right;
            }
        }
        *slot = Some(Box::new(TreeNode::leaf(id, value)));
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(node: &Option<Box<TreeNode>>) -> usize {
            match node {
                Some(n) => 1 + count(&n.left) + count(&n.right),
                None => 0,
            }
        }
        count(&self.root)
    }

    /// Check that every node id is unique. A duplicate id means the tree was
    /// assembled by hand inconsistently; reject before generating steps.
    pub fn validate(&self) -> Result<(), Error> {
        fn walk(node: &Option<Box<TreeNode>>, seen: &mut HashSet<usize>) -> Result<(), Error> {
            if let Some(n) = node {
                if !seen.insert(n.id) {
                    return Err(Error::MalformedTree { id: n.id });
                }
                walk(&n.left, seen)?;
                walk(&n.right, seen)?;
            }
            Ok(())
        }
        let mut seen = HashSet::new();
        walk(&self.root, &mut seen)
    }

    /// Compute draw positions: depth is the distance from the root, column
    /// the node's inorder index. Returned in inorder (ascending column).
    pub fn layout(&self) -> Vec<NodeLayout> {
        fn walk(node: &Option<Box<TreeNode>>, depth: usize, out: &mut Vec<NodeLayout>) {
            if let Some(n) = node {
                walk(&n.left, depth + 1, out);
                out.push(NodeLayout {
                    id: n.id,
                    value: n.value,
                    depth,
                    col: out.len(),
                });
                walk(&n.right, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.root, 0, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bst_build_shape() {
        let tree = Tree::from_bst_values(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.node_count(), 7);
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.value, 4);
        assert_eq!(root.left.as_ref().unwrap().value, 2);
        assert_eq!(root.right.as_ref().unwrap().value, 6);
        assert_eq!(root.left.as_ref().unwrap().left.as_ref().unwrap().value, 1);
    }

    #[test]
    fn layout_is_inorder_with_depths() {
        let tree = Tree::from_bst_values(&[2, 1, 3]);
        let layout = tree.layout();
        let values: Vec<i64> = layout.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
        let depths: Vec<usize> = layout.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![1, 0, 1]);
        let cols: Vec<usize> = layout.iter().map(|n| n.col).collect();
        assert_eq!(cols, vec![0, 1, 2]);
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut left = TreeNode::leaf(1, 10);
        left.id = 0; // collide with the root id
        let tree = Tree::with_root(TreeNode {
            id: 0,
            value: 20,
            left: Some(Box::new(left)),
            right: None,
        });
        assert_eq!(tree.validate(), Err(Error::MalformedTree { id: 0 }));
    }

    #[test]
    fn validate_accepts_bst_builds() {
        let tree = Tree::from_bst_values(&[5, 3, 8, 1]);
        assert!(tree.validate().is_ok());
        assert!(Tree::empty().validate().is_ok());
    }

    #[test]
    fn empty_tree() {
        let tree = Tree::empty();
        assert_eq!(tree.node_count(), 0);
        assert!(tree.layout().is_empty());
    }
}
