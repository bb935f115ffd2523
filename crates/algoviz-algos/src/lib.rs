//! Step-generating algorithms for the algoviz visualizer.
//!
//! Each generator runs a classic algorithm to completion and returns a
//! fully materialized [`StepSequence`](algoviz_core::StepSequence) of
//! snapshot records — one per observable state transition — instead of
//! merely computing the result:
//!
//! - **Sorting**: [`bubble_sort`], [`insertion_sort`], [`merge_sort`]
//! - **Graph traversal**: [`bfs`], [`dfs`]
//! - **Pathfinding**: [`dijkstra`], [`astar`]
//! - **Tree recursion**: [`preorder`], [`inorder`], [`postorder`]
//!
//! Generators are pure: they own their scratch state, deep-copy every
//! snapshot into the emitted steps, and never mutate caller input. Invalid
//! configuration is rejected up front, never mid-sequence.

pub mod pathfind;
pub mod queue;
pub mod sort;
pub mod traverse;
pub mod treewalk;

pub use pathfind::{astar, dijkstra, reconstruct_path, PathStep, PathStepKind};
pub use queue::{Fifo, MinQueue};
pub use sort::{bubble_sort, insertion_sort, merge_sort, SortStep, SortStepKind};
pub use traverse::{bfs, dfs, TraverseStep, TraverseStepKind};
pub use treewalk::{inorder, postorder, preorder, ChildDir, TreeWalkStep, TreeWalkStepKind};
