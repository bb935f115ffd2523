//! **algoviz-core** — Core types for the algoviz step visualizer.
//!
//! This crate provides the foundational types used across the *algoviz*
//! workspace: grid positions, walled grids, owned binary trees, and the
//! [`StepSequence`] container that every step generator produces and the
//! playback engine consumes.

pub mod error;
pub mod grid;
pub mod pos;
pub mod step;
pub mod tree;

pub use error::Error;
pub use grid::Grid;
pub use pos::Pos;
pub use step::{Step, StepSequence};
pub use tree::{NodeLayout, Tree, TreeNode};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
