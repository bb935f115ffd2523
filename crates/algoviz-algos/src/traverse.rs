//! Grid traversal step generators: breadth-first and depth-first search.
//!
//! Both operate on a 4-directional unweighted grid where walls block
//! movement, and visit every reachable open cell exactly once.

use std::collections::BTreeSet;

use log::debug;

use algoviz_core::{Grid, Pos, Result, Step, StepSequence};

use crate::queue::Fifo;

/// What happened at one instant of a traversal run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraverseStepKind {
    Init { start: Pos },
    /// The cell became the current node.
    Visit { pos: Pos },
    /// An unvisited open neighbor was found (and marked visited).
    Discover { pos: Pos, from: Pos },
    /// A probe hit a base case: out of bounds, a wall, or already visited.
    NullNode { pos: Pos },
    /// A depth-first branch returned to its parent.
    Backtrack { pos: Pos },
    Complete { visited: usize },
}

/// One snapshot record of a traversal run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraverseStep {
    pub kind: TraverseStepKind,
    pub description: String,
    /// Deep-copied visited set at this instant.
    pub visited: BTreeSet<Pos>,
    /// Call-stack frame labels (depth-first only; empty for BFS).
    pub stack: Vec<String>,
}

impl Step for TraverseStep {
    fn is_init(&self) -> bool {
        matches!(self.kind, TraverseStepKind::Init { .. })
    }

    fn is_terminal(&self) -> bool {
        matches!(self.kind, TraverseStepKind::Complete { .. })
    }

    fn description(&self) -> &str {
        &self.description
    }
}

struct Recorder {
    steps: Vec<TraverseStep>,
}

impl Recorder {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn push(
        &mut self,
        kind: TraverseStepKind,
        description: String,
        visited: &BTreeSet<Pos>,
        stack: &[String],
    ) {
        self.steps.push(TraverseStep {
            kind,
            description,
            visited: visited.clone(),
            stack: stack.to_vec(),
        });
    }
}

/// Generate the step sequence of a breadth-first traversal from `start`.
///
/// Cells are visited in level order. Each discovery marks the neighbor
/// visited immediately, so no cell can be discovered twice.
pub fn bfs(grid: &Grid, start: Pos) -> Result<StepSequence<TraverseStep>> {
    grid.check_endpoint(start)?;
    debug!("bfs from {start} on {}x{} grid", grid.rows(), grid.cols());

    let mut rec = Recorder::new();
    let mut visited: BTreeSet<Pos> = BTreeSet::new();
    let mut frontier = Fifo::new();

    visited.insert(start);
    frontier.enqueue(start);
    rec.push(
        TraverseStepKind::Init { start },
        format!("Starting BFS at {start}"),
        &visited,
        &[],
    );

    while let Some(current) = frontier.dequeue() {
        rec.push(
            TraverseStepKind::Visit { pos: current },
            format!("Visiting {current}"),
            &visited,
            &[],
        );
        for neighbor in current.neighbors4() {
            if grid.is_open(neighbor) && !visited.contains(&neighbor) {
                visited.insert(neighbor);
                frontier.enqueue(neighbor);
                rec.push(
                    TraverseStepKind::Discover {
                        pos: neighbor,
                        from: current,
                    },
                    format!("Discovered {neighbor} from {current}"),
                    &visited,
                    &[],
                );
            }
        }
    }

    let count = visited.len();
    rec.push(
        TraverseStepKind::Complete { visited: count },
        format!("BFS complete: {count} cells visited"),
        &visited,
        &[],
    );
    StepSequence::new(rec.steps)
}

/// Generate the step sequence of a depth-first traversal from `start`.
///
/// Neighbors are explored in fixed up, down, left, right order. The
/// recursion probes raw neighbor positions, so base cases (out of bounds,
/// wall, already visited) surface as explicit `NullNode` steps at every
/// depth rather than only at the initial call. Every step carries a
/// snapshot of the conceptual call stack.
pub fn dfs(grid: &Grid, start: Pos) -> Result<StepSequence<TraverseStep>> {
    grid.check_endpoint(start)?;
    debug!("dfs from {start} on {}x{} grid", grid.rows(), grid.cols());

    let mut rec = Recorder::new();
    let mut visited: BTreeSet<Pos> = BTreeSet::new();
    let mut stack: Vec<String> = Vec::new();

    rec.push(
        TraverseStepKind::Init { start },
        format!("Starting DFS at {start}"),
        &visited,
        &stack,
    );

    dfs_visit(grid, start, &mut visited, &mut stack, &mut rec);

    let count = visited.len();
    rec.push(
        TraverseStepKind::Complete { visited: count },
        format!("DFS complete: {count} cells visited"),
        &visited,
        &stack,
    );
    StepSequence::new(rec.steps)
}

fn dfs_visit(
    grid: &Grid,
    pos: Pos,
    visited: &mut BTreeSet<Pos>,
    stack: &mut Vec<String>,
    rec: &mut Recorder,
) {
    stack.push(format!("dfs{pos}"));

    if !grid.contains(pos) || grid.is_wall(pos) || visited.contains(&pos) {
        let why = if !grid.contains(pos) {
            "out of bounds"
        } else if grid.is_wall(pos) {
            "wall"
        } else {
            "already visited"
        };
        rec.push(
            TraverseStepKind::NullNode { pos },
            format!("Skipping {pos}: {why}"),
            visited,
            stack,
        );
        stack.pop();
        return;
    }

    visited.insert(pos);
    rec.push(
        TraverseStepKind::Visit { pos },
        format!("Visiting {pos}"),
        visited,
        stack,
    );

    for neighbor in pos.neighbors4() {
        if grid.is_open(neighbor) && !visited.contains(&neighbor) {
            rec.push(
                TraverseStepKind::Discover {
                    pos: neighbor,
                    from: pos,
                },
                format!("Discovered {neighbor} from {pos}"),
                visited,
                stack,
            );
            dfs_visit(grid, neighbor, visited, stack, rec);
            rec.push(
                TraverseStepKind::Backtrack { pos },
                format!("Backtracking to {pos}"),
                visited,
                stack,
            );
        } else {
            // Probe the base case anyway so it is visible in the replay.
            dfs_visit(grid, neighbor, visited, stack, rec);
        }
    }

    stack.pop();
}
