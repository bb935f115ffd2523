//! Pathfinding step generators: Dijkstra and A* on a uniform-cost grid.
//!
//! Both share one frontier loop over [`MinQueue`] with lazy deletion:
//! stale queue entries for already-finalized cells are skipped on pop
//! rather than removed eagerly. A* differs only in its priority,
//! `g + manhattan(goal)`, recomputed fresh at every push.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use algoviz_core::{Grid, Pos, Result, Step, StepSequence};

use crate::queue::MinQueue;

/// What happened at one instant of a pathfinding run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStepKind {
    Init { start: Pos, goal: Pos },
    /// The cell was popped with the smallest priority and finalized.
    Visit { pos: Pos, dist: u32 },
    /// A relaxation improved the best known distance to `pos`.
    Update {
        pos: Pos,
        dist: u32,
        /// Manhattan estimate to the goal (A* only).
        heuristic: Option<u32>,
    },
    /// The goal was popped; `path` runs from start to goal inclusive.
    PathFound { path: Vec<Pos>, distance: u32 },
    /// The frontier emptied without reaching the goal.
    NoPath,
}

/// One snapshot record of a pathfinding run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub kind: PathStepKind,
    pub description: String,
    /// Finalized cells at this instant.
    pub visited: BTreeSet<Pos>,
    /// Best known distances at this instant.
    pub dist: BTreeMap<Pos, u32>,
}

impl Step for PathStep {
    fn is_init(&self) -> bool {
        matches!(self.kind, PathStepKind::Init { .. })
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            PathStepKind::PathFound { .. } | PathStepKind::NoPath
        )
    }

    fn description(&self) -> &str {
        &self.description
    }
}

struct Recorder {
    steps: Vec<PathStep>,
}

impl Recorder {
    fn push(
        &mut self,
        kind: PathStepKind,
        description: String,
        visited: &BTreeSet<Pos>,
        dist: &BTreeMap<Pos, u32>,
    ) {
        self.steps.push(PathStep {
            kind,
            description,
            visited: visited.clone(),
            dist: dist.clone(),
        });
    }
}

/// Generate the step sequence of Dijkstra's algorithm from `start` to
/// `goal`. Edge cost is uniformly 1.
pub fn dijkstra(grid: &Grid, start: Pos, goal: Pos) -> Result<StepSequence<PathStep>> {
    search(grid, start, goal, false)
}

/// Generate the step sequence of A* from `start` to `goal`.
///
/// Priority is `g + h` with `h` the Manhattan distance to the goal, which
/// never overestimates on a 4-directional uniform-cost grid, so the found
/// path length equals Dijkstra's.
pub fn astar(grid: &Grid, start: Pos, goal: Pos) -> Result<StepSequence<PathStep>> {
    search(grid, start, goal, true)
}

fn search(grid: &Grid, start: Pos, goal: Pos, heuristic: bool) -> Result<StepSequence<PathStep>> {
    grid.check_endpoint(start)?;
    grid.check_endpoint(goal)?;
    let name = if heuristic { "A*" } else { "Dijkstra" };
    debug!("{name} from {start} to {goal} on {}x{} grid", grid.rows(), grid.cols());

    let mut rec = Recorder { steps: Vec::new() };
    let mut visited: BTreeSet<Pos> = BTreeSet::new();
    let mut dist: BTreeMap<Pos, u32> = BTreeMap::new();
    let mut parents: HashMap<Pos, Pos> = HashMap::new();
    let mut frontier: MinQueue<Pos> = MinQueue::new();

    let estimate = |p: Pos| if heuristic { p.manhattan(goal) } else { 0 };

    dist.insert(start, 0);
    frontier.enqueue(start, estimate(start));

    rec.push(
        PathStepKind::Init { start, goal },
        format!("Starting {name} from {start} to {goal}"),
        &visited,
        &dist,
    );

    while let Some(current) = frontier.dequeue() {
        // Lazy deletion: stale entries for finalized cells are skipped.
        if visited.contains(&current) {
            continue;
        }
        let d = dist[&current];

        if current == goal {
            visited.insert(current);
            let path = reconstruct_path(&parents, start, goal);
            rec.push(
                PathStepKind::PathFound {
                    path: path.clone(),
                    distance: d,
                },
                format!("Path found: {} cells, distance {d}", path.len()),
                &visited,
                &dist,
            );
            // Remaining frontier entries are abandoned.
            return StepSequence::new(rec.steps);
        }

        visited.insert(current);
        rec.push(
            PathStepKind::Visit { pos: current, dist: d },
            format!("Visiting {current} at distance {d}"),
            &visited,
            &dist,
        );

        for neighbor in current.neighbors4() {
            if !grid.is_open(neighbor) || visited.contains(&neighbor) {
                continue;
            }
            let nd = d + 1;
            if dist.get(&neighbor).is_none_or(|&old| nd < old) {
                dist.insert(neighbor, nd);
                parents.insert(neighbor, current);
                let h = if heuristic {
                    Some(neighbor.manhattan(goal))
                } else {
                    None
                };
                frontier.enqueue(neighbor, nd + h.unwrap_or(0));
                rec.push(
                    PathStepKind::Update {
                        pos: neighbor,
                        dist: nd,
                        heuristic: h,
                    },
                    format!("Updated {neighbor} to distance {nd}"),
                    &visited,
                    &dist,
                );
            }
        }
    }

    rec.push(
        PathStepKind::NoPath,
        format!("No path from {start} to {goal}"),
        &visited,
        &dist,
    );
    StepSequence::new(rec.steps)
}

/// Walk parent pointers backward from `goal` to `start`, returning the
/// path including both endpoints.
pub fn reconstruct_path(parents: &HashMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&p) => current = p,
            None => break,
        }
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Error;

    fn terminal_path(seq: &StepSequence<PathStep>) -> Option<(Vec<Pos>, u32)> {
        match &seq.last().kind {
            PathStepKind::PathFound { path, distance } => Some((path.clone(), *distance)),
            _ => None,
        }
    }

    fn explored(seq: &StepSequence<PathStep>) -> usize {
        seq.last().visited.len()
    }

    #[test]
    fn finds_shortest_path_on_open_grid() {
        let grid = Grid::new(4, 4).unwrap();
        let (start, goal) = (Pos::new(0, 0), Pos::new(3, 3));
        for seq in [
            dijkstra(&grid, start, goal).unwrap(),
            astar(&grid, start, goal).unwrap(),
        ] {
            let (path, distance) = terminal_path(&seq).expect("path expected");
            assert_eq!(distance, 6);
            assert_eq!(path.len(), 7);
            assert_eq!(path[0], start);
            assert_eq!(*path.last().unwrap(), goal);
            // Path cells are 4-adjacent.
            for pair in path.windows(2) {
                assert_eq!(pair[0].manhattan(pair[1]), 1);
            }
        }
    }

    #[test]
    fn equal_path_lengths_and_astar_explores_no_more() {
        // Wall forcing a detour.
        let grid = Grid::with_walls(
            5,
            5,
            [Pos::new(1, 1), Pos::new(1, 2), Pos::new(1, 3), Pos::new(2, 3)],
        )
        .unwrap();
        let (start, goal) = (Pos::new(0, 0), Pos::new(4, 4));
        let d = dijkstra(&grid, start, goal).unwrap();
        let a = astar(&grid, start, goal).unwrap();
        let (dp, dd) = terminal_path(&d).unwrap();
        let (ap, ad) = terminal_path(&a).unwrap();
        assert_eq!(dd, ad);
        assert_eq!(dp.len(), ap.len());
        assert!(explored(&a) <= explored(&d));
    }

    #[test]
    fn walled_off_goal_yields_no_path() {
        // Goal in a sealed corner.
        let grid = Grid::with_walls(4, 4, [Pos::new(2, 3), Pos::new(3, 2)]).unwrap();
        let (start, goal) = (Pos::new(0, 0), Pos::new(3, 3));
        for seq in [
            dijkstra(&grid, start, goal).unwrap(),
            astar(&grid, start, goal).unwrap(),
        ] {
            assert!(matches!(seq.last().kind, PathStepKind::NoPath));
            assert!(!seq
                .iter()
                .any(|s| matches!(s.kind, PathStepKind::PathFound { .. })));
        }
    }

    #[test]
    fn start_equals_goal_is_trivial() {
        let grid = Grid::new(3, 3).unwrap();
        let p = Pos::new(1, 1);
        let seq = astar(&grid, p, p).unwrap();
        let (path, distance) = terminal_path(&seq).unwrap();
        assert_eq!(path, vec![p]);
        assert_eq!(distance, 0);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn astar_updates_carry_fresh_heuristics() {
        let grid = Grid::new(3, 3).unwrap();
        let goal = Pos::new(2, 2);
        let seq = astar(&grid, Pos::new(0, 0), goal).unwrap();
        for s in seq.iter() {
            if let PathStepKind::Update { pos, heuristic, .. } = s.kind {
                assert_eq!(heuristic, Some(pos.manhattan(goal)));
            }
        }
        // Dijkstra never reports a heuristic.
        let seq = dijkstra(&grid, Pos::new(0, 0), goal).unwrap();
        for s in seq.iter() {
            if let PathStepKind::Update { heuristic, .. } = s.kind {
                assert_eq!(heuristic, None);
            }
        }
    }

    #[test]
    fn reported_distances_match_updates() {
        let grid = Grid::new(4, 4).unwrap();
        let seq = dijkstra(&grid, Pos::new(0, 0), Pos::new(3, 0)).unwrap();
        let (path, distance) = terminal_path(&seq).unwrap();
        assert_eq!(distance as usize, path.len() - 1);
        // Each visit's distance matches its snapshot's map entry.
        for s in seq.iter() {
            if let PathStepKind::Visit { pos, dist } = s.kind {
                assert_eq!(s.dist.get(&pos), Some(&dist));
            }
        }
    }

    #[test]
    fn reconstruct_walks_parent_pointers() {
        let mut parents = HashMap::new();
        parents.insert(Pos::new(0, 1), Pos::new(0, 0));
        parents.insert(Pos::new(0, 2), Pos::new(0, 1));
        let path = reconstruct_path(&parents, Pos::new(0, 0), Pos::new(0, 2));
        assert_eq!(
            path,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)]
        );
    }

    #[test]
    fn invalid_endpoints_fail_fast() {
        let grid = Grid::with_walls(3, 3, [Pos::new(1, 1)]).unwrap();
        assert!(matches!(
            dijkstra(&grid, Pos::new(0, 0), Pos::new(5, 5)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            astar(&grid, Pos::new(1, 1), Pos::new(0, 0)),
            Err(Error::WallEndpoint { .. })
        ));
    }
}
