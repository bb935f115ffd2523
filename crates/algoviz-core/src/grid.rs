//! A walled grid for traversal and pathfinding runs.

use std::collections::HashSet;

use rand::{Rng, RngExt};

use crate::error::Error;
use crate::pos::Pos;

/// An implicit `rows × cols` cell space with a set of impassable walls.
///
/// The wall set is fixed for the duration of one algorithm run; generators
/// take the grid by shared reference and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: i32,
    cols: i32,
    walls: HashSet<Pos>,
}

impl Grid {
    /// Create an open grid. Both dimensions must be at least 1.
    pub fn new(rows: i32, cols: i32) -> Result<Self, Error> {
        if rows < 1 || cols < 1 {
            return Err(Error::EmptyGrid { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            walls: HashSet::new(),
        })
    }

    /// Create a grid with an initial wall set. Walls outside the bounds are
    /// rejected.
    pub fn with_walls(
        rows: i32,
        cols: i32,
        walls: impl IntoIterator<Item = Pos>,
    ) -> Result<Self, Error> {
        let mut grid = Self::new(rows, cols)?;
        for w in walls {
            grid.add_wall(w)?;
        }
        Ok(grid)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Mark a cell as a wall.
    pub fn add_wall(&mut self, pos: Pos) -> Result<(), Error> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.walls.insert(pos);
        Ok(())
    }

    /// Whether `pos` lies inside the grid bounds.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Whether `pos` is a wall cell (out-of-bounds positions are not walls).
    #[inline]
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls.contains(&pos)
    }

    /// Whether `pos` is inside the grid and not a wall.
    #[inline]
    pub fn is_open(&self, pos: Pos) -> bool {
        self.contains(pos) && !self.is_wall(pos)
    }

    /// The wall set.
    pub fn walls(&self) -> &HashSet<Pos> {
        &self.walls
    }

    /// Total number of non-wall cells.
    pub fn open_cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize) - self.walls.len()
    }

    /// Row-major iterator over every position in the grid.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    /// Validate an algorithm endpoint: must be in bounds and not a wall.
    pub fn check_endpoint(&self, pos: Pos) -> Result<(), Error> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.is_wall(pos) {
            return Err(Error::WallEndpoint { pos });
        }
        Ok(())
    }

    /// Randomly wall off roughly `fill` (0.0–1.0) of the open cells,
    /// leaving every position in `protect` open.
    ///
    /// Useful for producing demo mazes sized for human-legible animation.
    pub fn scatter_walls(&mut self, rng: &mut impl Rng, fill: f64, protect: &[Pos]) {
        let fill = fill.clamp(0.0, 1.0);
        let candidates: Vec<Pos> = self
            .iter()
            .filter(|p| !self.is_wall(*p) && !protect.contains(p))
            .collect();
        for pos in candidates {
            if rng.random_bool(fill) {
                self.walls.insert(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(Error::EmptyGrid { rows: 0, cols: 5 })
        ));
        assert!(Grid::new(-1, 3).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn walls_block_and_count() {
        let grid = Grid::with_walls(3, 3, [Pos::new(1, 1), Pos::new(0, 2)]).unwrap();
        assert!(grid.is_wall(Pos::new(1, 1)));
        assert!(!grid.is_open(Pos::new(1, 1)));
        assert!(grid.is_open(Pos::new(0, 0)));
        assert_eq!(grid.open_cell_count(), 7);
    }

    #[test]
    fn wall_outside_bounds_rejected() {
        assert!(matches!(
            Grid::with_walls(2, 2, [Pos::new(5, 0)]),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn endpoint_validation() {
        let grid = Grid::with_walls(4, 4, [Pos::new(2, 2)]).unwrap();
        assert!(grid.check_endpoint(Pos::new(0, 0)).is_ok());
        assert!(matches!(
            grid.check_endpoint(Pos::new(2, 2)),
            Err(Error::WallEndpoint { .. })
        ));
        assert!(matches!(
            grid.check_endpoint(Pos::new(4, 0)),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::new(2, 3).unwrap();
        let cells: Vec<Pos> = grid.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Pos::new(0, 0));
        assert_eq!(cells[2], Pos::new(0, 2));
        assert_eq!(cells[3], Pos::new(1, 0));
    }

    #[test]
    fn scatter_walls_respects_protected_cells() {
        let mut grid = Grid::new(6, 6).unwrap();
        let protect = [Pos::new(0, 0), Pos::new(5, 5)];
        let mut rng = rand::rng();
        grid.scatter_walls(&mut rng, 1.0, &protect);
        assert!(grid.is_open(Pos::new(0, 0)));
        assert!(grid.is_open(Pos::new(5, 5)));
        // With fill == 1.0 every unprotected cell is a wall.
        assert_eq!(grid.open_cell_count(), 2);
    }
}
