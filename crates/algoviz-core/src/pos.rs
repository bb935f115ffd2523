//! Grid positions.

use std::fmt;
use std::ops::{Add, Sub};

/// A grid cell identified by `(row, col)`. Row grows down, column grows
/// right (screen coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours, in fixed up, down, left, right order.
    ///
    /// Traversal algorithms rely on this order being deterministic.
    #[inline]
    pub fn neighbors4(self) -> [Pos; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row, self.col + 1),
        ]
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    /// Row-major ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Pos::new(1, 2);
        let b = Pos::new(3, 4);
        assert_eq!(a + b, Pos::new(4, 6));
        assert_eq!(b - a, Pos::new(2, 2));
    }

    #[test]
    fn neighbor_order_is_up_down_left_right() {
        let p = Pos::new(5, 5);
        assert_eq!(
            p.neighbors4(),
            [
                Pos::new(4, 5),
                Pos::new(6, 5),
                Pos::new(5, 4),
                Pos::new(5, 6),
            ]
        );
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(3, 4)), 7);
        assert_eq!(Pos::new(3, 4).manhattan(Pos::new(0, 0)), 7);
        assert_eq!(Pos::new(2, 2).manhattan(Pos::new(2, 2)), 0);
        assert_eq!(Pos::new(-1, 0).manhattan(Pos::new(1, 0)), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let p = Pos::new(2, 3);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"row":2,"col":3}"#);
        let back: Pos = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn row_major_ordering() {
        let mut v = vec![Pos::new(1, 0), Pos::new(0, 9), Pos::new(0, 0)];
        v.sort();
        assert_eq!(v, vec![Pos::new(0, 0), Pos::new(0, 9), Pos::new(1, 0)]);
    }
}
