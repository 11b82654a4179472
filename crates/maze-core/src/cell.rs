//! Maze cells: [`Direction`], [`Walls`] and [`Cell`].
//!
//! A cell only stores its identity and its four walls. Search bookkeeping
//! (visited flags, distances, predecessors) belongs to the algorithm running
//! the search, never to the cell.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::geom::Point;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four sides of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Neighbour query order. Changing it changes which neighbour a seeded
    /// generator picks.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Unit offset towards the neighbour on this side.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Self::Top => Point::new(0, -1),
            Self::Right => Point::new(1, 0),
            Self::Bottom => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
        }
    }

    /// The side facing back from the neighbour.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// The wall bit for this side.
    #[inline]
    pub const fn wall(self) -> Walls {
        match self {
            Self::Top => Walls::TOP,
            Self::Right => Walls::RIGHT,
            Self::Bottom => Walls::BOTTOM,
            Self::Left => Walls::LEFT,
        }
    }

    /// Direction from `from` to the orthogonally adjacent `to`, if any.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let d = to - from;
        Self::ALL.into_iter().find(|dir| dir.offset() == d)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Walls
// ---------------------------------------------------------------------------

/// Bitmask of standing walls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls(pub u8);

impl Walls {
    pub const NONE: Self = Self(0);
    pub const TOP: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const BOTTOM: Self = Self(1 << 2);
    pub const LEFT: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    /// Whether this mask contains all bits of `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Mask without the bits of `other`.
    #[inline]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Number of standing walls.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for Walls {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Walls {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A maze cell: a fixed position and the walls still standing around it.
///
/// Walls can only be changed through [`Grid`](crate::Grid), which keeps the
/// two sides of a shared wall in sync.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    walls: Walls,
}

impl Cell {
    /// A fully walled cell at `pos`.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            walls: Walls::ALL,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub const fn col(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Whether the wall on side `dir` is standing.
    #[inline]
    pub const fn has_wall(&self, dir: Direction) -> bool {
        self.walls.contains(dir.wall())
    }

    #[inline]
    pub(crate) fn open(&mut self, dir: Direction) {
        self.walls = self.walls.without(dir.wall());
    }

    #[inline]
    pub(crate) fn close(&mut self, dir: Direction) {
        self.walls = self.walls | dir.wall();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_fully_walled() {
        let c = Cell::new(Point::cell(1, 2));
        assert_eq!(c.row(), 1);
        assert_eq!(c.col(), 2);
        for d in Direction::ALL {
            assert!(c.has_wall(d));
        }
        assert_eq!(c.walls().count(), 4);
    }

    #[test]
    fn open_and_close_single_side() {
        let mut c = Cell::new(Point::ZERO);
        c.open(Direction::Right);
        assert!(!c.has_wall(Direction::Right));
        assert!(c.has_wall(Direction::Left));
        c.close(Direction::Right);
        assert_eq!(c.walls(), Walls::ALL);
    }

    #[test]
    fn opposite_offsets_cancel() {
        for d in Direction::ALL {
            assert_eq!(d.offset() + d.opposite().offset(), Point::ZERO);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn between_adjacent_points() {
        let a = Point::new(3, 3);
        assert_eq!(Direction::between(a, Point::new(3, 2)), Some(Direction::Top));
        assert_eq!(Direction::between(a, Point::new(2, 3)), Some(Direction::Left));
        assert_eq!(Direction::between(a, Point::new(4, 4)), None);
        assert_eq!(Direction::between(a, a), None);
    }

    #[test]
    fn walls_mask_ops() {
        let w = Walls::TOP | Walls::LEFT;
        assert!(w.contains(Walls::TOP));
        assert!(!w.contains(Walls::RIGHT));
        assert_eq!(w.without(Walls::TOP), Walls::LEFT);
        assert_eq!(w & Walls::LEFT, Walls::LEFT);
        assert!(Walls::NONE.is_empty());
    }
}
