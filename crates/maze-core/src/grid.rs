//! The maze [`Grid`]: a rows × cols table of optional [`Cell`]s.
//!
//! An absent slot models a cell cut away by a non-rectangular shape. All wall
//! changes go through the grid so that a wall shared by two present cells is
//! always open on both sides or on neither. The only one-sided openings are
//! the ones made with [`open_exterior`](Grid::open_exterior), and those always
//! face outside the maze.

use std::fmt;

use crate::cell::{Cell, Direction};
use crate::geom::{Point, Range};

/// A rectangular table of optional maze cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<Option<Cell>>,
    bounds: Range,
}

impl Grid {
    /// Create a fully walled grid with every cell present.
    ///
    /// `width` is the number of columns, `height` the number of rows.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_mask(width, height, |_| true)
    }

    /// Create a fully walled grid keeping only the cells for which `keep`
    /// returns `true`.
    pub fn with_mask(width: i32, height: i32, mut keep: impl FnMut(Point) -> bool) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        let cells = bounds
            .iter()
            .map(|p| keep(p).then(|| Cell::new(p)))
            .collect();
        Self { cells, bounds }
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is inside the grid bounds (present or not).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.bounds.width() as usize) + (p.x as usize))
    }

    /// The cell at `p`, or `None` if out of bounds or absent.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index(p).and_then(|i| self.cells[i].as_ref())
    }

    #[inline]
    fn at_mut(&mut self, p: Point) -> Option<&mut Cell> {
        match self.index(p) {
            Some(i) => self.cells[i].as_mut(),
            None => None,
        }
    }

    /// Whether a cell is present at `p`.
    #[inline]
    pub fn is_present(&self, p: Point) -> bool {
        self.at(p).is_some()
    }

    /// Cut the cell at `p` away. Neighbour walls facing it are restored so
    /// no opening is left pointing into the hole.
    pub fn remove(&mut self, p: Point) -> Option<Cell> {
        let i = self.index(p)?;
        let removed = self.cells[i].take()?;
        for d in Direction::ALL {
            if let Some(n) = self.at_mut(p + d.offset()) {
                n.close(d.opposite());
            }
        }
        Some(removed)
    }

    /// Number of present cells.
    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major iterator over present cells.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Row-major iterator over the positions of present cells.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        self.iter().map(Cell::pos)
    }

    /// Present neighbours of `p` in [`Direction::ALL`] order, keeping only
    /// those for which `keep(neighbour, direction)` returns `true`.
    ///
    /// Out-of-bounds and absent neighbours are skipped.
    pub fn neighbors<F>(&self, p: Point, keep: F) -> impl Iterator<Item = (Point, Direction)>
    where
        F: Fn(Point, Direction) -> bool,
    {
        Direction::ALL.into_iter().filter_map(move |d| {
            let n = p + d.offset();
            (self.is_present(n) && keep(n, d)).then_some((n, d))
        })
    }

    /// Neighbours reachable from `p` through an open wall.
    pub fn passages(&self, p: Point) -> impl Iterator<Item = Point> {
        let walls = self.at(p).map(Cell::walls);
        self.neighbors(p, move |_, d| walls.is_some_and(|w| !w.contains(d.wall())))
            .map(|(n, _)| n)
    }

    /// Whether `a` and `b` are adjacent and joined by an open wall.
    pub fn has_passage(&self, a: Point, b: Point) -> bool {
        match (Direction::between(a, b), self.at(a)) {
            (Some(d), Some(cell)) => !cell.has_wall(d) && self.is_present(b),
            _ => false,
        }
    }

    /// Remove the wall pair between `p` and its neighbour on side `dir`.
    ///
    /// Returns `false` (and changes nothing) unless both cells are present.
    pub fn carve(&mut self, p: Point, dir: Direction) -> bool {
        let n = p + dir.offset();
        if !self.is_present(p) || !self.is_present(n) {
            return false;
        }
        if let Some(c) = self.at_mut(p) {
            c.open(dir);
        }
        if let Some(c) = self.at_mut(n) {
            c.open(dir.opposite());
        }
        true
    }

    /// Whether side `dir` of the present cell `p` faces outside the maze
    /// (out of bounds or an absent cell).
    pub fn is_exterior(&self, p: Point, dir: Direction) -> bool {
        self.is_present(p) && !self.is_present(p + dir.offset())
    }

    /// Exterior sides of `p` in [`Direction::ALL`] order.
    pub fn exterior_sides(&self, p: Point) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.is_exterior(p, d))
    }

    /// Whether `p` is a present cell with at least one exterior side.
    pub fn is_boundary(&self, p: Point) -> bool {
        self.exterior_sides(p).next().is_some()
    }

    /// Open the exterior wall on side `dir` of `p`. Returns `false` if that
    /// side is not exterior.
    pub fn open_exterior(&mut self, p: Point, dir: Direction) -> bool {
        if !self.is_exterior(p, dir) {
            return false;
        }
        if let Some(c) = self.at_mut(p) {
            c.open(dir);
        }
        true
    }

    /// Rebuild the exterior wall on side `dir` of `p`. Returns `false` if
    /// that side is not exterior.
    pub fn close_exterior(&mut self, p: Point, dir: Direction) -> bool {
        if !self.is_exterior(p, dir) {
            return false;
        }
        if let Some(c) = self.at_mut(p) {
            c.close(dir);
        }
        true
    }
}

/// ASCII rendering: `+` corners, `-`/`|` walls, blanks for absent cells.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = (self.width() * 2 + 1) as usize;
        let h = (self.height() * 2 + 1) as usize;
        let mut canvas = vec![vec![' '; w]; h];
        for cell in self.iter() {
            let x = (cell.col() * 2 + 1) as usize;
            let y = (cell.row() * 2 + 1) as usize;
            for (cx, cy) in [(x - 1, y - 1), (x + 1, y - 1), (x - 1, y + 1), (x + 1, y + 1)] {
                canvas[cy][cx] = '+';
            }
            if cell.has_wall(Direction::Top) {
                canvas[y - 1][x] = '-';
            }
            if cell.has_wall(Direction::Bottom) {
                canvas[y + 1][x] = '-';
            }
            if cell.has_wall(Direction::Left) {
                canvas[y][x - 1] = '|';
            }
            if cell.has_wall(Direction::Right) {
                canvas[y][x + 1] = '|';
            }
        }
        for line in canvas {
            let s: String = line.into_iter().collect();
            writeln!(f, "{}", s.trim_end())?;
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip_keeps_holes_and_walls() {
        let mut g = Grid::with_mask(3, 2, |p| p != Point::new(2, 1));
        g.carve(Point::ZERO, Direction::Bottom);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert!(!back.is_present(Point::new(2, 1)));
    }
}
