//! Pathers shared by the unit tests.

use maze_core::{Direction, Grid, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Walks the open passages of a maze grid.
pub(crate) struct GridPather<'a>(pub(crate) &'a Grid);

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.0.passages(p));
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// A grid with every interior wall removed.
pub(crate) fn open_grid(width: i32, height: i32) -> Grid {
    let mut g = Grid::new(width, height);
    for p in g.bounds() {
        g.carve(p, Direction::Right);
        g.carve(p, Direction::Bottom);
    }
    g
}

/// A serpentine corridor: rows joined alternately at the right and left end.
///
/// ```text
/// > > > v
/// v < < <
/// > > > .
/// ```
pub(crate) fn snake_grid(width: i32, height: i32) -> Grid {
    let mut g = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width - 1 {
            g.carve(Point::new(x, y), Direction::Right);
        }
        if y + 1 < height {
            let x = if y % 2 == 0 { width - 1 } else { 0 };
            g.carve(Point::new(x, y), Direction::Bottom);
        }
    }
    g
}
