//! Adapters letting the search engine walk a maze [`Grid`].

use maze_core::{Grid, Point};
use maze_paths::{AstarPather, PathRange, Pather, WeightedPather, manhattan};

/// Shortest passage path from `from` to `to`, both included, or an empty
/// vector when they are not connected.
pub fn shortest_path(grid: &Grid, from: Point, to: Point) -> Vec<Point> {
    PathRange::new(grid.bounds())
        .dijkstra_path(&MazePather::new(grid), from, to)
        .unwrap_or_default()
}

/// Follows open passages. Every step costs 1 and the A* estimate is the
/// Manhattan distance, which never overestimates on a unit grid.
#[derive(Clone, Copy)]
pub struct MazePather<'a> {
    grid: &'a Grid,
}

impl<'a> MazePather<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl Pather for MazePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.grid.passages(p));
    }
}

impl WeightedPather for MazePather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for MazePather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// Ignores walls: any two adjacent present cells are connected. Used to
/// find which cells a shape leaves reachable at all.
#[derive(Clone, Copy)]
pub struct AdjacencyPather<'a> {
    grid: &'a Grid,
}

impl<'a> AdjacencyPather<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl Pather for AdjacencyPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if self.grid.is_present(p) {
            buf.extend(self.grid.neighbors(p, |_, _| true).map(|(n, _)| n));
        }
    }
}
