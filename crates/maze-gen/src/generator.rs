//! Randomized depth-first backtracking.

use maze_core::{Direction, Grid, Point};
use rand::Rng;

/// Carve a perfect maze into a fully walled `grid`.
///
/// The walk starts at the first present cell in row-major order (`(0, 0)` on
/// a rectangle) and keeps an explicit stack. At each step it looks at the
/// unvisited present neighbours of the top cell in [`Direction::ALL`] order,
/// picks one uniformly at random, removes the wall pair and pushes it, or
/// pops when there is none. Walls only ever open towards unvisited cells, so
/// the passages form a spanning tree of the start cell's component.
///
/// Returns the number of passages carved.
pub fn carve_backtracker(grid: &mut Grid, rng: &mut impl Rng) -> usize {
    let Some(start) = grid.points().next() else {
        log::debug!("nothing to carve: grid has no present cells");
        return 0;
    };

    let width = grid.width() as usize;
    let idx = |p: Point| p.y as usize * width + p.x as usize;

    let mut visited = vec![false; grid.bounds().len()];
    let mut stack = vec![start];
    let mut choices: Vec<(Point, Direction)> = Vec::with_capacity(4);
    let mut carved = 0;
    visited[idx(start)] = true;

    while let Some(&current) = stack.last() {
        choices.clear();
        choices.extend(grid.neighbors(current, |n, _| !visited[idx(n)]));

        if choices.is_empty() {
            stack.pop();
            continue;
        }

        let (next, dir) = choices[rng.random_range(0..choices.len())];
        grid.carve(current, dir);
        visited[idx(next)] = true;
        stack.push(next);
        carved += 1;
    }

    log::debug!(
        "carved {} passages over {} cells starting at {}",
        carved,
        grid.present_count(),
        start
    );
    carved
}
