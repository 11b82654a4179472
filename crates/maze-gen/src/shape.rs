//! Grid masks for the supported [`Shape`]s.

use maze_core::{Grid, Point};
use maze_paths::PathRange;

use crate::config::{Dimensions, Shape};
use crate::pather::AdjacencyPather;

/// Build a fully walled grid with the cells of `shape` present.
///
/// Every present cell of the result is reachable from every other one
/// through adjacent present cells, so a single depth-first pass can carve
/// all of them.
pub fn shaped_grid(dims: Dimensions, shape: Shape) -> Grid {
    match shape {
        Shape::Rectangle => Grid::new(dims.cols, dims.rows),
        Shape::Radial => {
            let mut grid = Grid::with_mask(dims.cols, dims.rows, radial_mask(dims));
            let dropped = keep_largest_component(&mut grid);
            if grid.present_count() == 0 {
                log::warn!("radial mask left no cells, using the full rectangle");
                return Grid::new(dims.cols, dims.rows);
            }
            log::debug!(
                "radial shape: {} cells kept, {} detached cells dropped",
                grid.present_count(),
                dropped
            );
            grid
        }
    }
}

// A circle of radius min(rows, cols) / 3 around the centre, its edge pushed
// in and out by sin(3θ) over a quarter of the radius.
fn radial_mask(dims: Dimensions) -> impl FnMut(Point) -> bool {
    let centre = Point::cell(dims.rows / 2, dims.cols / 2);
    let radius = f64::from(dims.rows.min(dims.cols)) / 3.0;
    move |p| {
        let dr = f64::from(p.row() - centre.row());
        let dc = f64::from(p.col() - centre.col());
        let angle = dr.atan2(dc);
        dr.hypot(dc) <= radius + (angle * 3.0).sin() * radius / 4.0
    }
}

/// Remove every present cell outside the largest group of mutually
/// adjacent cells (lowest label on ties). Returns how many were removed.
pub(crate) fn keep_largest_component(grid: &mut Grid) -> usize {
    let mut pr = PathRange::new(grid.bounds());
    let count = pr.cc_map_all(&AdjacencyPather::new(grid));

    let mut sizes = vec![0usize; count];
    for p in grid.points() {
        if let Some(label) = pr.cc_at(p) {
            sizes[label] += 1;
        }
    }
    let mut best = 0;
    for (label, &size) in sizes.iter().enumerate() {
        if size > sizes[best] {
            best = label;
        }
    }

    let detached: Vec<Point> = grid
        .points()
        .filter(|&p| pr.cc_at(p) != Some(best))
        .collect();
    for &p in &detached {
        grid.remove(p);
    }
    detached.len()
}
