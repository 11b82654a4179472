//! Entrance and exit placement.
//!
//! Each attempt proposes a start and an end cell according to the
//! [`ExitPolicy`], opens one exterior wall on each and checks that the two
//! are connected. A failed attempt rebuilds the walls it opened. Once the
//! retry budget is spent (or the policy has no candidates) a straight
//! vertical corridor is forced open instead, which always succeeds on a grid
//! with at least one present cell.

use maze_core::{Direction, Grid, Point};
use maze_paths::{PathRange, UNREACHABLE};
use rand::Rng;

use crate::config::ExitPolicy;
use crate::pather::{MazePather, shortest_path};

/// The two openings of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exits {
    pub start: Point,
    /// Exterior side opened on the start cell.
    pub start_side: Direction,
    pub end: Point,
    /// Exterior side opened on the end cell.
    pub end_side: Direction,
}

/// Result of [`place_exits`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// `None` only when the grid has no present cells.
    pub exits: Option<Exits>,
    /// Start to end inclusive; empty only when `exits` is `None`.
    pub solution: Vec<Point>,
    /// Policy attempts made.
    pub attempts: u32,
    /// Whether the corridor fallback was used.
    pub forced: bool,
}

/// Choose, open and validate an entrance/exit pair on a carved grid.
pub fn place_exits(
    grid: &mut Grid,
    policy: ExitPolicy,
    retries: u32,
    rng: &mut impl Rng,
) -> Placement {
    if grid.present_count() == 0 {
        log::debug!("no present cells, leaving the maze without exits");
        return Placement::default();
    }

    let mut attempts = 0;
    while attempts < retries {
        let Some(exits) = propose(grid, policy, rng) else {
            log::warn!("{policy} policy found no candidate cells");
            break;
        };
        attempts += 1;

        open(grid, &exits);
        let solution = shortest_path(grid, exits.start, exits.end);
        if !solution.is_empty() {
            log::debug!(
                "exits {} -> {} after {} attempt(s), solution length {}",
                exits.start,
                exits.end,
                attempts,
                solution.len()
            );
            return Placement {
                exits: Some(exits),
                solution,
                attempts,
                forced: false,
            };
        }

        log::warn!(
            "attempt {}: {} and {} are not connected",
            attempts,
            exits.start,
            exits.end
        );
        close(grid, &exits);
    }

    let exits = force_corridor(grid);
    let solution = match exits {
        Some(e) => shortest_path(grid, e.start, e.end),
        None => Vec::new(),
    };
    if let Some(e) = exits {
        log::info!(
            "forced a corridor from {} to {} after {} attempt(s)",
            e.start,
            e.end,
            attempts
        );
    }
    Placement {
        exits,
        solution,
        attempts,
        forced: true,
    }
}

fn propose(grid: &Grid, policy: ExitPolicy, rng: &mut impl Rng) -> Option<Exits> {
    match policy {
        ExitPolicy::TopBottom => propose_top_bottom(grid, rng),
        ExitPolicy::Boundary => propose_boundary(grid, rng),
    }
}

// Start anywhere on the topmost occupied row, end on the bottommost occupied
// row as far away column-wise as possible.
fn propose_top_bottom(grid: &Grid, rng: &mut impl Rng) -> Option<Exits> {
    let top_row = grid.points().next()?.row();
    let bottom_row = grid.points().last()?.row();

    let top: Vec<Point> = grid.points().filter(|p| p.row() == top_row).collect();
    let start = top[rng.random_range(0..top.len())];

    let mut end = None;
    let mut best = -1;
    for p in grid.points().filter(|p| p.row() == bottom_row) {
        let d = (p.col() - start.col()).abs();
        if d > best {
            best = d;
            end = Some(p);
        }
    }

    Some(Exits {
        start,
        start_side: Direction::Top,
        end: end?,
        end_side: Direction::Bottom,
    })
}

// Start anywhere on the outline, end at the outline cell farthest from it.
fn propose_boundary(grid: &Grid, rng: &mut impl Rng) -> Option<Exits> {
    let candidates: Vec<Point> = grid.points().filter(|&p| grid.is_boundary(p)).collect();
    if candidates.is_empty() {
        return None;
    }
    let start = candidates[rng.random_range(0..candidates.len())];

    let mut pr = PathRange::new(grid.bounds());
    pr.bfs_map(&MazePather::new(grid), &[start], i32::MAX);

    let mut end = None;
    let mut best = 0;
    for &p in &candidates {
        let d = pr.bfs_at(p);
        if d != UNREACHABLE && d > best {
            best = d;
            end = Some(p);
        }
    }

    let end = match end {
        Some(p) => p,
        None => {
            let others: Vec<Point> = candidates.iter().copied().filter(|&p| p != start).collect();
            if others.is_empty() {
                start
            } else {
                others[rng.random_range(0..others.len())]
            }
        }
    };

    let start_side = grid.exterior_sides(start).next()?;
    let end_side = if end == start {
        grid.exterior_sides(end)
            .find(|&d| d != start_side)
            .unwrap_or(start_side)
    } else {
        grid.exterior_sides(end).next()?
    };

    Some(Exits {
        start,
        start_side,
        end,
        end_side,
    })
}

fn open(grid: &mut Grid, exits: &Exits) {
    grid.open_exterior(exits.start, exits.start_side);
    grid.open_exterior(exits.end, exits.end_side);
}

fn close(grid: &mut Grid, exits: &Exits) {
    grid.close_exterior(exits.start, exits.start_side);
    grid.close_exterior(exits.end, exits.end_side);
}

/// Knock through the longest vertical run of present cells (leftmost
/// column, then topmost run on ties) and open its two ends.
fn force_corridor(grid: &mut Grid) -> Option<Exits> {
    let (start, end) = longest_vertical_run(grid)?;

    let mut p = start;
    while p != end {
        grid.carve(p, Direction::Bottom);
        p = p + Direction::Bottom.offset();
    }

    let exits = Exits {
        start,
        start_side: Direction::Top,
        end,
        end_side: Direction::Bottom,
    };
    open(grid, &exits);
    Some(exits)
}

fn longest_vertical_run(grid: &Grid) -> Option<(Point, Point)> {
    let mut best: Option<(Point, Point)> = None;
    let mut best_len = 0;

    for col in 0..grid.width() {
        let mut run_start: Option<Point> = None;
        for row in 0..=grid.height() {
            let p = Point::cell(row, col);
            match (grid.is_present(p), run_start) {
                (true, None) => run_start = Some(p),
                (false, Some(s)) => {
                    let len = row - s.row();
                    if len > best_len {
                        best_len = len;
                        best = Some((s, Point::cell(row - 1, col)));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    best
}
