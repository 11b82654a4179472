//! Topology checks over a carved grid.

use std::fmt;

use maze_core::{Direction, Grid};
use maze_paths::PathRange;

use crate::pather::MazePather;

/// Counts describing the passage graph of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Audit {
    /// Present cells.
    pub present: usize,
    /// Open wall pairs between adjacent present cells.
    pub passages: usize,
    /// Connected groups of present cells, following passages.
    pub components: usize,
    /// Adjacent present pairs whose shared wall is open on one side only.
    pub one_sided: usize,
}

impl Audit {
    pub fn of(grid: &Grid) -> Self {
        let mut audit = Audit {
            present: grid.present_count(),
            ..Audit::default()
        };

        for cell in grid.iter() {
            for dir in [Direction::Right, Direction::Bottom] {
                let Some(other) = grid.at(cell.pos() + dir.offset()) else {
                    continue;
                };
                match (cell.has_wall(dir), other.has_wall(dir.opposite())) {
                    (false, false) => audit.passages += 1,
                    (true, true) => {}
                    _ => audit.one_sided += 1,
                }
            }
        }

        let mut pr = PathRange::new(grid.bounds());
        pr.cc_map_all(&MazePather::new(grid));
        let mut labels: Vec<usize> = grid.points().filter_map(|p| pr.cc_at(p)).collect();
        labels.sort_unstable();
        labels.dedup();
        audit.components = labels.len();

        audit
    }

    /// Connected, acyclic and with symmetric walls: a spanning tree over
    /// the present cells. An empty grid counts as perfect.
    pub fn is_perfect(&self) -> bool {
        if self.present == 0 {
            return true;
        }
        self.one_sided == 0 && self.components == 1 && self.passages + 1 == self.present
    }
}

impl fmt::Display for Audit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells, {} passages, {} components, {} one-sided walls",
            self.present, self.passages, self.components, self.one_sided
        )
    }
}
