//! Connected-component labelling.

use maze_core::Point;

use crate::PathRange;
use crate::traits::Pather;

impl PathRange {
    /// Label every cell in the range with a connected-component ID and
    /// return the number of components.
    ///
    /// Labels are assigned in row-major order of each component's first
    /// cell. Cells the pather gives no neighbours to end up alone in their
    /// own component. Use [`cc_at`](Self::cc_at) to query labels afterwards.
    pub fn cc_map_all<P: Pather>(&mut self, pather: &P) -> usize {
        self.cc_labels.fill(-1);

        let mut label: i32 = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for start in 0..self.cc_labels.len() {
            if self.cc_labels[start] >= 0 {
                continue;
            }
            self.cc_labels[start] = label;
            self.flood(pather, start, label, &mut nbuf);
            label += 1;
        }

        self.nbuf = nbuf;
        label as usize
    }

    /// Query the connected-component label of a point.
    ///
    /// Returns `None` if the point is outside the range or was not labelled
    /// by the last `cc_map_all` call.
    pub fn cc_at(&self, p: Point) -> Option<usize> {
        let i = self.idx(p)?;
        usize::try_from(self.cc_labels[i]).ok()
    }

    // Iterative DFS; `start` must already be labelled.
    fn flood<P: Pather>(&mut self, pather: &P, start: usize, label: i32, nbuf: &mut Vec<Point>) {
        self.cc_stack.clear();
        self.cc_stack.push(start);

        while let Some(ci) = self.cc_stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.cc_labels[ni] < 0 {
                    self.cc_labels[ni] = label;
                    self.cc_stack.push(ni);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{GridPather, open_grid};
    use maze_core::{Direction, Grid};

    #[test]
    fn fully_walled_grid_has_one_component_per_cell() {
        let g = Grid::new(3, 2);
        let mut pr = PathRange::new(g.bounds());
        assert_eq!(pr.cc_map_all(&GridPather(&g)), 6);
        assert_eq!(pr.cc_at(Point::new(0, 0)), Some(0));
        assert_eq!(pr.cc_at(Point::new(2, 1)), Some(5));
    }

    #[test]
    fn open_grid_is_one_component() {
        let g = open_grid(4, 3);
        let mut pr = PathRange::new(g.bounds());
        assert_eq!(pr.cc_map_all(&GridPather(&g)), 1);
        assert!(g.bounds().iter().all(|p| pr.cc_at(p) == Some(0)));
    }

    #[test]
    fn two_halves() {
        // Left column joined vertically, right column joined vertically.
        let mut g = Grid::new(2, 2);
        g.carve(Point::new(0, 0), Direction::Bottom);
        g.carve(Point::new(1, 0), Direction::Bottom);
        let mut pr = PathRange::new(g.bounds());
        assert_eq!(pr.cc_map_all(&GridPather(&g)), 2);
        assert_eq!(pr.cc_at(Point::new(0, 1)), Some(0));
        assert_eq!(pr.cc_at(Point::new(1, 1)), Some(1));
        assert_eq!(pr.cc_at(Point::new(0, 0)), pr.cc_at(Point::new(0, 1)));
    }

    #[test]
    fn cc_at_outside_range_is_none() {
        let g = open_grid(2, 2);
        let mut pr = PathRange::new(g.bounds());
        pr.cc_map_all(&GridPather(&g));
        assert_eq!(pr.cc_at(Point::new(5, 5)), None);
    }
}
