use std::collections::VecDeque;

use maze_core::Point;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute a multi-source breadth-first search distance map.
    ///
    /// Each step has cost 1. Expansion stops when the distance exceeds
    /// `max_dist`. Returns all reached nodes in visiting order, so costs are
    /// non-decreasing along the slice.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_dist: i32,
    ) -> &[PathNode] {
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_results.clear();

        let mut queue: VecDeque<usize> = VecDeque::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                if self.bfs_map[si] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[si] = 0;
                queue.push_back(si);
                self.bfs_results.push(PathNode { pos: src, cost: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let current_dist = self.bfs_map[ci];
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                let nd = current_dist + 1;
                if nd > max_dist {
                    continue;
                }
                self.bfs_map[ni] = nd;
                queue.push_back(ni);
                self.bfs_results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        &self.bfs_results
    }

    /// Query the BFS distance at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last `bfs_map` call.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{GridPather, open_grid, snake_grid};

    #[test]
    fn distances_along_a_corridor() {
        let g = snake_grid(3, 2);
        let mut pr = PathRange::new(g.bounds());
        let reached = pr.bfs_map(&GridPather(&g), &[Point::new(0, 0)], i32::MAX).len();
        assert_eq!(reached, 6);
        assert_eq!(pr.bfs_at(Point::new(2, 0)), 2);
        assert_eq!(pr.bfs_at(Point::new(0, 1)), 5);
        assert_eq!(pr.bfs_at(Point::new(9, 9)), UNREACHABLE);
    }

    #[test]
    fn results_are_in_distance_order() {
        let g = open_grid(4, 4);
        let mut pr = PathRange::new(g.bounds());
        let results = pr.bfs_map(&GridPather(&g), &[Point::ZERO], i32::MAX);
        assert!(results.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert_eq!(results.last().map(|n| n.cost), Some(6));
    }

    #[test]
    fn max_dist_limits_expansion() {
        let g = open_grid(5, 1);
        let mut pr = PathRange::new(g.bounds());
        let reached = pr.bfs_map(&GridPather(&g), &[Point::ZERO], 2).len();
        assert_eq!(reached, 3);
        assert_eq!(pr.bfs_at(Point::new(3, 0)), UNREACHABLE);
    }

    #[test]
    fn multiple_sources() {
        let g = open_grid(5, 1);
        let mut pr = PathRange::new(g.bounds());
        pr.bfs_map(&GridPather(&g), &[Point::new(0, 0), Point::new(4, 0)], i32::MAX);
        assert_eq!(pr.bfs_at(Point::new(2, 0)), 2);
        assert_eq!(pr.bfs_at(Point::new(3, 0)), 1);
    }
}
