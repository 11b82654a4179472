use std::collections::BinaryHeap;

use maze_core::Point;

use crate::PathRange;
use crate::pathrange::{NodeRef, UNREACHABLE, next_generation};
use crate::traits::WeightedPather;

impl PathRange {
    /// Compute a shortest path from `from` to `to` with Dijkstra's algorithm.
    ///
    /// The search stops as soon as `to` is taken off the open set, or when
    /// the open set is exhausted. Returns the full path (both endpoints
    /// included) or `None` if `to` cannot be reached or either endpoint is
    /// outside the range.
    pub fn dijkstra_path<P: WeightedPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        let cur_gen = next_generation(&mut self.dijkstra_generation, &mut self.dijkstra_nodes);

        {
            let node = &mut self.dijkstra_nodes[start_idx];
            node.g = 0;
            node.f = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.dijkstra_nodes[ci].generation != cur_gen || !self.dijkstra_nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.dijkstra_nodes[ci].open = false;
            let current_g = self.dijkstra_nodes[ci].g;
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + pather.cost(cp, np);

                let n = &mut self.dijkstra_nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }

                n.g = tentative;
                n.f = tentative;
                n.parent = ci;
                n.open = true;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.dijkstra_nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}
