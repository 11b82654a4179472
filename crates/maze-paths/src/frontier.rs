//! Incremental Dijkstra / A* search.
//!
//! A [`Frontier`] runs the same best-first search as
//! [`PathRange::dijkstra_path`](crate::PathRange::dijkstra_path), but hands
//! control back to the caller after every expansion. That lets a UI draw the
//! explored region as it grows, pause between steps, or abandon the search
//! at any point.

use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use maze_core::{Point, Range};

use crate::pathrange::{Node, NodeRef, UNREACHABLE, next_generation, range_index, range_point};
use crate::traits::AstarPather;

/// Which priority a [`Frontier`] orders its open set by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchKind {
    /// Distance from the start only.
    #[default]
    Dijkstra,
    /// Distance from the start plus the pather's estimate to the goal.
    Astar,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dijkstra => f.write_str("dijkstra"),
            Self::Astar => f.write_str("astar"),
        }
    }
}

impl FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::Astar),
            _ => Err(format!("unknown search kind: {s}")),
        }
    }
}

/// Result of a single [`Frontier::expand`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// A cell was taken off the open set and its neighbours relaxed.
    Expanded(Point),
    /// The goal was taken off the open set; [`Frontier::path`] is available.
    Reached,
    /// The open set ran dry (or no search was started) without reaching the
    /// goal.
    Exhausted,
}

/// A best-first search that advances one expansion per call.
///
/// Owns its node array, so it can be kept alive across frames without
/// borrowing the graph it searches: the pather is passed to every
/// [`expand`](Self::expand) call instead.
pub struct Frontier {
    rng: Range,
    width: usize,
    kind: SearchKind,
    nodes: Vec<Node>,
    generation: u32,
    open: BinaryHeap<NodeRef>,
    start: Option<usize>,
    goal: Option<(usize, Point)>,
    outcome: Option<Expansion>,
    nbuf: Vec<Point>,
}

impl Frontier {
    /// Create an idle frontier over `rng`.
    pub fn new(rng: Range, kind: SearchKind) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            kind,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            open: BinaryHeap::new(),
            start: None,
            goal: None,
            outcome: None,
            nbuf: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Drop all search state. Every distance reads as [`UNREACHABLE`]
    /// afterwards and [`expand`](Self::expand) reports
    /// [`Expansion::Exhausted`] until the next [`start`](Self::start).
    pub fn reset(&mut self) {
        next_generation(&mut self.generation, &mut self.nodes);
        self.open.clear();
        self.start = None;
        self.goal = None;
        self.outcome = None;
    }

    /// Begin a new search from `from` to `to`, discarding any previous one.
    ///
    /// Returns `false` (leaving the frontier reset) if either endpoint lies
    /// outside the range.
    pub fn start<P: AstarPather>(&mut self, pather: &P, from: Point, to: Point) -> bool {
        self.reset();
        let (Some(si), Some(gi)) = (self.idx(from), self.idx(to)) else {
            return false;
        };

        let f = self.priority(pather, 0, from, to);
        let node = &mut self.nodes[si];
        node.g = 0;
        node.f = f;
        node.parent = usize::MAX;
        node.generation = self.generation;
        node.open = true;
        self.open.push(NodeRef { idx: si, f });

        self.start = Some(si);
        self.goal = Some((gi, to));
        true
    }

    /// Advance the search by one expansion.
    ///
    /// Once the search has finished, every further call returns the same
    /// final [`Expansion::Reached`] or [`Expansion::Exhausted`].
    pub fn expand<P: AstarPather>(&mut self, pather: &P) -> Expansion {
        if let Some(done) = self.outcome {
            return done;
        }
        let Some((goal_idx, goal)) = self.goal else {
            return Expansion::Exhausted;
        };
        let cur_gen = self.generation;

        let ci = loop {
            let Some(current) = self.open.pop() else {
                self.outcome = Some(Expansion::Exhausted);
                return Expansion::Exhausted;
            };
            let n = &self.nodes[current.idx];
            if n.generation == cur_gen && n.open {
                break current.idx;
            }
        };

        if ci == goal_idx {
            self.outcome = Some(Expansion::Reached);
            return Expansion::Reached;
        }

        self.nodes[ci].open = false;
        let current_g = self.nodes[ci].g;
        let cp = self.point(ci);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            let tentative = current_g + pather.cost(cp, np);
            let f = self.priority(pather, tentative, np, goal);

            let n = &mut self.nodes[ni];
            if n.generation == cur_gen {
                if tentative >= n.g {
                    continue;
                }
            } else {
                n.generation = cur_gen;
            }

            n.g = tentative;
            n.f = f;
            n.parent = ci;
            n.open = true;
            self.open.push(NodeRef { idx: ni, f });
        }

        self.nbuf = nbuf;
        Expansion::Expanded(cp)
    }

    /// Best known distance from the start to `p`, or [`UNREACHABLE`].
    pub fn distance(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) if self.nodes[i].generation == self.generation => self.nodes[i].g,
            _ => UNREACHABLE,
        }
    }

    /// The path from start to goal, both included, once the goal has been
    /// reached.
    pub fn path(&self) -> Option<Vec<Point>> {
        if self.outcome != Some(Expansion::Reached) {
            return None;
        }
        let (goal_idx, _) = self.goal?;
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }

    fn priority<P: AstarPather>(&self, pather: &P, g: i32, p: Point, goal: Point) -> i32 {
        match self.kind {
            SearchKind::Dijkstra => g,
            SearchKind::Astar => g + pather.estimate(p, goal),
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        range_index(self.rng, self.width, p)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        range_point(self.rng, self.width, idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{GridPather, open_grid};
    use maze_core::{Direction, Grid};

    fn run(frontier: &mut Frontier, pather: &GridPather<'_>) -> (Vec<Point>, Expansion) {
        let mut expanded = Vec::new();
        loop {
            match frontier.expand(pather) {
                Expansion::Expanded(p) => expanded.push(p),
                done => return (expanded, done),
            }
        }
    }

    #[test]
    fn dijkstra_expands_everything_closer_than_the_goal() {
        let g = open_grid(5, 5);
        let pather = GridPather(&g);
        let mut f = Frontier::new(g.bounds(), SearchKind::Dijkstra);
        assert!(f.start(&pather, Point::new(0, 0), Point::new(4, 0)));
        let (expanded, done) = run(&mut f, &pather);
        assert_eq!(done, Expansion::Reached);
        assert_eq!(expanded.len(), 10);
        assert_eq!(expanded[0], Point::new(0, 0));
        assert_eq!(f.path().map(|p| p.len()), Some(5));
        assert_eq!(f.distance(Point::new(4, 0)), 4);
    }

    #[test]
    fn astar_heads_straight_for_the_goal() {
        let g = open_grid(5, 5);
        let pather = GridPather(&g);
        let mut f = Frontier::new(g.bounds(), SearchKind::Astar);
        assert!(f.start(&pather, Point::new(0, 0), Point::new(4, 0)));
        let (expanded, done) = run(&mut f, &pather);
        assert_eq!(done, Expansion::Reached);
        assert_eq!(
            expanded,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
        assert_eq!(
            f.path(),
            Some(vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
                Point::new(4, 0),
            ])
        );
    }

    #[test]
    fn exhausts_when_goal_is_walled_off() {
        let mut g = Grid::new(3, 1);
        g.carve(Point::new(0, 0), Direction::Right);
        let pather = GridPather(&g);
        let mut f = Frontier::new(g.bounds(), SearchKind::Dijkstra);
        assert!(f.start(&pather, Point::new(0, 0), Point::new(2, 0)));
        let (expanded, done) = run(&mut f, &pather);
        assert_eq!(expanded.len(), 2);
        assert_eq!(done, Expansion::Exhausted);
        assert_eq!(f.expand(&pather), Expansion::Exhausted);
        assert_eq!(f.path(), None);
    }

    #[test]
    fn reset_forgets_the_search() {
        let g = open_grid(3, 3);
        let pather = GridPather(&g);
        let mut f = Frontier::new(g.bounds(), SearchKind::Dijkstra);
        f.start(&pather, Point::new(0, 0), Point::new(2, 2));
        f.expand(&pather);
        assert_eq!(f.distance(Point::new(1, 0)), 1);

        f.reset();
        assert_eq!(f.distance(Point::new(0, 0)), UNREACHABLE);
        assert_eq!(f.distance(Point::new(1, 0)), UNREACHABLE);
        assert_eq!(f.expand(&pather), Expansion::Exhausted);
        assert_eq!(f.path(), None);
    }

    #[test]
    fn start_outside_range_is_rejected() {
        let g = open_grid(2, 2);
        let pather = GridPather(&g);
        let mut f = Frontier::new(g.bounds(), SearchKind::Astar);
        assert!(!f.start(&pather, Point::new(0, 0), Point::new(7, 7)));
        assert_eq!(f.expand(&pather), Expansion::Exhausted);
    }

    #[test]
    fn start_equals_goal() {
        let g = Grid::new(2, 2);
        let pather = GridPather(&g);
        let mut f = Frontier::new(g.bounds(), SearchKind::Dijkstra);
        f.start(&pather, Point::ZERO, Point::ZERO);
        assert_eq!(f.expand(&pather), Expansion::Reached);
        assert_eq!(f.path(), Some(vec![Point::ZERO]));
    }

    #[test]
    fn search_kind_parses() {
        assert_eq!("A*".parse::<SearchKind>(), Ok(SearchKind::Astar));
        assert_eq!("Dijkstra".parse::<SearchKind>(), Ok(SearchKind::Dijkstra));
        assert!("bfs".parse::<SearchKind>().is_err());
    }
}
