//! The animated solver: a shortest-path search that advances one step per
//! call so the host can redraw in between.
//!
//! ```text
//! Idle --solve()--> Running --end traced / open set empty--> Finished
//!                      |
//!                      +--stop()--> Stopped
//! ```
//!
//! `reset()` returns to `Idle` from any state; `solve()` restarts from any
//! state except `Running`.

use std::time::{Duration, Instant};

use maze_core::{Context, Point};
use maze_paths::{Expansion, Frontier, SearchKind, UNREACHABLE};

use crate::maze::Maze;
use crate::pather::MazePather;

/// Lifecycle of a [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverState {
    Idle,
    Running,
    Finished,
    Stopped,
}

/// What a single [`Solver::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A cell was expanded and added to the visited set.
    Expanded(Point),
    /// A cell of the shortest path was added to the path set, walking back
    /// from the end.
    Traced(Point),
    /// The search ran out of candidates without reaching the end.
    Exhausted,
}

/// How a finished solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// `length` cells from start to end, both included.
    Solved { length: usize },
    NoPath,
}

/// Owned copy of the visited and path sets at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Expanded cells, in expansion order.
    pub visited: Vec<Point>,
    /// Traced path cells, from the end backwards.
    pub path: Vec<Point>,
}

/// Borrowed view of the visited and path sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRef<'a> {
    pub visited: &'a [Point],
    pub path: &'a [Point],
}

impl SnapshotRef<'_> {
    pub fn to_snapshot(self) -> Snapshot {
        Snapshot {
            visited: self.visited.to_vec(),
            path: self.path.to_vec(),
        }
    }
}

/// Progress figures for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    pub explored: usize,
    pub path_length: usize,
    pub elapsed: Duration,
}

/// Step-by-step Dijkstra or A* over a [`Maze`].
///
/// The solver never keeps a reference to the maze: every call that searches
/// takes it as an argument, and the caller must pass the same maze for the
/// whole run.
pub struct Solver {
    kind: SearchKind,
    state: SolverState,
    frontier: Option<Frontier>,
    visited: Vec<Point>,
    path: Vec<Point>,
    // Cells still to trace, start first, so popping walks back from the end.
    pending: Vec<Point>,
    tracing: bool,
    outcome: Option<Outcome>,
    started: Option<Instant>,
    elapsed: Duration,
}

impl Solver {
    pub fn new(kind: SearchKind) -> Self {
        Self {
            kind,
            state: SolverState::Idle,
            frontier: None,
            visited: Vec::new(),
            path: Vec::new(),
            pending: Vec::new(),
            tracing: false,
            outcome: None,
            started: None,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    #[inline]
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Set once the solver reaches [`SolverState::Finished`].
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SolverState::Running
    }

    /// Start a new search over `maze`, discarding any previous progress.
    ///
    /// Returns `false` and changes nothing while a search is running. A maze
    /// without exits finishes at once with [`Outcome::NoPath`].
    pub fn solve(&mut self, maze: &Maze) -> bool {
        if self.is_running() {
            log::debug!("solve ignored: a {} search is already running", self.kind);
            return false;
        }
        self.clear();
        self.started = Some(Instant::now());

        let bounds = maze.grid().bounds();
        if self.frontier.as_ref().is_some_and(|f| f.range() != bounds) {
            self.frontier = None;
        }
        let kind = self.kind;
        let frontier = self
            .frontier
            .get_or_insert_with(|| Frontier::new(bounds, kind));

        let started = match (maze.start(), maze.end()) {
            (Some(start), Some(end)) => {
                frontier.start(&MazePather::new(maze.grid()), start, end)
            }
            _ => false,
        };

        self.state = SolverState::Running;
        log::debug!("{} search started", self.kind);
        if !started {
            self.finish(Outcome::NoPath);
        }
        true
    }

    /// Advance by one expansion or one traced cell.
    ///
    /// Returns `None` when no search is running.
    pub fn step(&mut self, maze: &Maze) -> Option<Step> {
        if !self.is_running() {
            return None;
        }

        if !self.tracing {
            let frontier = self.frontier.as_mut()?;
            match frontier.expand(&MazePather::new(maze.grid())) {
                Expansion::Expanded(p) => {
                    self.visited.push(p);
                    return Some(Step::Expanded(p));
                }
                Expansion::Reached => {
                    self.pending = frontier.path().unwrap_or_default();
                    self.tracing = true;
                    log::debug!(
                        "end reached after {} expansions, tracing {} cells",
                        self.visited.len(),
                        self.pending.len()
                    );
                }
                Expansion::Exhausted => {
                    self.finish(Outcome::NoPath);
                    return Some(Step::Exhausted);
                }
            }
        }

        let p = self.pending.pop()?;
        self.path.push(p);
        if self.pending.is_empty() {
            self.finish(Outcome::Solved {
                length: self.path.len(),
            });
        }
        Some(Step::Traced(p))
    }

    /// Cancel a running search. The visited and path sets keep whatever
    /// they held at this point. Does nothing in any other state.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = SolverState::Stopped;
        self.elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();
        log::debug!(
            "{} search stopped after {} expansions",
            self.kind,
            self.visited.len()
        );
    }

    /// Back to [`SolverState::Idle`] with empty sets and every distance
    /// unknown.
    pub fn reset(&mut self) {
        self.clear();
        self.state = SolverState::Idle;
    }

    /// Release the solver. Consuming `self` makes any further use a
    /// compile error.
    pub fn destroy(self) {
        log::debug!("{} solver destroyed in state {:?}", self.kind, self.state);
    }

    /// Best known distance from the start to `p` in the current search.
    pub fn distance(&self, p: Point) -> i32 {
        self.frontier
            .as_ref()
            .map_or(UNREACHABLE, |f| f.distance(p))
    }

    #[inline]
    pub fn visited(&self) -> &[Point] {
        &self.visited
    }

    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn snapshot(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            visited: &self.visited,
            path: &self.path,
        }
    }

    pub fn stats(&self) -> SolveStats {
        let elapsed = match (self.state, self.started) {
            (SolverState::Running, Some(t)) => t.elapsed(),
            _ => self.elapsed,
        };
        SolveStats {
            explored: self.visited.len(),
            path_length: self.path.len(),
            elapsed,
        }
    }

    /// Iterate the running search one step at a time, yielding a snapshot
    /// after each step.
    ///
    /// `ctx` is checked before every step; once it is cancelled the solver
    /// is stopped and the iterator ends. It also ends when the search
    /// finishes, or straight away if no search is running.
    pub fn frames<'s>(&'s mut self, maze: &'s Maze, ctx: &'s Context) -> Frames<'s> {
        Frames {
            solver: self,
            maze,
            ctx,
        }
    }

    fn clear(&mut self) {
        self.visited.clear();
        self.path.clear();
        self.pending.clear();
        self.tracing = false;
        self.outcome = None;
        self.started = None;
        self.elapsed = Duration::ZERO;
        if let Some(f) = self.frontier.as_mut() {
            f.reset();
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state = SolverState::Finished;
        self.outcome = Some(outcome);
        self.elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();
        match outcome {
            Outcome::Solved { length } => log::debug!(
                "{} search solved: {} cells explored, path length {}",
                self.kind,
                self.visited.len(),
                length
            ),
            Outcome::NoPath => log::info!(
                "no solution found after exploring {} cells",
                self.visited.len()
            ),
        }
    }
}

/// Iterator returned by [`Solver::frames`].
pub struct Frames<'s> {
    solver: &'s mut Solver,
    maze: &'s Maze,
    ctx: &'s Context,
}

impl Iterator for Frames<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.ctx.is_done() {
            self.solver.stop();
            return None;
        }
        self.solver.step(self.maze)?;
        Some(self.solver.snapshot().to_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Grid;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    use crate::config::{Dimensions, ExitPolicy, MazeConfig, Shape};
    use crate::maze::tests::open_three_by_three;

    const KINDS: [SearchKind; 2] = [SearchKind::Dijkstra, SearchKind::Astar];

    fn run_to_end(solver: &mut Solver, maze: &Maze) -> usize {
        let mut steps = 0;
        while solver.step(maze).is_some() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn open_grid_path_has_five_cells() {
        let maze = open_three_by_three();
        for kind in KINDS {
            let mut s = Solver::new(kind);
            assert!(s.solve(&maze));
            run_to_end(&mut s, &maze);
            assert_eq!(s.state(), SolverState::Finished);
            assert_eq!(s.outcome(), Some(Outcome::Solved { length: 5 }));
            assert_eq!(s.path().first(), Some(&Point::cell(2, 2)));
            assert_eq!(s.path().last(), Some(&Point::cell(0, 0)));
            assert_eq!(s.stats().path_length, 5);
        }
    }

    #[test]
    fn final_path_matches_the_reference_solution() {
        for seed in 0..5 {
            for exits in [ExitPolicy::TopBottom, ExitPolicy::Boundary] {
                let config = MazeConfig::new(Dimensions::new(16, 16))
                    .with_shape(Shape::Radial)
                    .with_exits(exits);
                let maze = Maze::build(&config, &mut StdRng::seed_from_u64(seed));
                let reference: HashSet<Point> = maze.solution().iter().copied().collect();
                for kind in KINDS {
                    let mut s = Solver::new(kind);
                    s.solve(&maze);
                    run_to_end(&mut s, &maze);
                    let traced: HashSet<Point> = s.path().iter().copied().collect();
                    assert_eq!(traced, reference, "seed {seed}, {exits}, {kind}");
                }
            }
        }
    }

    #[test]
    fn astar_explores_no_more_than_dijkstra() {
        let config = MazeConfig::new(Dimensions::new(20, 20)).with_exits(ExitPolicy::Boundary);
        let maze = Maze::build(&config, &mut StdRng::seed_from_u64(4));
        let mut explored = Vec::new();
        for kind in KINDS {
            let mut s = Solver::new(kind);
            s.solve(&maze);
            run_to_end(&mut s, &maze);
            explored.push(s.stats().explored);
        }
        assert!(explored[1] <= explored[0]);
    }

    #[test]
    fn solve_is_rejected_while_running() {
        let maze = open_three_by_three();
        let mut s = Solver::new(SearchKind::Dijkstra);
        assert!(s.solve(&maze));
        s.step(&maze);
        assert!(!s.solve(&maze));
        assert_eq!(s.visited().len(), 1);
    }

    #[test]
    fn stop_after_n_expansions() {
        let maze = open_three_by_three();
        let mut s = Solver::new(SearchKind::Dijkstra);
        s.solve(&maze);
        for _ in 0..3 {
            assert!(matches!(s.step(&maze), Some(Step::Expanded(_))));
        }
        s.stop();
        assert_eq!(s.state(), SolverState::Stopped);
        assert_eq!(s.visited().len(), 3);
        assert!(s.path().is_empty());
        assert_eq!(s.step(&maze), None);

        s.stop();
        assert_eq!(s.state(), SolverState::Stopped);
        assert_eq!(s.visited().len(), 3);
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn stop_is_a_no_op_unless_running() {
        let maze = open_three_by_three();
        let mut s = Solver::new(SearchKind::Astar);
        s.stop();
        assert_eq!(s.state(), SolverState::Idle);
        s.solve(&maze);
        run_to_end(&mut s, &maze);
        s.stop();
        assert_eq!(s.state(), SolverState::Finished);
    }

    #[test]
    fn reset_clears_sets_and_distances() {
        let maze = open_three_by_three();
        let mut s = Solver::new(SearchKind::Dijkstra);
        s.solve(&maze);
        s.step(&maze);
        s.step(&maze);
        assert_eq!(s.distance(Point::cell(0, 1)), 1);

        s.reset();
        assert_eq!(s.state(), SolverState::Idle);
        assert!(s.visited().is_empty());
        assert!(s.path().is_empty());
        assert!(maze.grid().points().all(|p| s.distance(p) == UNREACHABLE));
        assert_eq!(s.step(&maze), None);
    }

    #[test]
    fn restart_after_finishing() {
        let maze = open_three_by_three();
        let mut s = Solver::new(SearchKind::Dijkstra);
        s.solve(&maze);
        let first = run_to_end(&mut s, &maze);
        assert!(s.solve(&maze));
        assert!(s.visited().is_empty());
        assert_eq!(run_to_end(&mut s, &maze), first);
    }

    #[test]
    fn maze_without_exits_finishes_immediately() {
        let maze = Maze::from_grid(Grid::new(0, 0), None);
        let mut s = Solver::new(SearchKind::Dijkstra);
        assert!(s.solve(&maze));
        assert_eq!(s.state(), SolverState::Finished);
        assert_eq!(s.outcome(), Some(Outcome::NoPath));
        assert_eq!(s.step(&maze), None);
        assert_eq!(s.snapshot().to_snapshot(), Snapshot::default());
    }

    #[test]
    fn unreachable_end_reports_no_path() {
        use crate::entrance::Exits;
        use maze_core::Direction;

        let mut g = Grid::new(3, 1);
        g.carve(Point::new(0, 0), Direction::Right);
        let exits = Exits {
            start: Point::new(0, 0),
            start_side: Direction::Top,
            end: Point::new(2, 0),
            end_side: Direction::Bottom,
        };
        let maze = Maze::from_grid(g, Some(exits));
        assert!(maze.solution().is_empty());

        let mut s = Solver::new(SearchKind::Astar);
        s.solve(&maze);
        assert!(matches!(s.step(&maze), Some(Step::Expanded(_))));
        assert!(matches!(s.step(&maze), Some(Step::Expanded(_))));
        assert_eq!(s.step(&maze), Some(Step::Exhausted));
        assert_eq!(s.outcome(), Some(Outcome::NoPath));
        assert!(s.path().is_empty());
    }

    #[test]
    fn frames_yield_one_snapshot_per_step() {
        let maze = open_three_by_three();
        let ctx = Context::new();
        let mut s = Solver::new(SearchKind::Dijkstra);
        s.solve(&maze);
        let frames: Vec<Snapshot> = s.frames(&maze, &ctx).collect();

        // 8 expansions, then the 5 path cells one at a time.
        assert_eq!(frames.len(), 13);
        assert!(frames.windows(2).all(|w| {
            w[1].visited.len() + w[1].path.len() == w[0].visited.len() + w[0].path.len() + 1
        }));
        let last = frames.last().unwrap();
        assert_eq!(last.visited.len(), 8);
        assert_eq!(last.path.len(), 5);
        assert_eq!(s.state(), SolverState::Finished);
    }

    #[test]
    fn cancelled_context_stops_the_frames() {
        let maze = open_three_by_three();
        let ctx = Context::new();
        let mut s = Solver::new(SearchKind::Astar);
        s.solve(&maze);

        let mut frames = s.frames(&maze, &ctx);
        assert!(frames.next().is_some());
        assert!(frames.next().is_some());
        ctx.cancel();
        assert!(frames.next().is_none());
        drop(frames);

        assert_eq!(s.state(), SolverState::Stopped);
        assert_eq!(s.visited().len(), 2);
        assert!(s.path().is_empty());
    }

    #[test]
    fn destroy_consumes() {
        let maze = open_three_by_three();
        let mut s = Solver::new(SearchKind::Dijkstra);
        s.solve(&maze);
        s.step(&maze);
        s.destroy();
    }
}
