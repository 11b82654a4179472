//! [`Session`]: the one live maze and the one live solver of a front-end.

use maze_paths::SearchKind;
use rand::Rng;

use crate::config::MazeConfig;
use crate::maze::Maze;
use crate::solver::{SnapshotRef, Solver, Step};

/// Owns at most one [`Maze`] and one [`Solver`] and keeps them consistent:
/// a solver only ever runs against the maze it was started on.
pub struct Session<R: Rng> {
    config: MazeConfig,
    kind: SearchKind,
    rng: R,
    maze: Option<Maze>,
    solver: Option<Solver>,
}

impl<R: Rng> Session<R> {
    /// Build the first maze right away.
    pub fn new(config: MazeConfig, kind: SearchKind, mut rng: R) -> Self {
        let maze = Maze::build(&config, &mut rng);
        Self {
            config,
            kind,
            rng,
            maze: Some(maze),
            solver: None,
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    /// Tear down the current solver and maze, in that order, then build a
    /// fresh maze.
    pub fn regenerate(&mut self) {
        if let Some(mut solver) = self.solver.take() {
            solver.stop();
            solver.destroy();
        }
        self.maze = None;
        self.maze = Some(Maze::build(&self.config, &mut self.rng));
        log::debug!("maze regenerated");
    }

    /// Start an animated solve. Returns `false` if one is already running.
    pub fn solve(&mut self) -> bool {
        let Some(maze) = self.maze.as_ref() else {
            return false;
        };
        let kind = self.kind;
        self.solver
            .get_or_insert_with(|| Solver::new(kind))
            .solve(maze)
    }

    /// Stop whatever is running and start over.
    pub fn restart(&mut self) -> bool {
        self.stop();
        self.solve()
    }

    /// Advance the running solve by one step.
    pub fn tick(&mut self) -> Option<Step> {
        let maze = self.maze.as_ref()?;
        self.solver.as_mut()?.step(maze)
    }

    pub fn stop(&mut self) {
        if let Some(solver) = self.solver.as_mut() {
            solver.stop();
        }
    }

    pub fn reset(&mut self) {
        if let Some(solver) = self.solver.as_mut() {
            solver.reset();
        }
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn solver(&self) -> Option<&Solver> {
        self.solver.as_ref()
    }

    pub fn solver_snapshot(&self) -> Option<SnapshotRef<'_>> {
        self.solver.as_ref().map(Solver::snapshot)
    }

    /// Release the solver and the maze.
    pub fn destroy(mut self) {
        if let Some(mut solver) = self.solver.take() {
            solver.stop();
            solver.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::Dimensions;
    use crate::solver::SolverState;

    fn session() -> Session<StdRng> {
        Session::new(
            MazeConfig::new(Dimensions::new(10, 10)),
            SearchKind::Astar,
            StdRng::seed_from_u64(21),
        )
    }

    #[test]
    fn solve_and_tick_to_completion() {
        let mut s = session();
        assert!(s.solver_snapshot().is_none());
        assert!(s.solve());
        assert!(!s.solve());
        while s.tick().is_some() {}

        let solution_len = s.maze().map(|m| m.solution().len());
        let solver = s.solver().unwrap();
        assert_eq!(solver.state(), SolverState::Finished);
        assert_eq!(Some(solver.path().len()), solution_len);
    }

    #[test]
    fn regenerate_drops_the_solver() {
        let mut s = session();
        let before = s.maze().cloned();
        s.solve();
        s.tick();
        s.regenerate();

        assert!(s.solver().is_none());
        assert!(s.tick().is_none());
        assert_ne!(s.maze().cloned(), before);
        assert!(s.solve());
        assert!(s.solver_snapshot().is_some_and(|snap| snap.visited.is_empty()));
    }

    #[test]
    fn restart_while_running() {
        let mut s = session();
        s.solve();
        s.tick();
        s.tick();
        assert!(s.restart());
        assert_eq!(s.solver().map(|v| v.visited().len()), Some(0));
        assert_eq!(s.solver().map(Solver::state), Some(SolverState::Running));
    }

    #[test]
    fn stop_and_reset() {
        let mut s = session();
        s.stop();
        s.reset();
        s.solve();
        s.tick();
        s.stop();
        assert_eq!(s.solver().map(Solver::state), Some(SolverState::Stopped));
        assert_eq!(s.solver_snapshot().map(|v| v.visited.len()), Some(1));
        s.reset();
        assert_eq!(s.solver().map(Solver::state), Some(SolverState::Idle));
        assert!(s.tick().is_none());
        s.destroy();
    }
}
