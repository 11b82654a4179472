//! Perfect-maze generation and solving.
//!
//! A [`Maze`] is built in three passes:
//!
//! 1. [`shaped_grid`] lays out a fully walled grid for the chosen [`Shape`];
//! 2. [`carve_backtracker`] carves a spanning tree of passages with a
//!    randomized depth-first walk;
//! 3. [`place_exits`] opens an entrance and an exit on the outline and keeps
//!    the shortest path between them as the reference solution.
//!
//! A [`Solver`] then replays the search one step at a time for display, and
//! a [`Session`] ties one maze and one solver together for a front-end.

mod audit;
mod config;
mod entrance;
mod generator;
mod maze;
mod pather;
mod session;
mod shape;
mod solver;

pub use audit::Audit;
pub use config::{
    ConfigError, DEFAULT_RETRIES, Dimensions, ExitPolicy, MAX_CELLS, MIN_CELLS, MazeConfig, Shape,
};
pub use entrance::{Exits, Placement, place_exits};
pub use generator::carve_backtracker;
pub use maze::{Maze, MazeSnapshot};
pub use pather::{AdjacencyPather, MazePather, shortest_path};
pub use session::Session;
pub use shape::shaped_grid;
pub use solver::{Frames, Outcome, Snapshot, SnapshotRef, SolveStats, Solver, SolverState, Step};

pub use maze_paths::SearchKind;
