//! The [`Maze`] aggregate.

use maze_core::{Grid, Point};
use rand::Rng;

use crate::audit::Audit;
use crate::config::{ConfigError, Dimensions, MazeConfig};
use crate::entrance::{Exits, place_exits};
use crate::generator::carve_backtracker;
use crate::pather::shortest_path;
use crate::shape::shaped_grid;

/// A carved grid with its entrance, exit and reference solution.
///
/// A maze is never patched after construction: regenerating means building
/// a new one and dropping the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    exits: Option<Exits>,
    solution: Vec<Point>,
}

/// Read-only view of a [`Maze`] for drawing.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MazeSnapshot<'a> {
    pub grid: &'a Grid,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub solution: &'a [Point],
}

impl Maze {
    /// Build a rectangular maze filling a `width` × `height` pixel area with
    /// square cells of `cell_size` pixels.
    pub fn generate(
        width: u32,
        height: u32,
        cell_size: u32,
        rng: &mut impl Rng,
    ) -> Result<Maze, ConfigError> {
        let dims = Dimensions::from_pixels(width, height, cell_size)?;
        Ok(Self::build(&MazeConfig::new(dims), rng))
    }

    /// Shape, carve and open a maze according to `config`.
    pub fn build(config: &MazeConfig, rng: &mut impl Rng) -> Maze {
        let mut grid = shaped_grid(config.dims, config.shape);
        carve_backtracker(&mut grid, rng);
        log::debug!(
            "{}x{} {} maze: {}",
            config.dims.cols,
            config.dims.rows,
            config.shape,
            Audit::of(&grid)
        );

        let placement = place_exits(&mut grid, config.exits, config.retries, rng);
        Maze {
            grid,
            exits: placement.exits,
            solution: placement.solution,
        }
    }

    /// Wrap an existing grid. The exterior walls named in `exits` are
    /// expected to be open already; the solution is computed here.
    pub fn from_grid(grid: Grid, exits: Option<Exits>) -> Maze {
        let mut maze = Maze {
            grid,
            exits,
            solution: Vec::new(),
        };
        maze.find_solution();
        maze
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn exits(&self) -> Option<Exits> {
        self.exits
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.exits.map(|e| e.start)
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.exits.map(|e| e.end)
    }

    /// The reference shortest path, start to end inclusive. Empty when the
    /// maze has no exits.
    #[inline]
    pub fn solution(&self) -> &[Point] {
        &self.solution
    }

    /// Recompute [`solution`](Self::solution) with Dijkstra's algorithm.
    pub fn find_solution(&mut self) -> &[Point] {
        self.solution = match self.exits {
            Some(e) => shortest_path(&self.grid, e.start, e.end),
            None => Vec::new(),
        };
        &self.solution
    }

    pub fn snapshot(&self) -> MazeSnapshot<'_> {
        MazeSnapshot {
            grid: &self.grid,
            start: self.start(),
            end: self.end(),
            solution: &self.solution,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use maze_core::Direction;
    use maze_paths::PathRange;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{ExitPolicy, Shape};
    use crate::pather::MazePather;

    /// 3×3 grid with every interior wall removed, exits at the top-left and
    /// bottom-right corners.
    pub(crate) fn open_three_by_three() -> Maze {
        let mut g = Grid::new(3, 3);
        for p in g.bounds() {
            g.carve(p, Direction::Right);
            g.carve(p, Direction::Bottom);
        }
        let exits = Exits {
            start: Point::cell(0, 0),
            start_side: Direction::Top,
            end: Point::cell(2, 2),
            end_side: Direction::Bottom,
        };
        g.open_exterior(exits.start, exits.start_side);
        g.open_exterior(exits.end, exits.end_side);
        Maze::from_grid(g, Some(exits))
    }

    fn assert_valid_solution(maze: &Maze) {
        let sol = maze.solution();
        assert_eq!(sol.first().copied(), maze.start());
        assert_eq!(sol.last().copied(), maze.end());
        for w in sol.windows(2) {
            assert!(maze.grid().has_passage(w[0], w[1]), "{} -> {}", w[0], w[1]);
        }

        let (Some(start), Some(end)) = (maze.start(), maze.end()) else {
            panic!("maze has no exits");
        };
        let mut pr = PathRange::new(maze.grid().bounds());
        pr.bfs_map(&MazePather::new(maze.grid()), &[start], i32::MAX);
        assert_eq!(sol.len() as i32, pr.bfs_at(end) + 1);
    }

    #[test]
    fn generate_from_pixels() {
        let maze = Maze::generate(400, 300, 20, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(maze.grid().width(), 20);
        assert_eq!(maze.grid().height(), 15);
        assert!(Audit::of(maze.grid()).is_perfect());
        assert_valid_solution(&maze);
    }

    #[test]
    fn generate_rejects_zero_cell_size() {
        assert_eq!(
            Maze::generate(400, 300, 0, &mut StdRng::seed_from_u64(0)),
            Err(ConfigError::ZeroCellSize)
        );
    }

    #[test]
    fn every_configuration_is_solvable() {
        for seed in 0..6 {
            for shape in [Shape::Rectangle, Shape::Radial] {
                for exits in [ExitPolicy::TopBottom, ExitPolicy::Boundary] {
                    let config = MazeConfig::new(Dimensions::new(14, 18))
                        .with_shape(shape)
                        .with_exits(exits);
                    let maze = Maze::build(&config, &mut StdRng::seed_from_u64(seed));
                    assert!(Audit::of(maze.grid()).is_perfect());
                    assert_valid_solution(&maze);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let config = MazeConfig::new(Dimensions::new(12, 12)).with_exits(ExitPolicy::Boundary);
        let a = Maze::build(&config, &mut StdRng::seed_from_u64(77));
        let b = Maze::build(&config, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let maze = open_three_by_three();
        assert_eq!(maze.solution().len(), 5);
        assert_valid_solution(&maze);
    }

    #[test]
    fn empty_grid_has_nothing_to_solve() {
        let mut maze = Maze::from_grid(Grid::new(0, 0), None);
        assert_eq!(maze.start(), None);
        assert_eq!(maze.end(), None);
        assert!(maze.find_solution().is_empty());

        let snap = maze.snapshot();
        assert!(snap.solution.is_empty());
        assert_eq!(snap.grid.present_count(), 0);
    }

    #[test]
    fn snapshot_mirrors_the_maze() {
        let maze = open_three_by_three();
        let snap = maze.snapshot();
        assert_eq!(snap.start, Some(Point::cell(0, 0)));
        assert_eq!(snap.end, Some(Point::cell(2, 2)));
        assert_eq!(snap.solution, maze.solution());
    }
}
