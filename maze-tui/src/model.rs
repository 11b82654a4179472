//! Elm-architecture Model: draws the maze and drives the animated solver
//! from tick messages.

use std::collections::HashSet;

use maze_core::{
    AttrMask, Color, Direction, Effect, Glyph, Grid, Key, Model, Msg, Point, Screen, Style,
};
use maze_gen::{MazeConfig, Outcome, Session, SolverState, Step};
use rand::Rng;

use crate::colors::*;

const HELP_LINE: &str = "s solve  x stop  c clear  r new maze  p solution  q quit";

/// Lines below the maze.
const STATUS_LINES: i32 = 2;

/// Screen size needed to show a maze built from `config` plus the status
/// lines. Each cell takes two columns and two rows, plus one for the
/// closing wall.
pub fn screen_size(config: &MazeConfig) -> (i32, i32) {
    let cells = |n: i32| n.saturating_mul(2).saturating_add(1);
    let width = cells(config.dims.cols).max(HELP_LINE.len() as i32);
    let height = cells(config.dims.rows).saturating_add(STATUS_LINES);
    (width, height)
}

/// Screen position of the centre of maze cell `p`.
#[inline]
fn to_screen(p: Point) -> Point {
    Point::new(2 * p.x + 1, 2 * p.y + 1)
}

/// The maze viewer.
pub struct MazeView<R: Rng> {
    session: Session<R>,
    show_solution: bool,
}

impl<R: Rng> MazeView<R> {
    pub fn new(session: Session<R>) -> Self {
        Self {
            session,
            show_solution: false,
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') | Key::Char('Q') => return Some(Effect::End),
            Key::Char('s') | Key::Enter | Key::Space => {
                self.session.restart();
            }
            Key::Char('x') => self.session.stop(),
            Key::Char('c') => self.session.reset(),
            Key::Char('r') | Key::Char('n') => self.session.regenerate(),
            Key::Char('p') => self.show_solution = !self.show_solution,
            _ => {}
        }
        None
    }

    fn tick(&mut self) {
        let was_running = self.is_running();
        let step = self.session.tick();
        if !was_running || self.is_running() || step == Some(Step::Exhausted) {
            return;
        }
        if let Some(solver) = self.session.solver() {
            let stats = solver.stats();
            log::info!(
                "{} found a path of {} cells after exploring {} in {:?}",
                solver.kind(),
                stats.path_length,
                stats.explored,
                stats.elapsed
            );
        }
    }

    fn is_running(&self) -> bool {
        self.session.solver().is_some_and(|s| s.is_running())
    }

    fn draw_walls(&self, grid: &Grid, screen: &mut Screen) {
        let wall = Style::default().with_fg(WALL_FG);
        for cell in grid.iter() {
            let c = to_screen(cell.pos());
            for (dx, dy) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
                screen.set(c.shift(dx, dy), Glyph::new('+', wall));
            }
            for dir in Direction::ALL {
                if !cell.has_wall(dir) {
                    continue;
                }
                let ch = match dir {
                    Direction::Top | Direction::Bottom => '-',
                    Direction::Left | Direction::Right => '|',
                };
                screen.set(c + dir.offset(), Glyph::new(ch, wall));
            }
        }
    }

    /// Colour a set of cells, and the open gaps between two members.
    fn draw_cells(grid: &Grid, screen: &mut Screen, cells: &HashSet<Point>, style: Style) {
        for &p in cells {
            let c = to_screen(p);
            screen.set(c, Glyph::new(' ', style));
            for q in grid.passages(p) {
                if cells.contains(&q) {
                    let gap = c + (q - p);
                    screen.set(gap, Glyph::new(' ', style));
                }
            }
        }
    }

    fn draw_status(&self, screen: &mut Screen, y: i32) {
        let style = Style::default().with_fg(STATUS_FG);
        let line = match self.session.solver() {
            None => format!("{} | ready", self.session.kind()),
            Some(solver) => {
                let stats = solver.stats();
                let mut line = format!(
                    "{} | {} | explored {} | path {} | {} ms",
                    solver.kind(),
                    state_label(solver.state()),
                    stats.explored,
                    stats.path_length,
                    stats.elapsed.as_millis()
                );
                if solver.outcome() == Some(Outcome::NoPath) {
                    line.push_str(" | no solution found");
                }
                line
            }
        };
        screen.text(Point::new(0, y), &line, style);
        screen.text(
            Point::new(0, y + 1),
            HELP_LINE,
            Style::default().with_fg(HELP_FG),
        );
    }
}

fn state_label(state: SolverState) -> &'static str {
    match state {
        SolverState::Idle => "idle",
        SolverState::Running => "running",
        SolverState::Finished => "finished",
        SolverState::Stopped => "stopped",
    }
}

impl<R: Rng> Model for MazeView<R> {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                if let Some(maze) = self.session.maze() {
                    log::debug!("{} cells on screen", maze.grid().present_count());
                }
                None
            }
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Tick { .. } => {
                self.tick();
                None
            }
            _ => None,
        }
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(Glyph::default());
        let Some(maze) = self.session.maze() else {
            return;
        };
        let grid = maze.grid();
        self.draw_walls(grid, screen);

        if self.show_solution {
            let dot = Style::default().with_fg(SOLUTION_FG);
            for &p in maze.solution() {
                screen.set(to_screen(p), Glyph::new('.', dot));
            }
        }
        if let Some(snap) = self.session.solver_snapshot() {
            let visited: HashSet<Point> = snap.visited.iter().copied().collect();
            let path: HashSet<Point> = snap.path.iter().copied().collect();
            Self::draw_cells(grid, screen, &visited, Style::default().with_bg(VISITED_BG));
            Self::draw_cells(grid, screen, &path, Style::default().with_bg(PATH_BG));
        }

        if let Some(start) = maze.start() {
            draw_marker(screen, start, 'S', START_FG);
        }
        if let Some(end) = maze.end() {
            draw_marker(screen, end, 'F', END_FG);
        }

        self.draw_status(screen, 2 * grid.height() + 1);
    }
}

/// Bold entrance or exit letter, keeping whatever background the cell has.
fn draw_marker(screen: &mut Screen, p: Point, ch: char, fg: Color) {
    let c = to_screen(p);
    let style = Style::default()
        .with_fg(fg)
        .with_bg(screen.at(c).style.bg)
        .with_attrs(AttrMask::BOLD);
    screen.set(c, Glyph::new(ch, style));
}
