//! maze: a terminal maze generator with an animated Dijkstra / A* solver.
//!
//! Logging goes to stderr and is off unless `MAZE_LOG` is set, e.g.
//! `MAZE_LOG=debug maze 2> maze.log`.

mod colors;
mod model;
mod options;

use std::error::Error;

use maze_core::{App, AppConfig};
use maze_crossterm::CrosstermDriver;
use maze_gen::Session;
use rand::SeedableRng;
use rand::rngs::StdRng;

use model::{MazeView, screen_size};
use options::Options;

fn run() -> Result<(), Box<dyn Error>> {
    let options = Options::from_env()?;
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    log::info!(
        "{}x{} {} maze, {} exits, {} solver",
        options.config.dims.cols,
        options.config.dims.rows,
        options.config.shape,
        options.config.exits,
        options.kind
    );

    let (width, height) = screen_size(&options.config);
    let session = Session::new(options.config, options.kind, rng);
    let mut app = App::new(AppConfig {
        model: MazeView::new(session),
        driver: CrosstermDriver::new(),
        width,
        height,
        tick: Some(options.delay),
    });
    app.run()
}

fn main() {
    if std::env::var("MAZE_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MAZE_LOG")
            .write_style("MAZE_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    if let Err(e) = run() {
        eprintln!("maze: {e}");
        std::process::exit(1);
    }
}
