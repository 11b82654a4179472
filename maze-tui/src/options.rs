//! Command-line options.
//!
//! The maze size is given as a pixel area and a cell size; the grid gets
//! `height / cell_size` rows and `width / cell_size` columns.

use std::error::Error;
use std::ffi::OsString;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use maze_gen::{DEFAULT_RETRIES, Dimensions, ExitPolicy, MazeConfig, SearchKind, Shape};

fn make_options_parser() -> Command {
    Command::new("maze")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a perfect maze and watch Dijkstra or A* solve it")
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PX")
                .help("Maze area width in pixels")
                .value_parser(value_parser!(u32))
                .default_value("400"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PX")
                .help("Maze area height in pixels")
                .value_parser(value_parser!(u32))
                .default_value("240"),
        )
        .arg(
            Arg::new("cell-size")
                .long("cell-size")
                .value_name("PX")
                .help("Cell size in pixels")
                .value_parser(value_parser!(u32))
                .default_value("20"),
        )
        .arg(
            Arg::new("shape")
                .long("shape")
                .help("Which cells take part in the maze")
                .value_parser(["rect", "radial"])
                .default_value("rect"),
        )
        .arg(
            Arg::new("exits")
                .long("exits")
                .help("Where the entrance and exit go")
                .value_parser(["top-bottom", "boundary"])
                .default_value("top-bottom"),
        )
        .arg(
            Arg::new("retries")
                .long("retries")
                .value_name("N")
                .help("Entrance/exit attempts before forcing a straight corridor [default: 5]")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("astar")
                .long("astar")
                .help("Animate A* instead of Dijkstra")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("delay")
                .long("delay")
                .value_name("MS")
                .help("Milliseconds between solver steps")
                .value_parser(value_parser!(u64))
                .default_value("50"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for reproducible mazes")
                .value_parser(value_parser!(u64)),
        )
}

#[derive(Debug, Clone)]
pub struct Options {
    pub config: MazeConfig,
    pub kind: SearchKind,
    pub delay: Duration,
    pub seed: Option<u64>,
}

impl Options {
    /// Parse the process arguments; prints usage and exits on `--help` or a
    /// malformed command line.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Self::from_matches(&make_options_parser().get_matches())
    }

    /// Parse `args`, the first of which is the binary name.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = make_options_parser().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let px = |name: &str| matches.get_one::<u32>(name).copied().unwrap_or_default();
        let dims = Dimensions::from_pixels(px("width"), px("height"), px("cell-size"))?;

        let shape: Shape = match matches.get_one::<String>("shape") {
            Some(s) => s.parse()?,
            None => Shape::default(),
        };
        let exits: ExitPolicy = match matches.get_one::<String>("exits") {
            Some(s) => s.parse()?,
            None => ExitPolicy::default(),
        };
        let kind = if matches.get_flag("astar") {
            SearchKind::Astar
        } else {
            SearchKind::Dijkstra
        };
        let delay = Duration::from_millis(matches.get_one::<u64>("delay").copied().unwrap_or(50));
        let retries = matches
            .get_one::<u32>("retries")
            .copied()
            .unwrap_or(DEFAULT_RETRIES);

        Ok(Options {
            config: MazeConfig::new(dims)
                .with_shape(shape)
                .with_exits(exits)
                .with_retries(retries),
            kind,
            delay,
            seed: matches.get_one::<u64>("seed").copied(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_gen::MAX_CELLS;

    #[test]
    fn defaults() {
        let o = Options::parse_from_args(["maze"]).unwrap();
        assert_eq!(o.config.dims, Dimensions::new(12, 20));
        assert_eq!(o.config.shape, Shape::Rectangle);
        assert_eq!(o.config.exits, ExitPolicy::TopBottom);
        assert_eq!(o.kind, SearchKind::Dijkstra);
        assert_eq!(o.delay, Duration::from_millis(50));
        assert_eq!(o.seed, None);
        assert_eq!(o.config.retries, DEFAULT_RETRIES);
    }

    #[test]
    fn all_flags() {
        let o = Options::parse_from_args([
            "maze",
            "--width",
            "600",
            "--height",
            "300",
            "--cell-size",
            "15",
            "--shape",
            "radial",
            "--exits",
            "boundary",
            "--astar",
            "--delay",
            "5",
            "--seed",
            "99",
            "--retries",
            "2",
        ])
        .unwrap();
        assert_eq!(o.config.dims, Dimensions::new(20, 40));
        assert_eq!(o.config.shape, Shape::Radial);
        assert_eq!(o.config.exits, ExitPolicy::Boundary);
        assert_eq!(o.kind, SearchKind::Astar);
        assert_eq!(o.delay, Duration::from_millis(5));
        assert_eq!(o.seed, Some(99));
        assert_eq!(o.config.retries, 2);
    }

    #[test]
    fn retries_can_be_zero() {
        let o = Options::parse_from_args(["maze", "--retries", "0"]).unwrap();
        assert_eq!(o.config.retries, 0);
        assert!(Options::parse_from_args(["maze", "--retries", "many"]).is_err());
    }

    #[test]
    fn oversized_area_is_capped() {
        let o = Options::parse_from_args([
            "maze",
            "--width",
            "4000000000",
            "--height",
            "4000000000",
            "--cell-size",
            "1",
        ])
        .unwrap();
        assert_eq!(o.config.dims, Dimensions::new(MAX_CELLS, MAX_CELLS));
    }

    #[test]
    fn zero_cell_size_is_an_error() {
        let err = Options::parse_from_args(["maze", "--cell-size", "0"]).unwrap_err();
        assert_eq!(err.to_string(), "cell size must be greater than zero");
    }

    #[test]
    fn unknown_shape_is_rejected() {
        assert!(Options::parse_from_args(["maze", "--shape", "hex"]).is_err());
        assert!(Options::parse_from_args(["maze", "--width", "-3"]).is_err());
    }
}
