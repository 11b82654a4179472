//! Colour palette.

use maze_core::Color;

pub const WALL_FG: Color = Color::from_rgb(150, 155, 170);
pub const STATUS_FG: Color = Color::from_rgb(248, 248, 242);
pub const HELP_FG: Color = Color::from_rgb(98, 100, 106);

/// Cells the solver has expanded.
pub const VISITED_BG: Color = Color::from_rgb(140, 90, 20);
/// Cells on the traced path.
pub const PATH_BG: Color = Color::from_rgb(40, 150, 60);
/// The precomputed solution overlay.
pub const SOLUTION_FG: Color = Color::from_rgb(80, 200, 80);

pub const START_FG: Color = Color::from_rgb(139, 233, 253);
pub const END_FG: Color = Color::from_rgb(255, 85, 85);
