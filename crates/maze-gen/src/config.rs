//! Maze configuration: [`Dimensions`], [`Shape`], [`ExitPolicy`] and
//! [`MazeConfig`].

use std::fmt;
use std::str::FromStr;

/// Smallest number of rows or columns a maze built from pixel sizes gets.
pub const MIN_CELLS: i32 = 10;

/// Largest number of rows or columns a maze built from pixel sizes gets.
pub const MAX_CELLS: i32 = 1000;

/// How many entrance/exit pairs are tried before falling back to a forced
/// straight corridor.
pub const DEFAULT_RETRIES: u32 = 5;

/// Errors raised while turning user input into a [`MazeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("unknown shape '{0}' (expected 'rect' or 'radial')")]
    UnknownShape(String),

    #[error("unknown exit policy '{0}' (expected 'top-bottom' or 'boundary')")]
    UnknownExitPolicy(String),
}

/// Grid size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub rows: i32,
    pub cols: i32,
}

impl Dimensions {
    /// Exact dimensions, no clamping.
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Derive the grid size from a pixel area: `rows = height / cell_size`,
    /// `cols = width / cell_size`, each floored and clamped to
    /// [`MIN_CELLS`]`..=`[`MAX_CELLS`].
    pub fn from_pixels(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let cells = |px: u32| {
            i32::try_from(px / cell_size)
                .unwrap_or(MAX_CELLS)
                .clamp(MIN_CELLS, MAX_CELLS)
        };
        Ok(Self {
            rows: cells(height),
            cols: cells(width),
        })
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(MIN_CELLS, MIN_CELLS)
    }
}

/// Which cells of the rectangle take part in the maze.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Every cell.
    #[default]
    Rectangle,
    /// A three-lobed blob around the centre.
    Radial,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => f.write_str("rect"),
            Self::Radial => f.write_str("radial"),
        }
    }
}

impl FromStr for Shape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Self::Rectangle),
            "radial" => Ok(Self::Radial),
            _ => Err(ConfigError::UnknownShape(s.to_string())),
        }
    }
}

/// Where the entrance and exit are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitPolicy {
    /// Entrance in the top row, exit in the bottom row, as far apart
    /// column-wise as possible.
    #[default]
    TopBottom,
    /// Entrance anywhere on the outline, exit at the outline cell farthest
    /// from it along the passages.
    Boundary,
}

impl fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopBottom => f.write_str("top-bottom"),
            Self::Boundary => f.write_str("boundary"),
        }
    }
}

impl FromStr for ExitPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top-bottom" | "topbottom" | "tb" => Ok(Self::TopBottom),
            "boundary" | "edge" => Ok(Self::Boundary),
            _ => Err(ConfigError::UnknownExitPolicy(s.to_string())),
        }
    }
}

/// Everything needed to build a [`Maze`](crate::Maze).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    pub dims: Dimensions,
    pub shape: Shape,
    pub exits: ExitPolicy,
    /// Entrance/exit attempts before the forced fallback.
    pub retries: u32,
}

impl MazeConfig {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            ..Self::default()
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_exits(mut self, exits: ExitPolicy) -> Self {
        self.exits = exits;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            dims: Dimensions::default(),
            shape: Shape::default(),
            exits: ExitPolicy::default(),
            retries: DEFAULT_RETRIES,
        }
    }
}
