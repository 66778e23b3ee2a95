//! Difficulty levels and their maze profiles.
//!
//! This module defines the selectable difficulty levels and the immutable profile each one
//! expands to: grid dimensions, per-cell pixel size and the extra-path count that controls how
//! densely the maze gets riddled with shortcuts.

use std::fmt;

use clap::ValueEnum;

/// Side length in pixels of the square map area every profile is scaled into.
///
/// Larger grids get proportionally smaller cells so the whole maze always covers the same area.
const MAP_SIDE_PX: usize = 800;

/// Selectable difficulty level of the game.
///
/// Each level maps to a fixed [`Profile`]; selecting a new level fully regenerates the maze with
/// the new dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    /// Small grid with many extra shortcuts.
    Easy,
    /// Medium grid with a moderate number of shortcuts.
    Medium,
    /// Large grid with few shortcuts.
    Hard,
}

impl Difficulty {
    /// All difficulty levels in menu order.
    pub(crate) const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the immutable maze profile of this difficulty level.
    pub(crate) fn profile(self) -> Profile {
        match self {
            Self::Easy => Profile::new(15, 15, 100),
            Self::Medium => Profile::new(25, 25, 70),
            Self::Hard => Profile::new(40, 40, 30),
        }
    }

    /// Returns the display label of this difficulty level.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lowercase so the rendered default matches the accepted command-line values.
        match self {
            Self::Easy => write!(formatter, "easy"),
            Self::Medium => write!(formatter, "medium"),
            Self::Hard => write!(formatter, "hard"),
        }
    }
}

/// Immutable configuration of one maze.
///
/// A profile fully determines the grid dimensions; it is derived from a [`Difficulty`] and
/// threaded explicitly into grid construction and maze generation, with no ambient state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Profile {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub cols: usize,
    /// Pixel side length of one cell.
    pub cell_size: f64,
    /// Number of extra passages the generator attempts to open after carving.
    pub extra_paths: usize,
}

impl Profile {
    /// Builds a profile, deriving the cell size from the fixed map area.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Cell sizes are small integers, far below f64 integer precision limits."
    )]
    fn new(rows: usize, cols: usize, extra_paths: usize) -> Self {
        Self {
            rows,
            cols,
            cell_size: (MAP_SIDE_PX / rows) as f64,
            extra_paths,
        }
    }
}
