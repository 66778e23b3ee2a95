//! Agent movement along a solved path.
//!
//! This module contains the [`Agent`], the figure that walks the maze once a path has been found.
//! The agent lives in continuous pixel space and is advanced one bounded update per driver tick,
//! so it can share the single cooperative loop with input polling and rendering without ever
//! blocking it.

use crate::grid::Grid;

/// Distance in pixels the agent covers per animation tick.
const SPEED: f64 = 15.0;

/// A figure moving through the maze at constant speed.
///
/// The agent holds a continuous pixel position, the cell it currently occupies and a cursor into
/// the path it is following. It is recreated whenever the maze is regenerated or the goal moves.
#[derive(Clone, Debug)]
pub(crate) struct Agent {
    /// Horizontal pixel position of the agent's center.
    x: f64,
    /// Vertical pixel position of the agent's center.
    y: f64,
    /// Flat index of the cell the agent currently occupies.
    cell: usize,
    /// Path of flat cell indices the agent is walking, start to goal inclusive.
    path: Vec<usize>,
    /// Index into [`path`](Agent::path) of the next cell to reach.
    cursor: usize,
    /// Whether the agent is currently walking a path.
    moving: bool,
}

impl Agent {
    /// Creates an agent standing still at the center of the grid's start cell.
    pub(crate) fn new(grid: &Grid) -> Self {
        let start = grid.start();
        let (x, y) = grid.center(start);

        Self {
            x,
            y,
            cell: start,
            path: Vec::new(),
            cursor: 0,
            moving: false,
        }
    }

    /// Starts walking the given path.
    ///
    /// The cursor begins at index one because index zero is the cell the agent already occupies.
    pub(crate) fn begin(&mut self, path: Vec<usize>) {
        self.path = path;
        self.cursor = 1;
        self.moving = true;
    }

    /// Returns the pixel position of the agent's center.
    pub(crate) const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Returns the flat index of the cell the agent currently occupies.
    pub(crate) const fn cell(&self) -> usize {
        self.cell
    }

    /// Returns whether the agent is currently walking a path.
    pub(crate) const fn moving(&self) -> bool {
        self.moving
    }

    /// Advances the agent by one tick of constant-speed movement.
    ///
    /// When the remaining distance to the next path cell is smaller than one tick's travel, the
    /// position snaps exactly onto that cell's center and the cursor moves on, so frame-to-frame
    /// drift can never accumulate past a cell boundary. Past the end of the path the agent goes
    /// idle. Each call performs one bounded update and never blocks.
    pub(crate) fn advance(&mut self, grid: &Grid) {
        if !self.moving {
            return;
        }

        let Some(&target) = self.path.get(self.cursor) else {
            self.moving = false;
            return;
        };

        let (target_x, target_y) = grid.center(target);
        let delta_x = target_x - self.x;
        let delta_y = target_y - self.y;
        let distance = delta_x.hypot(delta_y);

        if distance < SPEED {
            self.x = target_x;
            self.y = target_y;
            self.cell = target;
            self.cursor += 1;
        } else {
            self.x += delta_x / distance * SPEED;
            self.y += delta_y / distance * SPEED;
        }
    }
}
