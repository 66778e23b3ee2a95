//! Grid model for the maze.
//!
//! This module contains the [`Grid`] and [`Cell`] types that every other part of the game operates
//! on: the maze generator carves walls into the grid, the search engine reads and writes the
//! per-cell search scratch state, and the renderer draws cells according to their flags.

/// Sentinel distance for cells not yet reached by the search.
///
/// This constant stands in for an infinite distance; any candidate distance computed during
/// relaxation compares strictly below it.
pub(crate) const INFINITE: u32 = u32::MAX;

/// Orthogonal neighbor offsets in fixed tie-break order: down, up, right, left.
///
/// This order is observable through the search engine because it decides which of several
/// equal-length paths gets recorded through the predecessor links, so it must not change.
const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// One addressable position in the maze grid.
///
/// A cell carries its immutable coordinates, the persistent maze flags (wall, start, goal) and the
/// search scratch fields that get wiped by [`Grid::reset_search_state`] before every run.
#[expect(
    clippy::struct_excessive_bools,
    reason = "The flags are independent cell markers read individually by the renderer, not an encoded state machine."
)]
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row coordinate of the cell, immutable after creation.
    pub row: usize,
    /// Column coordinate of the cell, immutable after creation.
    pub col: usize,
    /// Whether the cell is an impassable wall.
    pub wall: bool,
    /// Whether the cell is the start of the maze. Exactly one cell per grid has this set.
    pub start: bool,
    /// Whether the cell is the goal of the maze. At most one cell per grid has this set.
    pub goal: bool,
    /// Shortest known distance from the start, or [`INFINITE`] while undiscovered.
    pub distance: u32,
    /// Flat index of the cell this one was reached from during the search.
    ///
    /// This field is a non-owning back-reference into the grid's cell storage; following it from
    /// the goal reconstructs the shortest path.
    pub predecessor: Option<usize>,
    /// Whether the cell has been pushed onto the search frontier.
    pub queued: bool,
    /// Whether the cell's shortest distance is final. Settled cells are never reprocessed.
    pub settled: bool,
    /// Whether the cell is the one being visited in the current search step.
    ///
    /// This flag is a transient render marker: the engine raises it when it pops the cell and
    /// lowers it again before relaxing its neighbors, so at most one cell has it set at a time.
    pub current: bool,
}

impl Cell {
    /// Creates a non-wall cell with default scratch state at the given coordinates.
    const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            wall: false,
            start: false,
            goal: false,
            distance: INFINITE,
            predecessor: None,
            queued: false,
            settled: false,
            current: false,
        }
    }

    /// Resets the search scratch fields of the cell to their defaults.
    ///
    /// The persistent maze flags (wall, start, goal) are left untouched.
    fn reset_search(&mut self) {
        self.distance = INFINITE;
        self.predecessor = None;
        self.queued = false;
        self.settled = false;
        self.current = false;
    }
}

/// Rectangular collection of cells in row-major order.
///
/// This structure owns every cell by value in a flat vector; all other components refer to cells
/// through flat `usize` indices, which keeps predecessor links free of any ownership concerns.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    /// Number of rows in the grid, fixed for the lifetime of one maze.
    rows: usize,
    /// Number of columns in the grid, fixed for the lifetime of one maze.
    cols: usize,
    /// Side length of one cell in pixels, used for the agent's continuous movement.
    cell_size: f64,
    /// Flat row-major cell storage.
    cells: Vec<Cell>,
    /// Flat index of the start cell.
    start: usize,
    /// Flat index of the goal cell, if one has been placed.
    goal: Option<usize>,
}

#[expect(
    clippy::indexing_slicing,
    reason = "All indices handed out by the grid are produced by its own bounds-checked helpers."
)]
impl Grid {
    /// Creates a grid of the given dimensions with every cell open and no goal.
    ///
    /// The start cell is placed at (1, 1), clamped into bounds for degenerate dimensions, which
    /// matches where the maze generator begins carving.
    pub(crate) fn new(rows: usize, cols: usize, cell_size: f64) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col));
            }
        }

        let start_row = 1.min(rows.saturating_sub(1));
        let start_col = 1.min(cols.saturating_sub(1));
        let start = start_row * cols + start_col;
        cells[start].start = true;

        Self {
            rows,
            cols,
            cell_size,
            cells,
            start,
            goal: None,
        }
    }

    /// Returns the number of rows in the grid.
    pub(crate) const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns in the grid.
    pub(crate) const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the pixel side length of one cell.
    pub(crate) const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Converts (row, column) coordinates into a flat cell index.
    pub(crate) const fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Converts a flat cell index back into (row, column) coordinates.
    pub(crate) const fn pos(&self, idx: usize) -> (usize, usize) {
        (idx / self.cols, idx % self.cols)
    }

    /// Returns a shared reference to the cell at the given flat index.
    pub(crate) fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Returns an exclusive reference to the cell at the given flat index.
    pub(crate) fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// Returns an iterator over all cells in row-major order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the flat index of the start cell.
    pub(crate) const fn start(&self) -> usize {
        self.start
    }

    /// Returns the flat index of the goal cell, if a goal has been placed.
    pub(crate) const fn goal(&self) -> Option<usize> {
        self.goal
    }

    /// Returns the pixel center of the cell at the given flat index.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid dimensions are far below the point where f64 loses integer precision."
    )]
    pub(crate) fn center(&self, idx: usize) -> (f64, f64) {
        let (row, col) = self.pos(idx);
        (
            (col as f64).mul_add(self.cell_size, self.cell_size / 2.0),
            (row as f64).mul_add(self.cell_size, self.cell_size / 2.0),
        )
    }

    /// Returns the in-bounds non-wall orthogonal neighbors of a cell.
    ///
    /// The result is ordered down, up, right, left. The search engine relies on this fixed order
    /// for deterministic tie-breaking between equal-length paths.
    pub(crate) fn neighbors(&self, idx: usize) -> Vec<usize> {
        let (row, col) = self.pos(idx);
        let mut result = Vec::with_capacity(4);

        for (row_delta, col_delta) in ORTHOGONAL {
            let Some(neighbor_row) = row.checked_add_signed(row_delta) else {
                continue;
            };
            let Some(neighbor_col) = col.checked_add_signed(col_delta) else {
                continue;
            };

            if neighbor_row < self.rows && neighbor_col < self.cols {
                let neighbor = self.idx(neighbor_row, neighbor_col);
                if !self.cells[neighbor].wall {
                    result.push(neighbor);
                }
            }
        }

        result
    }

    /// Clears the search scratch state of every cell.
    ///
    /// Distances return to [`INFINITE`] and all predecessor links and frontier flags are dropped.
    /// Calling this twice in a row is equivalent to calling it once.
    pub(crate) fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search();
        }
    }

    /// Places the goal on the given cell, clearing any previous goal.
    ///
    /// Returns `false` without touching the grid when the target is a wall or the start cell.
    pub(crate) fn set_goal(&mut self, idx: usize) -> bool {
        if self.cells[idx].wall || self.cells[idx].start {
            return false;
        }

        if let Some(old) = self.goal {
            self.cells[old].goal = false;
        }
        self.cells[idx].goal = true;
        self.goal = Some(idx);

        true
    }

    /// Toggles the wall flag of the given cell.
    ///
    /// Returns `false` without touching the grid when the target is the start or goal cell.
    pub(crate) fn toggle_wall(&mut self, idx: usize) -> bool {
        if self.cells[idx].start || self.cells[idx].goal {
            return false;
        }

        self.cells[idx].wall = !self.cells[idx].wall;

        true
    }

    /// Moves the start marker to the given cell, for tests that need a non-default start.
    #[cfg(test)]
    pub(crate) fn set_start(&mut self, idx: usize) {
        self.cells[self.start].start = false;
        self.start = idx;
        self.cells[idx].start = true;
        self.cells[idx].wall = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_defaults() {
        let grid = Grid::new(5, 7, 32.0);

        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.cells().count(), 35);
        assert_eq!(grid.goal(), None);
        assert_eq!(grid.pos(grid.start()), (1, 1));

        for cell in grid.cells() {
            assert!(!cell.wall, "new grids should have no walls");
            assert_eq!(cell.distance, INFINITE);
            assert_eq!(cell.predecessor, None);
            assert!(!cell.queued && !cell.settled && !cell.current);
        }
    }

    #[test]
    fn test_new_grid_degenerate_start_clamped() {
        let grid = Grid::new(1, 5, 16.0);

        assert_eq!(grid.pos(grid.start()), (0, 1));
        assert!(grid.cell(grid.start()).start);
    }

    #[test]
    fn test_idx_pos_round_trip() {
        let grid = Grid::new(4, 6, 16.0);

        for row in 0..4 {
            for col in 0..6 {
                assert_eq!(grid.pos(grid.idx(row, col)), (row, col));
            }
        }
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let grid = Grid::new(3, 3, 16.0);
        let middle = grid.idx(1, 1);

        // Fixed order: down, up, right, left.
        assert_eq!(
            grid.neighbors(middle),
            vec![grid.idx(2, 1), grid.idx(0, 1), grid.idx(1, 2), grid.idx(1, 0)]
        );

        // Corner cell only has in-bounds neighbors.
        assert_eq!(
            grid.neighbors(grid.idx(0, 0)),
            vec![grid.idx(1, 0), grid.idx(0, 1)]
        );
    }

    #[test]
    fn test_neighbors_skip_walls() {
        let mut grid = Grid::new(3, 3, 16.0);
        let middle = grid.idx(1, 1);
        grid.cell_mut(grid.idx(2, 1)).wall = true;
        grid.cell_mut(grid.idx(1, 0)).wall = true;

        assert_eq!(grid.neighbors(middle), vec![grid.idx(0, 1), grid.idx(1, 2)]);
    }

    #[test]
    fn test_reset_search_state_idempotent() {
        let mut grid = Grid::new(3, 3, 16.0);
        let idx = grid.idx(2, 2);
        {
            let cell = grid.cell_mut(idx);
            cell.distance = 4;
            cell.predecessor = Some(0);
            cell.queued = true;
            cell.settled = true;
            cell.current = true;
        }

        grid.reset_search_state();
        let first: Vec<Cell> = grid.cells().cloned().collect();
        grid.reset_search_state();
        let second: Vec<Cell> = grid.cells().cloned().collect();

        for (one, two) in first.iter().zip(second.iter()) {
            assert_eq!(one.distance, INFINITE);
            assert_eq!(one.distance, two.distance);
            assert_eq!(one.predecessor, two.predecessor);
            assert_eq!(one.queued, two.queued);
            assert_eq!(one.settled, two.settled);
            assert_eq!(one.current, two.current);
        }
    }

    #[test]
    fn test_set_goal_moves_marker() {
        let mut grid = Grid::new(4, 4, 16.0);
        let first = grid.idx(2, 2);
        let second = grid.idx(3, 3);

        assert!(grid.set_goal(first));
        assert!(grid.set_goal(second));

        assert_eq!(grid.goal(), Some(second));
        assert!(!grid.cell(first).goal);
        assert!(grid.cell(second).goal);
    }

    #[test]
    fn test_set_goal_rejects_wall_and_start() {
        let mut grid = Grid::new(4, 4, 16.0);
        let walled = grid.idx(2, 2);
        grid.cell_mut(walled).wall = true;

        assert!(!grid.set_goal(walled));
        assert!(!grid.set_goal(grid.start()));
        assert_eq!(grid.goal(), None);
    }

    #[test]
    fn test_toggle_wall_rejects_start_and_goal() {
        let mut grid = Grid::new(4, 4, 16.0);
        let goal = grid.idx(2, 2);
        assert!(grid.set_goal(goal));

        assert!(!grid.toggle_wall(grid.start()));
        assert!(!grid.toggle_wall(goal));

        let plain = grid.idx(3, 1);
        assert!(grid.toggle_wall(plain));
        assert!(grid.cell(plain).wall);
        assert!(grid.toggle_wall(plain));
        assert!(!grid.cell(plain).wall);
    }

    #[test]
    fn test_center_is_cell_midpoint() {
        let grid = Grid::new(4, 4, 32.0);

        assert_eq!(grid.center(grid.idx(0, 0)), (16.0, 16.0));
        assert_eq!(grid.center(grid.idx(2, 1)), (48.0, 80.0));
    }
}
