//! Procedural maze generation.
//!
//! This module turns a fully open [`Grid`] into a maze: it fills the grid with walls, carves a
//! spanning tree of corridors with a randomized depth-first backtracker, opens extra passages to
//! tune the difficulty, and places the goal far away from the start.

use rand::{seq::IndexedRandom as _, Rng};

use crate::grid::Grid;

/// Carving offsets reaching two cells away, the step of the odd carving sub-lattice.
const FAR_OFFSETS: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// Number of farthest candidate cells the goal is drawn from.
const GOAL_CANDIDATES: usize = 10;

/// Probability of opening an extra passage that would create a cycle.
const SHORTCUT_PROBABILITY: f64 = 0.2;

/// Carves a maze into the grid with a randomized depth-first backtracker.
///
/// Every cell is first turned into a wall, then corridors are carved outward from the start cell
/// on a sub-lattice with step two: each carve clears the chosen far cell and the wall between it
/// and the current cell. When a cell has no unvisited far neighbor left, the walk backtracks.
/// The result is a spanning tree over the carved cells, so exactly one corridor path connects any
/// two of them. Grids too small for any far neighbor degenerate to a single open start cell.
pub(crate) fn generate(grid: &mut Grid, rng: &mut impl Rng) {
    for idx in 0..grid.rows() * grid.cols() {
        grid.cell_mut(idx).wall = true;
    }

    let start = grid.start();
    grid.cell_mut(start).wall = false;

    let mut visited = vec![false; grid.rows() * grid.cols()];
    let mut stack = vec![start];
    if let Some(flag) = visited.get_mut(start) {
        *flag = true;
    }

    while let Some(&current) = stack.last() {
        let candidates = far_neighbors(grid, &visited, current);

        if let Some(&next) = candidates.choose(rng) {
            let (row, col) = grid.pos(current);
            let (next_row, next_col) = grid.pos(next);
            // The wall between two far neighbors sits exactly at their midpoint.
            let between = grid.idx((row + next_row) / 2, (col + next_col) / 2);

            grid.cell_mut(between).wall = false;
            grid.cell_mut(next).wall = false;
            if let Some(flag) = visited.get_mut(next) {
                *flag = true;
            }
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    grid.cell_mut(start).wall = false;
    if let Some(goal) = grid.goal() {
        grid.cell_mut(goal).wall = false;
    }
}

/// Returns the unvisited cells two steps away from the given cell.
fn far_neighbors(grid: &Grid, visited: &[bool], idx: usize) -> Vec<usize> {
    let (row, col) = grid.pos(idx);
    let mut result = Vec::with_capacity(4);

    for (row_delta, col_delta) in FAR_OFFSETS {
        let Some(far_row) = row.checked_add_signed(row_delta) else {
            continue;
        };
        let Some(far_col) = col.checked_add_signed(col_delta) else {
            continue;
        };

        if far_row < grid.rows() && far_col < grid.cols() {
            let far = grid.idx(far_row, far_col);
            if !visited.get(far).copied().unwrap_or(true) {
                result.push(far);
            }
        }
    }

    result
}

/// Opens up to `count` extra passages through interior walls.
///
/// Each attempt picks a uniformly random interior cell. A wall with at most one open orthogonal
/// neighbor is cleared unconditionally, extending a dead end; a wall with two or more open
/// neighbors is cleared with a small fixed probability, which deliberately introduces cycles and
/// shortcuts into the otherwise tree-shaped maze. Attempts are capped at five times `count` so a
/// nearly saturated grid cannot stall the loop. Walls are only ever cleared here, never re-added,
/// so connectivity can only improve.
pub(crate) fn add_extra_paths(grid: &mut Grid, count: usize, rng: &mut impl Rng) {
    if count == 0 || grid.rows() < 3 || grid.cols() < 3 {
        return;
    }

    let mut added = 0;
    let mut tries = 0;

    while added < count && tries < count * 5 {
        tries += 1;

        let row = rng.random_range(1..grid.rows() - 1);
        let col = rng.random_range(1..grid.cols() - 1);
        let idx = grid.idx(row, col);

        if !grid.cell(idx).wall {
            continue;
        }

        let open_neighbors = grid.neighbors(idx).len();
        if open_neighbors <= 1 || rng.random_bool(SHORTCUT_PROBABILITY) {
            grid.cell_mut(idx).wall = false;
            added += 1;
        }
    }
}

/// Picks a goal cell biased toward remote placements and marks it on the grid.
///
/// Candidates are the non-wall interior cells at least two cells away from the border, excluding
/// the start. The goal is drawn uniformly from the ten candidates farthest from the start by
/// squared Euclidean distance, so trivially close goals never come up on a healthy maze. When no
/// candidate exists, a corner-region fallback cell is used instead; `None` is returned only on
/// grids so small that every fallback cell is the start.
pub(crate) fn place_goal(grid: &mut Grid, rng: &mut impl Rng) -> Option<usize> {
    let start = grid.start();
    let (start_row, start_col) = grid.pos(start);

    let mut candidates: Vec<(usize, usize)> = grid
        .cells()
        .filter(|cell| {
            !cell.wall
                && !cell.start
                && cell.row > 1
                && cell.row < grid.rows() - 2
                && cell.col > 1
                && cell.col < grid.cols() - 2
        })
        .map(|cell| {
            let distance = start_row.abs_diff(cell.row).pow(2) + start_col.abs_diff(cell.col).pow(2);
            (distance, grid.idx(cell.row, cell.col))
        })
        .collect();

    candidates.sort_by(|lhs, rhs| rhs.0.cmp(&lhs.0));
    candidates.truncate(GOAL_CANDIDATES);

    let goal = candidates
        .choose(rng)
        .map(|&(_, idx)| idx)
        .or_else(|| fallback_goal(grid))?;

    grid.cell_mut(goal).wall = false;
    let _ = grid.set_goal(goal);

    Some(goal)
}

/// Corner-region fallback used when no interior candidate survives the filter.
///
/// Tries the cell at (rows - 2, cols - 2) first and steps out to the far corner when that cell is
/// the start, which happens on 3x3 grids. Returns `None` when both fallbacks are the start.
fn fallback_goal(grid: &Grid) -> Option<usize> {
    let near = grid.idx(grid.rows().saturating_sub(2), grid.cols().saturating_sub(2));
    let far = grid.idx(grid.rows().saturating_sub(1), grid.cols().saturating_sub(1));

    [near, far].into_iter().find(|&idx| idx != grid.start())
}
