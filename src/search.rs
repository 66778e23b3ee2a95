//! Stepwise shortest-path search engine.
//!
//! This module implements a uniform-cost Dijkstra search (all edges weigh one hop) as an explicit
//! state machine. The driver advances it by calling [`Search::step`] repeatedly; every call
//! returns at one of the two observable suspension points of a processed cell, so a frame can be
//! rendered and a quit signal polled between any two of them. The engine itself never draws,
//! sleeps or blocks.

use std::{cmp::Ordering, collections::BinaryHeap, fmt};

use crate::grid::Grid;

/// Frontier entry pairing a cell with its tentative distance.
///
/// Entries order as a min-heap by distance inside a [`BinaryHeap`], with the monotone insertion
/// sequence number breaking ties so the pop order is a stable total order. Superseded entries are
/// left in the heap and discarded when popped, rather than being removed eagerly.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    /// Tentative distance of the cell at the time the entry was pushed.
    distance: u32,
    /// Insertion sequence number, strictly increasing across pushes.
    seq: u64,
    /// Flat index of the cell this entry refers to.
    cell: usize,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the smallest distance, oldest entry first.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reasons a search cannot start.
///
/// These cover the invalid-goal cases checked before any queue work begins; they are reported to
/// the driver as values and never abort the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchError {
    /// No goal cell has been placed on the grid.
    MissingGoal,
    /// The goal cell is currently a wall.
    GoalIsWall,
}

impl fmt::Display for SearchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGoal => write!(formatter, "place a goal before starting the search"),
            Self::GoalIsWall => write!(formatter, "the goal is buried inside a wall"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Result of one [`Search::step`] call.
///
/// The `Visiting` and `Expanded` variants are the two suspension points of a processed cell; the
/// other two variants are terminal and leave the engine inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchStep {
    /// A cell was popped, settled and marked as current; its edges are not yet relaxed.
    Visiting(usize),
    /// The current marker was cleared and the cell's neighbors were relaxed.
    Expanded(usize),
    /// The goal was settled; the path can be reconstructed with [`Search::into_path`].
    Found,
    /// The frontier drained without settling the goal: no path exists.
    Exhausted,
}

/// Terminal result of a whole search run as recorded by the driver.
///
/// `Aborted` is reported when the driver stops stepping the engine on an external quit or
/// regenerate signal; it is distinct from `Unreachable`, which means the frontier was exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    /// A shortest path from start to goal, both inclusive, as flat cell indices.
    Found(Vec<usize>),
    /// Every reachable cell was settled without reaching the goal.
    Unreachable,
    /// The run was cancelled at a suspension point before it could terminate.
    Aborted,
}

/// Shortest-path search over a grid, advanced one observable step at a time.
///
/// The engine owns the frontier; all per-cell scratch state (distances, predecessor links, the
/// queued/settled/current flags) lives in the [`Grid`] so the renderer can observe it directly.
/// While a search is live it has exclusive use of that scratch state: the grid must not be carved
/// or edited until the engine is dropped.
pub(crate) struct Search {
    /// Min-heap frontier of discovered cells, possibly holding stale superseded entries.
    heap: BinaryHeap<HeapEntry>,
    /// Next insertion sequence number for tie-breaking.
    seq: u64,
    /// Flat index of the goal cell, validated at construction.
    goal: usize,
    /// Cell settled by the previous `Visiting` step, awaiting relaxation.
    visiting: Option<usize>,
}

impl Search {
    /// Prepares a search run on the given grid.
    ///
    /// This validates the goal, wipes all per-cell search scratch state and seeds the frontier
    /// with the start cell at distance zero.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] when no goal is placed or the goal is currently a wall; in that
    /// case the grid is left untouched.
    pub(crate) fn new(grid: &mut Grid) -> Result<Self, SearchError> {
        let goal = grid.goal().ok_or(SearchError::MissingGoal)?;
        if grid.cell(goal).wall {
            return Err(SearchError::GoalIsWall);
        }

        grid.reset_search_state();

        let start = grid.start();
        grid.cell_mut(start).distance = 0;

        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry {
            distance: 0,
            seq: 0,
            cell: start,
        });

        Ok(Self {
            heap,
            seq: 1,
            goal,
            visiting: None,
        })
    }

    /// Advances the search by one observable step.
    ///
    /// Steps alternate between two phases. The visit phase pops the smallest frontier entry,
    /// silently discarding stale entries for already settled cells, marks the popped cell settled
    /// and current, and returns [`SearchStep::Visiting`]. The expand phase clears the current
    /// marker, terminates with [`SearchStep::Found`] when the visited cell is the goal, and
    /// otherwise relaxes the cell's neighbors in the grid's fixed order before returning
    /// [`SearchStep::Expanded`]. An empty frontier in the visit phase yields
    /// [`SearchStep::Exhausted`]. After a terminal step the engine stays inert and keeps
    /// reporting `Exhausted`.
    pub(crate) fn step(&mut self, grid: &mut Grid) -> SearchStep {
        if let Some(current) = self.visiting.take() {
            grid.cell_mut(current).current = false;

            if current == self.goal {
                return SearchStep::Found;
            }

            let distance = grid.cell(current).distance + 1;
            for neighbor in grid.neighbors(current) {
                if grid.cell(neighbor).settled || distance >= grid.cell(neighbor).distance {
                    continue;
                }

                let cell = grid.cell_mut(neighbor);
                cell.distance = distance;
                cell.predecessor = Some(current);
                cell.queued = true;
                self.heap.push(HeapEntry {
                    distance,
                    seq: self.seq,
                    cell: neighbor,
                });
                self.seq += 1;
            }

            return SearchStep::Expanded(current);
        }

        while let Some(entry) = self.heap.pop() {
            if grid.cell(entry.cell).settled {
                continue;
            }

            let cell = grid.cell_mut(entry.cell);
            cell.settled = true;
            cell.current = true;
            self.visiting = Some(entry.cell);

            return SearchStep::Visiting(entry.cell);
        }

        SearchStep::Exhausted
    }

    /// Reconstructs the discovered path by walking predecessor links back from the goal.
    ///
    /// Returns the start-to-goal cell sequence, both endpoints inclusive, or `None` when the goal
    /// was never settled (the run was exhausted or abandoned early).
    pub(crate) fn into_path(self, grid: &Grid) -> Option<Vec<usize>> {
        if !grid.cell(self.goal).settled {
            return None;
        }

        let mut path = vec![self.goal];
        let mut cursor = self.goal;
        while let Some(previous) = grid.cell(cursor).predecessor {
            path.push(previous);
            cursor = previous;
        }
        path.reverse();

        Some(path)
    }
}
