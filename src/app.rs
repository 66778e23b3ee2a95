//! Core application state and the cooperative driver loop.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::DefaultTerminal;

use crate::{
    agent::Agent,
    config::{Difficulty, Profile},
    events,
    grid::Grid,
    maze,
    search::{Search, SearchOutcome, SearchStep},
    types::Screen,
    ui,
};

/// Minimum time between two agent animation ticks.
///
/// The driver loop runs as fast as input polling allows; gating the agent on this interval keeps
/// its speed independent of how often the loop happens to spin.
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. It is also the single
/// cooperative driver: maze generation, search stepping and agent animation all run inside its
/// loop, one bounded unit of work per iteration, so none of them can starve rendering or input.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Difficulty level the current maze was generated with.
    pub(crate) difficulty: Difficulty,
    /// The maze grid, including all per-cell search scratch state.
    pub(crate) grid: Grid,
    /// The agent walking solved paths through the maze.
    pub(crate) agent: Agent,
    /// Editing cursor position as (row, column), moved with the arrow keys.
    pub(crate) cursor: (usize, usize),
    /// Result of the last finished search run, if any.
    pub(crate) outcome: Option<SearchOutcome>,
    /// Diagnostic line shown at the bottom of the in-game screen.
    pub(crate) status: Option<String>,
    /// The search engine while a run is in flight.
    ///
    /// While this is `Some`, the engine has exclusive use of the grid's scratch state: editing
    /// and regeneration triggers are ignored until the run terminates or is aborted.
    pub(crate) search: Option<Search>,
    /// Random source for maze generation, seedable for reproducible mazes.
    pub(crate) rng: StdRng,
    /// Timestamp of the last agent animation tick.
    pub(crate) last_tick: Instant,
}

impl App {
    /// Creates the application with a freshly generated maze.
    ///
    /// A fixed `seed` reproduces the same sequence of mazes across runs; without one the
    /// generator is seeded from the operating system.
    #[must_use]
    pub fn new(level: Difficulty, seed: Option<u64>) -> Self {
        let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let grid = Self::build_maze(&level.profile(), &mut rng);
        let agent = Agent::new(&grid);

        Self {
            exit: false,
            screen: Screen::InGame,
            difficulty: level,
            cursor: grid.pos(grid.start()),
            agent,
            grid,
            outcome: None,
            status: None,
            search: None,
            rng,
            last_tick: Instant::now(),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws a frame, handles user input and advances whichever of the search
    /// engine or the agent is active, one step per iteration. The loop continues until the exit
    /// condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Builds a complete maze for the given profile: carve, open shortcuts, place the goal.
    fn build_maze(profile: &Profile, rng: &mut StdRng) -> Grid {
        let mut grid = Grid::new(profile.rows, profile.cols, profile.cell_size);
        maze::generate(&mut grid, rng);
        maze::add_extra_paths(&mut grid, profile.extra_paths, rng);
        let _ = maze::place_goal(&mut grid, rng);
        grid
    }

    /// Returns whether a search run is currently in flight.
    pub(crate) const fn search_active(&self) -> bool {
        self.search.is_some()
    }

    /// Advances whichever background activity is due: one search step or one animation tick.
    ///
    /// Called once per driver loop iteration. Each search step returns at one of the engine's two
    /// suspension points, so the following draw renders the evolving frontier and the next
    /// iteration polls for a quit signal before the engine resumes.
    pub(crate) fn tick(&mut self) {
        if let Some(mut search) = self.search.take() {
            match search.step(&mut self.grid) {
                SearchStep::Visiting(_) | SearchStep::Expanded(_) => self.search = Some(search),
                SearchStep::Found => match search.into_path(&self.grid) {
                    Some(path) => {
                        self.status = Some(format!("shortest path found: {} cells", path.len()));
                        self.agent.begin(path.clone());
                        self.outcome = Some(SearchOutcome::Found(path));
                    }
                    None => {
                        self.status = Some("search finished without a usable path".to_owned());
                        self.outcome = Some(SearchOutcome::Unreachable);
                    }
                },
                SearchStep::Exhausted => {
                    self.status = Some("the goal is unreachable".to_owned());
                    self.outcome = Some(SearchOutcome::Unreachable);
                }
            }
        } else if self.agent.moving() && self.last_tick.elapsed() >= ANIMATION_TICK {
            self.last_tick = Instant::now();
            self.agent.advance(&self.grid);
            if !self.agent.moving() {
                self.status = Some("the agent reached the goal".to_owned());
            }
        }
    }

    /// Starts a search run, or reports why it cannot start.
    ///
    /// With no goal placed or the goal buried in a wall this is a no-op beyond a status-line
    /// diagnostic. A run already in flight is left alone.
    pub(crate) fn start_search(&mut self) {
        if self.search.is_some() {
            return;
        }

        match Search::new(&mut self.grid) {
            Ok(search) => {
                self.search = Some(search);
                self.outcome = None;
                self.agent = Agent::new(&self.grid);
                self.status = Some("searching for the shortest path".to_owned());
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Aborts the search run in flight, if any.
    ///
    /// The engine is dropped at its current suspension point; the grid keeps its partially
    /// explored scratch state, which the next run's reset wipes.
    pub(crate) fn abort_search(&mut self) {
        if self.search.take().is_some() {
            self.outcome = Some(SearchOutcome::Aborted);
            self.status = Some("search aborted".to_owned());
        }
    }

    /// Regenerates the maze with the current difficulty profile.
    ///
    /// Ignored while a search is in flight: the engine owns the grid's scratch state until the
    /// run ends.
    pub(crate) fn regenerate(&mut self) {
        if self.search.is_some() {
            return;
        }

        self.grid = Self::build_maze(&self.difficulty.profile(), &mut self.rng);
        self.agent = Agent::new(&self.grid);
        self.cursor = self.grid.pos(self.grid.start());
        self.outcome = None;
        self.status = Some("new maze generated".to_owned());
    }

    /// Switches to the given difficulty level and regenerates the maze.
    pub(crate) fn apply_level(&mut self, level: Difficulty) {
        self.difficulty = level;
        self.regenerate();
        self.screen = Screen::InGame;
    }

    /// Moves the editing cursor by the given row and column deltas, clamped to the grid.
    pub(crate) fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let row = self
            .cursor
            .0
            .saturating_add_signed(row_delta)
            .min(self.grid.rows().saturating_sub(1));
        let col = self
            .cursor
            .1
            .saturating_add_signed(col_delta)
            .min(self.grid.cols().saturating_sub(1));
        self.cursor = (row, col);
    }

    /// Toggles the wall under the editing cursor.
    ///
    /// Rejected on the start and goal cells, and ignored entirely while a search is in flight.
    pub(crate) fn toggle_wall_at_cursor(&mut self) {
        if self.search.is_some() {
            return;
        }

        let idx = self.grid.idx(self.cursor.0, self.cursor.1);
        if self.grid.toggle_wall(idx) {
            self.status = None;
        } else {
            self.status = Some("the start and goal cells cannot be walled".to_owned());
        }
    }

    /// Moves the goal to the cell under the editing cursor.
    ///
    /// Rejected on walls and the start cell. A successful move discards the previous search
    /// result and resets the agent to the start.
    pub(crate) fn set_goal_at_cursor(&mut self) {
        if self.search.is_some() {
            return;
        }

        let idx = self.grid.idx(self.cursor.0, self.cursor.1);
        if self.grid.set_goal(idx) {
            self.grid.reset_search_state();
            self.agent = Agent::new(&self.grid);
            self.outcome = None;
            self.status = Some("goal moved".to_owned());
        } else {
            self.status = Some("walls and the start cell cannot be the goal".to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives the active search to termination through the public tick entry point.
    fn finish_search(app: &mut App) {
        let mut steps = 0;
        while app.search_active() {
            app.tick();
            steps += 1;
            assert!(steps < 100_000, "search must terminate");
        }
    }

    #[test]
    fn test_new_app_has_consistent_maze() {
        let app = App::new(Difficulty::Easy, Some(42));

        assert_eq!(app.grid.rows(), 15);
        assert_eq!(app.grid.cols(), 15);
        assert_eq!(app.grid.cells().filter(|cell| cell.start).count(), 1);

        let goal = app.grid.goal().expect("a fresh maze carries a goal");
        assert!(!app.grid.cell(goal).wall);
        assert!(!app.agent.moving());
        assert_eq!(app.screen, Screen::InGame);
    }

    #[test]
    fn test_seeded_apps_generate_identical_mazes() {
        let one = App::new(Difficulty::Medium, Some(7));
        let two = App::new(Difficulty::Medium, Some(7));

        let walls = |app: &App| -> Vec<bool> { app.grid.cells().map(|cell| cell.wall).collect() };
        assert_eq!(walls(&one), walls(&two));
        assert_eq!(one.grid.goal(), two.grid.goal());
    }

    #[test]
    fn test_search_on_generated_maze_finds_path() {
        let mut app = App::new(Difficulty::Easy, Some(3));

        app.start_search();
        assert!(app.search_active());
        finish_search(&mut app);

        let Some(SearchOutcome::Found(path)) = app.outcome.clone() else {
            panic!("a generated maze must be solvable, got {:?}", app.outcome);
        };
        assert_eq!(path.first(), Some(&app.grid.start()));
        assert_eq!(path.last(), app.grid.goal().as_ref());
        assert!(app.agent.moving(), "the agent starts walking the found path");
    }

    #[test]
    fn test_search_without_goal_is_rejected_with_diagnostic() {
        let mut app = App::new(Difficulty::Easy, Some(1));
        // Swap in a grid that never had a goal placed.
        app.grid = Grid::new(5, 5, 16.0);

        app.start_search();

        assert!(!app.search_active());
        assert_eq!(
            app.status.as_deref(),
            Some("place a goal before starting the search")
        );
    }

    #[test]
    fn test_abort_records_distinct_outcome() {
        let mut app = App::new(Difficulty::Easy, Some(5));

        app.start_search();
        app.tick();
        app.abort_search();

        assert!(!app.search_active());
        assert_eq!(app.outcome, Some(SearchOutcome::Aborted));

        // The partially explored grid is valid and fully cleared by the next reset.
        app.grid.reset_search_state();
        assert!(app.grid.cells().all(|cell| !cell.settled && !cell.queued));
    }

    #[test]
    fn test_edits_ignored_while_search_runs() {
        let mut app = App::new(Difficulty::Easy, Some(9));
        app.cursor = (1, 2);

        app.start_search();
        let wall_before = app.grid.cell(app.grid.idx(1, 2)).wall;
        app.toggle_wall_at_cursor();
        assert_eq!(app.grid.cell(app.grid.idx(1, 2)).wall, wall_before);

        let goal_before = app.grid.goal();
        app.set_goal_at_cursor();
        assert_eq!(app.grid.goal(), goal_before);

        let rows_before = app.grid.rows();
        app.regenerate();
        assert_eq!(app.grid.rows(), rows_before);
        assert!(app.search_active());
    }

    #[test]
    fn test_apply_level_regenerates_with_new_dimensions() {
        let mut app = App::new(Difficulty::Easy, Some(2));
        app.screen = Screen::LevelMenu(Difficulty::Hard);

        app.apply_level(Difficulty::Hard);

        assert_eq!(app.difficulty, Difficulty::Hard);
        assert_eq!(app.grid.rows(), 40);
        assert_eq!(app.screen, Screen::InGame);
        assert!(app.grid.goal().is_some());
    }

    #[test]
    fn test_move_cursor_clamps_to_grid() {
        let mut app = App::new(Difficulty::Easy, Some(2));

        app.move_cursor(-100, -100);
        assert_eq!(app.cursor, (0, 0));

        app.move_cursor(100, 100);
        assert_eq!(app.cursor, (14, 14));
    }

    #[test]
    fn test_set_goal_at_cursor_rejects_start() {
        let mut app = App::new(Difficulty::Easy, Some(4));
        app.cursor = app.grid.pos(app.grid.start());

        let goal_before = app.grid.goal();
        app.set_goal_at_cursor();

        assert_eq!(app.grid.goal(), goal_before);
        assert_eq!(
            app.status.as_deref(),
            Some("walls and the start cell cannot be the goal")
        );
    }
}
