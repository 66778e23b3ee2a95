//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::{config::Difficulty, types::Screen, App};

/// Poll timeout between search steps.
///
/// Short enough to pace the frontier visualization, long enough to keep the loop from spinning;
/// it doubles as the visualization delay between the engine's suspension points.
const SEARCH_POLL: Duration = Duration::from_millis(5);

/// Poll timeout while the agent animation is running.
const ANIMATION_POLL: Duration = Duration::from_millis(16);

/// Poll timeout while nothing is animating.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler based
/// on the current screen, then advances the application's background work by one tick. The poll
/// timeout shrinks while a search or animation is active so those advance at a steady pace, and
/// widens when the application is idle to avoid busy-waiting.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = if app.search_active() {
        SEARCH_POLL
    } else if app.agent.moving() {
        ANIMATION_POLL
    } else {
        IDLE_POLL
    };

    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            match app.screen {
                Screen::InGame => handle_game_key(app, key.code),
                Screen::LevelMenu(selected) => handle_menu_key(app, key.code, selected),
            }
        }
    }

    app.tick();

    Ok(())
}

/// Handles a key press on the in-game screen.
///
/// While a search run is in flight only the quit key is honored, and it aborts the run instead
/// of quitting; every other trigger would race the engine for the grid's scratch state.
pub(crate) fn handle_game_key(app: &mut App, code: KeyCode) {
    if app.search_active() {
        if code == KeyCode::Char('q') {
            app.abort_search();
        }
        return;
    }

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char(' ') => app.start_search(),
        KeyCode::Char('r') => app.regenerate(),
        KeyCode::Char('l') => app.screen = Screen::LevelMenu(app.difficulty),
        KeyCode::Char('w') => app.toggle_wall_at_cursor(),
        KeyCode::Char('g') => app.set_goal_at_cursor(),
        KeyCode::Up => app.move_cursor(-1, 0),
        KeyCode::Down => app.move_cursor(1, 0),
        KeyCode::Left => app.move_cursor(0, -1),
        KeyCode::Right => app.move_cursor(0, 1),
        _ => {}
    }
}

/// Handles a key press on the difficulty menu screen.
pub(crate) fn handle_menu_key(app: &mut App, code: KeyCode, selected: Difficulty) {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.screen = Screen::LevelMenu(neighbor_level(selected, 1));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.screen = Screen::LevelMenu(neighbor_level(selected, -1));
        }
        KeyCode::Char('l') | KeyCode::Enter => app.apply_level(selected),
        KeyCode::Char('h') | KeyCode::Esc => app.screen = Screen::InGame,
        _ => {}
    }
}

/// Returns the menu entry `delta` positions away from `selected`, clamped to the ends.
fn neighbor_level(selected: Difficulty, delta: isize) -> Difficulty {
    let position = Difficulty::ALL
        .iter()
        .position(|level| *level == selected)
        .unwrap_or(0);
    let target = position
        .saturating_add_signed(delta)
        .min(Difficulty::ALL.len() - 1);

    Difficulty::ALL.get(target).copied().unwrap_or(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_app() -> App {
        App::new(Difficulty::Easy, Some(11))
    }

    #[test]
    fn test_quit_key_exits_when_idle() {
        let mut app = create_test_app();

        handle_game_key(&mut app, KeyCode::Char('q'));

        assert!(app.exit);
    }

    #[test]
    fn test_quit_key_aborts_active_search_instead_of_exiting() {
        let mut app = create_test_app();
        app.start_search();

        handle_game_key(&mut app, KeyCode::Char('q'));

        assert!(!app.exit, "quitting during a search only aborts the run");
        assert!(!app.search_active());
    }

    #[test]
    fn test_space_starts_search() {
        let mut app = create_test_app();

        handle_game_key(&mut app, KeyCode::Char(' '));

        assert!(app.search_active());
    }

    #[test]
    fn test_regenerate_key_builds_fresh_maze() {
        let mut app = create_test_app();
        let walls_before: Vec<bool> = app.grid.cells().map(|cell| cell.wall).collect();

        handle_game_key(&mut app, KeyCode::Char('r'));

        let walls_after: Vec<bool> = app.grid.cells().map(|cell| cell.wall).collect();
        assert_ne!(walls_before, walls_after, "a 15x15 regeneration should differ");
        assert!(app.grid.goal().is_some());
    }

    #[test]
    fn test_level_key_opens_menu_on_current_difficulty() {
        let mut app = create_test_app();

        handle_game_key(&mut app, KeyCode::Char('l'));

        assert_eq!(app.screen, Screen::LevelMenu(Difficulty::Easy));
    }

    #[test]
    fn test_arrow_keys_move_cursor() {
        let mut app = create_test_app();
        app.cursor = (5, 5);

        handle_game_key(&mut app, KeyCode::Down);
        handle_game_key(&mut app, KeyCode::Right);
        assert_eq!(app.cursor, (6, 6));

        handle_game_key(&mut app, KeyCode::Up);
        handle_game_key(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, (5, 5));
    }

    #[test]
    fn test_menu_navigation_clamps_at_ends() {
        let mut app = create_test_app();
        app.screen = Screen::LevelMenu(Difficulty::Easy);

        handle_menu_key(&mut app, KeyCode::Char('k'), Difficulty::Easy);
        assert_eq!(app.screen, Screen::LevelMenu(Difficulty::Easy));

        handle_menu_key(&mut app, KeyCode::Char('j'), Difficulty::Easy);
        assert_eq!(app.screen, Screen::LevelMenu(Difficulty::Medium));

        handle_menu_key(&mut app, KeyCode::Down, Difficulty::Hard);
        assert_eq!(app.screen, Screen::LevelMenu(Difficulty::Hard));
    }

    #[test]
    fn test_menu_select_applies_level_and_returns_in_game() {
        let mut app = create_test_app();
        app.screen = Screen::LevelMenu(Difficulty::Medium);

        handle_menu_key(&mut app, KeyCode::Enter, Difficulty::Medium);

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.difficulty, Difficulty::Medium);
        assert_eq!(app.grid.rows(), 25);
    }

    #[test]
    fn test_menu_escape_keeps_previous_difficulty() {
        let mut app = create_test_app();
        app.screen = Screen::LevelMenu(Difficulty::Hard);

        handle_menu_key(&mut app, KeyCode::Esc, Difficulty::Hard);

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.difficulty, Difficulty::Easy);
        assert_eq!(app.grid.rows(), 15);
    }

    #[test]
    fn test_neighbor_level_steps_through_menu_order() {
        assert_eq!(neighbor_level(Difficulty::Easy, 1), Difficulty::Medium);
        assert_eq!(neighbor_level(Difficulty::Medium, 1), Difficulty::Hard);
        assert_eq!(neighbor_level(Difficulty::Hard, 1), Difficulty::Hard);
        assert_eq!(neighbor_level(Difficulty::Medium, -1), Difficulty::Easy);
        assert_eq!(neighbor_level(Difficulty::Easy, -1), Difficulty::Easy);
    }
}
