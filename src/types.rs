//! Screen state types for application navigation.

use crate::config::Difficulty;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. It is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// In-game maze screen where the maze is displayed, searched and walked.
    InGame,
    /// Difficulty selection menu, carrying the level under the menu cursor.
    LevelMenu(Difficulty),
}
