//! This crate contains the library code for the game mazebound. It covers procedural maze
//! generation, an animated shortest-path search and the terminal interface that ties them
//! together.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod agent;
mod app;
mod config;
mod events;
mod grid;
mod maze;
mod search;
mod types;
mod ui;

pub use app::App;
pub use config::Difficulty;
