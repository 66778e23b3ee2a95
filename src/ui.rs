//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{config::Difficulty, grid::Grid, search::SearchOutcome, types::Screen, App};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::InGame => in_game(app, frame)?,
        Screen::LevelMenu(selected) => level_menu(frame, selected),
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic centered layout structure for a menu.
///
/// This function creates the centered block every menu gets rendered into and splits its interior
/// into one single-line slot per entry, returned for the caller to fill.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, title: &str, entries: u8) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(entries + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(title.to_owned())
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(entries)]).split(inner_space)
}

/// Renders the difficulty selection menu.
///
/// This function displays one entry per difficulty level and highlights the entry under the menu
/// cursor, in the same style as the rest of the interface.
pub(crate) fn level_menu(frame: &mut Frame, selected: Difficulty) {
    clear(frame);

    let entries = u8::try_from(Difficulty::ALL.len()).unwrap_or(u8::MAX);
    let inner_layout = init_menu(frame, "Difficulty", entries);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (level, slot) in Difficulty::ALL.iter().zip(inner_layout.iter()) {
        let style = if *level == selected {
            active_content_style
        } else {
            content_style
        };
        let entry = Line::raw(level.label()).centered().style(style);
        frame.render_widget(entry, *slot);
    }
}

/// Transforms a cell position into centered canvas coordinates.
///
/// Rows grow downward on the grid but upward on the canvas, so the row axis is flipped around the
/// grid's vertical midpoint while columns shift symmetrically around the horizontal one.
#[expect(
    clippy::cast_precision_loss,
    reason = "Grid dimensions are far below the point where f64 loses integer precision."
)]
fn cell_point(grid: &Grid, row: f64, col: f64) -> (f64, f64) {
    let rows = grid.rows() as f64;
    let cols = grid.cols() as f64;

    (col - (cols - 1.0) / 2.0, (rows - 1.0) / 2.0 - row)
}

/// Transforms the agent's continuous pixel position into canvas coordinates.
fn agent_point(grid: &Grid, x: f64, y: f64) -> (f64, f64) {
    let col = x / grid.cell_size() - 0.5;
    let row = y / grid.cell_size() - 0.5;

    cell_point(grid, row, col)
}

/// Renders the in-game screen: the maze, the evolving search state and the agent.
///
/// This function draws every cell as a colored canvas point according to its flags, layered so
/// the most informative state wins: walls and the final path over settled cells, settled over
/// queued, queued over the transient current marker. The goal, the agent and the editing cursor
/// are painted on a second canvas above everything else. A tooltip block at the bottom carries
/// the key bindings and the current status line.
///
/// # Errors
///
/// This function may return errors from layout lookups or dimension conversions.
#[expect(
    clippy::too_many_lines,
    reason = "UI rendering function requires many lines for layout and drawing operations."
)]
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let maze_rows = app.grid.rows();
    let maze_columns = app.grid.cols();

    // Overall layout: maze area plus a tooltip block at the bottom.
    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    // Center the maze within the content area.
    let main_layout = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze_rows)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area);

    let maze_area = main_layout
        .get(1)
        .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze_columns)?),
        Constraint::Min(1),
    ])
    .split(*maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute per-state coordinate buckets to handle errors before the paint closures.
    let mut wall_coords = Vec::new();
    let mut settled_coords = Vec::new();
    let mut queued_coords = Vec::new();
    let mut current_coords = Vec::new();
    let mut goal_coords = Vec::new();
    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid dimensions are far below the point where f64 loses integer precision."
    )]
    for cell in app.grid.cells() {
        let point = cell_point(&app.grid, cell.row as f64, cell.col as f64);
        if cell.wall {
            wall_coords.push(point);
        } else if cell.current {
            current_coords.push(point);
        } else if cell.settled {
            settled_coords.push(point);
        } else if cell.queued {
            queued_coords.push(point);
        }
        if cell.goal {
            goal_coords.push(point);
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid dimensions are far below the point where f64 loses integer precision."
    )]
    let path_coords: Vec<(f64, f64)> = match &app.outcome {
        Some(SearchOutcome::Found(path)) => path
            .iter()
            .filter(|&&idx| !app.grid.cell(idx).start && !app.grid.cell(idx).goal)
            .map(|&idx| {
                let (row, col) = app.grid.pos(idx);
                cell_point(&app.grid, row as f64, col as f64)
            })
            .collect(),
        _ => Vec::new(),
    };

    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid dimensions are far below the point where f64 loses integer precision."
    )]
    let cursor_coords = vec![cell_point(&app.grid, app.cursor.0 as f64, app.cursor.1 as f64)];
    let (agent_x, agent_y) = app.agent.position();
    let agent_coords = vec![agent_point(&app.grid, agent_x, agent_y)];

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            // Back-to-front: later layers overwrite earlier ones.
            ctx.draw(&Points {
                coords: &current_coords,
                color: Color::LightGreen,
            });
            ctx.draw(&Points {
                coords: &queued_coords,
                color: Color::Yellow,
            });
            ctx.draw(&Points {
                coords: &settled_coords,
                color: Color::Magenta,
            });
            ctx.draw(&Points {
                coords: &path_coords,
                color: Color::Blue,
            });
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
        });
    let overlay = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &goal_coords,
                color: Color::Red,
            });
            ctx.draw(&Points {
                coords: &cursor_coords,
                color: Color::White,
            });
            ctx.draw(&Points {
                coords: &agent_coords,
                color: Color::Cyan,
            });
        });

    frame.render_widget(maze, space);
    frame.render_widget(overlay, space);

    // Tooltip block at the bottom with the key bindings and the status line.
    let tooltip_block = Block::bordered()
        .title("(space) solve / (r) new maze / (l) levels / (w) wall / (g) goal / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    let status_area = tooltip_block.inner(tooltip_area);
    frame.render_widget(tooltip_block, tooltip_area);

    if let Some(status) = &app.status {
        let status_line = Line::raw(status.clone()).centered();
        frame.render_widget(status_line, status_area);
    }

    Ok(())
}
