//! Offline/empty placeholder rendering.
//!
//! Replaces the table when there are no clients to show.

use crate::app::App;
use crate::store::BackendStatus;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Render the placeholder.
///
/// # Details
/// While a wake-up is running only the spinner is shown; otherwise the
/// message depends on what the last load said about the backend, and the
/// wake-up action is offered.
pub fn render_placeholder(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.state();
    let mut lines = vec![Line::from("")];

    if state.loading {
        lines.push(Line::from("Please wait..."));
        lines.push(Line::from(Span::styled(
            app.spinner(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        let message = match state.backend {
            BackendStatus::Unknown => "Contacting the backend...",
            BackendStatus::Unreachable => {
                "The backend is temporarily offline. Please wake it up to load the data."
            }
            BackendStatus::Online => {
                "No clients to show. The backend may still be waking up, or the list is empty."
            }
        };
        lines.push(Line::from(message));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[w] Activate backend",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Clients").borders(Borders::ALL));

    Widget::render(paragraph, area, buf);
}
