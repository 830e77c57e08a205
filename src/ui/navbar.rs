//! Navigation bar rendering.
//!
//! Shows the search input and the add-client hint.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the navigation bar.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Highlights the search input while in search mode.
pub fn render_navbar(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Search;
    let prompt = if is_active {
        "Search: "
    } else {
        "Search (press '/'): "
    };

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Yellow)),
        Span::styled(
            app.state().search_term.as_str(),
            Style::default().fg(if is_active { Color::White } else { Color::Gray }),
        ),
        Span::styled(
            if is_active { "_" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("    "),
        Span::styled(
            "[a] Add client",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title("Clients")
            .borders(Borders::ALL)
            .style(if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    Widget::render(paragraph, area, buf);
}
