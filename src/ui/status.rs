//! Status bar rendering.

use crate::app::{App, UiMode};
use crate::store::NoticeLevel;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Key hints for the current mode.
fn hints(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Table => "q quit | / search | a add | e edit | d hide row | w wake backend",
        UiMode::Search => "type to filter | Enter/Esc done",
        UiMode::Modal => "Tab next field | Space toggle status | Enter save | Esc cancel",
    }
}

/// Render the one-line status bar.
///
/// # Details
/// Shows the latest notice with its time, followed by key hints. Errors are
/// drawn in red, and a trailing marker appears while a save is in flight.
pub fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.state();
    let mut spans = Vec::new();

    if let Some(notice) = &state.notice {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        spans.push(Span::styled(
            format!("[{}] {}", notice.at.format("%H:%M:%S"), notice.message),
            Style::default().fg(color),
        ));
        spans.push(Span::raw(" | "));
    }

    if state.pending.is_some() {
        spans.push(Span::styled(
            format!("saving {} | ", app.spinner()),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(hints(app.mode), Style::default().fg(Color::Gray)));

    Widget::render(Paragraph::new(Line::from(spans)), area, buf);
}
