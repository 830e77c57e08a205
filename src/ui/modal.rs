//! Add/edit dialog rendering.

use crate::app::App;
use crate::form::FormField;
use crate::store::Mode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Render the modal form centered over `area`.
///
/// # Details
/// The title reflects the mode; in edit mode it names the staged client id.
/// The focused field gets a cursor and a highlighted label.
pub fn render_modal(app: &App, area: Rect, buf: &mut Buffer) {
    let modal = &app.state().modal;
    let popup = centered_rect(60, 60, area);

    let title = match (modal.mode, modal.staged.as_ref()) {
        (Mode::Add, _) => "Client Details".to_string(),
        (Mode::Edit, Some(client)) => format!("Edit Client #{}", client.id),
        (Mode::Edit, None) => "Edit Client".to_string(),
    };

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        let focused = app.form.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let mut spans = vec![
            Span::styled(format!("{:>8}: ", field.label()), label_style),
            Span::styled(app.form.value(field), Style::default().fg(Color::White)),
        ];
        if focused {
            let cursor = if field == FormField::Status { " <space>" } else { "_" };
            spans.push(Span::styled(cursor, Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if let Some(error) = &app.form_error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    let confirm = match modal.mode {
        Mode::Add => "Enter: Add Client",
        Mode::Edit => "Enter: Save Changes",
    };
    lines.push(Line::from(vec![
        Span::styled(confirm, Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled("Esc: Cancel", Style::default().fg(Color::Gray)),
    ]));

    Widget::render(Clear, popup, buf);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Yellow)),
    );
    Widget::render(paragraph, popup, buf);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
