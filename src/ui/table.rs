//! Client table rendering.
//!
//! Displays the filtered client list with the selected row highlighted.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState},
};

/// Lines above the first data row: top border plus header.
pub const ROWS_TOP: u16 = 2;

/// Rows that fit in `area` once borders and header are taken off.
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(ROWS_TOP + 1).max(1) as usize
}

/// First row shown so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, total: usize, visible: usize) -> usize {
    let max_scroll = total.saturating_sub(visible);
    selected.saturating_sub(visible.saturating_sub(1)).min(max_scroll)
}

/// Render the client table.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Columns: id, name, email, job, rate and status. The title shows
/// how many rows match the search out of the full list.
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let clients = app.visible_clients();
    let total = app.state().clients.len();
    let title = format!("Clients ({}/{})", clients.len(), total);

    let header = Row::new(["ID", "Name", "Email", "Job", "Rate", "Status"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = clients
        .iter()
        .map(|client| {
            let status = if client.details.is_active {
                Span::styled("Active", Style::default().fg(Color::Green))
            } else {
                Span::styled("Inactive", Style::default().fg(Color::DarkGray))
            };
            Row::new(vec![
                Cell::from(client.id.to_string()),
                Cell::from(client.name().to_string()),
                Cell::from(client.details.email.clone()),
                Cell::from(client.details.job.clone()),
                Cell::from(client.format_rate()),
                Cell::from(status),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Length(10),
        Constraint::Length(9),
    ];

    let selected = app.selected_index.min(clients.len().saturating_sub(1));
    let offset = scroll_offset(selected, clients.len(), visible_rows(area));
    let mut state = TableState::default()
        .with_offset(offset)
        .with_selected(if clients.is_empty() { None } else { Some(selected) });

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    StatefulWidget::render(table, area, buf, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 50, 10), 0);
        assert_eq!(scroll_offset(9, 50, 10), 0);
        assert_eq!(scroll_offset(10, 50, 10), 1);
        assert_eq!(scroll_offset(49, 50, 10), 40);
        assert_eq!(scroll_offset(3, 4, 10), 0);
    }

    #[test]
    fn test_visible_rows_excludes_chrome() {
        assert_eq!(visible_rows(Rect::new(0, 0, 80, 13)), 10);
        assert_eq!(visible_rows(Rect::new(0, 0, 80, 2)), 1);
    }
}
