//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod modal;
pub mod navbar;
pub mod placeholder;
pub mod status;
pub mod table;

pub use modal::render_modal;
pub use navbar::render_navbar;
pub use placeholder::render_placeholder;
pub use status::render_status;
pub use table::render_table;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Screen regions: navbar, body, status line.
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navbar
            Constraint::Min(0),    // Table or placeholder
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Render the complete UI.
///
/// # Details
/// The body shows the table when there are clients and the placeholder
/// otherwise; the modal is drawn last, on top.
pub fn render(f: &mut Frame, app: &App) {
    let [navbar, body, status] = screen_layout(f.area());
    let buf = f.buffer_mut();

    render_navbar(app, navbar, buf);
    if app.state().shows_placeholder() {
        render_placeholder(app, body, buf);
    } else {
        render_table(app, body, buf);
    }
    render_status(app, status, buf);

    if app.state().modal.open {
        render_modal(app, body, buf);
    }
}
