//! clientdesk - terminal client manager for a clients REST API.
//!
//! Main entry point and event loop for the application.

mod api;
mod app;
mod cli;
mod config;
mod controller;
mod form;
mod launcher;
mod logging;
mod store;
mod ui;

use api::ClientsApi;
use app::{App, UiMode};
use cli::Args;
use config::Config;
use controller::Controller;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;
use store::Action;
use tracing::info;

/// Main application entry point.
///
/// # Details
/// Loads configuration, sets up logging, starts the initial client fetch
/// and runs the event loop until the user quits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::from_cli();
    let config = Config::load(args.config.as_deref())?;

    logging::init(&config.log_file_path()?)?;

    let api_url = config.resolve_api_url(args.api_url.as_deref());
    info!(%api_url, "starting clientdesk");
    let api = ClientsApi::new(&config, &api_url)?;

    let mut app = App::new(Controller::new(api, config.wake_url.clone()));

    // Initial load; the answer is applied by the event loop.
    app.controller.dispatch(Action::Load);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("clientdesk exiting");
    result
}

/// Main event loop.
///
/// # Details
/// Applies finished requests, redraws, then waits up to 100ms for input so
/// network completions show up promptly while the user is idle.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    // Body area of the last frame, for mouse hit-testing
    let mut body_area = Rect::default();

    loop {
        app.tick();
        terminal.draw(|f| {
            body_area = ui::screen_layout(f.area())[1];
            ui::render(f, app);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(key, app) {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, app, body_area),
            _ => {}
        }
    }

    Ok(())
}

/// Handle a key press.
///
/// # Returns
/// * `bool` - True when the user asked to quit
fn handle_key(key: KeyEvent, app: &mut App) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        UiMode::Table => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('a') => app.open_add_modal(),
            KeyCode::Char('e') | KeyCode::Enter => app.open_edit_modal(),
            KeyCode::Char('d') => app.remove_selected(),
            KeyCode::Char('w') => app.wake_backend(),
            _ => {}
        },
        UiMode::Search => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.finish_search(),
            KeyCode::Backspace => app.remove_search_char(),
            KeyCode::Char(c) => app.add_search_char(c),
            _ => {}
        },
        UiMode::Modal => match key.code {
            KeyCode::Esc => app.cancel_modal(),
            KeyCode::Enter => app.submit_form(),
            KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
            KeyCode::Backspace => app.form.backspace(),
            KeyCode::Char(c) => app.form.input_char(c),
            _ => {}
        },
    }

    false
}

/// Handle mouse events (scroll and click).
///
/// # Details
/// Wheel moves the selection; a left click on a table row selects it.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App, body_area: Rect) {
    if app.mode != UiMode::Table {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        MouseEventKind::Down(MouseButton::Left) => {
            let first_row = body_area.y + ui::table::ROWS_TOP;
            let inside = mouse.column >= body_area.x
                && mouse.column < body_area.x + body_area.width
                && mouse.row >= first_row
                && mouse.row < body_area.y + body_area.height.saturating_sub(1);
            if !inside || app.state().shows_placeholder() {
                return;
            }

            let total = app.visible_clients().len();
            let offset = ui::table::scroll_offset(
                app.selected_index,
                total,
                ui::table::visible_rows(body_area),
            );
            app.select(offset + (mouse.row - first_row) as usize);
        }
        _ => {}
    }
}
