//! Application state management.
//!
//! Wraps the store controller with the purely visual state the terminal
//! needs: input mode, row selection, the modal's draft buffers and the
//! loading spinner.

use crate::api::Client;
use crate::controller::Controller;
use crate::form::ClientForm;
use crate::store::{Action, Mode, State};
use std::cmp;
use std::sync::Arc;

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal table view
    Table,
    /// Typing into the search bar
    Search,
    /// Add/edit dialog open
    Modal,
}

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Store and effect runner
    pub controller: Controller,
    /// Current UI mode
    pub mode: UiMode,
    /// Selected row index (in the visible, filtered rows)
    pub selected_index: usize,
    /// Draft buffers of the modal form
    pub form: ClientForm,
    /// Validation message shown inside the modal
    pub form_error: Option<String>,
    /// Frames drawn, drives the spinner
    pub ticks: usize,
}

impl App {
    /// Create a new application state.
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            mode: UiMode::Table,
            selected_index: 0,
            form: ClientForm::empty(),
            form_error: None,
            ticks: 0,
        }
    }

    /// Current store snapshot.
    pub fn state(&self) -> &State {
        self.controller.state()
    }

    /// Rows shown in the table after filtering.
    pub fn visible_clients(&self) -> Vec<&Arc<Client>> {
        self.state().visible_clients()
    }

    /// Currently selected row.
    pub fn selected_client(&self) -> Option<&Arc<Client>> {
        self.visible_clients().get(self.selected_index).copied()
    }

    /// Apply finished requests and advance the spinner.
    ///
    /// # Details
    /// Called once per event-loop iteration.
    pub fn tick(&mut self) {
        if self.controller.pump() > 0 {
            self.clamp_selection();
        }
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Spinner glyph for the current frame.
    pub fn spinner(&self) -> &'static str {
        SPINNER[self.ticks % SPINNER.len()]
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_clients().len();
        self.selected_index = cmp::min(self.selected_index, len.saturating_sub(1));
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        let len = self.visible_clients().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        let len = self.visible_clients().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Select a row by its visible index, ignoring out-of-range clicks.
    pub fn select(&mut self, index: usize) {
        if index < self.visible_clients().len() {
            self.selected_index = index;
        }
    }

    pub fn start_search(&mut self) {
        self.mode = UiMode::Search;
    }

    pub fn finish_search(&mut self) {
        self.mode = UiMode::Table;
    }

    /// Add a character to the search term.
    ///
    /// # Details
    /// Only works in Search mode. The filter updates on every keystroke.
    pub fn add_search_char(&mut self, ch: char) {
        if self.mode == UiMode::Search {
            let mut term = self.state().search_term.clone();
            term.push(ch);
            self.set_search(term);
        }
    }

    /// Remove the last character of the search term.
    pub fn remove_search_char(&mut self) {
        if self.mode == UiMode::Search {
            let mut term = self.state().search_term.clone();
            term.pop();
            self.set_search(term);
        }
    }

    fn set_search(&mut self, term: String) {
        self.controller.dispatch(Action::SetSearch(term));
        self.selected_index = 0;
    }

    /// Open the modal with an empty form.
    pub fn open_add_modal(&mut self) {
        self.form = ClientForm::empty();
        self.form_error = None;
        self.controller.dispatch(Action::OpenModal {
            mode: Mode::Add,
            client: None,
        });
        self.mode = UiMode::Modal;
    }

    /// Open the modal pre-filled from the selected row.
    ///
    /// # Details
    /// Does nothing when no row is selected.
    pub fn open_edit_modal(&mut self) {
        let Some(client) = self.selected_client().map(|c| (**c).clone()) else {
            return;
        };
        self.form = ClientForm::from_client(&client);
        self.form_error = None;
        self.controller.dispatch(Action::OpenModal {
            mode: Mode::Edit,
            client: Some(client),
        });
        self.mode = UiMode::Modal;
    }

    /// Confirm the modal form.
    ///
    /// # Details
    /// The modal stays open if the draft is invalid or the store rejects
    /// the submit (another save still running).
    pub fn submit_form(&mut self) {
        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.form_error = Some(e.to_string());
                return;
            }
        };
        self.controller.dispatch(Action::Submit(draft));
        if !self.state().modal.open {
            self.form_error = None;
            self.mode = UiMode::Table;
        }
    }

    /// Close the modal without saving.
    pub fn cancel_modal(&mut self) {
        self.controller.dispatch(Action::CloseModal);
        self.form_error = None;
        self.mode = UiMode::Table;
    }

    /// Drop the selected row from the local list.
    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_client().map(|c| c.id) {
            self.controller.dispatch(Action::RemoveLocal(id));
            self.clamp_selection();
        }
    }

    /// Trigger the backend wake-up flow.
    ///
    /// # Details
    /// Only available while the placeholder is shown.
    pub fn wake_backend(&mut self) {
        if self.state().shows_placeholder() {
            self.controller.dispatch(Action::StartWakeUp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientDraft, ClientId, ClientsApi};

    fn create_test_client(id: i64, name: &str) -> Client {
        Client::new(ClientId(id), ClientDraft::named(name))
    }

    fn create_test_app(clients: Vec<Client>) -> App {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        // Port 9 is discard; tests that reach the network don't await the answer.
        let api = ClientsApi::with_client(http, "http://127.0.0.1:9");
        let mut app = App::new(Controller::new(api, None));
        app.controller.dispatch(Action::Loaded(clients));
        app
    }

    #[test]
    fn test_app_new() {
        let app = create_test_app(Vec::new());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.mode, UiMode::Table);
        assert!(app.selected_client().is_none());
    }

    #[test]
    fn test_app_move_selection() {
        let mut app = create_test_app(vec![
            create_test_client(1, "Acme"),
            create_test_client(2, "Globex"),
            create_test_client(3, "Initech"),
        ]);
        app.move_down();
        assert_eq!(app.selected_index, 1);
        app.move_up();
        assert_eq!(app.selected_index, 0);
        app.move_up(); // Should wrap to end
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn test_app_live_search() {
        let mut app = create_test_app(vec![
            create_test_client(1, "Acme"),
            create_test_client(2, "Globex"),
        ]);
        app.move_down();
        app.add_search_char('g'); // Ignored outside search mode
        assert_eq!(app.state().search_term, "");

        app.start_search();
        app.add_search_char('g');
        app.add_search_char('l');
        assert_eq!(app.visible_clients().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_client().unwrap().name(), "Globex");

        app.remove_search_char();
        app.remove_search_char();
        assert_eq!(app.visible_clients().len(), 2);
        assert_eq!(app.state().clients.len(), 2);
    }

    #[test]
    fn test_open_edit_prefills_form() {
        let mut app = create_test_app(vec![create_test_client(1, "Acme")]);
        app.open_edit_modal();
        assert_eq!(app.mode, UiMode::Modal);
        assert_eq!(app.form.name, "Acme");
        assert_eq!(app.state().modal.mode, Mode::Edit);
        assert_eq!(app.state().modal.staged.as_ref().map(|c| c.id), Some(ClientId(1)));
    }

    #[test]
    fn test_open_edit_without_rows_is_noop() {
        let mut app = create_test_app(Vec::new());
        app.open_edit_modal();
        assert_eq!(app.mode, UiMode::Table);
        assert!(!app.state().modal.open);
    }

    #[test]
    fn test_invalid_form_keeps_modal_open() {
        let mut app = create_test_app(Vec::new());
        app.open_add_modal();
        app.form.rate = "abc".to_string();
        app.submit_form();
        assert_eq!(app.mode, UiMode::Modal);
        assert!(app.form_error.is_some());
        assert!(app.state().pending.is_none());
    }

    #[tokio::test]
    async fn test_valid_submit_closes_modal() {
        let mut app = create_test_app(Vec::new());
        app.open_add_modal();
        app.form.name = "NewCo".to_string();
        app.submit_form();
        assert_eq!(app.mode, UiMode::Table);
        assert!(app.state().pending.is_some());
    }

    #[test]
    fn test_cancel_modal_returns_to_table() {
        let mut app = create_test_app(vec![create_test_client(1, "Acme")]);
        app.open_edit_modal();
        app.cancel_modal();
        assert_eq!(app.mode, UiMode::Table);
        assert!(app.state().modal.staged.is_none());
    }

    #[test]
    fn test_remove_selected_clamps_selection() {
        let mut app = create_test_app(vec![
            create_test_client(1, "Acme"),
            create_test_client(2, "Globex"),
        ]);
        app.move_down();
        app.remove_selected();
        assert_eq!(app.state().clients.len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_wake_only_from_placeholder() {
        let mut app = create_test_app(vec![create_test_client(1, "Acme")]);
        app.wake_backend();
        assert!(!app.state().loading);
    }
}
