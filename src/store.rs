//! Application state container.
//!
//! All state the UI renders lives in a [`State`] snapshot. Every change goes
//! through [`reduce`], which takes the current snapshot and an [`Action`] and
//! returns the next snapshot plus the [`Effect`]s (network calls, browser
//! launches) the controller has to run. Effects report back by dispatching
//! further actions, so reconciliation with the server happens here and
//! nowhere else.

use crate::api::{Client, ClientDraft, ClientId};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Whether the modal creates a new client or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create a client, `POST /api/clients`
    Add,
    /// Update the staged client, `PUT /api/clients/{id}`
    Edit,
}

/// Token identifying one submitted create/update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

/// What the last load told us about the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// No load has completed yet
    Unknown,
    /// Last load succeeded (the list may still be empty)
    Online,
    /// Last load could not reach the backend
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            at: Local::now(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            at: Local::now(),
        }
    }
}

/// Modal visibility, mode and the client staged for editing.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    pub open: bool,
    pub mode: Mode,
    pub staged: Option<Client>,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            open: false,
            mode: Mode::Add,
            staged: None,
        }
    }
}

/// The submit currently waiting for a server answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: RequestToken,
    /// `None` for a create, the target id for an update
    pub target: Option<ClientId>,
}

/// Immutable snapshot of everything the UI shows.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Local copy of the server's client list, in fetch/append order
    pub clients: Vec<Arc<Client>>,
    /// Live search filter; never mutates `clients`
    pub search_term: String,
    pub modal: ModalState,
    /// Set while a manual backend wake-up is in progress
    pub loading: bool,
    pub backend: BackendStatus,
    pub pending: Option<PendingRequest>,
    /// Last token handed out
    pub last_token: u64,
    pub notice: Option<Notice>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            clients: Vec::new(),
            search_term: String::new(),
            modal: ModalState::default(),
            loading: false,
            backend: BackendStatus::Unknown,
            pending: None,
            last_token: 0,
            notice: None,
        }
    }
}

impl State {
    /// Clients matching the current search term.
    pub fn visible_clients(&self) -> Vec<&Arc<Client>> {
        visible_clients(&self.clients, &self.search_term)
    }

    /// The table is replaced by the offline/empty placeholder.
    ///
    /// An empty list and a sleeping backend look the same from here; the
    /// placeholder uses [`BackendStatus`] to word the message.
    pub fn shows_placeholder(&self) -> bool {
        self.clients.is_empty()
    }
}

/// Everything that can change the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch the full client list
    Load,
    /// Full list arrived
    Loaded(Vec<Client>),
    /// Full list could not be fetched
    LoadFailed { error: String, unreachable: bool },
    /// Search box changed
    SetSearch(String),
    /// Open the modal, staging `client` for edit mode
    OpenModal { mode: Mode, client: Option<Client> },
    /// Close the modal without submitting
    CloseModal,
    /// Modal form confirmed
    Submit(ClientDraft),
    /// Create answered with the server-canonical record
    Added { token: RequestToken, client: Client },
    /// Update of `id` answered with the new record
    Updated {
        token: RequestToken,
        id: ClientId,
        client: Client,
    },
    /// Create or update failed
    SubmitFailed { token: RequestToken, error: String },
    /// User asked to wake a sleeping backend
    StartWakeUp,
    /// Drop a row from the local list only
    RemoveLocal(ClientId),
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchAll,
    Create {
        token: RequestToken,
        draft: ClientDraft,
    },
    Update {
        token: RequestToken,
        id: ClientId,
        draft: ClientDraft,
    },
    OpenWakePage,
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: State,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn just(state: State) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: State, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// Apply `action` to `state`, producing the next snapshot.
pub fn reduce(state: &State, action: Action) -> Transition {
    let mut next = state.clone();

    match action {
        Action::Load => Transition::with(next, Effect::FetchAll),

        Action::Loaded(clients) => {
            info!(count = clients.len(), "clients loaded");
            next.notice = Some(Notice::info(format!("Loaded {} clients", clients.len())));
            next.clients = clients.into_iter().map(Arc::new).collect();
            next.loading = false;
            next.backend = BackendStatus::Online;
            Transition::just(next)
        }

        Action::LoadFailed { error, unreachable } => {
            error!(%error, unreachable, "error fetching clients");
            next.notice = Some(Notice::error(format!("Error fetching clients: {}", error)));
            next.loading = false;
            if unreachable {
                next.backend = BackendStatus::Unreachable;
            }
            Transition::just(next)
        }

        Action::SetSearch(term) => {
            next.search_term = term;
            Transition::just(next)
        }

        Action::OpenModal { mode, client } => {
            next.modal = ModalState {
                open: true,
                mode,
                staged: client,
            };
            Transition::just(next)
        }

        Action::CloseModal => {
            next.modal.open = false;
            next.modal.staged = None;
            Transition::just(next)
        }

        Action::Submit(draft) => submit(next, draft),

        Action::Added { token, client } => {
            finish_request(&mut next, token);
            info!(id = %client.id, name = %client.name(), "client added");
            next.notice = Some(Notice::info(format!("Added {}", client.name())));
            if let Some(slot) = next.clients.iter_mut().find(|c| c.id == client.id) {
                // Only happens if a reload already picked the new row up.
                warn!(id = %client.id, "created client already present, replacing");
                *slot = Arc::new(client);
            } else {
                next.clients.push(Arc::new(client));
            }
            Transition::just(next)
        }

        Action::Updated { token, id, client } => {
            finish_request(&mut next, token);
            match next.clients.iter_mut().find(|c| c.id == id) {
                Some(slot) => {
                    info!(%id, name = %client.name(), "client updated");
                    next.notice = Some(Notice::info(format!("Updated {}", client.name())));
                    *slot = Arc::new(client);
                }
                None => {
                    warn!(%id, "updated client no longer in the local list");
                }
            }
            Transition::just(next)
        }

        Action::SubmitFailed { token, error } => {
            let target = next.pending.filter(|p| p.token == token).and_then(|p| p.target);
            finish_request(&mut next, token);
            let message = match target {
                Some(id) => format!("Error updating client {}: {}", id, error),
                None => format!("Error saving client: {}", error),
            };
            error!("{}", message);
            next.notice = Some(Notice::error(message));
            Transition::just(next)
        }

        Action::StartWakeUp => {
            if next.loading {
                return Transition::just(next);
            }
            info!("waking backend");
            next.loading = true;
            Transition {
                state: next,
                effects: vec![Effect::OpenWakePage, Effect::FetchAll],
            }
        }

        Action::RemoveLocal(id) => {
            let before = next.clients.len();
            next.clients.retain(|c| c.id != id);
            if next.clients.len() < before {
                next.notice = Some(Notice::info(format!(
                    "Removed client {} from this view (server unchanged)",
                    id
                )));
            }
            Transition::just(next)
        }
    }
}

fn submit(mut next: State, draft: ClientDraft) -> Transition {
    if next.pending.is_some() {
        warn!("submit ignored, previous save still in flight");
        next.notice = Some(Notice::error("Previous save still in progress"));
        return Transition::just(next);
    }

    let target = match next.modal.mode {
        Mode::Add => None,
        Mode::Edit => match next.modal.staged.as_ref() {
            Some(client) => Some(client.id),
            None => {
                error!("no client selected for update");
                next.notice = Some(Notice::error("No client selected for update"));
                return Transition::just(next);
            }
        },
    };

    next.last_token += 1;
    let token = RequestToken(next.last_token);
    next.pending = Some(PendingRequest { token, target });
    next.modal.open = false;
    next.modal.staged = None;

    let effect = match target {
        None => Effect::Create { token, draft },
        Some(id) => Effect::Update { token, id, draft },
    };
    Transition::with(next, effect)
}

fn finish_request(state: &mut State, token: RequestToken) {
    if state.pending.is_some_and(|p| p.token == token) {
        state.pending = None;
    }
}

/// Filter `clients` by `term` without touching the input.
///
/// Case-insensitive substring match over name, email and job; an empty or
/// blank term matches everything.
pub fn visible_clients<'a>(clients: &'a [Arc<Client>], term: &str) -> Vec<&'a Arc<Client>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return clients.iter().collect();
    }
    clients.iter().filter(|c| c.matches(&needle)).collect()
}
