//! Effect runner around the state store.
//!
//! The controller owns the current [`State`], applies actions through
//! [`reduce`], and runs the resulting effects. Network calls run as spawned
//! tokio tasks which post their outcome back as an [`Action`] on an
//! unbounded channel; the UI loop drains that channel every tick, so state
//! is only ever touched from the UI task.

use crate::api::ClientsApi;
use crate::launcher::open_in_browser;
use crate::store::{Action, Effect, State, reduce};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Owns the state snapshot and executes effects.
#[derive(Debug)]
pub struct Controller {
    state: State,
    api: ClientsApi,
    /// Page opened by the wake-up action
    wake_url: Option<String>,
    completions_tx: UnboundedSender<Action>,
    completions_rx: UnboundedReceiver<Action>,
}

impl Controller {
    /// Create a controller with an empty state.
    pub fn new(api: ClientsApi, wake_url: Option<String>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: State::default(),
            api,
            wake_url,
            completions_tx,
            completions_rx,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Apply an action and start whatever effects it asks for.
    pub fn dispatch(&mut self, action: Action) {
        let transition = reduce(&self.state, action);
        self.state = transition.state;
        for effect in transition.effects {
            self.run(effect);
        }
    }

    /// Apply every completion that has arrived so far without waiting.
    ///
    /// # Returns
    /// * `usize` - Number of completions applied
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.completions_rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it.
    ///
    /// The controller keeps its own sender alive, so this only returns once
    /// an in-flight request finishes.
    #[cfg(test)]
    pub async fn next_completion(&mut self) -> Option<Action> {
        let action = self.completions_rx.recv().await?;
        self.dispatch(action.clone());
        Some(action)
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::FetchAll => {
                let api = self.api.clone();
                let tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let action = match api.list_clients().await {
                        Ok(clients) => Action::Loaded(clients),
                        Err(e) => Action::LoadFailed {
                            unreachable: e.is_unreachable(),
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(action);
                });
            }
            Effect::Create { token, draft } => {
                let api = self.api.clone();
                let tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let action = match api.create_client(&draft).await {
                        Ok(client) => Action::Added { token, client },
                        Err(e) => Action::SubmitFailed {
                            token,
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(action);
                });
            }
            Effect::Update { token, id, draft } => {
                let api = self.api.clone();
                let tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let action = match api.update_client(id, &draft).await {
                        Ok(client) => Action::Updated { token, id, client },
                        Err(e) => Action::SubmitFailed {
                            token,
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(action);
                });
            }
            Effect::OpenWakePage => match self.wake_url.as_deref() {
                Some(url) => {
                    if let Err(e) = open_in_browser(url) {
                        warn!("could not open wake-up page: {:#}", e);
                    }
                }
                None => debug!("no wake_url configured, refetching only"),
            },
        }
    }
}
