//! Clients REST API integration module.
//!
//! Provides the HTTP client and the record types it exchanges.

pub mod client;
pub mod error;
pub mod models;

pub use client::ClientsApi;
pub use models::{Client, ClientDraft, ClientId};
