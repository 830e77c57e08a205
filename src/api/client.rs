//! HTTP client for the clients REST API.
//!
//! Wraps the three endpoints the UI uses: list, create and update.

use crate::api::error::ApiError;
use crate::api::models::{Client, ClientDraft, ClientId};
use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// REST client for `/api/clients`.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ClientsApi {
    /// HTTP client for API requests
    client: reqwest::Client,
    /// Base URL without trailing slash, e.g. `http://localhost:3000`
    base_url: String,
}

impl ClientsApi {
    /// Create a client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    /// * `base_url` - Already-resolved API base URL
    ///
    /// # Returns
    /// * `Result<ClientsApi>` - New client or error
    pub fn new(config: &Config, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are issued against.
    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/clients", self.base_url)
    }

    fn item_url(&self, id: ClientId) -> String {
        format!("{}/api/clients/{}", self.base_url, id)
    }

    /// `GET /api/clients`
    pub async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        let url = self.collection_url();
        debug!(%url, "listing clients");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        decode(url, response).await
    }

    /// `POST /api/clients`
    ///
    /// Returns the server-canonical record, including its new id.
    pub async fn create_client(&self, draft: &ClientDraft) -> Result<Client, ApiError> {
        let url = self.collection_url();
        debug!(%url, name = %draft.name, "creating client");
        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        decode(url, response).await
    }

    /// `PUT /api/clients/{id}`
    pub async fn update_client(&self, id: ClientId, draft: &ClientDraft) -> Result<Client, ApiError> {
        let url = self.item_url(id);
        debug!(%url, name = %draft.name, "updating client");
        let response = self
            .client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        decode(url, response).await
    }
}

/// Check the status and decode a JSON body.
async fn decode<T: DeserializeOwned>(url: String, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { url, status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| ApiError::Decode { url, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode as AxumStatus,
        routing::{get, put},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    async fn list(State(seen): State<Seen>) -> Json<Value> {
        seen.lock().await.push(("GET /api/clients".to_string(), Value::Null));
        Json(json!([
            {"id": 1, "name": "Acme", "email": "a@acme.test", "job": "Anvils", "rate": "10.00", "isactive": true},
            {"id": 2, "name": "Globex", "email": "g@globex.test", "job": "Energy", "rate": 20, "isactive": false}
        ]))
    }

    async fn create(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
        seen.lock().await.push(("POST /api/clients".to_string(), body.clone()));
        let mut created = body;
        created["id"] = json!(3);
        Json(created)
    }

    async fn update(
        State(seen): State<Seen>,
        Path(id): Path<i64>,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, AxumStatus> {
        seen.lock().await.push((format!("PUT /api/clients/{}", id), body.clone()));
        if id == 404 {
            return Err(AxumStatus::NOT_FOUND);
        }
        let mut updated = body;
        updated["id"] = json!(id);
        Ok(Json(updated))
    }

    async fn spawn_server() -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/api/clients", get(list).post(create))
            .route("/api/clients/:id", put(update))
            .with_state(seen.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}"), seen)
    }

    fn api(base_url: &str) -> ClientsApi {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client");
        ClientsApi::with_client(client, base_url)
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = ClientsApi::new(&Config::default(), "http://localhost:3000/").expect("client");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.item_url(ClientId(5)), "http://localhost:3000/api/clients/5");
    }

    #[tokio::test]
    async fn test_list_clients_decodes_records() {
        let (url, _seen) = spawn_server().await;
        let clients = api(&url).list_clients().await.expect("list");
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name(), "Acme");
        assert_eq!(clients[0].details.rate, 10.0);
        assert_eq!(clients[1].id, ClientId(2));
    }

    #[tokio::test]
    async fn test_create_posts_draft_without_id() {
        let (url, seen) = spawn_server().await;
        let created = api(&url)
            .create_client(&ClientDraft::named("NewCo"))
            .await
            .expect("create");
        assert_eq!(created.id, ClientId(3));
        assert_eq!(created.name(), "NewCo");

        let seen = seen.lock().await;
        assert_eq!(seen[0].0, "POST /api/clients");
        assert!(seen[0].1.get("id").is_none());
    }

    #[tokio::test]
    async fn test_update_puts_to_item_path() {
        let (url, seen) = spawn_server().await;
        let updated = api(&url)
            .update_client(ClientId(1), &ClientDraft::named("Acme Corp"))
            .await
            .expect("update");
        assert_eq!(updated.id, ClientId(1));
        assert_eq!(updated.name(), "Acme Corp");
        assert_eq!(seen.lock().await[0].0, "PUT /api/clients/1");
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let (url, _seen) = spawn_server().await;
        let err = api(&url)
            .update_client(ClientId(404), &ClientDraft::named("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let err = api(&format!("http://{addr}")).list_clients().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert!(err.is_unreachable());
    }
}
