//! Failure taxonomy for calls to the clients API.

use reqwest::StatusCode;
use thiserror::Error;

/// Error returned by [`ClientsApi`](super::ClientsApi) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response: unreachable host, DNS, timeout.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Server answered with a non-success status.
    #[error("server returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    /// Response body could not be decoded as the expected JSON.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Whether the failure suggests the backend is not reachable at all.
    pub fn is_unreachable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            // Sleeping hosts commonly answer with gateway errors while they spin up.
            ApiError::Status { status, .. } => matches!(
                *status,
                StatusCode::BAD_GATEWAY
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT
            ),
            ApiError::Decode { .. } => false,
        }
    }
}
