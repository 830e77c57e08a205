//! Client records as exchanged with the REST API.
//!
//! Contains the server-side record (`Client`) and the id-less payload
//! (`ClientDraft`) used for create and update requests.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub i64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable business fields of a client.
///
/// This is the request body for both `POST /api/clients` and
/// `PUT /api/clients/{id}`; it never carries an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDraft {
    /// Display name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Job or role description
    #[serde(default)]
    pub job: String,
    /// Rate charged for the client
    #[serde(default, deserialize_with = "deserialize_rate")]
    pub rate: f64,
    /// Whether the client is currently active
    #[serde(default, rename = "isactive")]
    pub is_active: bool,
}

impl Default for ClientDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            job: String::new(),
            rate: 0.0,
            is_active: true,
        }
    }
}

impl ClientDraft {
    /// Draft with only a name set, everything else defaulted.
    #[cfg(test)]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A client record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Server-assigned identifier, immutable once created
    pub id: ClientId,
    /// Business fields
    #[serde(flatten)]
    pub details: ClientDraft,
}

impl Client {
    /// Build a record from a server id and a draft.
    pub fn new(id: ClientId, details: ClientDraft) -> Self {
        Self { id, details }
    }

    /// Client name.
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Copy of the editable fields, used to prefill the edit form.
    pub fn to_draft(&self) -> ClientDraft {
        self.details.clone()
    }

    /// Rate formatted with two decimals.
    pub fn format_rate(&self) -> String {
        format!("{:.2}", self.details.rate)
    }

    /// Case-insensitive substring match over name, email and job.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.details.name.to_lowercase().contains(needle_lower)
            || self.details.email.to_lowercase().contains(needle_lower)
            || self.details.job.to_lowercase().contains(needle_lower)
    }
}

/// Accept the rate either as a JSON number or as a numeric string.
///
/// SQL `numeric` columns usually arrive as strings such as `"100.00"`.
fn deserialize_rate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRate {
        Number(f64),
        Text(String),
        Null,
    }

    match RawRate::deserialize(deserializer)? {
        RawRate::Number(n) => Ok(n),
        RawRate::Text(s) if s.trim().is_empty() => Ok(0.0),
        RawRate::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid rate: {}", s))),
        RawRate::Null => Ok(0.0),
    }
}
