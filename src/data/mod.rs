//! Data models for boards and pins
//!
//! Only the fields the client relies on are typed; everything else the API
//! returns is kept in `extra` and serialized back out unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A board listed for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Board path in the form `/<user>/<board>/`
    pub href: String,
    /// Remaining fields from the API
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Board {
    /// Creates a board with only an href
    pub fn from_href(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            extra: Map::new(),
        }
    }

    /// Returns the board handle if the board belongs to `username`
    ///
    /// The href is split on `/`; the second segment names the owner and the
    /// third is the handle used for pin lookups.
    pub fn handle_for(&self, username: &str) -> Option<&str> {
        let mut segments = self.href.split('/').skip(1);
        match (segments.next(), segments.next()) {
            (Some(owner), Some(handle)) if owner == username => Some(handle),
            _ => None,
        }
    }
}

/// A pin listed on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Publish date taken from the board feed, empty when unknown
    #[serde(default, deserialize_with = "string_or_empty")]
    pub created_at: String,
    /// Remaining fields from the API
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bulk metadata for a single pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Remaining fields from the API
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope returned by the boards endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct BoardsResponse {
    pub body: Vec<Board>,
}

/// Envelope returned by the board pins endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct BoardPinsResponse {
    pub data: BoardPinsData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardPinsData {
    pub pins: Vec<Pin>,
}

/// Envelope returned by the bulk pin info endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct PinInfoResponse {
    #[serde(default)]
    pub data: Vec<PinInfo>,
}

/// Accepts identifiers encoded either as JSON strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {}",
            other
        ))),
    }
}

/// Keeps string values and maps anything else to an empty string
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}
