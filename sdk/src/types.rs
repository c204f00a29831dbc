//! Chat request/response wire types

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /chat`
///
/// `message` is optional on the wire and `null` reads as `""`: the first
/// message from a new user is discarded anyway, so clients may open a
/// conversation with nothing but `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    /// Create a new ChatRequest
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
        }
    }
}

/// Body of every `POST /chat` response, success or failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    /// Create a new ChatResponse
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// The response sent for any failed request
    pub fn failure() -> Self {
        Self::new(crate::errors::GENERIC_FAILURE_MESSAGE)
    }
}
