// src/models.rs

use crate::constants::CHAT_ERROR_TEXT;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

/// A citation returned alongside an answer. Only `source` is interpreted;
/// every other key the backend sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Source {
    pub fn named(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            extra: Map::new(),
        }
    }

    pub fn label(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown source")
    }
}

/// Represents a chat message in the session log.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub sources: Option<Vec<Source>>,
    pub timestamp: DateTime<Local>,
}

impl Message {
    fn new(text: String, sender: Sender, sources: Option<Vec<Source>>) -> Self {
        Self {
            // v7 ids lead with a millisecond timestamp, so they are time-ordered
            id: Uuid::now_v7().to_string(),
            text,
            sender,
            sources,
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::User, None)
    }

    pub fn ai(answer: impl Into<String>, sources: Vec<Source>) -> Self {
        Self::new(answer.into(), Sender::Ai, Some(sources))
    }

    pub fn ai_error() -> Self {
        Self::new(CHAT_ERROR_TEXT.to_string(), Sender::Ai, None)
    }

    /// The citation shown under the bubble, if any.
    pub fn primary_source(&self) -> Option<&str> {
        self.sources
            .as_ref()
            .and_then(|sources| sources.first())
            .map(Source::label)
    }
}

/// Body of a `POST /chat` request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
}

/// Body of a successful `POST /chat` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Logs details of each API call.
#[derive(Debug, Clone)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub endpoint: String,
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}

impl fmt::Display for ApiCallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self
            .response_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "[{}] {} {} - Status: {} - Time: {}ms",
            self.timestamp.to_rfc3339(),
            self.method,
            self.endpoint,
            status,
            self.response_time_ms
        )
    }
}
