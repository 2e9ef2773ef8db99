//! Wire-level event types
//!
//! A [`Notification`] is the JSON body ntfy delivers inside an SSE
//! `message` event. The sender enforces no schema: every field is
//! optional and may be empty or non-numeric, so all downstream logic
//! has to tolerate any combination being absent.

use serde::Deserialize;

/// Default ntfy priority when the event carries none.
pub const DEFAULT_PRIORITY: i64 = 3;

/// One item from the SSE transport: a tagged event with a raw data line.
///
/// Only items tagged `"message"` carry a notification payload; other tags
/// (`open`, `keepalive`, ...) are transport chatter the bridge ignores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event tag. The event-stream protocol defaults this to `"message"`
    /// when the stream omits an `event:` field.
    pub event: String,
    /// Raw data payload, joined across `data:` lines.
    pub data: String,
    /// Last seen event id, if the stream supplied one.
    pub id: Option<String>,
}

impl SseEvent {
    /// Create an event with the default `"message"` tag.
    #[must_use]
    pub fn message(data: impl Into<String>) -> Self {
        Self {
            event: "message".to_string(),
            data: data.into(),
            id: None,
        }
    }

    /// Whether this item carries a notification payload.
    #[must_use]
    pub fn is_message(&self) -> bool {
        self.event == "message"
    }
}

/// A push notification as published on the topic.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Urgency, higher is more urgent. ntfy uses 1..=5 with 3 as normal.
    #[serde(default)]
    pub priority: Option<i64>,
    /// Free-form body text.
    #[serde(default)]
    pub message: Option<String>,
    /// Free-form title. Depending on configuration this doubles as the
    /// recipient capcode.
    #[serde(default)]
    pub title: Option<String>,
}

impl Notification {
    /// Priority with the ntfy default applied.
    #[must_use]
    pub fn effective_priority(&self) -> i64 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }

    /// Message body, absent treated as empty.
    #[must_use]
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}
