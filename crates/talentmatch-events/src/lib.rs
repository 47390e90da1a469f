//! Wire types for the backend log stream.
//!
//! The backend pushes one JSON object per SSE frame. Each object is tagged by
//! `type`: `init` announces the stream, `log` carries a formatted log line and
//! `heartbeat` only keeps the connection warm. Extra fields are ignored so the
//! backend can grow the payload without breaking older front-ends.

mod error;

pub use error::{DecodeError, DecodeResult};

use serde::{Deserialize, Serialize};

/// A single backend log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Backend-formatted timestamp, kept verbatim.
    pub timestamp: String,
    /// Formatted log message, possibly containing tag markers.
    pub message: String,
}

impl LogRecord {
    /// Convenience constructor.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }
}

/// Events pushed by the log stream endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    /// Stream greeting sent once after the connection opens.
    Init {
        /// Human-readable banner text.
        #[serde(default)]
        message: String,
    },
    /// A log line to buffer and display.
    Log(LogRecord),
    /// Keep-alive with no payload.
    Heartbeat,
}

impl LogEvent {
    /// Wire discriminator for the event.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Log(_) => "log",
            Self::Heartbeat => "heartbeat",
        }
    }
}

/// Decode one SSE data payload into a [`LogEvent`].
///
/// # Errors
/// Returns [`DecodeError::Empty`] for blank payloads and
/// [`DecodeError::Malformed`] when the JSON is invalid or the `type` is unknown.
pub fn decode_event(payload: &str) -> DecodeResult<LogEvent> {
    let data = payload.trim();
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }
    serde_json::from_str(data).map_err(|err| DecodeError::Malformed {
        detail: err.to_string(),
    })
}
