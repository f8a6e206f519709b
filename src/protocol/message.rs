//! Inbound and outbound companion messages.
//!
//! The companion protocol is deliberately small: every message is a flat
//! JSON object with an `event` discriminator. Commands carry optional extra
//! parameters; reports carry the observed boolean state.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ============================================================================
// InboundMessage
// ============================================================================

/// A command from the companion process.
///
/// # Format
///
/// ```json
/// { "event": "toggleMic" }
/// ```
///
/// Extra fields are preserved in [`InboundMessage::params`] so handlers can
/// read command-specific parameters without this module knowing about them.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    /// Command name. Handlers filter on this field.
    pub event: String,

    /// Any command-specific parameters.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl InboundMessage {
    /// Parses an inbound payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMessage`] if the payload is not a JSON
    /// object with an `event` string. The failure is scoped to this one
    /// message; the connection it arrived on is unaffected.
    pub fn parse(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::malformed_message(e.to_string()))
    }

    /// Gets a string parameter.
    ///
    /// Returns `None` if the key is missing or not a string.
    #[inline]
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }

    /// Gets a boolean parameter.
    ///
    /// Returns `false` if the key is missing or not a boolean.
    #[inline]
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        self.params
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl InboundMessage {
    /// Builds a bare command message for tests.
    pub(crate) fn command(event: &str) -> Self {
        Self {
            event: event.to_string(),
            params: Map::new(),
        }
    }
}

// ============================================================================
// OutboundMessage
// ============================================================================

/// A state report sent to the companion process.
///
/// # Format
///
/// ```json
/// { "event": "micMutedState", "muted": true }
/// ```
///
/// The `event` name is owned by exactly one capability; the companion uses
/// it to route the report to the right button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Report event name owned by the reporting capability.
    pub event: String,

    /// The observed muted/off state.
    pub muted: bool,
}

impl OutboundMessage {
    /// Creates a state report.
    #[inline]
    #[must_use]
    pub fn state(event: impl Into<String>, muted: bool) -> Self {
        Self {
            event: event.into(),
            muted,
        }
    }

    /// Serializes this report to its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_wire(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
