//! Error types for the keypad bridge.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use calldeck::{Result, Error};
//!
//! fn example(sync: &ToggleSync) -> Result<()> {
//!     let muted = sync.state()?;
//!     sync.set_state(!muted)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Controls | [`Error::ControlsNotFound`] |
//! | Protocol | [`Error::MalformedMessage`], [`Error::UnknownCapability`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |
//!
//! [`Error::ControlsNotFound`] is the only *expected* runtime failure: the
//! host page owns the UI, and controls come and go outside our influence.
//! Callers that tolerate a missing control check [`Error::is_controls_not_found`].

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Control Errors
    // ========================================================================
    /// A required UI control could not be located.
    ///
    /// Expected and recoverable: controls load asynchronously and disappear
    /// during meeting transitions. Resync and mutation-report call sites
    /// swallow this variant; everything else propagates it.
    #[error("Controls not found: {control}")]
    ControlsNotFound {
        /// Which control was being looked up.
        control: String,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// An inbound companion payload did not parse as JSON.
    ///
    /// Fatal to that single message only; the connection stays open.
    #[error("Malformed companion message: {message}")]
    MalformedMessage {
        /// Description of the parse failure.
        message: String,
    },

    /// A state report was requested for an event name no capability owns.
    ///
    /// This is a programming error in the integration, not a runtime
    /// condition, and is surfaced to the caller rather than swallowed.
    #[error("No capability owns report event: {event}")]
    UnknownCapability {
        /// The unowned report event name.
        event: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// The companion connection failed.
    ///
    /// Always followed by a scheduled reconnect, never by termination.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// The companion connection closed mid-session.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a controls-not-found error.
    #[inline]
    pub fn controls_not_found(control: impl Into<String>) -> Self {
        Self::ControlsNotFound {
            control: control.into(),
        }
    }

    /// Creates a malformed-message error.
    #[inline]
    pub fn malformed_message(message: impl Into<String>) -> Self {
        Self::MalformedMessage {
            message: message.into(),
        }
    }

    /// Creates an unknown-capability error.
    #[inline]
    pub fn unknown_capability(event: impl Into<String>) -> Self {
        Self::UnknownCapability {
            event: event.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a missing-control error.
    #[inline]
    #[must_use]
    pub fn is_controls_not_found(&self) -> bool {
        matches!(self, Self::ControlsNotFound { .. })
    }

    /// Returns `true` if this is a connection-level error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry: controls appear
    /// asynchronously and connections are re-dialed on a fixed interval.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.is_controls_not_found() || self.is_connection_error()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::controls_not_found("microphone");
        assert_eq!(err.to_string(), "Controls not found: microphone");
    }

    #[test]
    fn test_malformed_message_display() {
        let err = Error::malformed_message("expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Malformed companion message: expected value at line 1"
        );
    }

    #[test]
    fn test_is_controls_not_found() {
        let missing = Error::controls_not_found("captions");
        let other = Error::connection("refused");

        assert!(missing.is_controls_not_found());
        assert!(!other.is_controls_not_found());
    }

    #[test]
    fn test_is_connection_error() {
        let conn_err = Error::connection("refused");
        let closed_err = Error::ConnectionClosed;
        let other_err = Error::unknown_capability("bogusState");

        assert!(conn_err.is_connection_error());
        assert!(closed_err.is_connection_error());
        assert!(!other_err.is_connection_error());
    }

    #[test]
    fn test_is_recoverable() {
        let missing = Error::controls_not_found("hand-raise");
        let unknown = Error::unknown_capability("bogusState");

        assert!(missing.is_recoverable());
        assert!(!unknown.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
