//! Bridge configuration options.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use calldeck::BridgeOptions;
//!
//! let options = BridgeOptions::new()
//!     .with_companion_port(2394)
//!     .with_reconnect_interval(Duration::from_secs(2));
//!
//! assert_eq!(options.endpoint(), "ws://127.0.0.1:2394");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// The localhost port the companion process listens on.
pub const DEFAULT_COMPANION_PORT: u16 = 2394;

/// Delay between a connection loss and the next dial.
///
/// Fixed, not exponential: the companion is local and is either running or
/// not.
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_secs(2);

// ============================================================================
// BridgeOptions
// ============================================================================

/// Connection and retry configuration for a [`Bridge`](super::Bridge).
///
/// The companion endpoint is always on localhost; the trust boundary is the
/// machine, so there is no authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Companion WebSocket port on 127.0.0.1.
    pub companion_port: u16,

    /// Fixed delay between reconnect attempts.
    pub reconnect_interval: Duration,

    /// Lookup attempts for asynchronously-appearing controls.
    pub lookup_retry_attempts: u32,

    /// Spacing between those lookup attempts.
    pub lookup_retry_delay: Duration,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl BridgeOptions {
    /// Creates options with the protocol defaults.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            companion_port: DEFAULT_COMPANION_PORT,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            lookup_retry_attempts: crate::handlers::emoji::DEFAULT_RETRY_ATTEMPTS,
            lookup_retry_delay: crate::handlers::emoji::DEFAULT_RETRY_DELAY,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl BridgeOptions {
    /// Sets the companion port.
    #[inline]
    #[must_use]
    pub const fn with_companion_port(mut self, port: u16) -> Self {
        self.companion_port = port;
        self
    }

    /// Sets the reconnect interval.
    #[inline]
    #[must_use]
    pub const fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    /// Sets the bounded-retry budget for asynchronously-appearing controls.
    #[inline]
    #[must_use]
    pub const fn with_lookup_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.lookup_retry_attempts = attempts;
        self.lookup_retry_delay = delay;
        self
    }

    /// Returns the companion WebSocket endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("ws://127.0.0.1:{}", self.companion_port)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BridgeOptions::new();
        assert_eq!(options.companion_port, 2394);
        assert_eq!(options.reconnect_interval, Duration::from_secs(2));
        assert_eq!(options.lookup_retry_attempts, 5);
        assert_eq!(options.lookup_retry_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_endpoint_format() {
        let options = BridgeOptions::new().with_companion_port(9001);
        assert_eq!(options.endpoint(), "ws://127.0.0.1:9001");
    }
}
