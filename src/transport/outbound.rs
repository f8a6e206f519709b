//! The outbound send handle.
//!
//! Handlers hold a clone of [`Outbound`] and report state through it without
//! knowing anything about the channel lifecycle. There is deliberately no
//! outbound queue: a report produced while disconnected is dropped, and the
//! full resync on the next connection replaces anything that was missed.
//! Queued stale reports would be worse than no reports.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

use crate::protocol::OutboundMessage;

// ============================================================================
// Outbound
// ============================================================================

/// Cheaply clonable handle for sending state reports to the companion.
///
/// Sends are silently dropped unless a connection is currently open. Senders
/// must tolerate drops; the resync-on-connect path is the recovery
/// mechanism, not replay.
#[derive(Clone, Default)]
pub struct Outbound {
    /// The open connection's write channel, when one exists.
    sender: Arc<Mutex<Option<mpsc::UnboundedSender<OutboundMessage>>>>,
}

impl Outbound {
    /// Creates a handle with no connection attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends a report if a connection is open; otherwise drops it silently.
    pub fn send(&self, message: OutboundMessage) {
        let guard = self.sender.lock();
        match guard.as_ref() {
            Some(tx) => {
                // A send error means the connection is tearing down; same
                // outcome as not being open at all.
                let _ = tx.send(message);
            }
            None => {
                trace!(event = %message.event, "Dropped report while disconnected");
            }
        }
    }

    /// Returns `true` if a connection is currently attached.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.sender.lock().is_some()
    }

    /// Attaches an open connection's write channel.
    pub(crate) fn attach(&self, tx: mpsc::UnboundedSender<OutboundMessage>) {
        *self.sender.lock() = Some(tx);
    }

    /// Detaches the write channel on connection teardown.
    pub(crate) fn detach(&self) {
        *self.sender.lock() = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_is_silent_noop_while_disconnected() {
        let outbound = Outbound::new();
        assert!(!outbound.is_open());

        // Must neither error nor panic.
        outbound.send(OutboundMessage::state("micMutedState", true));
    }

    #[tokio::test]
    async fn test_send_delivers_while_attached() {
        let outbound = Outbound::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        outbound.attach(tx);
        assert!(outbound.is_open());

        outbound.send(OutboundMessage::state("handMutedState", false));
        let delivered = rx.recv().await.expect("delivered");
        assert_eq!(delivered, OutboundMessage::state("handMutedState", false));
    }

    #[tokio::test]
    async fn test_detach_restores_silent_drop() {
        let outbound = Outbound::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        outbound.attach(tx);
        outbound.detach();
        assert!(!outbound.is_open());

        outbound.send(OutboundMessage::state("micMutedState", true));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clones_share_the_attachment() {
        let outbound = Outbound::new();
        let clone = outbound.clone();

        let (tx, _rx) = mpsc::unbounded_channel();
        outbound.attach(tx);

        assert!(clone.is_open());
    }
}
