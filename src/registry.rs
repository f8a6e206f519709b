//! Event handler registration and broadcast dispatch.
//!
//! The registry does not know which handler owns which command name.
//! Dispatch hands every inbound message to every handler and lets each one
//! filter by the `event` field. That keeps registration order-free and the
//! registry schema-free, at the cost of O(handlers) per message; handler
//! counts are in the tens at most.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::protocol::InboundMessage;
use crate::ui::MutationBatch;

// ============================================================================
// EventHandler
// ============================================================================

/// A participant in inbound dispatch and connection resync.
///
/// Handlers receive every inbound companion message and decide relevance
/// themselves by inspecting [`InboundMessage::event`].
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Called for each inbound companion message.
    ///
    /// Irrelevant messages must be ignored with `Ok(())`.
    ///
    /// # Errors
    ///
    /// Errors are logged by the dispatcher and never abort dispatch to the
    /// remaining handlers.
    async fn handle_event(&self, message: &InboundMessage) -> Result<()>;

    /// Called whenever a companion connection is (re)established.
    ///
    /// Stateful handlers report their current state here so the companion
    /// can redraw its buttons after a reconnect.
    ///
    /// # Errors
    ///
    /// [`Error::ControlsNotFound`] is expected during startup (the call UI
    /// may not have finished loading) and is wrapped as non-fatal by the
    /// registry; other errors are logged.
    fn on_connection(&self) -> Result<()> {
        Ok(())
    }

    /// Called for each observed mutation batch.
    ///
    /// Handlers that track page state filter the batch with their own
    /// mutation scope; the default does nothing.
    fn on_mutations(&self, _batch: &MutationBatch) {}

    /// The outbound report event this handler owns, if any.
    fn report_event(&self) -> Option<&'static str> {
        None
    }
}

// ============================================================================
// Registry
// ============================================================================

/// The set of registered event handlers.
#[derive(Default)]
pub struct Registry {
    /// Handlers in registration order.
    handlers: Vec<Arc<dyn EventHandler>>,
    /// Report event name → index into `handlers`, for owned-report lookups.
    report_owners: FxHashMap<&'static str, usize>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler.
    ///
    /// If the handler owns a report event, the event is indexed for
    /// [`request_report`](Self::request_report). Later registrations of the
    /// same report event take over ownership.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        if let Some(event) = handler.report_event() {
            self.report_owners.insert(event, self.handlers.len());
        }
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Hands an inbound message to every handler.
    ///
    /// A handler failure never stops dispatch to the rest: a missing control
    /// is logged at debug (common while the call UI loads), anything else at
    /// warn.
    pub async fn dispatch(&self, message: &InboundMessage) {
        for handler in &self.handlers {
            match handler.handle_event(message).await {
                Ok(()) => {}
                Err(e) if e.is_controls_not_found() => {
                    debug!(event = %message.event, error = %e, "Control missing during dispatch");
                }
                Err(e) => {
                    warn!(event = %message.event, error = %e, "Handler failed");
                }
            }
        }
    }

    /// Fires every handler's new-connection hook.
    ///
    /// Missing controls are common at startup and skipped; partial resync is
    /// acceptable, so one handler's failure never blocks another's report.
    pub fn resync(&self) {
        for handler in &self.handlers {
            match handler.on_connection() {
                Ok(()) => {}
                Err(e) if e.is_controls_not_found() => {
                    debug!(error = %e, "Control missing during resync");
                }
                Err(e) => {
                    warn!(error = %e, "Resync failed for handler");
                }
            }
        }
    }

    /// Fans a mutation batch to every handler, in registration order.
    pub fn broadcast_mutations(&self, batch: &MutationBatch) {
        for handler in &self.handlers {
            handler.on_mutations(batch);
        }
    }

    /// Asks the handler owning `event` to report its current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCapability`] if no registered handler owns
    /// the report event; this indicates a programming error rather than a
    /// runtime condition. Other errors are the owning handler's.
    pub fn request_report(&self, event: &str) -> Result<()> {
        let index = self
            .report_owners
            .get(event)
            .ok_or_else(|| Error::unknown_capability(event))?;
        self.handlers[*index].on_connection()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingHandler {
        seen: AtomicUsize,
        resyncs: AtomicUsize,
        batches: AtomicUsize,
        fail_resync_with_missing_controls: bool,
        report: Option<&'static str>,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle_event(&self, _message: &InboundMessage) -> Result<()> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_connection(&self) -> Result<()> {
            if self.fail_resync_with_missing_controls {
                return Err(Error::controls_not_found("test"));
            }
            self.resyncs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_mutations(&self, _batch: &MutationBatch) {
            self.batches.fetch_add(1, Ordering::SeqCst);
        }

        fn report_event(&self) -> Option<&'static str> {
            self.report
        }
    }

    #[tokio::test]
    async fn test_dispatch_reaches_every_handler() {
        let first = Arc::new(RecordingHandler::default());
        let second = Arc::new(RecordingHandler::default());

        let mut registry = Registry::new();
        registry.register(first.clone());
        registry.register(second.clone());

        registry.dispatch(&InboundMessage::command("toggleMic")).await;

        assert_eq!(first.seen.load(Ordering::SeqCst), 1);
        assert_eq!(second.seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resync_isolates_missing_controls() {
        let failing = Arc::new(RecordingHandler {
            fail_resync_with_missing_controls: true,
            ..Default::default()
        });
        let healthy = Arc::new(RecordingHandler::default());

        let mut registry = Registry::new();
        registry.register(failing);
        registry.register(healthy.clone());

        registry.resync();

        assert_eq!(healthy.resyncs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_broadcast_mutations_reaches_every_handler() {
        let first = Arc::new(RecordingHandler::default());
        let second = Arc::new(RecordingHandler::default());

        let mut registry = Registry::new();
        registry.register(first.clone());
        registry.register(second.clone());

        registry.broadcast_mutations(&vec![]);

        assert_eq!(first.batches.load(Ordering::SeqCst), 1);
        assert_eq!(second.batches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_request_report_finds_owner() {
        let owner = Arc::new(RecordingHandler {
            report: Some("micMutedState"),
            ..Default::default()
        });

        let mut registry = Registry::new();
        registry.register(owner.clone());

        registry.request_report("micMutedState").expect("owned");
        assert_eq!(owner.resyncs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_request_report_rejects_unowned_event() {
        let registry = Registry::new();
        let err = registry.request_report("bogusMutedState").unwrap_err();
        assert!(matches!(err, Error::UnknownCapability { .. }));
    }
}
