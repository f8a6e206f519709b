//! The per-capability toggle command handler.
//!
//! One `ToggleHandler` exists per registered capability. It maps the
//! capability's command names onto [`ToggleSync`] operations, reports state
//! on every new connection, and turns observed mutations into edge-triggered
//! state reports.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::protocol::{InboundMessage, OutboundMessage};
use crate::registry::EventHandler;
use crate::sync::{ChangeWatcher, ToggleSync};
use crate::transport::Outbound;
use crate::ui::MutationBatch;

// ============================================================================
// ToggleHandler
// ============================================================================

/// Bridges one capability's commands and state reports.
///
/// Command mapping (using the capability's configured names):
///
/// - mute / unmute → idempotent set, no report: the resulting DOM mutation
///   reports the change once the page reflects it
/// - toggle → one activation, then an immediate report; the click's effect
///   may lag in the page, in which case the mutation path issues a
///   corrective report right after
/// - query → report only
pub struct ToggleHandler {
    /// The capability synchronizer.
    sync: ToggleSync,
    /// Where reports go.
    outbound: Outbound,
    /// Edge-trigger state for the mutation path.
    watcher: Mutex<ChangeWatcher>,
}

impl ToggleHandler {
    /// Creates a handler around a capability synchronizer.
    #[must_use]
    pub fn new(sync: ToggleSync, outbound: Outbound) -> Self {
        Self {
            sync,
            outbound,
            watcher: Mutex::new(ChangeWatcher::new()),
        }
    }

    /// Reports the current live state to the companion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlsNotFound`](crate::Error::ControlsNotFound)
    /// when a required control is absent; no report is sent in that case.
    fn report(&self) -> Result<()> {
        let muted = self.sync.state()?;
        self.watcher.lock().observe(muted);
        self.outbound.send(OutboundMessage::state(
            self.sync.capability().report_event(),
            muted,
        ));
        Ok(())
    }
}

#[async_trait]
impl EventHandler for ToggleHandler {
    async fn handle_event(&self, message: &InboundMessage) -> Result<()> {
        let commands = self.sync.capability().commands();
        let event = message.event.as_str();

        if commands.mute == Some(event) {
            self.sync.set_state(true)
        } else if commands.unmute == Some(event) {
            self.sync.set_state(false)
        } else if commands.toggle == event {
            self.sync.toggle()?;
            self.report()
        } else if commands.query == event {
            self.report()
        } else {
            Ok(())
        }
    }

    fn on_connection(&self) -> Result<()> {
        self.report()
    }

    fn on_mutations(&self, batch: &MutationBatch) {
        let filter = self.sync.mutation_filter();
        if !batch.iter().any(|mutation| filter.matches(mutation)) {
            return;
        }

        let muted = match self.sync.state() {
            Ok(muted) => muted,
            Err(e) => {
                // A mutation can be the control being removed entirely.
                debug!(capability = %self.sync.capability(), error = %e,
                    "State unreadable after mutation");
                return;
            }
        };

        if let Some(changed) = self.watcher.lock().observe(muted) {
            self.outbound.send(OutboundMessage::state(
                self.sync.capability().report_event(),
                changed,
            ));
        }
    }

    fn report_event(&self) -> Option<&'static str> {
        Some(self.sync.capability().report_event())
    }
}

// ============================================================================
// Tests
// ============================================================================
