//! The assembled bridge.
//!
//! A [`Bridge`] ties the pieces together: the handler registry, the
//! connection manager, and the outbound handle. Integrations build one with
//! [`Bridge::builder`], start it with [`Bridge::initialize`], and feed it
//! observed mutation batches from their real DOM observer.

// ============================================================================
// Submodules
// ============================================================================

/// Builder for assembling a bridge.
pub mod builder;

/// Connection and retry configuration.
pub mod options;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::Result;
use crate::registry::Registry;
use crate::transport::{ConnectionManager, ConnectionState, Outbound};
use crate::ui::MutationBatch;

pub use builder::BridgeBuilder;
pub use options::BridgeOptions;

// ============================================================================
// Bridge
// ============================================================================

/// The bidirectional keypad-to-call-UI synchronization engine.
///
/// # Example
///
/// ```ignore
/// use calldeck::{Bridge, Capability};
///
/// let bridge = Bridge::builder()
///     .capability(Capability::microphone(), mic_locator)
///     .build();
///
/// let _run = bridge.initialize();
///
/// // From the integration's DOM observer callback:
/// bridge.observe_mutations(batch);
/// ```
pub struct Bridge {
    /// Registered handlers.
    registry: Arc<Registry>,
    /// The companion connection.
    connection: ConnectionManager,
    /// The shared send handle.
    outbound: Outbound,
}

impl Bridge {
    /// Creates a builder for assembling a bridge.
    #[must_use]
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::new()
    }

    /// Called by the builder once wiring is complete.
    pub(crate) fn assembled(
        registry: Arc<Registry>,
        connection: ConnectionManager,
        outbound: Outbound,
    ) -> Self {
        Self {
            registry,
            connection,
            outbound,
        }
    }

    /// Starts the companion connection loop.
    ///
    /// The loop reconnects indefinitely; drop the returned handle's task to
    /// stop it (for example on shutdown).
    pub fn initialize(&self) -> JoinHandle<()> {
        self.connection.initialize()
    }

    /// Returns the connection lifecycle state.
    #[inline]
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Returns a clone of the outbound send handle.
    #[inline]
    #[must_use]
    pub fn outbound(&self) -> Outbound {
        self.outbound.clone()
    }

    /// Feeds one observed mutation batch to every handler.
    ///
    /// Batches are processed synchronously and in delivery order; callers
    /// should invoke this directly from their observer callback.
    pub fn observe_mutations(&self, batch: &MutationBatch) {
        self.registry.broadcast_mutations(batch);
    }

    /// Asks the capability owning `event` to report its current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCapability`](crate::Error::UnknownCapability)
    /// if no registered handler owns the report event.
    pub fn request_report(&self, event: &str) -> Result<()> {
        self.registry.request_report(event)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::capability::Capability;
    use crate::ui::{Control, ControlHandle, ControlLocator, MutationFilter};

    struct StaticControl {
        muted: Arc<AtomicBool>,
    }

    impl Control for StaticControl {
        fn activate(&self) {
            self.muted.fetch_xor(true, Ordering::SeqCst);
        }

        fn attribute(&self, name: &str) -> Option<String> {
            (name == "data-is-muted").then(|| self.muted.load(Ordering::SeqCst).to_string())
        }
    }

    struct StaticLocator {
        muted: Arc<AtomicBool>,
    }

    impl ControlLocator for StaticLocator {
        fn locate(&self) -> Option<ControlHandle> {
            Some(Arc::new(StaticControl {
                muted: Arc::clone(&self.muted),
            }))
        }

        fn is_muted(&self, handle: Option<&ControlHandle>) -> bool {
            handle
                .and_then(|h| h.attribute("data-is-muted"))
                .is_none_or(|v| v == "true")
        }

        fn mutation_filter(&self) -> MutationFilter {
            MutationFilter::attributes(vec!["data-is-muted"])
        }
    }

    fn bridge() -> Bridge {
        Bridge::builder()
            .capability(
                Capability::microphone(),
                Arc::new(StaticLocator {
                    muted: Arc::new(AtomicBool::new(true)),
                }),
            )
            .build()
    }

    #[tokio::test]
    async fn test_starts_disconnected() {
        let bridge = bridge();
        assert_eq!(bridge.connection_state(), ConnectionState::Disconnected);
        assert!(!bridge.outbound().is_open());
    }

    #[tokio::test]
    async fn test_request_report_requires_owned_event() {
        let bridge = bridge();

        bridge.request_report("micMutedState").expect("owned");
        assert!(bridge.request_report("cameraMutedState").is_err());
    }

    #[tokio::test]
    async fn test_observe_mutations_is_silent_without_connection() {
        let bridge = bridge();

        // No connection: the edge-triggered report is dropped silently.
        bridge.observe_mutations(&vec![crate::ui::AttributeMutation::new(
            "data-is-muted",
            Some("true".into()),
        )]);
    }
}
