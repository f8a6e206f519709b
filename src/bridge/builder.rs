//! Builder pattern for bridge assembly.
//!
//! Wires the outbound handle through the handlers into the registry, then
//! hands the registry to the connection manager. Handlers need the outbound
//! handle at construction time, which is why assembly runs through this
//! builder instead of ad-hoc wiring.
//!
//! # Example
//!
//! ```ignore
//! use calldeck::{Bridge, Capability};
//!
//! let bridge = Bridge::builder()
//!     .capability(Capability::microphone(), mic_locator)
//!     .capability(Capability::camera(), camera_locator)
//!     .reactions(reaction_surface)
//!     .leave_call(leave_surface)
//!     .side_panels(panel_surface)
//!     .build();
//!
//! let _run = bridge.initialize();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use crate::capability::Capability;
use crate::handlers::{EmojiReactHandler, LeaveCallHandler, SidePanelHandler, ToggleHandler};
use crate::registry::{EventHandler, Registry};
use crate::sync::ToggleSync;
use crate::transport::{ConnectionManager, Outbound};
use crate::ui::{ControlLocator, LeaveSurface, ReactionSurface, SidePanelSurface};

use super::Bridge;
use super::options::BridgeOptions;

// ============================================================================
// BridgeBuilder
// ============================================================================

/// Builder for assembling a [`Bridge`].
///
/// Use [`Bridge::builder()`] to create one.
#[derive(Default)]
pub struct BridgeBuilder {
    /// Connection and retry configuration.
    options: BridgeOptions,
    /// Toggle capabilities and their locators, in registration order.
    capabilities: Vec<(Capability, Arc<dyn ControlLocator>)>,
    /// Emoji reaction lookup, if reactions are enabled.
    reactions: Option<Arc<dyn ReactionSurface>>,
    /// Leave-call lookup, if enabled.
    leave: Option<Arc<dyn LeaveSurface>>,
    /// Side panel lookup, if enabled.
    side_panels: Option<Arc<dyn SidePanelSurface>>,
    /// Integration-defined extra handlers.
    extra: Vec<Box<dyn FnOnce(Outbound) -> Arc<dyn EventHandler>>>,
}

impl BridgeBuilder {
    /// Creates a builder with default options and no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the connection options.
    #[must_use]
    pub fn options(mut self, options: BridgeOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a toggle capability with its locator.
    #[must_use]
    pub fn capability(
        mut self,
        capability: Capability,
        locator: Arc<dyn ControlLocator>,
    ) -> Self {
        self.capabilities.push((capability, locator));
        self
    }

    /// Enables emoji reactions.
    #[must_use]
    pub fn reactions(mut self, surface: Arc<dyn ReactionSurface>) -> Self {
        self.reactions = Some(surface);
        self
    }

    /// Enables the leave-call command.
    #[must_use]
    pub fn leave_call(mut self, surface: Arc<dyn LeaveSurface>) -> Self {
        self.leave = Some(surface);
        self
    }

    /// Enables the chat and participants side panel commands.
    #[must_use]
    pub fn side_panels(mut self, surface: Arc<dyn SidePanelSurface>) -> Self {
        self.side_panels = Some(surface);
        self
    }

    /// Registers an integration-defined handler.
    ///
    /// The constructor receives the bridge's outbound handle so the handler
    /// can send its own reports.
    #[must_use]
    pub fn handler(
        mut self,
        make: impl FnOnce(Outbound) -> Arc<dyn EventHandler> + 'static,
    ) -> Self {
        self.extra.push(Box::new(make));
        self
    }

    /// Assembles the bridge.
    ///
    /// No connection is attempted until [`Bridge::initialize`].
    #[must_use]
    pub fn build(self) -> Bridge {
        let outbound = Outbound::new();
        let mut registry = Registry::new();

        for (capability, locator) in self.capabilities {
            let sync = ToggleSync::new(capability, locator);
            registry.register(Arc::new(ToggleHandler::new(sync, outbound.clone())));
        }

        if let Some(surface) = self.reactions {
            registry.register(Arc::new(EmojiReactHandler::with_retry(
                surface,
                self.options.lookup_retry_attempts,
                self.options.lookup_retry_delay,
            )));
        }

        if let Some(surface) = self.leave {
            registry.register(Arc::new(LeaveCallHandler::new(surface)));
        }

        if let Some(surface) = self.side_panels {
            registry.register(Arc::new(SidePanelHandler::participants(surface.clone())));
            registry.register(Arc::new(SidePanelHandler::chat(surface)));
        }

        for make in self.extra {
            registry.register(make(outbound.clone()));
        }

        let registry = Arc::new(registry);
        let connection = ConnectionManager::new(
            self.options.endpoint(),
            self.options.reconnect_interval,
            Arc::clone(&registry),
            outbound.clone(),
        );

        Bridge::assembled(registry, connection, outbound)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::Result;
    use crate::protocol::InboundMessage;
    use crate::ui::{ControlHandle, MutationFilter};

    struct AbsentLocator;

    impl ControlLocator for AbsentLocator {
        fn locate(&self) -> Option<ControlHandle> {
            None
        }

        fn is_muted(&self, _handle: Option<&ControlHandle>) -> bool {
            true
        }

        fn mutation_filter(&self) -> MutationFilter {
            MutationFilter::attributes(vec!["aria-pressed"])
        }
    }

    struct NoopHandler;

    #[async_trait]
    impl EventHandler for NoopHandler {
        async fn handle_event(&self, _message: &InboundMessage) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_registered_capabilities_own_their_report_events() {
        let bridge = Bridge::builder()
            .capability(Capability::hand_raise(), Arc::new(AbsentLocator))
            .capability(Capability::presentation_pin(), Arc::new(AbsentLocator))
            .build();

        bridge.request_report("handMutedState").expect("owned");
        bridge
            .request_report("pinPresentationMutedState")
            .expect("owned");
        assert!(bridge.request_report("micMutedState").is_err());
    }

    #[tokio::test]
    async fn test_extra_handlers_receive_the_outbound_handle() {
        let bridge = Bridge::builder()
            .handler(|outbound| {
                assert!(!outbound.is_open());
                Arc::new(NoopHandler)
            })
            .build();

        assert!(!bridge.outbound().is_open());
    }
}
