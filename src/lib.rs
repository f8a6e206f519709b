//! Calldeck - keypad-to-call bidirectional state synchronization.
//!
//! This library keeps a physical macro-keypad controller and a
//! video-conferencing web UI in sync, in both directions: controller button
//! presses become clicks on the call controls, and observed control state
//! (mute, hand-raise, captions, ...) is reported back so the controller's
//! button icons reflect live state.
//!
//! # Architecture
//!
//! The bridge runs inside the page context and acts as a WebSocket client:
//!
//! - **Companion end**: the controller-side process, listening on localhost
//! - **Bridge end (this crate)**: dispatches inbound commands, observes the
//!   UI, reports state changes
//!
//! Key design principles:
//!
//! - One [`Bridge`] owns the single companion connection and its handlers
//! - Control lookup is integration-supplied ([`ControlLocator`] and the
//!   surface traits); the engine never hardcodes selectors
//! - State is always recomputed from the live page, never cached
//! - Change reports are edge-triggered; reconnects carry a full resync
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use calldeck::{Bridge, Capability};
//! # struct MyMicLocator;
//! # impl calldeck::ControlLocator for MyMicLocator {
//! #     fn locate(&self) -> Option<calldeck::ControlHandle> { None }
//! #     fn is_muted(&self, _: Option<&calldeck::ControlHandle>) -> bool { true }
//! #     fn mutation_filter(&self) -> calldeck::MutationFilter {
//! #         calldeck::MutationFilter::attributes(vec!["data-is-muted"])
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() {
//!     // Locators implement lookup against the target application.
//!     let bridge = Bridge::builder()
//!         .capability(Capability::microphone(), Arc::new(MyMicLocator))
//!         .build();
//!
//!     // Dial the companion and keep reconnecting forever.
//!     let run = bridge.initialize();
//!
//!     // Feed DOM mutation batches from the integration's observer:
//!     // bridge.observe_mutations(&batch);
//!
//!     let _ = run.await;
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bridge`] | The assembled engine: [`Bridge`], builder, options |
//! | [`capability`] | Capability descriptors and the built-in control set |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`handlers`] | Command handlers (toggles, reactions, leave, side panel) |
//! | [`protocol`] | Companion wire message types |
//! | [`registry`] | Handler registration and broadcast dispatch |
//! | [`sync`] | Per-capability toggle synchronization |
//! | [`transport`] | Connection state machine and outbound handle |
//! | [`ui`] | Integration-facing control and mutation contracts |

// ============================================================================
// Modules
// ============================================================================

/// The assembled engine: [`Bridge`], builder, options.
pub mod bridge;

/// Capability descriptors and the built-in control set.
pub mod capability;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Companion command handlers.
pub mod handlers;

/// Companion wire message types.
pub mod protocol;

/// Handler registration and broadcast dispatch.
pub mod registry;

/// Per-capability toggle synchronization.
pub mod sync;

/// Companion channel transport layer.
pub mod transport;

/// Integration-facing control and mutation contracts.
pub mod ui;

// ============================================================================
// Re-exports
// ============================================================================

// Bridge types
pub use bridge::{Bridge, BridgeBuilder, BridgeOptions};

// Capability types
pub use capability::{Capability, Presence, ToggleCommands};

// Error types
pub use error::{Error, Result};

// Handler types
pub use handlers::{EmojiReactHandler, LeaveCallHandler, SidePanelHandler, ToggleHandler};

// Protocol types
pub use protocol::{InboundMessage, OutboundMessage};

// Registry types
pub use registry::{EventHandler, Registry};

// Sync types
pub use sync::{ChangeWatcher, ToggleSync};

// Transport types
pub use transport::{ConnectionManager, ConnectionState, Outbound};

// UI contract types
pub use ui::{
    AttributeMutation, Control, ControlHandle, ControlLocator, LeaveSurface, MutationBatch,
    MutationFilter, PanelTab, ReactionSurface, SidePanelSurface,
};
