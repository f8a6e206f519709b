//! Wire message types for the companion channel.
//!
//! This module defines the message format for communication between the
//! bridge (in-page) and the companion process (controller side).
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | [`InboundMessage`] | Companion → Bridge | Button press / state query |
//! | [`OutboundMessage`] | Bridge → Companion | Capability state report |
//!
//! Both are single JSON objects carried in WebSocket text frames. Inbound
//! messages are identified by their `event` field (e.g. `toggleMic`,
//! `getCameraState`, `emojiReact=👍`); outbound messages carry a report
//! event name owned by exactly one capability plus the observed state.

// ============================================================================
// Submodules
// ============================================================================

/// Inbound and outbound message types.
pub mod message;

// ============================================================================
// Re-exports
// ============================================================================

pub use message::{InboundMessage, OutboundMessage};
