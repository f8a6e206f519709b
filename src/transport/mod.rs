//! Companion channel transport layer.
//!
//! This module owns the single WebSocket to the companion process: dialing,
//! the fixed-interval reconnect loop, inbound dispatch, and the outbound
//! send handle with its drop-when-disconnected policy.
//!
//! # Connection Flow
//!
//! 1. [`ConnectionManager::initialize`] spawns the run loop
//! 2. The loop dials `ws://127.0.0.1:{port}` (companion listens locally)
//! 3. On open: handlers resync their state to the companion
//! 4. On close or failure (either way, one path): reconnect after a fixed
//!    interval; the companion is local, so backoff never needs to grow

// ============================================================================
// Submodules
// ============================================================================

/// Connection state machine and run loop.
pub mod connection;

/// The outbound send handle.
pub mod outbound;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{ConnectionManager, ConnectionState};
pub use outbound::Outbound;
