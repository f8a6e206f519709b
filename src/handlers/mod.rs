//! Companion command handlers.
//!
//! Each handler implements [`EventHandler`](crate::registry::EventHandler)
//! for one group of commands:
//!
//! | Handler | Commands |
//! |---------|----------|
//! | [`ToggleHandler`] | per-capability mute/unmute/toggle/query |
//! | [`EmojiReactHandler`] | `emojiReact=<emoji>` |
//! | [`LeaveCallHandler`] | `leaveCall` |
//! | [`SidePanelHandler`] | `toggleChat`, `toggleParticipants` |

// ============================================================================
// Submodules
// ============================================================================

/// Bidirectional toggle synchronization per capability.
pub mod toggle;

/// Emoji reactions with a bounded lookup retry.
pub mod emoji;

/// Leaving the call, including the confirmation dialog.
pub mod leave;

/// Side panel tab toggling.
pub mod side_panel;

// ============================================================================
// Re-exports
// ============================================================================

pub use emoji::EmojiReactHandler;
pub use leave::LeaveCallHandler;
pub use side_panel::SidePanelHandler;
pub use toggle::ToggleHandler;
