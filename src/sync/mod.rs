//! Per-capability toggle synchronization.
//!
//! One [`ToggleSync`] exists per capability. It owns the "not found"
//! semantics around the capability's locator and exposes the operations the
//! command handlers and change watchers are built from:
//!
//! - [`ToggleSync::state`]: recompute the live muted/off state
//! - [`ToggleSync::set_state`]: idempotent set (at most one click)
//! - [`ToggleSync::toggle`]: unconditional single activation
//! - [`ChangeWatcher`]: edge-triggered change detection over observed states

// ============================================================================
// Submodules
// ============================================================================

/// The per-capability synchronizer.
pub mod toggle;

/// Edge-triggered change detection.
pub mod watcher;

// ============================================================================
// Re-exports
// ============================================================================

pub use toggle::ToggleSync;
pub use watcher::ChangeWatcher;
