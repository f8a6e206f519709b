//! Control handles and the per-capability locator contract.
//!
//! A [`ControlHandle`] is an opaque reference to a live, clickable element
//! in the host page. Handles are never held long-term: the page replaces
//! its elements outside our control, so every operation re-resolves through
//! the capability's [`ControlLocator`].

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use super::mutation::MutationFilter;

// ============================================================================
// Control
// ============================================================================

/// A live, clickable element in the host page.
///
/// Implementations wrap whatever the integration uses to reach the page.
/// The handle is only valid at the point in time it was resolved.
pub trait Control: Send + Sync {
    /// Performs exactly one simulated activation (click).
    fn activate(&self);

    /// Reads an attribute of the underlying element.
    ///
    /// Returns `None` if the attribute is absent. State-inference predicates
    /// read `aria-pressed`, `aria-label`, or data attributes through this.
    fn attribute(&self, name: &str) -> Option<String>;
}

/// Shared, cheaply clonable reference to a [`Control`].
pub type ControlHandle = Arc<dyn Control>;

// ============================================================================
// ControlLocator
// ============================================================================

/// Per-capability element lookup and state inference.
///
/// One locator exists per capability per target application. The locator
/// owns the volatile parts of integration (selectors, label tables) while
/// the synchronization logic above it stays stable.
///
/// # Contract
///
/// - [`locate`](Self::locate) returns the current live control, or `None`.
///   Absence is a normal outcome; the caller decides whether it is an error
///   based on the capability's presence classification.
/// - [`is_muted`](Self::is_muted) must be pure and side-effect-free, and
///   must return the muted/off default for an absent handle.
/// - [`mutation_filter`](Self::mutation_filter) names the attributes whose
///   mutations can change this capability's state, so observation is never
///   an unfiltered whole-document watch.
pub trait ControlLocator: Send + Sync {
    /// Looks up the current live control element.
    fn locate(&self) -> Option<ControlHandle>;

    /// Infers the muted/off state from a resolved handle.
    ///
    /// An absent handle means the state cannot be determined; the safe
    /// answer is the muted/off default.
    fn is_muted(&self, handle: Option<&ControlHandle>) -> bool;

    /// Returns the attribute scope this capability's state depends on.
    fn mutation_filter(&self) -> MutationFilter;
}

// ============================================================================
// Tests
// ============================================================================
