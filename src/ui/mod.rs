//! UI surface contracts.
//!
//! The bridge never touches the host page directly. Integrations supply
//! implementations of the traits in this module, built on whatever lookup
//! strategy the target application requires (selectors, labels, test ids).
//! Everything above this module is lookup-strategy agnostic.
//!
//! | Item | Role |
//! |------|------|
//! | [`Control`] / [`ControlHandle`] | A live, clickable element |
//! | [`ControlLocator`] | Per-capability lookup + state inference |
//! | [`MutationFilter`], [`AttributeMutation`] | Change-observation scoping |
//! | [`ReactionSurface`], [`LeaveSurface`], [`SidePanelSurface`] | Non-toggle control groups |

// ============================================================================
// Submodules
// ============================================================================

/// Control handles and the per-capability locator contract.
pub mod control;

/// Attribute-mutation observation types.
pub mod mutation;

/// Lookup contracts for the non-toggle control groups.
pub mod surface;

// ============================================================================
// Re-exports
// ============================================================================

pub use control::{Control, ControlHandle, ControlLocator};
pub use mutation::{AttributeMutation, MutationBatch, MutationFilter};
pub use surface::{LeaveSurface, PanelTab, ReactionSurface, SidePanelSurface};
