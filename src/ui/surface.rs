//! Lookup contracts for the non-toggle control groups.
//!
//! These cover the call controls that are not simple two-state toggles: the
//! emoji reaction bar, the leave-call button pair, and the side panel tabs.
//! As with [`ControlLocator`](super::ControlLocator), integrations implement
//! these against the target application; the handlers stay selector-free.

// ============================================================================
// Imports
// ============================================================================

use super::control::ControlHandle;

// ============================================================================
// ReactionSurface
// ============================================================================

/// Lookup for the emoji reaction controls.
pub trait ReactionSurface: Send + Sync {
    /// Returns the reaction button for the given emoji, if visible.
    ///
    /// The reaction bar renders its buttons only while the picker is open,
    /// so absence here is common and triggers the picker-open fallback.
    fn reaction_button(&self, emoji: &str) -> Option<ControlHandle>;

    /// Returns the button that opens the reaction picker.
    fn picker_button(&self) -> Option<ControlHandle>;
}

// ============================================================================
// LeaveSurface
// ============================================================================

/// Lookup for the leave-call controls.
pub trait LeaveSurface: Send + Sync {
    /// Returns the pending leave-confirmation dialog button, if present.
    ///
    /// Some meetings ask whether to just leave or end the call for everyone.
    /// While that dialog is up, this is the button that selects "just leave".
    fn confirmation_button(&self) -> Option<ControlHandle>;

    /// Returns the main leave-call button.
    fn leave_button(&self) -> Option<ControlHandle>;
}

// ============================================================================
// SidePanelSurface
// ============================================================================

/// One tab header of the open side panel.
pub struct PanelTab {
    /// The clickable tab header.
    pub handle: ControlHandle,
    /// Whether this tab is the currently selected one.
    pub selected: bool,
}

/// Lookup for the side panel (chat / participants) controls.
///
/// The panel exposes different buttons depending on whether it is open, so
/// the surface reports both views and the handler picks per current state.
/// Tabs are addressed by position; the order must match between
/// [`open_tabs`](Self::open_tabs) and
/// [`closed_tab_buttons`](Self::closed_tab_buttons).
pub trait SidePanelSurface: Send + Sync {
    /// Returns the tab headers of the open panel, in display order.
    ///
    /// Empty when the panel is closed.
    fn open_tabs(&self) -> Vec<PanelTab>;

    /// Returns the collapsed-state buttons that open each tab, in the same
    /// order as [`open_tabs`](Self::open_tabs).
    fn closed_tab_buttons(&self) -> Vec<ControlHandle>;

    /// Returns the panel's close button.
    ///
    /// Only present while the panel is open.
    fn close_button(&self) -> Option<ControlHandle>;
}
