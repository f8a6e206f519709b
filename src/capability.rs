//! Capability descriptors for the supported toggle controls.
//!
//! A [`Capability`] is an immutable description of one controllable feature
//! of the call UI: its name, the report event it owns on the wire, the
//! command names the companion sends for it, and whether the control is
//! expected to exist in every meeting.
//!
//! Capabilities are defined once at startup and live for the process
//! lifetime. The event-name strings are fixed by the companion protocol and
//! must not change between versions.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Presence
// ============================================================================

/// Whether a capability's control is expected in every meeting.
///
/// `Required` controls that fail to resolve raise
/// [`Error::ControlsNotFound`](crate::Error::ControlsNotFound). `Optional`
/// controls silently report the muted/off default instead: hand-raise can be
/// disabled for some accounts, and a presentation-pin control only exists
/// while someone presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The control must exist in any active meeting.
    Required,
    /// The control may legitimately be absent.
    Optional,
}

// ============================================================================
// ToggleCommands
// ============================================================================

/// The inbound command names a toggle capability responds to.
///
/// All capabilities have a toggle and a state-query command. Only some have
/// explicit set-state commands (`mute`/`unmute`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleCommands {
    /// Command forcing the muted/off state, if the protocol defines one.
    pub mute: Option<&'static str>,
    /// Command forcing the unmuted/on state, if the protocol defines one.
    pub unmute: Option<&'static str>,
    /// Command flipping the current state.
    pub toggle: &'static str,
    /// Command requesting a state report without changing anything.
    pub query: &'static str,
}

// ============================================================================
// Capability
// ============================================================================

/// An immutable descriptor of one toggleable call control.
///
/// # Example
///
/// ```
/// use calldeck::Capability;
///
/// let mic = Capability::microphone();
/// assert_eq!(mic.report_event(), "micMutedState");
/// assert!(mic.is_required());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// Human-readable capability name, used in logs and errors.
    name: &'static str,
    /// The outbound report event this capability owns.
    report_event: &'static str,
    /// Inbound command names.
    commands: ToggleCommands,
    /// Whether the control is expected in every meeting.
    presence: Presence,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ============================================================================
// Capability - Built-ins
// ============================================================================

impl Capability {
    /// The microphone mute toggle.
    #[must_use]
    pub const fn microphone() -> Self {
        Self {
            name: "microphone",
            report_event: "micMutedState",
            commands: ToggleCommands {
                mute: Some("muteMic"),
                unmute: Some("unmuteMic"),
                toggle: "toggleMic",
                query: "getMicState",
            },
            presence: Presence::Required,
        }
    }

    /// The camera on/off toggle.
    #[must_use]
    pub const fn camera() -> Self {
        Self {
            name: "camera",
            report_event: "cameraMutedState",
            commands: ToggleCommands {
                mute: Some("disableCamera"),
                unmute: Some("enableCamera"),
                toggle: "toggleCamera",
                query: "getCameraState",
            },
            presence: Presence::Required,
        }
    }

    /// The hand-raise toggle.
    ///
    /// Optional: the control is located through localized labels and may be
    /// missing entirely for some account types.
    #[must_use]
    pub const fn hand_raise() -> Self {
        Self {
            name: "hand-raise",
            report_event: "handMutedState",
            commands: ToggleCommands {
                mute: None,
                unmute: None,
                toggle: "toggleHand",
                query: "getHandState",
            },
            presence: Presence::Optional,
        }
    }

    /// The closed-captions toggle.
    #[must_use]
    pub const fn captions() -> Self {
        Self {
            name: "captions",
            report_event: "captionsMutedState",
            commands: ToggleCommands {
                mute: None,
                unmute: None,
                toggle: "toggleCaptions",
                query: "getCaptionsState",
            },
            presence: Presence::Required,
        }
    }

    /// The pin-presentation toggle.
    ///
    /// Optional: there is no pin control unless someone is presenting.
    #[must_use]
    pub const fn presentation_pin() -> Self {
        Self {
            name: "presentation-pin",
            report_event: "pinPresentationMutedState",
            commands: ToggleCommands {
                mute: None,
                unmute: None,
                toggle: "togglePinPresentation",
                query: "getPinPresentationState",
            },
            presence: Presence::Optional,
        }
    }

    /// Creates a custom capability for integrations targeting other controls.
    #[must_use]
    pub const fn new(
        name: &'static str,
        report_event: &'static str,
        commands: ToggleCommands,
        presence: Presence,
    ) -> Self {
        Self {
            name,
            report_event,
            commands,
            presence,
        }
    }
}

// ============================================================================
// Capability - Accessors
// ============================================================================

impl Capability {
    /// Returns the capability name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the outbound report event this capability owns.
    #[inline]
    #[must_use]
    pub const fn report_event(&self) -> &'static str {
        self.report_event
    }

    /// Returns the inbound command names.
    #[inline]
    #[must_use]
    pub const fn commands(&self) -> &ToggleCommands {
        &self.commands
    }

    /// Returns `true` if the control must exist in any active meeting.
    #[inline]
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }
}

// ============================================================================
// Tests
// ============================================================================
