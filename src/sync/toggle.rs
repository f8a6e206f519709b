//! The per-capability toggle synchronizer.
//!
//! `ToggleSync` wraps one [`ControlLocator`] and its [`Capability`]
//! descriptor. State is never cached: every operation re-resolves the live
//! control, because the host page replaces its elements at will and a stale
//! handle would report a stale state.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use crate::capability::Capability;
use crate::error::{Error, Result};
use crate::ui::{ControlHandle, ControlLocator, MutationFilter};

// ============================================================================
// ToggleSync
// ============================================================================

/// Keeps one capability's reported state consistent with its live control.
///
/// # Example
///
/// ```ignore
/// use calldeck::{Capability, ToggleSync};
///
/// let sync = ToggleSync::new(Capability::microphone(), locator);
/// if !sync.state()? {
///     sync.set_state(true)?; // one click, now muted
/// }
/// ```
pub struct ToggleSync {
    /// The capability this synchronizer serves.
    capability: Capability,
    /// Integration-supplied lookup and state inference.
    locator: Arc<dyn ControlLocator>,
}

impl ToggleSync {
    /// Creates a synchronizer for a capability.
    #[must_use]
    pub fn new(capability: Capability, locator: Arc<dyn ControlLocator>) -> Self {
        Self {
            capability,
            locator,
        }
    }

    /// Returns the capability descriptor.
    #[inline]
    #[must_use]
    pub const fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Returns the attribute scope this capability's state depends on.
    #[inline]
    #[must_use]
    pub fn mutation_filter(&self) -> MutationFilter {
        self.locator.mutation_filter()
    }

    /// Looks up the current live control.
    ///
    /// Absence is a normal outcome for optional capabilities (no one is
    /// presenting, hand-raise disabled for the account) and yields
    /// `Ok(None)`. A required capability that fails to resolve is the
    /// recoverable controls-not-found condition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlsNotFound`] when a required control is absent.
    pub fn resolve(&self) -> Result<Option<ControlHandle>> {
        match self.locator.locate() {
            Some(handle) => Ok(Some(handle)),
            None if self.capability.is_required() => {
                Err(Error::controls_not_found(self.capability.name()))
            }
            None => Ok(None),
        }
    }

    /// Recomputes the current muted/off state from the live control.
    ///
    /// An absent optional control reports the muted/off default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlsNotFound`] when a required control is absent.
    pub fn state(&self) -> Result<bool> {
        let handle = self.resolve()?;
        Ok(self.locator.is_muted(handle.as_ref()))
    }

    /// Drives the control to the desired state with at most one click.
    ///
    /// No-ops when the live state already matches (idempotent set). Does not
    /// emit a report; the mutation-observation path reports the resulting
    /// change once the page reflects it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlsNotFound`] when a required control is absent.
    pub fn set_state(&self, muted: bool) -> Result<()> {
        if self.state()? != muted {
            self.activate()?;
        }
        Ok(())
    }

    /// Performs one activation regardless of current state.
    ///
    /// An absent optional control makes this a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlsNotFound`] when a required control is absent.
    pub fn toggle(&self) -> Result<()> {
        self.activate()
    }

    /// Clicks the resolved control, if any.
    fn activate(&self) -> Result<()> {
        if let Some(handle) = self.resolve()? {
            handle.activate();
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
