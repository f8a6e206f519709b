//! Leaving the call.
//!
//! Some meetings interpose a dialog asking whether to just leave or end the
//! call for everyone. A second press of the controller's leave button while
//! that dialog is up selects "just leave", so the handler always checks for
//! the pending confirmation first.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::protocol::InboundMessage;
use crate::registry::EventHandler;
use crate::ui::LeaveSurface;

// ============================================================================
// Constants
// ============================================================================

/// The inbound command this handler answers.
const LEAVE_CALL_EVENT: &str = "leaveCall";

// ============================================================================
// LeaveCallHandler
// ============================================================================

/// Hangs up the call on `leaveCall` commands.
pub struct LeaveCallHandler {
    /// Leave-control lookup.
    surface: Arc<dyn LeaveSurface>,
}

impl LeaveCallHandler {
    /// Creates a handler over a leave-control surface.
    #[must_use]
    pub fn new(surface: Arc<dyn LeaveSurface>) -> Self {
        Self { surface }
    }

    /// Clicks the confirmation button if its dialog is up, else the main
    /// leave button.
    fn leave(&self) -> Result<()> {
        if let Some(confirmation) = self.surface.confirmation_button() {
            confirmation.activate();
            return Ok(());
        }

        let leave = self
            .surface
            .leave_button()
            .ok_or_else(|| Error::controls_not_found("leave call"))?;
        leave.activate();
        Ok(())
    }
}

#[async_trait]
impl EventHandler for LeaveCallHandler {
    async fn handle_event(&self, message: &InboundMessage) -> Result<()> {
        if message.event == LEAVE_CALL_EVENT {
            self.leave()
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::ui::{Control, ControlHandle};

    struct CountingControl {
        clicks: Arc<AtomicUsize>,
    }

    impl Control for CountingControl {
        fn activate(&self) {
            self.clicks.fetch_add(1, Ordering::SeqCst);
        }

        fn attribute(&self, _name: &str) -> Option<String> {
            None
        }
    }

    struct FakeLeaveSurface {
        dialog_open: bool,
        leave_present: bool,
        confirmation_clicks: Arc<AtomicUsize>,
        leave_clicks: Arc<AtomicUsize>,
    }

    impl FakeLeaveSurface {
        fn new(dialog_open: bool, leave_present: bool) -> Self {
            Self {
                dialog_open,
                leave_present,
                confirmation_clicks: Arc::new(AtomicUsize::new(0)),
                leave_clicks: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl LeaveSurface for FakeLeaveSurface {
        fn confirmation_button(&self) -> Option<ControlHandle> {
            self.dialog_open.then(|| {
                Arc::new(CountingControl {
                    clicks: Arc::clone(&self.confirmation_clicks),
                }) as ControlHandle
            })
        }

        fn leave_button(&self) -> Option<ControlHandle> {
            self.leave_present.then(|| {
                Arc::new(CountingControl {
                    clicks: Arc::clone(&self.leave_clicks),
                }) as ControlHandle
            })
        }
    }

    #[tokio::test]
    async fn test_clicks_leave_button() {
        let surface = Arc::new(FakeLeaveSurface::new(false, true));
        let handler = LeaveCallHandler::new(surface.clone());

        handler
            .handle_event(&InboundMessage::command("leaveCall"))
            .await
            .expect("leave");

        assert_eq!(surface.leave_clicks.load(Ordering::SeqCst), 1);
        assert_eq!(surface.confirmation_clicks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pending_dialog_takes_priority() {
        let surface = Arc::new(FakeLeaveSurface::new(true, true));
        let handler = LeaveCallHandler::new(surface.clone());

        handler
            .handle_event(&InboundMessage::command("leaveCall"))
            .await
            .expect("leave");

        assert_eq!(surface.confirmation_clicks.load(Ordering::SeqCst), 1);
        assert_eq!(surface.leave_clicks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_button_is_controls_not_found() {
        let surface = Arc::new(FakeLeaveSurface::new(false, false));
        let handler = LeaveCallHandler::new(surface);

        let err = handler
            .handle_event(&InboundMessage::command("leaveCall"))
            .await
            .unwrap_err();
        assert!(err.is_controls_not_found());
    }

    #[tokio::test]
    async fn test_unrelated_event_is_ignored() {
        let surface = Arc::new(FakeLeaveSurface::new(false, true));
        let handler = LeaveCallHandler::new(surface.clone());

        handler
            .handle_event(&InboundMessage::command("toggleMic"))
            .await
            .expect("ignored");

        assert_eq!(surface.leave_clicks.load(Ordering::SeqCst), 0);
    }
}
