//! Side panel tab toggling.
//!
//! The side panel hosts several tabs (participants, chat) addressed by
//! position. Toggling a tab means one of three things depending on what the
//! page currently shows: switch to the tab, close the panel because the tab
//! is already showing, or open the panel straight onto the tab.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::protocol::InboundMessage;
use crate::registry::EventHandler;
use crate::ui::SidePanelSurface;

// ============================================================================
// Constants
// ============================================================================

/// Position of the participants tab in the panel's display order.
const PARTICIPANTS_TAB_INDEX: usize = 0;

/// Position of the chat tab in the panel's display order.
const CHAT_TAB_INDEX: usize = 1;

// ============================================================================
// SidePanelHandler
// ============================================================================

/// Toggles one side panel tab on its companion command.
///
/// Register one handler per tab:
///
/// ```ignore
/// registry.register(Arc::new(SidePanelHandler::participants(surface.clone())));
/// registry.register(Arc::new(SidePanelHandler::chat(surface)));
/// ```
pub struct SidePanelHandler {
    /// Panel control lookup.
    surface: Arc<dyn SidePanelSurface>,
    /// The inbound command this handler answers.
    command: &'static str,
    /// Which tab this handler toggles.
    tab_index: usize,
}

impl SidePanelHandler {
    /// Creates a handler for the participants tab (`toggleParticipants`).
    #[must_use]
    pub fn participants(surface: Arc<dyn SidePanelSurface>) -> Self {
        Self {
            surface,
            command: "toggleParticipants",
            tab_index: PARTICIPANTS_TAB_INDEX,
        }
    }

    /// Creates a handler for the chat tab (`toggleChat`).
    #[must_use]
    pub fn chat(surface: Arc<dyn SidePanelSurface>) -> Self {
        Self {
            surface,
            command: "toggleChat",
            tab_index: CHAT_TAB_INDEX,
        }
    }

    /// Creates a handler for a custom tab position.
    #[must_use]
    pub fn tab(surface: Arc<dyn SidePanelSurface>, command: &'static str, tab_index: usize) -> Self {
        Self {
            surface,
            command,
            tab_index,
        }
    }

    fn missing(&self) -> Error {
        Error::controls_not_found(format!("side panel tab {}", self.tab_index))
    }

    /// Applies the toggle against the panel's current shape.
    fn toggle_panel(&self) -> Result<()> {
        let open_tabs = self.surface.open_tabs();

        if !open_tabs.is_empty() {
            // Fewer tabs than expected means the panel layout changed.
            let tab = open_tabs.get(self.tab_index).ok_or_else(|| self.missing())?;
            if tab.selected {
                // Already showing: toggle the panel away.
                let close = self
                    .surface
                    .close_button()
                    .ok_or_else(|| self.missing())?;
                close.activate();
            } else {
                tab.handle.activate();
            }
            return Ok(());
        }

        let closed_buttons = self.surface.closed_tab_buttons();
        let button = closed_buttons
            .get(self.tab_index)
            .ok_or_else(|| self.missing())?;
        button.activate();
        Ok(())
    }
}

#[async_trait]
impl EventHandler for SidePanelHandler {
    async fn handle_event(&self, message: &InboundMessage) -> Result<()> {
        if message.event == self.command {
            self.toggle_panel()
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
