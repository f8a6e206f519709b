//! Emoji reactions with a bounded lookup retry.
//!
//! Reaction buttons only exist while the reaction bar is open, and the bar
//! renders asynchronously after its picker button is clicked. The handler
//! first tries the reaction directly (the bar may already be open), then
//! opens the picker and polls on a fixed attempt budget. The budget keeps a
//! page that never renders the bar from leaking timers forever.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::InboundMessage;
use crate::registry::EventHandler;
use crate::ui::ReactionSurface;

// ============================================================================
// Constants
// ============================================================================

/// Command prefix; the emoji itself is the suffix (`emojiReact=👍`).
const EMOJI_REACT_PREFIX: &str = "emojiReact=";

/// Default lookup attempts after opening the picker.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;

/// Default spacing between lookup attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(300);

// ============================================================================
// EmojiReactHandler
// ============================================================================

/// Sends an emoji reaction on `emojiReact=<emoji>` commands.
pub struct EmojiReactHandler {
    /// Reaction bar lookup.
    surface: Arc<dyn ReactionSurface>,
    /// Lookup attempts after opening the picker.
    retry_attempts: u32,
    /// Spacing between lookup attempts.
    retry_delay: Duration,
}

impl EmojiReactHandler {
    /// Creates a handler with the default retry budget.
    #[must_use]
    pub fn new(surface: Arc<dyn ReactionSurface>) -> Self {
        Self::with_retry(surface, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }

    /// Creates a handler with a custom retry budget.
    #[must_use]
    pub fn with_retry(
        surface: Arc<dyn ReactionSurface>,
        retry_attempts: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            surface,
            retry_attempts,
            retry_delay,
        }
    }

    /// Clicks the reaction for `emoji`, opening the picker if needed.
    async fn react(&self, emoji: &str) -> Result<()> {
        // The bar may already be open from a previous reaction.
        if self.try_react(emoji, 1).await.is_ok() {
            return Ok(());
        }

        debug!(emoji, "Reaction bar not open; opening the picker");
        self.open_picker()?;
        self.try_react(emoji, self.retry_attempts).await
    }

    /// Polls for the reaction button on a fixed attempt budget.
    async fn try_react(&self, emoji: &str, attempts: u32) -> Result<()> {
        for attempt in 0..attempts {
            if attempt > 0 {
                sleep(self.retry_delay).await;
            }
            if let Some(button) = self.surface.reaction_button(emoji) {
                button.activate();
                return Ok(());
            }
        }
        Err(Error::controls_not_found(format!(
            "emoji reaction {emoji}"
        )))
    }

    /// Opens the reaction picker.
    fn open_picker(&self) -> Result<()> {
        let button = self
            .surface
            .picker_button()
            .ok_or_else(|| Error::controls_not_found("emoji reaction picker"))?;
        button.activate();
        Ok(())
    }
}

#[async_trait]
impl EventHandler for EmojiReactHandler {
    async fn handle_event(&self, message: &InboundMessage) -> Result<()> {
        match message.event.strip_prefix(EMOJI_REACT_PREFIX) {
            Some(emoji) if !emoji.is_empty() => self.react(emoji).await,
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
