use std::sync::Arc;

use crate::{domain::ChatId, messaging::port::MessagingPort, Error, Result};

/// Sends plain text to the single configured chat.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, chat_id: ChatId) -> Self {
        Self { messenger, chat_id }
    }

    /// Deliver `text`. Failures are logged and surfaced as `Error::Notify`.
    pub async fn send(&self, text: &str) -> Result<()> {
        tracing::info!(chat_id = %self.chat_id, "sending message to chat");
        match self.messenger.send_text(&self.chat_id, text).await {
            Ok(()) => {
                tracing::debug!(%text, "message sent");
                Ok(())
            }
            Err(e) => {
                let err = match e {
                    Error::Notify(_) => e,
                    other => Error::Notify(other.to_string()),
                };
                tracing::error!(error = %err, "message delivery failed");
                Err(err)
            }
        }
    }

    /// Deliver `text`, logging and dropping any failure.
    ///
    /// Used for failure alerts: the transport may be the thing that is failing.
    pub async fn send_best_effort(&self, text: &str) -> bool {
        self.send(text).await.is_ok()
    }
}
