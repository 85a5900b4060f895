use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// Messenger port.
///
/// Telegram is the only implementation; the notifier only needs plain text delivery.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()>;
}
