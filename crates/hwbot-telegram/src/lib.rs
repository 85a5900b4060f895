//! Telegram adapter (teloxide).
//!
//! This crate implements the `hwbot-core` MessagingPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::Recipient};

use hwbot_core::{
    domain::ChatId,
    errors::Error,
    messaging::port::MessagingPort,
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn from_token(token: impl Into<String>) -> Self {
        Self::new(Bot::new(token))
    }

    fn recipient(chat_id: &ChatId) -> Recipient {
        match chat_id {
            ChatId::Id(id) => Recipient::Id(teloxide::types::ChatId(*id)),
            ChatId::Channel(username) => Recipient::ChannelUsername(username.clone()),
        }
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Notify(format!("telegram error: {e}"))
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    /// Single attempt, plain text. A failed send is left to the caller's policy.
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()> {
        self.bot
            .send_message(Self::recipient(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
