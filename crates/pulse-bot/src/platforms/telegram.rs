//! Telegram platform (long polling)

use crate::error::Result;
use crate::reply::ReplySink;
use crate::router::MessageRouter;
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info};

/// Longest text Telegram accepts in one message
pub const MESSAGE_LIMIT: usize = 4096;

/// Split text into pieces of at most `limit` characters, preferring to
/// break after a newline
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > limit {
        let hard_end = rest
            .char_indices()
            .nth(limit)
            .map_or(rest.len(), |(i, _)| i);
        let end = rest[..hard_end]
            .rfind('\n')
            .map_or(hard_end, |i| i + 1);

        chunks.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Replies into one Telegram chat
pub struct TelegramSink {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSink {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send(&self, text: &str) -> Result<()> {
        for chunk in split_message(text, MESSAGE_LIMIT) {
            self.bot.send_message(self.chat_id, chunk).await?;
        }
        Ok(())
    }
}

/// Telegram bot driven by a [`MessageRouter`]
pub struct TelegramPlatform {
    bot: Bot,
    router: Arc<MessageRouter>,
}

impl TelegramPlatform {
    pub fn new(token: &str, router: Arc<MessageRouter>) -> Self {
        Self {
            bot: Bot::new(token),
            router,
        }
    }

    /// Poll for updates until the process is stopped
    pub async fn run(self) {
        info!("📱 Telegram bot running in {} mode", self.router.mode());

        let router = self.router;
        teloxide::repl(self.bot, move |bot: Bot, msg: Message| {
            let router = Arc::clone(&router);
            async move {
                let Some(text) = msg.text() else {
                    return respond(());
                };

                let sink = TelegramSink::new(bot, msg.chat.id);
                if let Err(e) = router.dispatch(text, &sink).await {
                    error!("Failed to answer chat {}: {}", msg.chat.id.0, e);
                }
                respond(())
            }
        })
        .await;
    }
}
