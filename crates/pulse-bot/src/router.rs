//! Message routing
//!
//! Every inbound message goes through [`MessageRouter::dispatch`], which
//! answers the built-in commands itself and hands plain text to the
//! handler of the active mode.

use crate::commands::Command;
use crate::config::BotMode;
use crate::error::Result;
use crate::reply::ReplySink;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Behavior of one bot mode
#[async_trait]
pub trait ChatHandler: Send + Sync {
    fn mode(&self) -> BotMode;

    /// Reply to `/start`
    fn welcome(&self) -> &'static str;

    /// Answer a plain text message
    async fn handle(&self, text: &str, sink: &dyn ReplySink) -> Result<()>;
}

/// Routes parsed messages to a [`ChatHandler`]
#[derive(Clone)]
pub struct MessageRouter {
    handler: Arc<dyn ChatHandler>,
}

impl MessageRouter {
    pub fn new(handler: Arc<dyn ChatHandler>) -> Self {
        Self { handler }
    }

    pub fn mode(&self) -> BotMode {
        self.handler.mode()
    }

    #[instrument(skip(self, sink), fields(mode = %self.handler.mode()))]
    pub async fn dispatch(&self, input: &str, sink: &dyn ReplySink) -> Result<()> {
        match Command::parse(input) {
            Command::Start => sink.send(self.handler.welcome()).await,
            Command::Help => sink.send(Command::help_text(self.handler.mode())).await,
            Command::Unknown { name } => {
                debug!("Ignoring unknown command /{}", name);
                Ok(())
            }
            Command::Text { text } => self.handler.handle(&text, sink).await,
            Command::Empty => Ok(()),
        }
    }
}
