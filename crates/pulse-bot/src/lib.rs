//! Telegram stock bot
//!
//! Two modes share one [`MessageRouter`]:
//!
//! - **screener**: finds UPPERCASE symbols in a message, resolves them
//!   against Yahoo Finance (`""`, `.NS`, `.BO`) and replies per ticker with
//!   a price snapshot and a short-term suggestion
//! - **advisor**: forwards the message to a chat-completion model and
//!   appends a live price for the ticker named in the answer
//!
//! Replies go through [`ReplySink`], so the same router runs on Telegram,
//! on the console REPL and in tests.

pub mod advisor;
pub mod commands;
pub mod config;
pub mod error;
pub mod platforms;
pub mod reply;
pub mod router;
pub mod screener;

#[cfg(test)]
pub(crate) mod testing;

pub use advisor::AdvisorHandler;
pub use commands::Command;
pub use config::{BotConfig, BotMode};
pub use error::{BotError, Result};
pub use reply::ReplySink;
pub use router::{ChatHandler, MessageRouter};
pub use screener::ScreenerHandler;
