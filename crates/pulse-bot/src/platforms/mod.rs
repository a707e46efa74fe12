//! Chat platforms the router can be attached to

pub mod cli;
pub mod telegram;

pub use cli::{ConsoleSink, ReplPlatform};
pub use telegram::{TelegramPlatform, TelegramSink};
