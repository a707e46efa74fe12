//! Local console platform: one stdin line per message

use crate::error::Result;
use crate::reply::ReplySink;
use crate::router::MessageRouter;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::error;

const PROMPT: &str = ">>> ";

/// Prints replies to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl ReplySink for ConsoleSink {
    async fn send(&self, text: &str) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// True for the inputs that end the session
fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "/exit" | "/quit" | "/q")
}

/// Interactive REPL over stdin
pub struct ReplPlatform {
    router: Arc<MessageRouter>,
}

impl ReplPlatform {
    pub fn new(router: Arc<MessageRouter>) -> Self {
        Self { router }
    }

    /// Read lines until EOF or `/exit`
    pub async fn run(self) -> Result<()> {
        let sink = ConsoleSink;
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("stock-pulse ({} mode). /help for usage, /exit to quit.\n", self.router.mode());

        loop {
            stdout.write_all(PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                println!("\nGoodbye!");
                break;
            };

            if is_exit(&line) {
                println!("Goodbye!");
                break;
            }

            if let Err(e) = self.router.dispatch(&line, &sink).await {
                error!("Failed to answer: {}", e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit("/exit"));
        assert!(is_exit(" /quit "));
        assert!(is_exit("/q"));
        assert!(!is_exit("/start"));
        assert!(!is_exit("exit"));
    }

    #[tokio::test]
    async fn test_console_sink_writes() {
        ConsoleSink.send("📈 TCS.NS").await.unwrap();
    }
}
