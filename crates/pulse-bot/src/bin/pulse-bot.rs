//! stock-pulse bot
//!
//! # Usage
//!
//! ```bash
//! export TELEGRAM_BOT_TOKEN="123456:ABC..."
//! export OPENAI_API_KEY="sk-..."          # advisor mode only
//!
//! pulse-bot --mode screener telegram
//! pulse-bot --mode advisor repl
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use pulse_bot::platforms::{ReplPlatform, TelegramPlatform};
use pulse_bot::{AdvisorHandler, BotConfig, BotMode, ChatHandler, MessageRouter, ScreenerHandler};
use pulse_llm::providers::OpenAIProvider;
use pulse_market::YahooFinanceClient;
use pulse_utils::{LogFormat, init_tracing_with};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pulse-bot")]
#[command(about = "Telegram stock bot: ticker screener or LLM advisor", long_about = None)]
struct Args {
    /// Bot behavior
    #[arg(long, value_enum, env = "PULSE_MODE", default_value_t = BotMode::Screener)]
    mode: BotMode,

    /// Chat model for advisor mode (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Log output: text or json
    #[arg(long, env = "PULSE_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    platform: Platform,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Platform {
    /// Long-poll the Telegram Bot API
    Telegram,
    /// Read messages from stdin
    Repl,
}

fn build_handler(config: &BotConfig) -> anyhow::Result<Arc<dyn ChatHandler>> {
    let market = Arc::new(YahooFinanceClient::new(&config.market)?);

    let handler: Arc<dyn ChatHandler> = match config.mode {
        BotMode::Screener => Arc::new(ScreenerHandler::new(market, &config.market)),
        BotMode::Advisor => {
            let llm_config = config
                .llm
                .clone()
                .context("advisor mode needs OPENAI_API_KEY")?;
            let llm = Arc::new(OpenAIProvider::with_config(llm_config)?);
            Arc::new(AdvisorHandler::new(
                llm,
                market,
                config.model.clone(),
                &config.market,
            ))
        }
    };

    Ok(handler)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing_with(args.log_format, pulse_utils::logging::DEFAULT_FILTER);

    let mut config = BotConfig::from_env(args.mode)?;
    if let Some(model) = args.model {
        config.model = model;
        config.validate()?;
    }

    info!(mode = %config.mode, model = %config.model, "Starting pulse-bot");

    let router = Arc::new(MessageRouter::new(build_handler(&config)?));

    match args.platform {
        Platform::Telegram => {
            let token = config.require_telegram_token()?;
            TelegramPlatform::new(token, router).run().await;
        }
        Platform::Repl => ReplPlatform::new(router).run().await?,
    }

    Ok(())
}
