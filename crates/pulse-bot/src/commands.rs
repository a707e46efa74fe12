//! Command parsing for inbound chat messages

/// Parsed user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// Any other slash command; ignored by the router
    Unknown { name: String },
    /// Plain text handed to the active mode
    Text { text: String },
    /// Nothing but whitespace
    Empty,
}

impl Command {
    /// Parse a command from user input.
    ///
    /// Telegram appends the bot name in groups (`/start@pulse_bot`); the
    /// suffix is dropped.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if input.is_empty() {
            return Command::Empty;
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Command::Text {
                text: input.to_string(),
            };
        };

        let word = rest.split_whitespace().next().unwrap_or_default();
        let name = word.split('@').next().unwrap_or_default().to_lowercase();

        match name.as_str() {
            "start" => Command::Start,
            "help" | "h" | "?" => Command::Help,
            _ => Command::Unknown { name },
        }
    }

    /// Usage text for the given mode
    pub fn help_text(mode: crate::BotMode) -> &'static str {
        match mode {
            crate::BotMode::Advisor => {
                "Ask for a stock idea in plain words, for example:\n\
                 'Suggest a stock for short-term gain'\n\n\
                 If the answer names a ticker, its live price is added.\n\
                 /start - Welcome message\n\
                 /help - Show help"
            }
            crate::BotMode::Screener => {
                "Send a message with UPPERCASE symbols, for example:\n\
                 'How are TCS and RELIANCE doing?'\n\n\
                 Each symbol gets price data and a short-term suggestion.\n\
                 /start - Welcome message\n\
                 /help - Show help"
            }
        }
    }
}
