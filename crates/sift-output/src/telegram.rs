//! Telegram Bot API notifier.

use crate::notify::{NotifyError, Notifier};
use async_trait::async_trait;
use serde::Serialize;
use sift_data::config;
use sift_data::http::DEFAULT_TIMEOUT;

/// Environment variable holding the bot token.
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the destination chat id.
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Sends messages through a Telegram bot.
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

impl TelegramNotifier {
    /// Create a notifier for `chat_id` using `bot_token`.
    ///
    /// # Errors
    /// Returns [`NotifyError::Network`] if the HTTP client cannot be built.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Build from `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// # Errors
    /// Returns [`NotifyError::Config`] naming the first unset variable.
    pub fn from_env() -> Result<Self, NotifyError> {
        let token = config::require(TELEGRAM_TOKEN).map_err(|e| NotifyError::Config(e.to_string()))?;
        let chat_id =
            config::require(TELEGRAM_CHAT_ID).map_err(|e| NotifyError::Config(e.to_string()))?;
        Self::new(token, chat_id)
    }

    /// Point the notifier at another API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: format!("*{}*\n{}", subject, content),
            parse_mode: "Markdown",
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "telegram rejected message");
            return Err(NotifyError::Platform {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(chat_id = %self.chat_id, subject, "telegram message sent");
        Ok(())
    }
}
