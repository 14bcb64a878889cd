//! GramWatch Telegram - notifier sink
//!
//! Best-effort delivery of composed messages to a Telegram chat via the
//! Bot API. Every failure surfaces as a non-fatal `NotifySend` error; the
//! orchestrator logs and swallows it.

use gramwatch_core::notify::NotifySink;
use gramwatch_core::{MonError, MonErrorKind, Result, TelegramConfig};
use gramwatch_core_types::Sensitive;
use reqwest::blocking::Client;

/// Build the sendMessage endpoint for a bot token.
fn send_message_url(bot_token: &str) -> String {
    format!("https://api.telegram.org/bot{}/sendMessage", bot_token)
}

/// Telegram Bot API sink, one instance per run.
pub struct TelegramSink {
    http: Client,
    bot_token: Sensitive<String>,
    chat_id: String,
}

impl TelegramSink {
    /// Build the sink from its destination and credential.
    ///
    /// # Errors
    ///
    /// - `ExternalService` — HTTP client construction failed
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let http = Client::builder().build().map_err(|e| {
            MonError::new(MonErrorKind::ExternalService)
                .with_op("build_http_client")
                .with_message(e.to_string())
        })?;
        Ok(Self {
            http,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }
}

impl NotifySink for TelegramSink {
    fn send(&self, message: &str) -> Result<()> {
        self.http
            .post(send_message_url(self.bot_token.expose()))
            .form(&[("chat_id", self.chat_id.as_str()), ("text", message)])
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                MonError::new(MonErrorKind::NotifySend)
                    .with_op("send_telegram_message")
                    .with_message(e.without_url().to_string())
            })?;

        tracing::debug!(chat_id = %self.chat_id, "telegram message delivered");
        Ok(())
    }
}
