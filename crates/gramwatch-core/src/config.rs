//! Run configuration
//!
//! Configuration is an explicit structure constructed once at process start
//! and passed by reference into the orchestrator. Core logic performs no
//! ambient environment lookups; the CLI is responsible for assembling this
//! struct from whatever source it likes (environment, flags).

use crate::errors::{MonError, MonErrorKind, Result};
use gramwatch_core_types::{Identity, Sensitive};
use std::path::PathBuf;

/// Telegram sink configuration, required only when notifications are on.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: Sensitive<String>,
    /// Destination chat
    pub chat_id: String,
}

/// Complete configuration for one monitoring run.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Platform login username
    pub platform_username: String,
    /// Platform login password
    pub platform_password: Sensitive<String>,
    /// The account whose followers/followees are tracked
    pub target_account: Identity,
    /// Gates every notifier sink call; detection and logging are unaffected
    pub notifications_enabled: bool,
    /// Sink destination and credential; must be present when enabled
    pub telegram: Option<TelegramConfig>,
    /// Directory holding the per-account snapshot databases
    pub data_dir: PathBuf,
}

impl MonitorConfig {
    /// Validate the configuration before any network call.
    ///
    /// # Errors
    ///
    /// - `ConfigMissing` — platform credentials or target absent, or
    ///   notifications enabled without a Telegram destination
    pub fn validate(&self) -> Result<()> {
        if self.platform_username.is_empty() {
            return Err(missing("platform username"));
        }
        if self.platform_password.expose().is_empty() {
            return Err(missing("platform password"));
        }
        if self.target_account.as_str().is_empty() {
            return Err(missing("target account"));
        }
        if self.notifications_enabled {
            match &self.telegram {
                None => return Err(missing("Telegram bot token and chat id")),
                Some(tg) => {
                    if tg.bot_token.expose().is_empty() || tg.chat_id.is_empty() {
                        return Err(missing("Telegram bot token and chat id"));
                    }
                }
            }
        }
        Ok(())
    }
}

fn missing(what: &str) -> MonError {
    MonError::new(MonErrorKind::ConfigMissing)
        .with_op("validate_config")
        .with_message(format!("{} is not set", what))
}
