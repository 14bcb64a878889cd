//! Environment-to-configuration assembly.
//!
//! The only place ambient environment is read. `.env` is loaded first
//! (missing is fine), then the recognized variables are folded into an
//! explicit `MonitorConfig` handed to the orchestrator.
//!
//! Recognized variables:
//! - `INSTAGRAM_USERNAME`, `INSTAGRAM_PASSWORD` — platform credential (required)
//! - `INSTAGRAM_TARGET_ACCOUNT` — monitored account (required)
//! - `ENABLE_TELEGRAM_NOTIFICATIONS` — "true" to enable (default off)
//! - `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID` — required when enabled
//! - `GRAMWATCH_DATA_DIR` — snapshot database directory (default "data")

use gramwatch_core::{MonError, MonErrorKind, MonitorConfig, Result, TelegramConfig};
use gramwatch_core_types::{Identity, Sensitive};
use std::path::PathBuf;

/// Load `.env` and build the configuration from process environment.
pub fn load_config() -> Result<MonitorConfig> {
    let _ = dotenvy::dotenv();
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Build a configuration from any variable lookup.
///
/// Separated from the process environment so tests can drive it with a
/// plain map.
pub fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<MonitorConfig> {
    let platform_username = require(&lookup, "INSTAGRAM_USERNAME")?;
    let platform_password = Sensitive::new(require(&lookup, "INSTAGRAM_PASSWORD")?);
    let target_account = Identity::from(require(&lookup, "INSTAGRAM_TARGET_ACCOUNT")?);

    let notifications_enabled = lookup("ENABLE_TELEGRAM_NOTIFICATIONS")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let telegram = match (
        nonempty(lookup("TELEGRAM_BOT_TOKEN")),
        nonempty(lookup("TELEGRAM_CHAT_ID")),
    ) {
        (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
            bot_token: Sensitive::new(bot_token),
            chat_id,
        }),
        _ => None,
    };

    let data_dir = lookup("GRAMWATCH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    Ok(MonitorConfig {
        platform_username,
        platform_password,
        target_account,
        notifications_enabled,
        telegram,
        data_dir,
    })
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn require(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    nonempty(lookup(name)).ok_or_else(|| {
        MonError::new(MonErrorKind::ConfigMissing)
            .with_op("load_config")
            .with_message(format!("environment variable {} is not set", name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("INSTAGRAM_USERNAME", "monitor_bot"),
            ("INSTAGRAM_PASSWORD", "pw"),
            ("INSTAGRAM_TARGET_ACCOUNT", "target"),
        ]
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = config_from_lookup(lookup_from(&required())).unwrap();
        assert_eq!(config.target_account, Identity::from("target"));
        assert!(!config.notifications_enabled);
        assert!(config.telegram.is_none());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_required_variable() {
        let err = config_from_lookup(lookup_from(&[("INSTAGRAM_USERNAME", "monitor_bot")]))
            .unwrap_err();
        assert_eq!(err.kind(), MonErrorKind::ConfigMissing);
        assert!(err.message().contains("INSTAGRAM_PASSWORD"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut pairs = required();
        pairs[1] = ("INSTAGRAM_PASSWORD", "");
        let err = config_from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err.kind(), MonErrorKind::ConfigMissing);
    }

    #[test]
    fn test_notifications_flag_parsing() {
        let mut pairs = required();
        pairs.push(("ENABLE_TELEGRAM_NOTIFICATIONS", "True"));
        pairs.push(("TELEGRAM_BOT_TOKEN", "123:abc"));
        pairs.push(("TELEGRAM_CHAT_ID", "42"));
        let config = config_from_lookup(lookup_from(&pairs)).unwrap();
        assert!(config.notifications_enabled);
        assert!(config.validate().is_ok());

        let mut pairs = required();
        pairs.push(("ENABLE_TELEGRAM_NOTIFICATIONS", "no"));
        let config = config_from_lookup(lookup_from(&pairs)).unwrap();
        assert!(!config.notifications_enabled);
    }

    #[test]
    fn test_enabled_without_destination_fails_validation() {
        let mut pairs = required();
        pairs.push(("ENABLE_TELEGRAM_NOTIFICATIONS", "true"));
        let config = config_from_lookup(lookup_from(&pairs)).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), MonErrorKind::ConfigMissing);
    }

    #[test]
    fn test_data_dir_override() {
        let mut pairs = required();
        pairs.push(("GRAMWATCH_DATA_DIR", "/var/lib/gramwatch"));
        let config = config_from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/gramwatch"));
    }
}
