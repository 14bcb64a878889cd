//! Structured logging facility for GramWatch
//!
//! Provides a single initialization point over `tracing-subscriber`:
//! call `init(profile)` or `init_with_rotation(profile, log_dir)` once at
//! process start. Every state transition and every detected category is
//! logged through `tracing` by the orchestrator; this module only
//! configures where those events go.

use crate::errors::{MonError, MonErrorKind, Result};
use std::path::Path;
use std::sync::Once;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// No subscriber output; tests assert on behavior, not log text
    Test,
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    let default_directive = match profile {
        Profile::Development => "gramwatch=debug",
        Profile::Production | Profile::Test => "gramwatch=info",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize the logging facility with stderr output only.
///
/// Call once at application startup. Repeat calls are no-ops, so library
/// consumers and tests may call it defensively. The `RUST_LOG` environment
/// filter overrides the profile default.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(profile))
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(profile))
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

/// Initialize with stderr plus a daily-rotated log file, keeping 7 files.
///
/// The rotation parameters match the operational contract: one file per
/// day under `log_dir`, oldest pruned past seven.
///
/// # Errors
///
/// - `Io` — the log directory could not be created or opened
pub fn init_with_rotation(profile: Profile, log_dir: &Path) -> Result<()> {
    let appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("monitor")
        .filename_suffix("log")
        .max_log_files(7)
        .build(log_dir)
        .map_err(|e| {
            MonError::new(MonErrorKind::Io)
                .with_op("init_logging")
                .with_message(format!("cannot open log directory: {}", e))
        })?;

    INIT_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(profile))
            .with_ansi(false)
            .with_writer(std::io::stderr.and(appender))
            .init();
    });
    Ok(())
}
