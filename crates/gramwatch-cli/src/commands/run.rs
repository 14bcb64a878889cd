//! One monitoring run: fetch → diff → notify → commit.

use crate::env;
use clap::Args;
use gramwatch_core::logging_facility::{init_with_rotation, Profile};
use gramwatch_core::{
    MonError, MonErrorKind, NoopSink, Orchestrator, Result, RunReport,
};
use gramwatch_core_types::Identity;
use gramwatch_instagram::InstagramClient;
use gramwatch_store::SqliteSnapshotStore;
use gramwatch_telegram::TelegramSink;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Override the monitored account from the environment
    #[arg(long)]
    pub target: Option<String>,

    /// Override the snapshot database directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for daily-rotated log files (7 kept)
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Disable notifications regardless of environment configuration
    #[arg(long)]
    pub no_notify: bool,

    /// Human-readable debug logging instead of production JSON
    #[arg(long)]
    pub dev: bool,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let profile = if args.dev {
        Profile::Development
    } else {
        Profile::Production
    };
    init_with_rotation(profile, &args.log_dir)?;

    let mut config = env::load_config()?;
    if let Some(target) = args.target {
        config.target_account = Identity::from(target);
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if args.no_notify {
        config.notifications_enabled = false;
    }
    config.validate()?;

    tracing::info!(account = %config.target_account, "starting monitoring run");

    let session = InstagramClient::new()?;
    let store = SqliteSnapshotStore::open(&config.data_dir, &config.target_account)?;

    let report = if config.notifications_enabled {
        let telegram = config.telegram.as_ref().ok_or_else(|| {
            MonError::new(MonErrorKind::ConfigMissing)
                .with_op("run")
                .with_message("notifications enabled without a Telegram destination")
        })?;
        let sink = TelegramSink::new(telegram)?;
        Orchestrator::new(session, store, sink).run(&config)?
    } else {
        Orchestrator::new(session, store, NoopSink).run(&config)?
    };

    print_report(&config.target_account, &report);
    Ok(())
}

fn print_report(account: &Identity, report: &RunReport) {
    println!(
        "{}: {} followers, {} followees",
        account, report.followers_fetched, report.followees_fetched
    );
    if report.unchanged() {
        println!("no membership changes since the last run");
    } else {
        println!(
            "followers: +{} -{}; followees: +{} -{}",
            report.followers.added.len(),
            report.followers.removed.len(),
            report.followees.added.len(),
            report.followees.removed.len()
        );
    }
    if !report.not_following_back.is_empty() {
        println!("{} followees do not follow back", report.not_following_back.len());
    }
    if report.messages_sent > 0 || report.messages_failed > 0 {
        println!(
            "notifications: {} sent, {} failed",
            report.messages_sent, report.messages_failed
        );
    }
}
