//! Pre-flight configuration check: assemble and validate without any
//! network call or store mutation.

use crate::env;
use clap::Args;
use gramwatch_core::logging_facility::{init, Profile};
use gramwatch_core::Result;

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    /// Human-readable debug logging
    #[arg(long)]
    pub dev: bool,
}

pub fn execute(args: CheckConfigArgs) -> Result<()> {
    init(if args.dev {
        Profile::Development
    } else {
        Profile::Production
    });

    let config = env::load_config()?;
    config.validate()?;

    println!("configuration ok: monitoring {}", config.target_account);
    println!(
        "notifications: {}",
        if config.notifications_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("data directory: {}", config.data_dir.display());
    Ok(())
}
