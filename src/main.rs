//! Unattended full-instance database backup tool.
//!
//! Backs up every online database on the configured server, then gzips each
//! dump concurrently and removes the uncompressed original once compression
//! succeeds. Intended to run from a timer with no interaction.

// backuptool/src/main.rs
mod backup;
mod config;
mod errors;

use anyhow::{Context, Result};
use backup::RunSummary;
use config::AppConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Main entry point for the backup tool
#[tokio::main]
async fn main() -> ExitCode {
    match run_app().await {
        Ok(summary) => {
            println!("✅ Run completed. {}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<RunSummary> {
    dotenv::dotenv().ok();

    // Expects config.json next to the executable, or the project root when
    // running with `cargo run`. The file is optional; DATABASE_URL from the
    // environment is enough on its own.
    let config_path = PathBuf::from("config.json");
    let app_config = AppConfig::load(&config_path).context(format!(
        "Failed to load application configuration from {}",
        config_path.display()
    ))?;

    println!("🚀 Starting Backup Process...");
    backup::run_backup_flow(&app_config)
        .await
        .context("Backup process failed")
}
