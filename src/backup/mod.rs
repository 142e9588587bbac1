mod logic;
pub(crate) mod catalog;   // catalog + backup-directory queries
pub(crate) mod compress;  // gzip worker for finished dumps
pub(crate) mod dump;      // pg_dump execution

use anyhow::Result;
use crate::config::AppConfig;

pub use logic::RunSummary;

/// Public entry point for the backup process.
///
/// Runs the whole pipeline: resolve the backup directory, back up every
/// eligible database one at a time, compress the results concurrently and
/// report a summary once everything has settled.
pub async fn run_backup_flow(app_config: &AppConfig) -> Result<RunSummary> {
    logic::perform_backup_orchestration(app_config).await
}
