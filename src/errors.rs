use std::process::ExitStatus;
use thiserror::Error;

/// Failure of one database backup.
///
/// Contained at the per-database level: the orchestrator logs it, counts it
/// in the run summary and moves on to the next database. Only the connection
/// and backup-directory stages abort a run.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("failed to launch pg_dump: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("pg_dump exited with {status}: {stderr}")]
    Command { status: ExitStatus, stderr: String },

    #[error("backup did not complete within {0} seconds")]
    Timeout(u64),
}
