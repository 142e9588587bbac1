// backuptool/src/backup/dump.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use which::which;

use crate::errors::DumpError;

/// Finds the pg_dump executable, preferring an explicit configured path.
pub fn find_pg_dump_executable(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path.to_path_buf()),
        None => which("pg_dump").context(
            "pg_dump executable not found in PATH. Please ensure PostgreSQL client tools \
             are installed and in your PATH.",
        ),
    }
}

/// Runs a full dump of one database into `target_path`.
///
/// Produces a single self-contained custom-format archive, replacing any
/// file already at that path. The call is awaited to completion before the
/// caller moves on, keeping backup execution strictly sequential; the
/// administrative timeout bounds each individual dump, and an expired child
/// process is killed rather than left running.
pub async fn dump_database(
    pg_dump: &Path,
    base_url: &str,
    db_name: &str,
    target_path: &Path,
    timeout_secs: u64,
) -> Result<(), DumpError> {
    let db_url = format!("{}/{}", base_url, db_name);

    let output_fut = Command::new(pg_dump)
        .arg("--format=custom")
        .arg("--file")
        .arg(target_path)
        .arg(&db_url)
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(Duration::from_secs(timeout_secs), output_fut).await {
        Ok(result) => result?,
        Err(_) => return Err(DumpError::Timeout(timeout_secs)),
    };

    if !output.status.success() {
        return Err(DumpError::Command {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dump_database_reports_spawn_failure() {
        let result = dump_database(
            Path::new("/nonexistent/pg_dump"),
            "postgres://localhost:5432",
            "somedb",
            Path::new("/tmp/somedb.bak"),
            60,
        )
        .await;

        assert!(matches!(result, Err(DumpError::Spawn(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dump_database_reports_command_failure() {
        // `false` ignores its arguments and exits non-zero.
        let result = dump_database(
            Path::new("/bin/false"),
            "postgres://localhost:5432",
            "somedb",
            Path::new("/tmp/somedb.bak"),
            60,
        )
        .await;

        match result {
            Err(DumpError::Command { status, .. }) => assert!(!status.success()),
            other => panic!("expected command failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dump_database_reports_timeout() -> anyhow::Result<()> {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let script_path = dir.path().join("slow_pg_dump");
        {
            let mut script = std::fs::File::create(&script_path)?;
            script.write_all(b"#!/bin/sh\nsleep 30\n")?;
        }
        std::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))?;

        let result = dump_database(
            &script_path,
            "postgres://localhost:5432",
            "somedb",
            &dir.path().join("somedb.bak"),
            1,
        )
        .await;

        assert!(matches!(result, Err(DumpError::Timeout(1))));
        Ok(())
    }

    #[test]
    fn test_find_pg_dump_prefers_configured_path() -> anyhow::Result<()> {
        let configured = PathBuf::from("/opt/pg/bin/pg_dump");
        let found = find_pg_dump_executable(Some(&configured))?;
        assert_eq!(found, configured);
        Ok(())
    }
}
