// backuptool/src/backup/catalog.rs
use anyhow::{Context, Result};
use sqlx::{PgConnection, Row};
use std::fs;
use std::path::{Path, PathBuf};

/// One database eligible for backup, as reported by the server catalog.
///
/// Eligibility (connectable, not a template database) is enforced by the
/// catalog predicate, so every materialized entry is eligible for the whole
/// run. The list is fetched once; mid-run catalog changes are not observed.
#[derive(Debug, Clone)]
pub struct DatabaseEntry {
    pub name: String,
}

/// Resolves the directory backup files are written to.
///
/// The server-side `backup.directory` setting (a custom GUC, typically set
/// in postgresql.conf) is the source of truth; `backup_dir` in config.json
/// overrides it. No value from either place is fatal to the run: without a
/// directory there are no valid target paths.
pub async fn resolve_backup_directory(
    conn: &mut PgConnection,
    override_dir: Option<&Path>,
) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let setting: Option<String> =
                sqlx::query_scalar("SELECT current_setting('backup.directory', true)")
                    .fetch_one(conn)
                    .await
                    .context("Failed to query server for the configured backup directory")?;

            setting
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .context(
                    "Unable to retrieve backup directory: set backup.directory on the server \
                     or backup_dir in config.json",
                )?
        }
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create backup directory: {}", dir.display()))?;
    Ok(dir)
}

/// Fetches every database that can currently be backed up, ordered by name.
pub async fn list_eligible_databases(conn: &mut PgConnection) -> Result<Vec<DatabaseEntry>> {
    println!("Fetching list of databases...");
    let rows = sqlx::query(
        "SELECT datname FROM pg_database \
         WHERE datistemplate = false AND datallowconn = true \
         ORDER BY datname",
    )
    .fetch_all(conn)
    .await
    .context("Failed to fetch database list from pg_database")?;

    let entries: Vec<DatabaseEntry> = rows
        .iter()
        .map(|row| {
            row.try_get("datname")
                .map(|name: String| DatabaseEntry { name })
        })
        .collect::<Result<_, _>>()
        .context("Failed to get 'datname' from row when fetching database list")?;

    println!(
        "Found databases: {:?}",
        entries.iter().map(|db| db.name.as_str()).collect::<Vec<_>>()
    );
    Ok(entries)
}
