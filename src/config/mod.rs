// backuptool/src/config/mod.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Administrative timeout for a single backup command, in seconds.
pub const DEFAULT_BACKUP_TIMEOUT_SECS: u64 = 3600;

/// Structure for deserializing config.json. Every field is optional; the
/// effective configuration is resolved in `build_config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJsonConfig {
    pub database_url: Option<String>,
    pub backup_dir: Option<PathBuf>,
    pub backup_timeout_secs: Option<u64>,
    pub pg_dump_path: Option<PathBuf>,
}

/// Application's resolved configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Admin connection URL for the server whose databases get backed up.
    pub database_url: String,
    /// Overrides the server-configured backup directory when set.
    pub backup_dir_override: Option<PathBuf>,
    pub backup_timeout_secs: u64,
    /// Explicit pg_dump location; otherwise resolved from PATH.
    pub pg_dump_path: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from `config_path` (if the file exists) and the
    /// environment. `DATABASE_URL` from the environment takes precedence
    /// over `database_url` in the file.
    pub fn load(config_path: &Path) -> Result<Self> {
        let raw = if config_path.exists() {
            let config_content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;
            serde_json::from_str(&config_content).with_context(|| {
                format!(
                    "Failed to parse JSON from config file at {}",
                    config_path.display()
                )
            })?
        } else {
            RawJsonConfig::default()
        };

        build_config(raw, env::var("DATABASE_URL").ok())
    }
}

fn build_config(raw: RawJsonConfig, env_database_url: Option<String>) -> Result<AppConfig> {
    let database_url = env_database_url
        .filter(|url| !url.trim().is_empty())
        .or(raw.database_url.filter(|url| !url.trim().is_empty()))
        .context("DATABASE_URL must be set in the environment or database_url in config.json")?;

    let backup_dir_override = raw.backup_dir.filter(|dir| !dir.as_os_str().is_empty());

    Ok(AppConfig {
        database_url,
        backup_dir_override,
        backup_timeout_secs: raw
            .backup_timeout_secs
            .unwrap_or(DEFAULT_BACKUP_TIMEOUT_SECS),
        pg_dump_path: raw.pg_dump_path,
    })
}
