use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::services::config::get_config_dir;

pub const LOG_FILE_NAME: &str = "versicle.log";

/// `<config dir>/versicle/logs`
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("logs"))
}

/// Routes the `log` macros to `<log_dir>/versicle.log`, appending.
/// The level comes from `RUST_LOG` and defaults to `info`.
/// Should be called once before logging any messages.
pub fn initialize_logger(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialized")?;

    Ok(log_path)
}
