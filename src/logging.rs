use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_FILTER_ENV: &str = "FV_LOG";
/// Environment variable naming the log file when `--log-file` is absent.
pub const LOG_FILE_ENV: &str = "FV_LOG_FILE";

/// Where logs go: the CLI path wins over the environment. `None` disables logging.
pub fn resolve_log_file(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
}

/// Install a file-backed `fmt` subscriber.
///
/// The TUI owns the terminal, so nothing is ever written to stdout or
/// stderr; without a log file no subscriber is installed at all.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
