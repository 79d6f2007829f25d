//! File logging. The terminal itself is in raw mode, so logs go to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TERMLINK_LOG=debug`.
pub const LOG_ENV: &str = "TERMLINK_LOG";

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("termlink")
        .join("termlink.log")
}

/// Installs the global subscriber and returns the file it writes to.
pub fn init(path: Option<PathBuf>) -> io::Result<PathBuf> {
    let path = path.unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    Ok(path)
}
