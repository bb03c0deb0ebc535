//! Logging setup for the CLI
//!
//! In server mode stdout carries the MCP protocol, so logs go to a file under
//! `~/.jira-mcp/` instead. Every other command logs to stderr.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use jira_mcp::common::load_env_string;
use tracing::Level;

/// Directory name under the home directory
pub const LOG_DIR_NAME: &str = ".jira-mcp";

/// Environment variable overriding the log file name
pub const LOG_FILE_ENV: &str = "JIRA_MCP_LOG_FILE";

/// Log file name used when [`LOG_FILE_ENV`] is unset
pub const DEFAULT_LOG_FILE: &str = "mcp.log";

/// Directory server-mode logs are written to
pub fn log_directory() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(LOG_DIR_NAME),
        None => PathBuf::from(LOG_DIR_NAME),
    }
}

/// Full path of the server-mode log file
pub fn log_file_path() -> PathBuf {
    log_directory().join(load_env_string(LOG_FILE_ENV, DEFAULT_LOG_FILE))
}

/// Pick the maximum level from the global flags
///
/// Server mode always logs at debug since the file is the only record of
/// what the host sent.
pub fn log_level(mcp_mode: bool, quiet: bool, debug: bool, verbose: bool) -> Level {
    if mcp_mode {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else if verbose {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global tracing subscriber
pub fn init_logging(level: Level, mcp_mode: bool) {
    if mcp_mode {
        match open_log_file() {
            Ok(file) => {
                let shared = Arc::new(Mutex::new(file));
                tracing_subscriber::fmt()
                    .with_writer(move || FileWriterGuard::new(shared.clone()))
                    .with_max_level(level)
                    .with_ansi(false)
                    .init();
                return;
            }
            Err(e) => {
                eprintln!("Failed to open log file, using stderr: {e}");
            }
        }
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn open_log_file() -> std::io::Result<File> {
    fs::create_dir_all(log_directory())?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path())
}

/// Writer that flushes every write so the log stays readable while the server runs
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Writer sharing `file` with every other guard
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let written = file.write(buf)?;
        file.flush()?;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush()
    }
}
