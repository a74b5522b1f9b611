//! Log writer module
//!
//! Provides thread-safe log writing to stdout/stderr or an error log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use crate::config::LogLevel;

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target for warnings and errors
enum LogTarget {
    /// Write to stderr
    Stderr,
    /// Write to file
    File(Mutex<File>),
}

/// Thread-safe log writer
pub struct LogWriter {
    level: LogLevel,
    error: LogTarget,
}

impl LogWriter {
    /// Create a new log writer with an optional error log file
    fn new(level: LogLevel, error_log_file: Option<&str>) -> io::Result<Self> {
        let error = match error_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };

        Ok(Self { level, error })
    }

    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Write info message (always stdout)
    pub fn write_info(&self, message: &str) {
        println!("{message}");
    }

    /// Write to error log
    pub fn write_error(&self, message: &str) {
        match &self.error {
            LogTarget::Stderr => eprintln!("{message}"),
            LogTarget::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if the log file cannot be opened.
pub fn init(level: LogLevel, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(level, error_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
