//! Logger module
//!
//! Provides logging utilities for the server:
//! - Startup banner and shutdown notices on stdout
//! - Timestamped warnings and errors on stderr or an error log file
//!
//! Individual requests are not logged.

pub mod writer;

use chrono::{DateTime, Local};
use std::net::SocketAddr;
use std::path::Path;

use crate::config::{Config, LogLevel};

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.level,
        config.logging.error_log_file.as_deref(),
    )
}

/// Level filter. Lines without a level (the startup banner) always pass.
fn passes_filter(level: Option<LogLevel>, threshold: Option<LogLevel>) -> bool {
    match (level, threshold) {
        (Some(level), Some(threshold)) => level <= threshold,
        _ => true,
    }
}

fn enabled(level: Option<LogLevel>) -> bool {
    passes_filter(level, writer::get().map(writer::LogWriter::level))
}

/// Write to info log
fn write_info(level: Option<LogLevel>, message: &str) {
    if !enabled(level) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write a timestamped line to the error log
fn write_error(level: LogLevel, message: &str) {
    if !enabled(Some(level)) {
        return;
    }
    let line = format_line(Local::now(), level, message);
    match writer::get() {
        Some(w) => w.write_error(&line),
        None => eprintln!("{line}"),
    }
}

/// `[19/Oct/2026 10:15:00] [WARN] message`
fn format_line(time: DateTime<Local>, level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {message}",
        time.format("%d/%b/%Y %H:%M:%S"),
        level.as_str().to_uppercase()
    )
}

/// Announce the listening address and the served directory.
///
/// Printed at every log level.
pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    for line in startup_banner(addr, root) {
        write_info(None, &line);
    }
}

fn startup_banner(addr: &SocketAddr, root: &Path) -> [String; 3] {
    let host = if addr.ip().is_unspecified() {
        "localhost".to_string()
    } else if addr.is_ipv6() {
        format!("[{}]", addr.ip())
    } else {
        addr.ip().to_string()
    };
    [
        format!(
            "Static server with CORS running on http://{host}:{}",
            addr.port()
        ),
        format!("Serving files from: {}", root.display()),
        "Press Ctrl+C to stop".to_string(),
    ]
}

pub fn log_shutdown(reason: &str) {
    write_info(
        Some(LogLevel::Info),
        &format!("\n[Shutdown] {reason} received, closing listener"),
    );
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(
        LogLevel::Warn,
        &format!("Failed to serve connection: {err}"),
    );
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, message);
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, message);
}

/// Report a startup failure. Printed even before the writer exists.
pub fn log_fatal(err: &impl std::fmt::Display) {
    write_error(LogLevel::Error, &format!("{err}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let time = Local.with_ymd_and_hms(2026, 10, 19, 9, 5, 7).unwrap();
        let line = format_line(time, LogLevel::Warn, "disk slow");
        assert_eq!(line, "[19/Oct/2026 09:05:07] [WARN] disk slow");
    }

    #[test]
    fn test_banner_ignores_level_filter() {
        for threshold in [LogLevel::Error, LogLevel::Warn, LogLevel::Info] {
            assert!(passes_filter(None, Some(threshold)));
        }
        assert!(!passes_filter(Some(LogLevel::Info), Some(LogLevel::Warn)));
        assert!(passes_filter(Some(LogLevel::Error), Some(LogLevel::Warn)));
        assert!(passes_filter(Some(LogLevel::Info), None));
    }

    #[test]
    fn test_startup_banner() {
        let addr: SocketAddr = "0.0.0.0:5008".parse().unwrap();
        let lines = startup_banner(&addr, Path::new("/srv/site"));
        assert_eq!(lines[0], "Static server with CORS running on http://localhost:5008");
        assert_eq!(lines[1], "Serving files from: /srv/site");

        let v6: SocketAddr = "[::1]:8080".parse().unwrap();
        assert!(startup_banner(&v6, Path::new("."))[0].ends_with("http://[::1]:8080"));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
    }
}
