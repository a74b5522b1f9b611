//! Error types
//!
//! `ServerError` covers everything that stops the process at startup.
//! `ServeError` covers per-request failures; each one maps onto an HTTP
//! status and an error page, and never takes the server down.

use hyper::StatusCode;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{host}': {source}")]
    InvalidAddress {
        host: String,
        source: std::net::AddrParseError,
    },

    #[error("serving root '{}' is not accessible: {source}", path.display())]
    Root { path: PathBuf, source: io::Error },

    #[error("serving root '{}' is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Per-request errors, rendered as HTML error responses
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("File not found")]
    NotFound,

    #[error("Unsupported method ('{0}')")]
    UnsupportedMethod(String),

    #[error("failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ServeError {
    /// Classify an I/O error raised while resolving `path`.
    ///
    /// Anything a client can name but not reach is "not found": missing
    /// entries, lookups through a regular file (`file.txt/x`), names the
    /// filesystem rejects and entries without read permission. Anything
    /// else is an internal error.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound
            | io::ErrorKind::NotADirectory
            | io::ErrorKind::InvalidFilename
            | io::ErrorKind::PermissionDenied => Self::NotFound,
            _ => Self::Io { path, source },
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnsupportedMethod(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Internal details stay in the error log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Io { .. } => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        let err = ServeError::from_io(
            PathBuf::from("missing.txt"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, ServeError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unreachable_names_are_not_found() {
        for kind in [
            io::ErrorKind::NotADirectory,
            io::ErrorKind::InvalidFilename,
            io::ErrorKind::PermissionDenied,
        ] {
            let err = ServeError::from_io(PathBuf::from("x"), io::Error::from(kind));
            assert_eq!(err.status(), StatusCode::NOT_FOUND, "{kind:?}");
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_name_too_long_is_not_found() {
        // ENAMETOOLONG
        let err = ServeError::from_io(PathBuf::from("x"), io::Error::from_raw_os_error(36));
        assert!(matches!(err, ServeError::NotFound));
    }

    #[test]
    fn test_other_io_is_internal() {
        let err = ServeError::from_io(
            PathBuf::from("secret.txt"),
            io::Error::other("bad sector"),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal Server Error");
        assert!(err.to_string().contains("secret.txt"));
    }

    #[test]
    fn test_unsupported_method_message() {
        let err = ServeError::UnsupportedMethod("POST".to_string());
        assert_eq!(err.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(err.public_message(), "Unsupported method ('POST')");
    }
}
