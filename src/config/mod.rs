// Configuration module entry point
// Loads layered configuration and builds the shared runtime state

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LogLevel, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_ROOT};

/// Config file looked up when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "cors-server";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables such as
    /// `CORS_SERVER__SERVER__PORT=8080` override it.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let port = i64::from(DEFAULT_PORT);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CORS_SERVER")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", port)?
            .set_default("server.root", DEFAULT_ROOT)?
            .set_default("logging.level", "info")?
            .set_default("http.keep_alive", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                host: self.server.host.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 5008);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.root, std::path::PathBuf::from("."));
        assert_eq!(cfg.logging.level, LogLevel::Info);
        assert!(cfg.http.keep_alive);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:5008".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.server.workers, None);
        assert!(cfg.logging.error_log_file.is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 9000\nroot = \"public\"\n\n[logging]\nlevel = \"warn\""
        )
        .unwrap();

        let base = dir.path().join("server");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.root, std::path::PathBuf::from("public"));
        assert_eq!(cfg.logging.level, LogLevel::Warn);
        assert!(cfg.http.keep_alive);
    }

    #[test]
    fn test_ipv6_and_invalid_host() {
        let mut cfg = Config::default();
        cfg.server.host = "::1".to_string();
        cfg.server.port = 0;
        assert!(cfg.get_socket_addr().unwrap().is_ipv6());

        cfg.server.host = "not an address".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }
}
