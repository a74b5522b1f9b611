// Application state module
// Immutable state shared by every connection task

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ServerError;

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonical, absolute serving root
    root: PathBuf,
}

impl AppState {
    /// Resolve the configured serving root and build the shared state
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        let configured = &config.server.root;
        let root = configured
            .canonicalize()
            .map_err(|source| ServerError::Root {
                path: configured.clone(),
                source,
            })?;

        if !root.is_dir() {
            return Err(ServerError::RootNotDirectory { path: root });
        }

        Ok(Self {
            config: config.clone(),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &Path) -> Config {
        let mut cfg = Config::default();
        cfg.server.root = root.to_path_buf();
        cfg
    }

    #[test]
    fn test_root_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site");
        std::fs::create_dir(&nested).unwrap();

        let state = AppState::new(&config_with_root(&nested.join("."))).unwrap();
        assert_eq!(state.root(), nested.canonicalize().unwrap());
        assert!(state.root().is_absolute());
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppState::new(&config_with_root(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, ServerError::Root { .. }));
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        let err = AppState::new(&config_with_root(&file)).unwrap_err();
        assert!(matches!(err, ServerError::RootNotDirectory { .. }));
    }
}
