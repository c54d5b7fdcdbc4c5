//! OS directory resolution for config, logs and catalog data.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// OS-specific directories for the orrery, following XDG on Linux, Known
/// Folders on Windows and Library on macOS.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the default `catalog.ron`.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "orrery";

/// File name of the offline catalog looked up in the data directory.
pub const CATALOG_FILE_NAME: &str = "catalog.ron";

impl PlatformDirs {
    /// Resolve directories without creating them.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("data"));

        Ok(Self {
            config_dir: app_config.join("config"),
            data_dir,
            log_dir: app_config.join("logs"),
        })
    }

    /// Directories rooted under `root`, for tests and portable installs.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Replace the config directory, keeping the others.
    pub fn with_config_dir(self, config_dir: PathBuf) -> Self {
        Self { config_dir, ..self }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }

    /// Default catalog location.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_layout() {
        let root = Path::new("portable");
        let dirs = PlatformDirs::resolve_with_root(root);
        assert_eq!(dirs.config_dir, root.join("orrery").join("config"));
        assert_eq!(dirs.log_dir, root.join("orrery").join("logs"));
        assert_eq!(
            dirs.catalog_path(),
            root.join("orrery").join("data").join(CATALOG_FILE_NAME)
        );
    }

    #[test]
    fn test_create_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.data_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_config_dir_override() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path())
            .with_config_dir(tmp.path().join("elsewhere"));
        assert_eq!(dirs.config_dir, tmp.path().join("elsewhere"));
        assert_eq!(dirs.log_dir, tmp.path().join("orrery").join("logs"));
    }
}
