//! Install destination configuration.

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::InstallError;
use crate::Result;
use crate::types::DestDir;

/// Configuration for an install operation.
///
/// Carries the one value the core needs from its host: the absolute path
/// units are installed into. An absent path is a valid configuration for
/// `validate` (there is nothing to check), but an install run against it
/// fails immediately with `install path not provided`.
///
/// # Examples
///
/// ```
/// use modinst_core::InstallConfig;
///
/// let config = InstallConfig::new("/srv/puppet");
/// assert!(config.install_path.is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Absolute path of the directory units are installed into.
    pub install_path: Option<PathBuf>,
}

impl InstallConfig {
    /// Creates a configuration with the given install path.
    #[must_use]
    pub fn new(install_path: impl Into<PathBuf>) -> Self {
        Self {
            install_path: Some(install_path.into()),
        }
    }

    /// Validates the configured install path.
    ///
    /// An absent path passes: validation only constrains a path that was
    /// actually supplied. A supplied path must be absolute and name an
    /// existing directory the process can read, write, and list.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::PathNotAbsolute`,
    /// `InstallError::NotADirectory`, or
    /// `InstallError::DestinationNotAccessible` describing the first
    /// failed check.
    pub fn validate(&self) -> Result<()> {
        let Some(path) = &self.install_path else {
            return Ok(());
        };
        if !path.is_absolute() {
            return Err(InstallError::PathNotAbsolute { path: path.clone() });
        }
        DestDir::new(path.clone()).map(|_| ())
    }

    /// Resolves the configured path into a validated destination.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::InstallPathNotProvided` when the path is
    /// absent or empty, otherwise any `DestDir` validation error.
    pub fn destination(&self) -> Result<DestDir> {
        match &self.install_path {
            Some(path) if !path.as_os_str().is_empty() => DestDir::new(path.clone()),
            _ => Err(InstallError::InstallPathNotProvided),
        }
    }
}
