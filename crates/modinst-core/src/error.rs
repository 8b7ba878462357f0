//! Error types for install operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `InstallError`.
pub type Result<T> = std::result::Result<T, InstallError>;

/// Errors that can occur while installing content units.
#[derive(Error, Debug)]
pub enum InstallError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No install path was configured for the operation.
    #[error("install path not provided")]
    InstallPathNotProvided,

    /// The configured install path is not absolute.
    #[error("install path is not absolute: {path}")]
    PathNotAbsolute {
        /// The offending configured path.
        path: PathBuf,
    },

    /// The configured install path does not name an existing directory.
    #[error("install path is not an existing directory: {path}")]
    NotADirectory {
        /// The offending configured path.
        path: PathBuf,
    },

    /// The process lacks read/write/execute access to the destination.
    #[error(
        "the current user does not have permission to read and write files \
         in the destination directory: {path}"
    )]
    DestinationNotAccessible {
        /// The destination that failed the access check.
        path: PathBuf,
    },

    /// Archive extension is not a recognized tarball kind.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// Path of the archive with the unrecognized extension.
        path: PathBuf,
    },

    /// Archive opened but its contents could not be read.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// One or more entries resolve outside the destination directory.
    #[error("one or more units contains a path outside its base extraction path")]
    UnsafeArchivePaths,

    /// The destination directory could not be cleared.
    #[error("failed to clear destination directory: {source}")]
    ClearDestination {
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}

impl InstallError {
    /// Returns `true` if this error aborts the whole install operation.
    ///
    /// Fatal errors are reported through the top-level message of the
    /// install report; the remaining variants are recorded per unit and
    /// never stop the loop that produced them.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InstallPathNotProvided
                | Self::PathNotAbsolute { .. }
                | Self::NotADirectory { .. }
                | Self::DestinationNotAccessible { .. }
                | Self::ClearDestination { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_install_path_message() {
        let err = InstallError::InstallPathNotProvided;
        assert_eq!(err.to_string(), "install path not provided");
    }

    #[test]
    fn test_unsafe_paths_message() {
        let err = InstallError::UnsafeArchivePaths;
        assert_eq!(
            err.to_string(),
            "one or more units contains a path outside its base extraction path"
        );
    }

    #[test]
    fn test_clear_destination_message() {
        let err = InstallError::ClearDestination {
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(
            err.to_string()
                .starts_with("failed to clear destination directory:")
        );
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: InstallError = io_err.into();
        assert!(matches!(err, InstallError::Io(_)));
    }

    #[test]
    fn test_is_fatal() {
        assert!(InstallError::InstallPathNotProvided.is_fatal());
        assert!(
            InstallError::ClearDestination {
                source: std::io::Error::other("boom"),
            }
            .is_fatal()
        );
        assert!(
            InstallError::NotADirectory {
                path: PathBuf::from("/nope"),
            }
            .is_fatal()
        );

        assert!(!InstallError::UnsafeArchivePaths.is_fatal());
        assert!(!InstallError::InvalidArchive("truncated header".into()).is_fatal());
        assert!(
            !InstallError::UnsupportedFormat {
                path: PathBuf::from("unit.rar"),
            }
            .is_fatal()
        );
    }
}
