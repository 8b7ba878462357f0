//! Validated install destination directory.

use crate::InstallError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// A validated destination directory for unit installation.
///
/// Construction verifies that the path exists, is a directory, and is
/// accessible to the process for reading, writing, and listing. The
/// stored path is canonical and absolute.
///
/// Listing access (execute permission on Unix) matters here because the
/// clearing phase enumerates the destination's children before deleting
/// pre-existing module trees.
///
/// # Examples
///
/// ```no_run
/// use modinst_core::DestDir;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new(PathBuf::from("/srv/puppet"))?;
/// println!("installing into: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir` after validating the path.
    ///
    /// Validation steps:
    /// 1. The path names an existing directory
    /// 2. The path canonicalizes to an absolute path (symlinked
    ///    destinations resolve to their target)
    /// 3. The process has read, write, and execute access (Unix)
    ///
    /// There is a time-of-check-time-of-use window between these checks
    /// and later use of the directory; canonicalizing up front and
    /// validating every archive entry against the canonical destination
    /// narrows it, the same trade accepted by the original system.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::NotADirectory` if the path is missing or
    /// not a directory, `InstallError::DestinationNotAccessible` if the
    /// access check fails, or `InstallError::Io` if canonicalization
    /// fails.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_dir() {
            return Err(InstallError::NotADirectory { path });
        }

        let canonical = path.canonicalize().map_err(|e| {
            InstallError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {e}", path.display()),
            ))
        })?;

        // Listing the destination requires X in addition to R and W.
        #[cfg(unix)]
        {
            use std::ffi::CString;
            use std::os::unix::ffi::OsStrExt;

            let path_cstring =
                CString::new(canonical.as_os_str().as_bytes()).map_err(|_| {
                    InstallError::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "path contains null byte",
                    ))
                })?;

            // SAFETY: access() is safe to call with a valid C string.
            // The pointer is valid for the duration of the call and the
            // string is not modified.
            #[allow(unsafe_code)]
            let result = unsafe {
                libc::access(
                    path_cstring.as_ptr(),
                    libc::R_OK | libc::W_OK | libc::X_OK,
                )
            };

            if result != 0 {
                return Err(InstallError::DestinationNotAccessible { path: canonical });
            }
        }

        Ok(Self(canonical))
    }

    /// Returns the destination as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
