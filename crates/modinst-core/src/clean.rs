//! Destination clearing before a fresh install.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::InstallError;
use crate::Result;

/// Removes every directory found directly under the destination.
///
/// Files (and symlinks) directly under the destination are left
/// untouched. The asymmetry matches the install model: units always
/// unpack into subdirectories, so only subdirectories are stale state
/// from a previous install. Symlinks are not followed; a symlink to a
/// directory is left in place like any other non-directory entry.
///
/// # Errors
///
/// Returns `InstallError::ClearDestination` if the destination cannot
/// be listed or a subdirectory cannot be removed.
pub fn clear_destination(destination: &Path) -> Result<()> {
    let entries = fs::read_dir(destination)
        .map_err(|source| InstallError::ClearDestination { source })?;

    for entry in entries {
        let entry = entry.map_err(|source| InstallError::ClearDestination { source })?;
        let file_type = entry
            .file_type()
            .map_err(|source| InstallError::ClearDestination { source })?;

        if file_type.is_dir() {
            debug!(path = %entry.path().display(), "removing pre-existing directory");
            fs::remove_dir_all(entry.path())
                .map_err(|source| InstallError::ClearDestination { source })?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clear_removes_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("apache/manifests")).unwrap();
        fs::write(temp.path().join("apache/manifests/init.pp"), "x").unwrap();
        fs::create_dir(temp.path().join("ntp")).unwrap();

        clear_destination(temp.path()).unwrap();

        assert!(!temp.path().join("apache").exists());
        assert!(!temp.path().join("ntp").exists());
    }

    #[test]
    fn test_clear_leaves_top_level_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("stale_module")).unwrap();
        fs::write(temp.path().join("README"), "keep me").unwrap();
        fs::write(temp.path().join("site.pp"), "keep me too").unwrap();

        clear_destination(temp.path()).unwrap();

        assert!(!temp.path().join("stale_module").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("README")).unwrap(),
            "keep me"
        );
        assert!(temp.path().join("site.pp").is_file());
    }

    #[test]
    fn test_clear_empty_destination() {
        let temp = TempDir::new().unwrap();
        clear_destination(temp.path()).unwrap();
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    #[cfg(unix)]
    fn test_clear_leaves_symlinked_directories() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("data"), "untouched").unwrap();

        symlink(outside.path(), temp.path().join("linked")).unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();

        clear_destination(temp.path()).unwrap();

        // The real directory is gone; the symlink and its target survive.
        assert!(!temp.path().join("real").exists());
        assert!(temp.path().join("linked").symlink_metadata().is_ok());
        assert_eq!(
            fs::read_to_string(outside.path().join("data")).unwrap(),
            "untouched"
        );
    }

    #[test]
    fn test_clear_missing_destination_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("not_there");
        let result = clear_destination(&missing);
        assert!(matches!(
            result,
            Err(InstallError::ClearDestination { .. })
        ));
    }
}
