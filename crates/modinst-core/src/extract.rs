//! Unit tarball extraction.

use std::path::Path;

use tracing::debug;

use crate::Result;
use crate::formats;

/// Extracts a unit's tarball into the destination directory.
///
/// Every entry is unpacked with its relative directory structure
/// preserved; existing files are overwritten. The archive handle is
/// dropped, and the file closed, on every exit path.
///
/// No partial cleanup is attempted on failure: the destination may hold
/// a partially extracted unit. The containment pre-check has already run
/// for all units before any extraction begins, so failures here are
/// ordinary I/O conditions (disk full, permissions), not containment
/// violations.
///
/// # Errors
///
/// Returns `InstallError::UnsupportedFormat` or `InstallError::Io` if
/// the archive cannot be opened, and `InstallError::Io` if unpacking
/// fails.
pub fn extract_unit(archive_path: &Path, destination: &Path) -> Result<()> {
    debug!(
        archive = %archive_path.display(),
        destination = %destination.display(),
        "extracting unit"
    );

    let mut archive = formats::open_archive(archive_path)?;
    archive.unpack(destination)?;
    Ok(())
}
