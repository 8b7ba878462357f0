//! Tarball kind detection and archive opening.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;

use crate::InstallError;
use crate::Result;

/// Supported tarball kinds for unit archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
}

/// Detects the tarball kind from a file extension.
///
/// Detection is case-insensitive and recognizes the conventional
/// extension spellings (`.tar`, `.tar.gz`/`.tgz`, `.tar.bz2`/`.tbz`/
/// `.tbz2`).
///
/// # Errors
///
/// Returns `InstallError::UnsupportedFormat` if the extension is not a
/// recognized tarball kind.
pub fn detect_kind(path: &Path) -> Result<ArchiveKind> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| InstallError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

    match extension.to_ascii_lowercase().as_str() {
        "tar" => Ok(ArchiveKind::Tar),
        "gz" | "tgz" => Ok(ArchiveKind::TarGz),
        "bz2" | "tbz" | "tbz2" => Ok(ArchiveKind::TarBz2),
        _ => Err(InstallError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Opens a unit tarball for reading, building the matching decoder stack.
///
/// The returned archive borrows nothing; dropping it closes the
/// underlying file handle on every exit path.
///
/// # Errors
///
/// Returns `InstallError::UnsupportedFormat` for unrecognized
/// extensions and `InstallError::Io` if the file cannot be opened.
pub fn open_archive(path: &Path) -> Result<tar::Archive<Box<dyn Read>>> {
    let kind = detect_kind(path)?;
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let reader: Box<dyn Read> = match kind {
        ArchiveKind::Tar => Box::new(reader),
        ArchiveKind::TarGz => Box::new(GzDecoder::new(reader)),
        ArchiveKind::TarBz2 => Box::new(BzDecoder::new(reader)),
    };

    Ok(tar::Archive::new(reader))
}
