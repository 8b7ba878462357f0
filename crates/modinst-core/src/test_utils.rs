//! Test utilities for building unit tarballs.
//!
//! Reusable helpers for creating in-memory test archives, shared by the
//! crate's own tests and by downstream integration tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Write;

/// Creates an in-memory tar archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are created with mode
/// 0o644.
///
/// # Examples
///
/// ```
/// use modinst_core::test_utils::create_test_tar;
///
/// let tar_data = create_test_tar(vec![("mod/init.pp", b"class mod {}")]);
/// ```
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut ar = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        ar.append_data(&mut header, path, data).unwrap();
    }
    ar.into_inner().unwrap()
}

/// Creates an in-memory tar archive containing empty files with the
/// given entry names, traversal components included verbatim.
///
/// Useful for crafting archives whose names would be rejected by the
/// containment check (`../escape.txt` and friends). `set_path` refuses
/// `..` components, so the name bytes are written into the header
/// directly; names must fit the 100-byte header field.
#[must_use]
pub fn create_test_tar_with_names(names: Vec<&str>) -> Vec<u8> {
    let mut ar = tar::Builder::new(Vec::new());
    for name in names {
        let mut header = tar::Header::new_gnu();
        {
            let gnu = header.as_gnu_mut().unwrap();
            assert!(name.len() < gnu.name.len(), "entry name too long: {name}");
            gnu.name[..name.len()].copy_from_slice(name.as_bytes());
        }
        header.set_size(0);
        header.set_mode(0o644);
        header.set_cksum();
        ar.append(&header, &[][..]).unwrap();
    }
    ar.into_inner().unwrap()
}

/// Creates an in-memory gzip-compressed tar archive.
#[must_use]
pub fn create_test_tar_gz(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let tar_data = create_test_tar(entries);
    let mut encoder =
        flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar_data).unwrap();
    encoder.finish().unwrap()
}

/// Creates an in-memory bzip2-compressed tar archive.
#[must_use]
pub fn create_test_tar_bz2(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let tar_data = create_test_tar(entries);
    let mut encoder =
        bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(&tar_data).unwrap();
    encoder.finish().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_tar_roundtrip() {
        let data = create_test_tar(vec![("dir/file.txt", b"hello")]);
        let mut archive = tar::Archive::new(&data[..]);
        let names: Vec<_> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().into_owned())
            .collect();
        assert_eq!(names, vec![std::path::PathBuf::from("dir/file.txt")]);
    }

    #[test]
    fn test_create_test_tar_with_traversal_names() {
        let data = create_test_tar_with_names(vec!["../escape.txt", "ok.txt"]);
        let mut archive = tar::Archive::new(&data[..]);
        let names: Vec<_> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0], std::path::PathBuf::from("../escape.txt"));
    }

    #[test]
    fn test_create_test_tar_gz_decodes() {
        let data = create_test_tar_gz(vec![("f", b"x")]);
        let decoder = flate2::read::GzDecoder::new(&data[..]);
        let mut archive = tar::Archive::new(decoder);
        assert_eq!(archive.entries().unwrap().count(), 1);
    }

    #[test]
    fn test_create_test_tar_bz2_decodes() {
        let data = create_test_tar_bz2(vec![("f", b"x")]);
        let decoder = bzip2::read::BzDecoder::new(&data[..]);
        let mut archive = tar::Archive::new(decoder);
        assert_eq!(archive.entries().unwrap().count(), 1);
    }
}
