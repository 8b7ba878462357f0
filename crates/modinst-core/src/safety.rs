//! Path containment checks for unit tarballs.
//!
//! The check is purely lexical: entry names are resolved against the
//! destination by collapsing `.` and `..` components, with no filesystem
//! access and no symlink resolution. That defends against traversal via
//! relative components (`../../etc/passwd`) but not against symlink-based
//! escapes after extraction; the original system accepted the same
//! limitation.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use tracing::warn;

use crate::Result;
use crate::error::InstallError;
use crate::formats;
use crate::report::DetailReport;
use crate::types::Unit;

/// Lexically resolves `entry_name` against `base`.
///
/// Mirrors a normalize-after-join: an absolute entry name replaces the
/// base, `.` components vanish, and `..` pops the previous component
/// (collapsing to the root once the stack is exhausted there).
fn lexical_join(base: &Path, entry_name: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in base.components().chain(entry_name.components()) {
        match component {
            Component::Prefix(_) => {
                parts.clear();
                parts.push(component);
            }
            Component::RootDir => {
                // An absolute entry name restarts resolution; a root
                // following a prefix belongs to that prefix.
                if !matches!(parts.last(), Some(Component::Prefix(_))) {
                    parts.clear();
                }
                parts.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            Component::Normal(_) => parts.push(component),
        }
    }

    parts.iter().collect()
}

/// Returns `true` if `entry_name` resolves strictly inside `destination`.
///
/// An entry that resolves to the destination itself does not count as
/// inside it; only paths below the destination pass.
///
/// # Examples
///
/// ```
/// use modinst_core::safety::entry_is_safe;
/// use std::path::Path;
///
/// let dest = Path::new("/srv/puppet");
/// assert!(entry_is_safe(dest, Path::new("modules/foo/init.pp")));
/// assert!(!entry_is_safe(dest, Path::new("../../etc/passwd")));
/// ```
#[must_use]
pub fn entry_is_safe(destination: &Path, entry_name: &Path) -> bool {
    let base = lexical_join(destination, Path::new(""));
    let resolved = lexical_join(&base, entry_name);
    resolved.starts_with(&base) && resolved != base
}

/// Returns `true` iff every entry name stays inside the destination.
///
/// A single unsafe entry rejects the whole archive.
#[must_use]
pub fn archive_paths_are_safe(destination: &Path, entry_names: &[PathBuf]) -> bool {
    entry_names
        .iter()
        .all(|name| entry_is_safe(destination, name))
}

/// Lists the entry names recorded in a unit tarball.
///
/// The archive handle is closed before returning, on success and error
/// paths alike.
///
/// # Errors
///
/// Returns `InstallError::UnsupportedFormat` or `InstallError::Io` if
/// the archive cannot be opened, and `InstallError::InvalidArchive` if
/// its contents cannot be read.
pub fn list_entry_names(archive_path: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = formats::open_archive(archive_path)?;
    let entries = archive.entries().map_err(|e| {
        InstallError::InvalidArchive(format!("failed to read tar entries: {e}"))
    })?;

    let mut names = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| {
            InstallError::InvalidArchive(format!("failed to read tar entry: {e}"))
        })?;
        let path = entry
            .path()
            .map_err(|e| InstallError::InvalidArchive(format!("invalid entry path: {e}")))?
            .into_owned();
        names.push(path);
    }

    Ok(names)
}

/// Checks every unit's tarball for unsafe paths.
///
/// One error is recorded per offending unit (the containment message
/// for unsafe paths, or the per-unit open/read error) and checking
/// continues through the remaining units. Successes are not recorded;
/// the returned report carries errors only.
#[must_use]
pub fn check_units(destination: &Path, units: &[Unit]) -> DetailReport {
    let mut report = DetailReport::new();

    for unit in units {
        match list_entry_names(&unit.storage_path) {
            Ok(names) => {
                if !archive_paths_are_safe(destination, &names) {
                    warn!(
                        unit = %unit.unit_key,
                        archive = %unit.storage_path.display(),
                        "unit rejected: entry path escapes destination"
                    );
                    report.record_error(
                        unit.unit_key.clone(),
                        InstallError::UnsafeArchivePaths.to_string(),
                    );
                }
            }
            Err(e) => {
                report.record_error(unit.unit_key.clone(), e.to_string());
            }
        }
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::UnitKey;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_lexical_join_plain() {
        assert_eq!(
            lexical_join(Path::new("/srv/puppet"), Path::new("foo/bar.pp")),
            PathBuf::from("/srv/puppet/foo/bar.pp")
        );
    }

    #[test]
    fn test_lexical_join_collapses_dots() {
        assert_eq!(
            lexical_join(Path::new("/srv/puppet"), Path::new("./foo/./bar.pp")),
            PathBuf::from("/srv/puppet/foo/bar.pp")
        );
        assert_eq!(
            lexical_join(Path::new("/srv/puppet"), Path::new("foo/../bar.pp")),
            PathBuf::from("/srv/puppet/bar.pp")
        );
    }

    #[test]
    fn test_lexical_join_escapes() {
        assert_eq!(
            lexical_join(Path::new("/srv/puppet"), Path::new("../../etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn test_lexical_join_parent_at_root_collapses() {
        assert_eq!(
            lexical_join(Path::new("/"), Path::new("../../x")),
            PathBuf::from("/x")
        );
    }

    #[test]
    fn test_lexical_join_absolute_entry_replaces_base() {
        assert_eq!(
            lexical_join(Path::new("/srv/puppet"), Path::new("/etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn test_entry_is_safe_relative() {
        let dest = Path::new("/srv/puppet");
        assert!(entry_is_safe(dest, Path::new("modules/foo/init.pp")));
        assert!(entry_is_safe(dest, Path::new("mymodule/manifests/init.pp")));
        assert!(entry_is_safe(dest, Path::new("./a/b")));
        assert!(entry_is_safe(dest, Path::new("a/../b")));
    }

    #[test]
    fn test_entry_is_safe_traversal() {
        let dest = Path::new("/srv/puppet");
        assert!(!entry_is_safe(dest, Path::new("../outside.txt")));
        assert!(!entry_is_safe(dest, Path::new("../../etc/passwd")));
        assert!(!entry_is_safe(dest, Path::new("a/../../escape")));
    }

    #[test]
    fn test_entry_is_safe_absolute_entry() {
        let dest = Path::new("/srv/puppet");
        assert!(!entry_is_safe(dest, Path::new("/etc/passwd")));
        // An absolute entry already under the destination still resolves
        // inside it.
        assert!(entry_is_safe(dest, Path::new("/srv/puppet/modules/foo")));
    }

    #[test]
    fn test_entry_resolving_to_destination_is_unsafe() {
        // "." resolves to the destination itself, which the strict
        // containment rule rejects.
        let dest = Path::new("/srv/puppet");
        assert!(!entry_is_safe(dest, Path::new(".")));
        assert!(!entry_is_safe(dest, Path::new("a/..")));
    }

    #[test]
    fn test_entry_is_safe_sibling_prefix() {
        // /srv/puppet-extra shares a string prefix with /srv/puppet but
        // is not inside it.
        let dest = Path::new("/srv/puppet");
        assert!(!entry_is_safe(dest, Path::new("../puppet-extra/file")));
    }

    #[test]
    fn test_archive_paths_are_safe_rejects_whole_archive() {
        let dest = Path::new("/srv/puppet");
        let names = vec![
            PathBuf::from("good/one.pp"),
            PathBuf::from("../bad.txt"),
            PathBuf::from("good/two.pp"),
        ];
        assert!(!archive_paths_are_safe(dest, &names));

        let all_good = vec![PathBuf::from("good/one.pp"), PathBuf::from("good/two.pp")];
        assert!(archive_paths_are_safe(dest, &all_good));
    }

    #[test]
    fn test_archive_paths_are_safe_empty() {
        assert!(archive_paths_are_safe(Path::new("/srv/puppet"), &[]));
    }

    #[test]
    fn test_list_entry_names() {
        let temp = TempDir::new().unwrap();
        let archive_path = temp.path().join("unit.tar");
        let data = crate::test_utils::create_test_tar(vec![
            ("mymodule/manifests/init.pp", b"class mymodule {}"),
            ("mymodule/metadata.json", b"{}"),
        ]);
        std::fs::write(&archive_path, data).unwrap();

        let names = list_entry_names(&archive_path).unwrap();
        assert_eq!(
            names,
            vec![
                PathBuf::from("mymodule/manifests/init.pp"),
                PathBuf::from("mymodule/metadata.json"),
            ]
        );
    }

    #[test]
    fn test_list_entry_names_corrupt_archive() {
        let temp = TempDir::new().unwrap();
        let archive_path = temp.path().join("unit.tar.gz");
        let mut file = std::fs::File::create(&archive_path).unwrap();
        file.write_all(b"this is not a gzip stream").unwrap();
        drop(file);

        let result = list_entry_names(&archive_path);
        assert!(matches!(result, Err(InstallError::InvalidArchive(_))));
    }

    #[test]
    fn test_check_units_collects_all_violations() {
        let temp = TempDir::new().unwrap();

        let good = temp.path().join("good.tar");
        std::fs::write(
            &good,
            crate::test_utils::create_test_tar(vec![("mod/init.pp", b"ok")]),
        )
        .unwrap();

        let bad = temp.path().join("bad.tar");
        std::fs::write(
            &bad,
            crate::test_utils::create_test_tar_with_names(vec!["../escape.txt"]),
        )
        .unwrap();

        let missing = temp.path().join("missing.tar");

        let units = vec![
            Unit::new(UnitKey::from_name("good"), &good),
            Unit::new(UnitKey::from_name("bad"), &bad),
            Unit::new(UnitKey::from_name("missing"), &missing),
        ];

        let report = check_units(Path::new("/srv/puppet"), &units);

        // Checking continues past the first violation.
        assert!(report.has_errors());
        assert_eq!(report.errors.len(), 2);
        assert!(report.success_unit_keys.is_empty());
        assert_eq!(report.errors[0].unit_key, UnitKey::from_name("bad"));
        assert_eq!(
            report.errors[0].message,
            "one or more units contains a path outside its base extraction path"
        );
        assert_eq!(report.errors[1].unit_key, UnitKey::from_name("missing"));
    }
}
