//! Installable content units and their identifying keys.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Identifying fields of a content unit.
///
/// A unit key is an ordered mapping of string fields (name, author,
/// version, ...). The core treats it as an opaque value: it is compared,
/// displayed, and carried through the install report, but never
/// interpreted. Field order is stable, so serialized keys are
/// deterministic.
///
/// # Examples
///
/// ```
/// use modinst_core::UnitKey;
///
/// let key = UnitKey::new()
///     .with_field("name", "apache")
///     .with_field("author", "puppetlabs");
/// assert_eq!(key.get("name"), Some("apache"));
/// assert_eq!(key.to_string(), "author=puppetlabs name=apache");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitKey(BTreeMap<String, String>);

impl UnitKey {
    /// Creates an empty unit key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a key with a single `name` field.
    ///
    /// Convenience for callers that identify units by file name alone.
    #[must_use]
    pub fn from_name(name: impl Into<String>) -> Self {
        Self::new().with_field("name", name)
    }

    /// Returns the key with `field` set to `value`.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Returns the value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns `true` if the key carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, value) in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{field}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// An installable content item: an identifying key plus the location of
/// its tarball on durable storage.
///
/// Units are owned by the content provider; the core only reads the
/// archive at `storage_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Identifying fields of this unit.
    pub unit_key: UnitKey,

    /// Location of the unit's tarball, readable by the process.
    pub storage_path: PathBuf,
}

impl Unit {
    /// Creates a unit from its key and archive location.
    #[must_use]
    pub fn new(unit_key: UnitKey, storage_path: impl Into<PathBuf>) -> Self {
        Self {
            unit_key,
            storage_path: storage_path.into(),
        }
    }

    /// Creates a unit identified by the archive's file name.
    ///
    /// The `name` field is the file name with the archive extension
    /// trimmed (`apache-1.0.tar.gz` → `apache-1.0`).
    #[must_use]
    pub fn from_archive_path(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let name = archive_stem(&storage_path);
        Self {
            unit_key: UnitKey::from_name(name),
            storage_path,
        }
    }
}

/// Strips a tarball extension chain from a file name.
fn archive_stem(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    for suffix in [".tar.gz", ".tar.bz2", ".tgz", ".tbz2", ".tbz", ".tar"] {
        if let Some(stem) = file_name.strip_suffix(suffix) {
            return stem.to_string();
        }
    }
    file_name
}
