//! Safe tarball installation of content units.
//!
//! `modinst-core` installs a collection of unit tarballs into a
//! destination directory: every archive is first checked so that no
//! entry can write outside the destination, pre-existing module
//! directories are cleared, each unit is extracted, and the caller
//! receives a per-unit success/failure report.
//!
//! # Examples
//!
//! ```no_run
//! use modinst_core::{InstallConfig, Installer, Unit};
//!
//! let installer = Installer::new(InstallConfig::new("/srv/puppet"));
//! let units = vec![Unit::from_archive_path("/var/lib/content/apache.tar.gz")];
//! let report = installer.install(&units);
//! for key in &report.details.success_unit_keys {
//!     println!("installed {key}");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod clean;
pub mod config;
pub mod error;
pub mod extract;
pub mod formats;
pub mod install;
pub mod report;
pub mod safety;
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use config::InstallConfig;
pub use error::InstallError;
pub use error::Result;
pub use formats::ArchiveKind;
pub use install::Installer;
pub use report::DetailReport;
pub use report::InstallReport;
pub use report::InstallStatus;
pub use report::UnitError;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::Unit;
pub use types::UnitKey;
