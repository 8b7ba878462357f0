//! Install orchestration.
//!
//! Sequences one install operation: validate every unit's tarball for
//! path containment, clear the destination, extract each unit, and
//! return the per-unit report. No destination mutation happens unless
//! every unit passed the containment check.

use tracing::debug;
use tracing::info;

use crate::InstallConfig;
use crate::clean;
use crate::extract;
use crate::report::DetailReport;
use crate::report::InstallReport;
use crate::safety;
use crate::types::Unit;

/// Installs content units into the configured destination.
///
/// One `Installer` performs synchronous, strictly sequential installs;
/// each call to [`install`](Self::install) owns its report for the
/// duration of the call. Concurrent installs to non-overlapping
/// destinations are independent.
///
/// # Examples
///
/// ```no_run
/// use modinst_core::{InstallConfig, Installer, Unit};
///
/// let installer = Installer::new(InstallConfig::new("/srv/puppet"));
/// let units = vec![Unit::from_archive_path("/var/lib/content/apache.tar.gz")];
/// let report = installer.install(&units);
/// assert!(report.is_success());
/// ```
#[derive(Debug)]
pub struct Installer {
    config: InstallConfig,
}

impl Installer {
    /// Creates an installer with the given configuration.
    #[must_use]
    pub fn new(config: InstallConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the install configuration.
    #[must_use]
    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Runs one install operation over the given units.
    ///
    /// Phases, in order:
    ///
    /// 1. Resolve the destination. A missing install path fails
    ///    immediately with `install path not provided` and an empty
    ///    report; an invalid one fails with its validation message.
    /// 2. Check every unit's tarball for unsafe paths, collecting all
    ///    violations. Any error aborts before the destination is
    ///    touched.
    /// 3. Clear pre-existing directories under the destination. A
    ///    clearing failure aborts with its message as the top-level
    ///    error.
    /// 4. Extract each unit, recording success or error per unit and
    ///    continuing past failures.
    ///
    /// The returned report always carries every per-unit outcome
    /// recorded so far; the overall status is `Failure` iff any unit
    /// failed or a phase aborted.
    #[must_use]
    pub fn install(&self, units: &[Unit]) -> InstallReport {
        let dest = match self.config.destination() {
            Ok(dest) => dest,
            Err(e) => return InstallReport::aborted(e.to_string(), DetailReport::new()),
        };

        info!(
            units = units.len(),
            destination = %dest.as_path().display(),
            "starting install"
        );

        // Fail before mutating anything if any unit would escape the
        // destination.
        let mut details = safety::check_units(dest.as_path(), units);
        if details.has_errors() {
            info!(
                rejected = details.errors.len(),
                "aborting install: containment check failed"
            );
            return InstallReport::failure(details);
        }

        if let Err(e) = clean::clear_destination(dest.as_path()) {
            return InstallReport::aborted(e.to_string(), details);
        }

        for unit in units {
            match extract::extract_unit(&unit.storage_path, dest.as_path()) {
                Ok(()) => {
                    debug!(unit = %unit.unit_key, "unit installed");
                    details.record_success(unit.unit_key.clone());
                }
                Err(e) => {
                    debug!(unit = %unit.unit_key, error = %e, "unit failed");
                    details.record_error(unit.unit_key.clone(), e.to_string());
                }
            }
        }

        info!(
            succeeded = details.success_unit_keys.len(),
            failed = details.errors.len(),
            "install finished"
        );

        if details.has_errors() {
            InstallReport::failure(details)
        } else {
            InstallReport::success(details)
        }
    }
}
