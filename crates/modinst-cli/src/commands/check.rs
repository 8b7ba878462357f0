//! Check command implementation.
//!
//! Runs only the containment phase of an install: every archive is
//! opened and its entry names resolved against the destination, with no
//! clearing and no extraction.

use crate::cli::CheckArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use modinst_core::InstallReport;
use modinst_core::Unit;
use modinst_core::safety;

pub fn execute(args: &CheckArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let units: Vec<Unit> = args
        .archives
        .iter()
        .map(Unit::from_archive_path)
        .collect();

    let mut details = safety::check_units(&args.destination, &units);

    // The containment phase records errors only; fill in the units that
    // passed so the verdict lists every archive.
    for unit in &units {
        let failed = details
            .errors
            .iter()
            .any(|e| e.unit_key == unit.unit_key);
        if !failed {
            details.record_success(unit.unit_key.clone());
        }
    }

    let report = if details.has_errors() {
        InstallReport::failure(details)
    } else {
        InstallReport::success(details)
    };

    formatter.format_check_report(&report)?;

    if report.is_success() {
        Ok(())
    } else {
        bail!("one or more units failed the safety check")
    }
}
