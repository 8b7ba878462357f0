//! Install command implementation.

use crate::cli::InstallArgs;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use modinst_core::InstallConfig;
use modinst_core::Installer;
use modinst_core::Unit;
use std::fs;

pub fn execute(args: &InstallArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let units = load_units(args)?;

    let installer = Installer::new(InstallConfig::new(&args.destination));
    let report = installer.install(&units);

    formatter.format_install_report(&report)?;

    if report.is_success() {
        Ok(())
    } else {
        bail!("install failed")
    }
}

/// Builds the unit list from positional archives or a JSON manifest.
fn load_units(args: &InstallArgs) -> Result<Vec<Unit>> {
    if let Some(manifest_path) = &args.manifest {
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!("failed to read manifest '{}'", manifest_path.display())
        })?;
        let units: Vec<Unit> = serde_json::from_str(&contents).with_context(|| {
            format!("failed to parse manifest '{}'", manifest_path.display())
        })?;
        Ok(units)
    } else {
        Ok(args
            .archives
            .iter()
            .map(Unit::from_archive_path)
            .collect())
    }
}
