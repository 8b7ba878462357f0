//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use modinst_core::InstallReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn output_report(operation: &str, report: &InstallReport) -> Result<()> {
        let output = if report.is_success() {
            JsonOutput::success(operation, report)
        } else {
            JsonOutput::error(operation, report, report.message.clone())
        };
        Self::output(&output)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_install_report(&self, report: &InstallReport) -> Result<()> {
        Self::output_report("install", report)
    }

    fn format_check_report(&self, report: &InstallReport) -> Result<()> {
        Self::output_report("check", report)
    }
}
