//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use modinst_core::InstallReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn headline(&self, ok: bool, ok_text: &str, fail_text: &str) {
        if self.use_colors {
            let mark = if ok {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            let _ = self
                .term
                .write_line(&format!("{mark} {}", if ok { ok_text } else { fail_text }));
        } else {
            let _ = self.term.write_line(if ok { ok_text } else { fail_text });
        }
    }

    fn write_report(&self, report: &InstallReport) {
        if let Some(message) = &report.message {
            let _ = self.term.write_line(&format!("  {message}"));
        }

        for key in &report.details.success_unit_keys {
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("  {} {key}", style("✓").green()));
            } else {
                let _ = self.term.write_line(&format!("  ok: {key}"));
            }
        }

        for error in &report.details.errors {
            if self.use_colors {
                let _ = self.term.write_line(&format!(
                    "  {} {}: {}",
                    style("✗").red(),
                    error.unit_key,
                    error.message
                ));
            } else {
                let _ = self
                    .term
                    .write_line(&format!("  failed: {}: {}", error.unit_key, error.message));
            }
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  {} succeeded, {} failed",
                report.details.success_unit_keys.len(),
                report.details.errors.len()
            ));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_install_report(&self, report: &InstallReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(report.is_success(), "Install complete", "Install failed");
        self.write_report(report);
        Ok(())
    }

    fn format_check_report(&self, report: &InstallReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(
            report.is_success(),
            "All units safe to install",
            "Safety check failed",
        );
        self.write_report(report);
        Ok(())
    }
}
