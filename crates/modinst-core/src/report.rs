//! Per-unit install outcome reporting.

use serde::Serialize;

use crate::types::UnitKey;

/// A unit that failed, with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitError {
    /// Key of the unit that failed.
    pub unit_key: UnitKey,

    /// Why the unit failed.
    pub message: String,
}

/// Accumulator of per-unit outcomes for one install operation.
///
/// A unit key lands in at most one of the two sequences (success or a
/// single error), never more than once. The orchestrator owns the
/// report for the duration of one install call; there is no sharing
/// across operations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetailReport {
    /// Keys of units that installed successfully, in install order.
    pub success_unit_keys: Vec<UnitKey>,

    /// Units that failed, with their error messages, in check order.
    pub errors: Vec<UnitError>,
}

impl DetailReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successfully installed unit.
    pub fn record_success(&mut self, unit_key: UnitKey) {
        self.success_unit_keys.push(unit_key);
    }

    /// Records a failed unit with the reason it failed.
    pub fn record_error(&mut self, unit_key: UnitKey, message: impl Into<String>) {
        self.errors.push(UnitError {
            unit_key,
            message: message.into(),
        });
    }

    /// Returns `true` iff at least one unit failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of units recorded, successes and errors.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.success_unit_keys.len() + self.errors.len()
    }
}

/// Overall outcome of an install operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStatus {
    /// Every unit installed.
    Success,
    /// The operation failed, before or during extraction.
    Failure,
}

/// Result of one install operation.
///
/// `message` is set only for failures that precede per-unit work:
/// missing install path, invalid destination, or a clearing failure.
/// Unit-level failures are visible through `details` alone.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    /// Overall outcome.
    pub status: InstallStatus,

    /// Top-level failure message, for pre-unit failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Per-unit outcomes.
    pub details: DetailReport,
}

impl InstallReport {
    /// Creates a success report carrying the per-unit details.
    #[must_use]
    pub fn success(details: DetailReport) -> Self {
        Self {
            status: InstallStatus::Success,
            message: None,
            details,
        }
    }

    /// Creates a failure report from per-unit errors.
    #[must_use]
    pub fn failure(details: DetailReport) -> Self {
        Self {
            status: InstallStatus::Failure,
            message: None,
            details,
        }
    }

    /// Creates a failure report for an error that preceded per-unit work.
    #[must_use]
    pub fn aborted(message: impl Into<String>, details: DetailReport) -> Self {
        Self {
            status: InstallStatus::Failure,
            message: Some(message.into()),
            details,
        }
    }

    /// Returns `true` iff the operation succeeded overall.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == InstallStatus::Success
    }
}
