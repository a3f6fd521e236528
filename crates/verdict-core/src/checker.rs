//! Batch validation of matched records.
//!
//! Records are checked strictly in sequence and independently: one record's
//! failure never blocks validation of the others. `fail_fast` reproduces the
//! halt-on-first-failure flow for callers that want it; the failing record
//! is still included in the report.

use crate::Record;
use crate::schema::{Violation, validate_record};

/// Outcome of validating a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// 0-based position in the matched sequence.
    pub index: usize,
    pub record: Record,
    pub violation: Option<Violation>,
}

impl RecordOutcome {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// Summary counts for a check run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// Per-record outcomes plus summary counts.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub outcomes: Vec<RecordOutcome>,
    pub stats: CheckStats,
}

impl CheckReport {
    pub fn all_valid(&self) -> bool {
        self.stats.invalid == 0
    }
}

/// Validate records in sequence.
///
/// Accepts any record iterator (the matcher's lazy iterator works directly);
/// with `fail_fast` set, no further records are pulled after the first
/// invalid one.
pub fn check_records(records: impl IntoIterator<Item = Record>, fail_fast: bool) -> CheckReport {
    let mut report = CheckReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let violation = validate_record(&record).err();
        let failed = violation.is_some();

        report.stats.total += 1;
        if failed {
            report.stats.invalid += 1;
        } else {
            report.stats.valid += 1;
        }
        report.outcomes.push(RecordOutcome {
            index,
            record,
            violation,
        });

        if failed && fail_fast {
            break;
        }
    }

    tracing::debug!(
        total = report.stats.total,
        invalid = report.stats.invalid,
        "record check complete"
    );
    report
}
