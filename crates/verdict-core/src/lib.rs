use serde::{Deserialize, Serialize};

pub mod backend;
pub mod checker;
pub mod config_file;
pub mod schema;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use checker::{CheckReport, CheckStats, RecordOutcome, check_records};
pub use schema::{Violation, schema_json, validate_record, validate_value};

/// A test-result record matched out of a report document.
///
/// Fields hold the captured text verbatim. The matcher guarantees the rough
/// shape (it only matches qualifying substrings); the canonical constraints
/// (calendar-valid date, case-exact PASS/FAIL) are enforced by [`schema`],
/// not by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub test_id: String,
    pub date: String,
    pub result: String,
}
