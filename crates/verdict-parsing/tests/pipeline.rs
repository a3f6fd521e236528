//! Matching and validation working together on report text.

use verdict_core::{Violation, check_records};
use verdict_parsing::find_records;

#[test]
fn well_formed_report_text_is_fully_valid() {
    let text = "Test1 2025-05-10 PASS\nTest2 2025-05-11 FAIL";
    let records = find_records(text);
    assert_eq!(records.len(), 2);

    let report = check_records(records, false);
    assert!(report.all_valid());
    assert_eq!(report.stats.total, 2);
    assert_eq!(report.stats.valid, 2);
    assert_eq!(report.stats.invalid, 0);
}

#[test]
fn lowercase_result_matches_but_fails_validation() {
    // The matcher is case-insensitive and keeps the original casing, so a
    // lowercase outcome reaches validation and is rejected there.
    let records = find_records("test9 2025-01-01 pass");
    assert_eq!(records.len(), 1);

    let report = check_records(records, false);
    assert!(!report.all_valid());
    assert_eq!(
        report.outcomes[0].violation,
        Some(Violation::InvalidResult {
            value: "pass".to_string()
        })
    );
}

#[test]
fn text_without_records_checks_clean() {
    let records = find_records("quarterly summary, no test table in this document");
    assert!(records.is_empty());

    let report = check_records(records, false);
    assert!(report.all_valid());
    assert_eq!(report.stats.total, 0);
}

#[test]
fn shape_valid_date_can_still_be_invalid() {
    // 13-45 passes the digit-shape scan but is not a calendar date
    let records = find_records("Test1 2025-13-45 PASS");
    assert_eq!(records.len(), 1);

    let report = check_records(records, false);
    assert_eq!(
        report.outcomes[0].violation,
        Some(Violation::InvalidDate {
            value: "2025-13-45".to_string()
        })
    );
}

#[test]
fn fail_fast_truncates_where_collect_all_continues() {
    let text = "Test1 2025-05-10 PASS\nTest2 2025-99-99 FAIL\nTest3 2025-05-12 PASS";
    let records = find_records(text);
    assert_eq!(records.len(), 3);

    let collected = check_records(records.clone(), false);
    assert_eq!(collected.outcomes.len(), 3);
    assert_eq!(collected.stats.invalid, 1);

    let halted = check_records(records, true);
    assert_eq!(halted.outcomes.len(), 2);
    assert!(halted.outcomes[1].violation.is_some());
}
