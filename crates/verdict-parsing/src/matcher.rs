use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use verdict_core::Record;

/// One test-result entry: a test identifier (`Test` followed by digits), an
/// ISO-shaped date, and a PASS/FAIL outcome, separated by whitespace.
///
/// Matching is case-insensitive, but captures keep the document's original
/// casing so validation sees exactly what was written.
static RECORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<test_id>Test\d+)\s+(?P<date>\d{4}-\d{2}-\d{2})\s+(?P<result>PASS|FAIL)")
        .unwrap()
});

fn record_from_captures(caps: &Captures) -> Record {
    Record {
        test_id: caps["test_id"].to_string(),
        date: caps["date"].to_string(),
        result: caps["result"].to_string(),
    }
}

/// Iterate over the records in `text`, lazily and in document order.
///
/// Matches never overlap: each scan resumes at the end of the previous match.
pub fn iter_records(text: &str) -> impl Iterator<Item = Record> + '_ {
    RECORD_RE
        .captures_iter(text)
        .map(|caps| record_from_captures(&caps))
}

/// Collect every record in `text`, in document order.
pub fn find_records(text: &str) -> Vec<Record> {
    let records: Vec<Record> = iter_records(text).collect();
    tracing::debug!(count = records.len(), "matched test-result records");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_report_lines() {
        let text = "Test1234    2025-05-10    PASS\nTest1235    2025-05-11    FAIL";
        let records = find_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].test_id, "Test1234");
        assert_eq!(records[0].date, "2025-05-10");
        assert_eq!(records[0].result, "PASS");
        assert_eq!(records[1].test_id, "Test1235");
        assert_eq!(records[1].date, "2025-05-11");
        assert_eq!(records[1].result, "FAIL");
    }

    #[test]
    fn test_case_insensitive_match_preserves_casing() {
        let records = find_records("test9999 2025-01-01 pass");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_id, "test9999");
        assert_eq!(records[0].result, "pass");
    }

    #[test]
    fn test_no_records_in_unrelated_text() {
        assert!(find_records("no data here").is_empty());
        assert!(find_records("").is_empty());
    }

    #[test]
    fn test_document_order_preserved() {
        let mut text = String::from("Nightly suite results\n");
        for i in 1..=5 {
            text.push_str(&format!("case notes for run {i}\nTest{i} 2025-03-0{i} PASS\n"));
        }
        let records = find_records(&text);
        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.test_id, format!("Test{}", i + 1));
        }
    }

    #[test]
    fn test_fields_split_across_lines() {
        // `\s+` spans newlines, so a record wrapped by the extractor still matches
        let records = find_records("Test3\n2025-02-03\nPASS");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_id, "Test3");
    }

    #[test]
    fn test_matches_do_not_overlap() {
        // Scanning resumes after "PASS", so the second record is still found
        let records = find_records("Test1 2025-01-01 PASSTest2 2025-01-02 FAIL");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].test_id, "Test2");
    }

    #[test]
    fn test_iterator_is_lazy() {
        let text = "Test1 2025-01-01 PASS then Test2 2025-01-02 FAIL";
        let mut iter = iter_records(text);
        assert_eq!(iter.next().map(|r| r.test_id), Some("Test1".to_string()));
        assert_eq!(iter.next().map(|r| r.test_id), Some("Test2".to_string()));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_rescan_yields_same_records() {
        let text = "Test1 2025-01-01 PASS and later Test2 2025-01-02 FAIL";
        let first: Vec<Record> = iter_records(text).collect();
        let second: Vec<Record> = iter_records(text).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_embedded_in_prose() {
        let records = find_records("Run Test42 2024-12-31 FAIL during the nightly suite.");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_id, "Test42");
        assert_eq!(records[0].result, "FAIL");
    }

    #[test]
    fn test_leading_zeros_in_test_id() {
        let records = find_records("Test007 2025-06-15 PASS");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_id, "Test007");
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        // Date must be zero-padded to 4-2-2 digits
        assert!(find_records("Test12 2025-1-1 PASS").is_empty());
        // Test id needs at least one digit
        assert!(find_records("TestX 2025-01-01 PASS").is_empty());
        // Result must be PASS or FAIL
        assert!(find_records("Test5 2025-01-01 UNKNOWN").is_empty());
    }
}
