//! The fixed record schema and its validator.
//!
//! The schema is a three-field object: `test_id` (string), `date`
//! (date-formatted string), `result` (one of `PASS` | `FAIL`), all
//! required. Validation is a pure predicate over already-produced records:
//! no mutation, no coercion. Checks run in a fixed order (required keys,
//! string types, date format, result enum) and the first violated
//! constraint is reported for a given record.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::Record;

pub const FIELD_TEST_ID: &str = "test_id";
pub const FIELD_DATE: &str = "date";
pub const FIELD_RESULT: &str = "result";

/// Required fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 3] = [FIELD_TEST_ID, FIELD_DATE, FIELD_RESULT];

/// The `result` enumeration. Matching upstream is case-insensitive, but the
/// schema is exact: a captured lowercase `pass` fails here.
pub const RESULT_VALUES: [&str; 2] = ["PASS", "FAIL"];

/// A violated schema constraint, naming the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("record is not an object")]
    NotAnObject,
    #[error("'{field}' is a required property")]
    MissingField { field: &'static str },
    #[error("'{field}' must be a string, got {found}")]
    NotAString {
        field: &'static str,
        found: &'static str,
    },
    #[error("'date' must be a calendar-valid YYYY-MM-DD date, got '{value}'")]
    InvalidDate { value: String },
    #[error("'result' must be one of PASS, FAIL, got '{value}'")]
    InvalidResult { value: String },
}

impl Violation {
    /// The field this violation names, if it names one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Violation::NotAnObject => None,
            Violation::MissingField { field } | Violation::NotAString { field, .. } => Some(field),
            Violation::InvalidDate { .. } => Some(FIELD_DATE),
            Violation::InvalidResult { .. } => Some(FIELD_RESULT),
        }
    }
}

/// Check that `s` is a calendar-valid date in the fixed YYYY-MM-DD shape.
///
/// The shape check comes first so that `999-1-1` (which chrono would accept)
/// is rejected; the chrono parse then rejects shapes like `2025-02-30` that
/// name no real day.
pub fn is_valid_date(s: &str) -> bool {
    static SHAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
    SHAPE_RE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Validate an already-typed record.
///
/// Presence and string-ness hold by construction for [`Record`]; the date
/// and enum constraints still apply.
pub fn validate_record(record: &Record) -> Result<(), Violation> {
    if !is_valid_date(&record.date) {
        return Err(Violation::InvalidDate {
            value: record.date.clone(),
        });
    }
    if !RESULT_VALUES.contains(&record.result.as_str()) {
        return Err(Violation::InvalidResult {
            value: record.result.clone(),
        });
    }
    Ok(())
}

/// Validate a JSON mapping against the record schema.
pub fn validate_value(value: &Value) -> Result<(), Violation> {
    let map = value.as_object().ok_or(Violation::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !map.contains_key(field) {
            return Err(Violation::MissingField { field });
        }
    }

    for field in REQUIRED_FIELDS {
        if let Some(v) = map.get(field)
            && !v.is_string()
        {
            return Err(Violation::NotAString {
                field,
                found: json_type(v),
            });
        }
    }

    if let Some(date) = map.get(FIELD_DATE).and_then(Value::as_str)
        && !is_valid_date(date)
    {
        return Err(Violation::InvalidDate {
            value: date.to_string(),
        });
    }

    if let Some(result) = map.get(FIELD_RESULT).and_then(Value::as_str)
        && !RESULT_VALUES.contains(&result)
    {
        return Err(Violation::InvalidResult {
            value: result.to_string(),
        });
    }

    Ok(())
}

/// The schema in its JSON Schema interchange form, as printed by
/// `verdict-cli schema`.
pub fn schema_json() -> Value {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "TestResultRecord",
        "type": "object",
        "properties": {
            FIELD_TEST_ID: { "type": "string" },
            FIELD_DATE: { "type": "string", "format": "date" },
            FIELD_RESULT: { "type": "string", "enum": RESULT_VALUES },
        },
        "required": REQUIRED_FIELDS,
    })
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
