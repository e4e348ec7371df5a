//! End-to-end validation of a schema document against a sample batch.
//!
//! The batch mixes clean rows with one exact duplicate, an oversized value, a
//! blank required pair, an out-of-range decimal, and a disallowed value.

use fieldcheck_core::{RuleKind, ValidationContext, ValidationReport};
use fieldcheck_validator::{DataValidator, Table};
use pretty_assertions::assert_eq;

const SCHEMA_JSON: &str = r#"
{
    "fields": {
        "FIELD1": {
            "size": 500,
            "type": "alpha_numeric",
            "required": true,
            "unique": true
        },
        "FIELD2": {
            "size": 100,
            "type": "alpha_numeric",
            "required": true,
            "allowed_values": ["ValidText", "XYZ789"],
            "unique": true
        },
        "FIELD_DEC1": {
            "size": 21,
            "size_before_decimal": 10,
            "size_after_decimal": 10,
            "type": "decimal",
            "required": false,
            "range": [0, 1000]
        },
        "FIELD_NUMERIC1": {
            "size": 21,
            "type": "numeric",
            "required": false
        }
    },
    "duplicate_field_check": true,
    "columns": ["FIELD1", "FIELD2", "FIELD_DEC1", "FIELD_NUMERIC1"]
}
"#;

const HEADER: [&str; 4] = ["FIELD1", "FIELD2", "FIELD_DEC1", "FIELD_NUMERIC1"];

fn sample_batch() -> Table {
    let long_value = "A".repeat(501);
    let rows: Vec<Vec<String>> = [
        ["ABC123", "XYZ789", "123.45", "9876543210"],
        ["ABC123", "XYZ789", "123.45", "9876543210"],
        [long_value.as_str(), "ValidText", "12.34", "5678"],
        ["", "", "456.78", "90"],
        ["Value123", "InvalidValue", "1500.99", "0"],
        ["Value456", "ValidText", "999.99", "42"],
    ]
    .iter()
    .map(|row| row.iter().map(|v| v.to_string()).collect())
    .collect();

    Table::new(HEADER.iter().map(|h| h.to_string()).collect(), rows)
}

fn run(context: &ValidationContext) -> ValidationReport {
    let schema = fieldcheck_parser::parse_json(SCHEMA_JSON).expect("schema parses");
    DataValidator::new().validate(&schema, &sample_batch(), context)
}

#[test]
fn test_sample_batch_counts() {
    let report = run(&ValidationContext::new());

    assert!(!report.passed);
    assert_eq!(report.count(RuleKind::DuplicateRow), 1);
    assert_eq!(report.count(RuleKind::DuplicateUniqueCombination), 1);
    assert_eq!(report.count(RuleKind::SizeExceeded), 1);
    assert_eq!(report.count(RuleKind::RequiredMissing), 2);
    assert_eq!(report.count(RuleKind::OutOfRange), 1);
    assert_eq!(report.count(RuleKind::NotAllowedValue), 1);
    assert_eq!(report.violations.len(), 7);
    assert_eq!(report.stats.rows_validated, 6);
    assert_eq!(report.stats.fields_checked, 4);
}

#[test]
fn test_sample_batch_locations() {
    let report = run(&ValidationContext::new());

    let located: Vec<(Option<usize>, Option<&str>, RuleKind)> = report
        .violations
        .iter()
        .map(|v| (v.row, v.field.as_deref(), v.rule))
        .collect();

    assert_eq!(
        located,
        vec![
            (Some(2), None, RuleKind::DuplicateRow),
            (Some(2), None, RuleKind::DuplicateUniqueCombination),
            (Some(3), Some("FIELD1"), RuleKind::SizeExceeded),
            (Some(4), Some("FIELD1"), RuleKind::RequiredMissing),
            (Some(4), Some("FIELD2"), RuleKind::RequiredMissing),
            (Some(5), Some("FIELD2"), RuleKind::NotAllowedValue),
            (Some(5), Some("FIELD_DEC1"), RuleKind::OutOfRange),
        ]
    );
    assert_eq!(report.violations[1].value.as_deref(), Some("ABC123|XYZ789"));
    assert_eq!(report.violations[6].value.as_deref(), Some("1500.99"));
}

#[test]
fn test_runs_are_identical() {
    let first = serde_json::to_string(&run(&ValidationContext::new())).unwrap();
    let second = serde_json::to_string(&run(&ValidationContext::new())).unwrap();
    let parallel =
        serde_json::to_string(&run(&ValidationContext::new().with_parallel(true))).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, parallel);
}

#[test]
fn test_counts_are_ordered_by_rule() {
    let report = run(&ValidationContext::new());
    let rules: Vec<RuleKind> = report.counts().into_keys().collect();

    assert_eq!(
        rules,
        vec![
            RuleKind::RequiredMissing,
            RuleKind::SizeExceeded,
            RuleKind::OutOfRange,
            RuleKind::NotAllowedValue,
            RuleKind::DuplicateRow,
            RuleKind::DuplicateUniqueCombination,
        ]
    );
}

#[test]
fn test_reordered_header_reports_only_mismatch() {
    let schema = fieldcheck_parser::parse_json(SCHEMA_JSON).unwrap();
    let table = Table::from_strs(
        &["FIELD2", "FIELD1", "FIELD_DEC1", "FIELD_NUMERIC1"],
        &[&["", "", "abc", "x"], &["", "", "abc", "x"]],
    );

    let report = DataValidator::new().validate(&schema, &table, &ValidationContext::new());

    assert!(!report.passed);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule, RuleKind::SchemaMismatch);
    assert!(!report.alignment.unwrap().order_ok);
}

#[test]
fn test_underscored_value_is_a_pattern_failure_not_oversized() {
    let mut schema = fieldcheck_parser::parse_json(SCHEMA_JSON).unwrap();
    for spec in schema.fields.iter_mut().filter(|spec| spec.name == "FIELD_NUMERIC1") {
        spec.zero_check = true;
    }
    let table = Table::from_strs(
        &HEADER,
        &[
            &["ABC123", "XYZ789", "123.45", "9876543210"],
            &["ABC123", "XYZ789", "123.45", "9876543210"],
            &["LONG_TEXT_EXCEEDING_LIMIT", "ValidText", "12.34", "5678"],
            &["", "", "456.78", "90"],
            &["Value123", "InvalidValue", "1500.99", "0"],
        ],
    );

    let report = DataValidator::new().validate(&schema, &table, &ValidationContext::new());

    let located: Vec<(Option<usize>, Option<&str>, RuleKind)> = report
        .violations
        .iter()
        .map(|v| (v.row, v.field.as_deref(), v.rule))
        .collect();
    assert_eq!(
        located,
        vec![
            (Some(2), None, RuleKind::DuplicateRow),
            (Some(2), None, RuleKind::DuplicateUniqueCombination),
            (Some(3), Some("FIELD1"), RuleKind::InvalidPattern),
            (Some(4), Some("FIELD1"), RuleKind::RequiredMissing),
            (Some(4), Some("FIELD2"), RuleKind::RequiredMissing),
            (Some(5), Some("FIELD2"), RuleKind::NotAllowedValue),
            (Some(5), Some("FIELD_DEC1"), RuleKind::OutOfRange),
            (Some(5), Some("FIELD_NUMERIC1"), RuleKind::ZeroValueDisallowed),
        ]
    );
    assert_eq!(report.count(RuleKind::SizeExceeded), 0);
}

#[test]
fn test_unique_field_missing_from_header_flags_nothing() {
    let schema = fieldcheck_parser::parse_json(
        r#"{
            "fields": {
                "A": {"type": "alpha_numeric"},
                "ID": {"type": "alpha_numeric", "required": true, "unique": true}
            },
            "columns": ["A"]
        }"#,
    )
    .unwrap();
    let table = Table::from_strs(&["A"], &[&["x"], &["y"], &["z"]]);

    let report = DataValidator::new().validate(&schema, &table, &ValidationContext::new());

    assert!(report.passed);
    assert_eq!(report.count(RuleKind::DuplicateUniqueCombination), 0);
}
