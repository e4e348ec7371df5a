//! Per-field rule validation.
//!
//! Each [`FieldSpec`] is turned into a list of [`FieldRule`]s once per run by
//! [`select_rules`]. Every rule then inspects the trimmed cell value of each
//! row independently, so one value can break several rules.

use crate::check::{CheckOutcome, TableCheck};
use crate::patterns::{ALPHA_NUMERIC, DECIMAL, DECIMAL_PARTS, NUMERIC};
use crate::{Table, cell, dates};
use fieldcheck_core::{FieldKind, FieldSpec, NumericRange, RuleKind, Schema, Violation, YearWindow};
use regex::Regex;
use tracing::debug;

/// Shape a non-empty value must have for its field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePattern {
    AlphaNumeric,
    Numeric,
    Decimal,
}

impl TypePattern {
    fn regex(&self) -> &'static Regex {
        match self {
            TypePattern::AlphaNumeric => &ALPHA_NUMERIC,
            TypePattern::Numeric => &NUMERIC,
            TypePattern::Decimal => &DECIMAL,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            TypePattern::AlphaNumeric => "should be alphanumeric",
            TypePattern::Numeric => "should be numeric",
            TypePattern::Decimal => "should be decimal (digits, a point, and digits)",
        }
    }
}

/// One check applied to a single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule<'a> {
    Required,
    Size(usize),
    Pattern(TypePattern),
    DecimalWidth {
        before: Option<u32>,
        after: Option<u32>,
    },
    Range {
        range: NumericRange,
        parse_failure: RuleKind,
    },
    ZeroCheck,
    AllowedValues(&'a [String]),
    Year(YearWindow),
    MonthYear(YearWindow),
}

/// Selects the rules that apply to a field, in evaluation order.
///
/// Types without a pattern contribute no type-specific rules.
pub fn select_rules(spec: &FieldSpec) -> Vec<FieldRule<'_>> {
    let mut rules = Vec::new();

    if spec.required {
        rules.push(FieldRule::Required);
    }
    if let Some(size) = spec.size {
        rules.push(FieldRule::Size(size));
    }

    match &spec.kind {
        FieldKind::AlphaNumeric => rules.push(FieldRule::Pattern(TypePattern::AlphaNumeric)),
        FieldKind::Numeric { range } => {
            rules.push(FieldRule::Pattern(TypePattern::Numeric));
            if let Some(range) = range {
                rules.push(FieldRule::Range {
                    range: *range,
                    parse_failure: RuleKind::InvalidNumeric,
                });
            }
        }
        FieldKind::Decimal {
            size_before_decimal,
            size_after_decimal,
            range,
        } => {
            rules.push(FieldRule::Pattern(TypePattern::Decimal));
            if size_before_decimal.is_some() || size_after_decimal.is_some() {
                rules.push(FieldRule::DecimalWidth {
                    before: *size_before_decimal,
                    after: *size_after_decimal,
                });
            }
            if let Some(range) = range {
                rules.push(FieldRule::Range {
                    range: *range,
                    parse_failure: RuleKind::InvalidDecimal,
                });
            }
        }
        FieldKind::Year { window: Some(window) } => rules.push(FieldRule::Year(*window)),
        FieldKind::MonthYear { window: Some(window) } => {
            rules.push(FieldRule::MonthYear(*window))
        }
        FieldKind::Year { window: None }
        | FieldKind::MonthYear { window: None }
        | FieldKind::Other { .. } => {}
    }

    if spec.zero_check {
        rules.push(FieldRule::ZeroCheck);
    }
    if let Some(values) = &spec.allowed_values {
        rules.push(FieldRule::AllowedValues(values));
    }

    rules
}

/// Parses a value as a finite floating-point number.
fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl FieldRule<'_> {
    /// Applies the rule to a trimmed value, appending any violations.
    pub fn apply(&self, field: &str, row: usize, value: &str, out: &mut Vec<Violation>) {
        let violation =
            |rule: RuleKind, message: String| Violation::field(row, field, value, rule, message);

        match self {
            FieldRule::Required => {
                if value.is_empty() {
                    out.push(violation(
                        RuleKind::RequiredMissing,
                        "is required but missing".to_string(),
                    ));
                }
            }
            FieldRule::Size(size) => {
                let length = value.chars().count();
                if length > *size {
                    out.push(violation(
                        RuleKind::SizeExceeded,
                        format!("exceeds max size {} (length {})", size, length),
                    ));
                }
            }
            FieldRule::Pattern(pattern) => {
                if !value.is_empty() && !pattern.regex().is_match(value) {
                    out.push(violation(RuleKind::InvalidPattern, pattern.message().to_string()));
                }
            }
            FieldRule::DecimalWidth { before, after } => {
                let Some(caps) = DECIMAL_PARTS.captures(value) else {
                    return;
                };
                let integer_digits = caps.get(1).map_or(0, |m| m.len());
                let fraction_digits = caps.get(2).map_or(0, |m| m.len());
                if integer_digits + fraction_digits == 0 {
                    return;
                }

                if let Some(limit) = before.filter(|&limit| integer_digits > limit as usize) {
                    out.push(violation(
                        RuleKind::DecimalWidthExceeded,
                        format!(
                            "has {} digits before the decimal point, max {}",
                            integer_digits, limit
                        ),
                    ));
                }
                if let Some(limit) = after.filter(|&limit| fraction_digits > limit as usize) {
                    out.push(violation(
                        RuleKind::DecimalWidthExceeded,
                        format!(
                            "has {} digits after the decimal point, max {}",
                            fraction_digits, limit
                        ),
                    ));
                }
            }
            FieldRule::Range {
                range,
                parse_failure,
            } => {
                if value.is_empty() {
                    return;
                }
                match parse_number(value) {
                    Some(number) if !range.contains(number) => out.push(violation(
                        RuleKind::OutOfRange,
                        format!(
                            "value {} out of range {}-{}",
                            value,
                            range.min(),
                            range.max()
                        ),
                    )),
                    Some(_) => {}
                    None => out.push(violation(
                        *parse_failure,
                        "should be a number for range check".to_string(),
                    )),
                }
            }
            FieldRule::ZeroCheck => {
                if !value.is_empty() && parse_number(value) == Some(0.0) {
                    out.push(violation(
                        RuleKind::ZeroValueDisallowed,
                        "should not be zero".to_string(),
                    ));
                }
            }
            FieldRule::AllowedValues(allowed) => {
                if !value.is_empty() && !allowed.iter().any(|a| a == value) {
                    out.push(violation(
                        RuleKind::NotAllowedValue,
                        format!(
                            "has an invalid value '{}'. Allowed values: [{}]",
                            value,
                            allowed.join(", ")
                        ),
                    ));
                }
            }
            FieldRule::Year(window) => {
                if !value.is_empty() {
                    dates::check_year(field, row, value, window, out);
                }
            }
            FieldRule::MonthYear(window) => {
                if !value.is_empty() {
                    dates::check_month_year(field, row, value, window, out);
                }
            }
        }
    }
}

/// A field matched to its column with its selected rules.
struct FieldPlan<'a> {
    name: &'a str,
    column: usize,
    rules: Vec<FieldRule<'a>>,
}

/// Validates every field value of every row against its field's rules.
pub struct FieldValidator;

impl FieldValidator {
    /// Creates a new field validator.
    pub fn new() -> Self {
        Self
    }

    fn plan<'a>(&self, schema: &'a Schema, table: &Table) -> Vec<FieldPlan<'a>> {
        schema
            .fields
            .iter()
            .filter_map(|spec| match table.column_index(&spec.name) {
                Some(column) => Some(FieldPlan {
                    name: &spec.name,
                    column,
                    rules: select_rules(spec),
                }),
                None => {
                    debug!(field = %spec.name, "field has no matching column, skipping");
                    None
                }
            })
            .collect()
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCheck for FieldValidator {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn check(&self, schema: &Schema, table: &Table) -> CheckOutcome {
        let plans = self.plan(schema, table);
        let mut outcome = CheckOutcome::default();

        for (row_number, row) in table.numbered_rows() {
            for plan in &plans {
                let value = cell(row, plan.column).trim();
                for rule in &plan.rules {
                    outcome.evaluations += 1;
                    rule.apply(plan.name, row_number, value, &mut outcome.violations);
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_core::{FieldSpecBuilder, SchemaBuilder};
    use pretty_assertions::assert_eq;

    fn rules_broken(spec: FieldSpec, value: &str) -> Vec<RuleKind> {
        let mut out = Vec::new();
        for rule in select_rules(&spec) {
            rule.apply(&spec.name, 1, value, &mut out);
        }
        out.into_iter().map(|v| v.rule).collect()
    }

    fn alpha(name: &str) -> FieldSpecBuilder {
        FieldSpecBuilder::new(name, FieldKind::AlphaNumeric)
    }

    fn decimal(before: Option<u32>, after: Option<u32>, range: Option<(f64, f64)>) -> FieldKind {
        FieldKind::Decimal {
            size_before_decimal: before,
            size_after_decimal: after,
            range: range.map(|(min, max)| NumericRange::new(min, max).unwrap()),
        }
    }

    #[test]
    fn test_required_reported_once() {
        let spec = alpha("F")
            .required(true)
            .size(3)
            .zero_check(true)
            .allowed_values(vec!["A".to_string()])
            .build();
        assert_eq!(rules_broken(spec.clone(), ""), vec![RuleKind::RequiredMissing]);
        assert_eq!(rules_broken(spec, "   ".trim()), vec![RuleKind::RequiredMissing]);
    }

    #[test]
    fn test_size_boundary() {
        let spec = alpha("F").size(5).build();
        assert!(rules_broken(spec.clone(), "ABCDE").is_empty());
        assert_eq!(rules_broken(spec, "ABCDEF"), vec![RuleKind::SizeExceeded]);
    }

    #[test]
    fn test_size_counts_characters() {
        let spec = FieldSpecBuilder::new("F", FieldKind::Other { declared: None })
            .size(3)
            .build();
        assert!(rules_broken(spec, "äöü").is_empty());
    }

    #[test]
    fn test_type_patterns() {
        let numeric = FieldSpecBuilder::new("N", FieldKind::Numeric { range: None }).build();
        assert!(rules_broken(numeric.clone(), "9876543210").is_empty());
        assert_eq!(rules_broken(numeric, "12.3"), vec![RuleKind::InvalidPattern]);

        let dec = FieldSpecBuilder::new("D", decimal(None, None, None)).build();
        assert!(rules_broken(dec.clone(), "123.45").is_empty());
        assert_eq!(rules_broken(dec, "1500"), vec![RuleKind::InvalidPattern]);

        assert_eq!(
            rules_broken(alpha("A").build(), "LONG_TEXT"),
            vec![RuleKind::InvalidPattern]
        );
        assert!(rules_broken(alpha("A").build(), "").is_empty());
    }

    #[test]
    fn test_unknown_type_is_permissive() {
        let spec = FieldSpecBuilder::new(
            "F",
            FieldKind::Other {
                declared: Some("date".to_string()),
            },
        )
        .build();
        assert!(select_rules(&spec).is_empty());
    }

    #[test]
    fn test_decimal_range() {
        let spec = FieldSpecBuilder::new("D", decimal(None, None, Some((0.0, 1000.0)))).build();
        assert!(rules_broken(spec.clone(), "123.45").is_empty());
        assert!(rules_broken(spec.clone(), "1000.0").is_empty());
        assert_eq!(rules_broken(spec.clone(), "1500.99"), vec![RuleKind::OutOfRange]);
        assert_eq!(
            rules_broken(spec, "abc"),
            vec![RuleKind::InvalidPattern, RuleKind::InvalidDecimal]
        );
    }

    #[test]
    fn test_numeric_parse_failure() {
        let spec = FieldSpecBuilder::new(
            "N",
            FieldKind::Numeric {
                range: Some(NumericRange::new(0.0, 10.0).unwrap()),
            },
        )
        .build();
        assert_eq!(
            rules_broken(spec.clone(), "inf"),
            vec![RuleKind::InvalidPattern, RuleKind::InvalidNumeric]
        );
        assert_eq!(
            rules_broken(spec, "-5"),
            vec![RuleKind::InvalidPattern, RuleKind::OutOfRange]
        );
    }

    #[test]
    fn test_decimal_width_each_side() {
        let spec = FieldSpecBuilder::new("D", decimal(Some(3), Some(2), None)).build();
        assert!(rules_broken(spec.clone(), "123.45").is_empty());
        assert_eq!(
            rules_broken(spec.clone(), "1234.5"),
            vec![RuleKind::DecimalWidthExceeded]
        );
        assert_eq!(
            rules_broken(spec.clone(), "1234.567"),
            vec![RuleKind::DecimalWidthExceeded, RuleKind::DecimalWidthExceeded]
        );
        assert_eq!(
            rules_broken(spec, "12345"),
            vec![RuleKind::InvalidPattern, RuleKind::DecimalWidthExceeded]
        );
    }

    #[test]
    fn test_zero_check() {
        let spec = FieldSpecBuilder::new("N", FieldKind::Numeric { range: None })
            .zero_check(true)
            .build();
        assert_eq!(rules_broken(spec.clone(), "0"), vec![RuleKind::ZeroValueDisallowed]);
        assert_eq!(rules_broken(spec.clone(), "000"), vec![RuleKind::ZeroValueDisallowed]);
        assert!(rules_broken(spec.clone(), "10").is_empty());
        assert!(rules_broken(spec, "").is_empty());
    }

    #[test]
    fn test_allowed_values() {
        let spec = alpha("F")
            .allowed_values(vec!["ValidText".to_string(), "XYZ789".to_string()])
            .build();
        assert!(rules_broken(spec.clone(), "XYZ789").is_empty());
        assert!(rules_broken(spec.clone(), "").is_empty());
        assert_eq!(
            rules_broken(spec, "InvalidValue"),
            vec![RuleKind::NotAllowedValue]
        );
    }

    #[test]
    fn test_year_rule_skips_empty() {
        let spec = FieldSpecBuilder::new(
            "Y",
            FieldKind::Year {
                window: Some(YearWindow::default()),
            },
        )
        .build();
        assert!(rules_broken(spec.clone(), "").is_empty());
        assert!(rules_broken(spec.clone(), "2025").is_empty());
        assert_eq!(rules_broken(spec, "1899"), vec![RuleKind::YearOutOfRange]);
    }

    #[test]
    fn test_year_without_check_has_no_rules() {
        let spec = FieldSpecBuilder::new("Y", FieldKind::Year { window: None }).build();
        assert!(select_rules(&spec).is_empty());
    }

    #[test]
    fn test_field_validator_over_table() {
        let schema = SchemaBuilder::new()
            .columns(["A", "B"])
            .field(alpha("A").required(true).size(3).build())
            .field(alpha("MISSING").required(true).build())
            .build();
        let table = Table::from_strs(&["A", "B"], &[&[" AB ", "x"], &["ABCD"], &[""]]);

        let outcome = FieldValidator::new().check(&schema, &table);
        let found: Vec<(Option<usize>, RuleKind)> =
            outcome.violations.iter().map(|v| (v.row, v.rule)).collect();

        assert_eq!(
            found,
            vec![
                (Some(2), RuleKind::SizeExceeded),
                (Some(3), RuleKind::RequiredMissing),
            ]
        );
        assert_eq!(outcome.violations[0].value.as_deref(), Some("ABCD"));
        assert_eq!(outcome.evaluations, 9);
    }
}
