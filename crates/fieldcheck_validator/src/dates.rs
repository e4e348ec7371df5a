//! Year and month-year shape checks.
//!
//! Both checks verify structure first and only then the year window, so a
//! malformed value yields a single format violation.

use crate::patterns::{MONTH_YEAR, YEAR};
use chrono::Month;
use fieldcheck_core::{RuleKind, Violation, YearWindow};

/// Month code assumed when a month-year value is a bare year.
const DEFAULT_MONTH_CODE: &str = "001";

/// Checks a four-digit year against a window.
pub(crate) fn check_year(
    field: &str,
    row: usize,
    value: &str,
    window: &YearWindow,
    out: &mut Vec<Violation>,
) {
    let Some(year) = YEAR.captures(value).and_then(|caps| caps[1].parse::<i32>().ok()) else {
        out.push(Violation::field(
            row,
            field,
            value,
            RuleKind::InvalidYearFormat,
            "should be a four-digit year (YYYY)",
        ));
        return;
    };

    check_window(field, row, value, year, window, out);
}

/// Checks a `DDD.YYYY`, `DDD/YYYY` or bare `YYYY` value.
pub(crate) fn check_month_year(
    field: &str,
    row: usize,
    value: &str,
    window: &YearWindow,
    out: &mut Vec<Violation>,
) {
    let Some(caps) = MONTH_YEAR.captures(value) else {
        out.push(Violation::field(
            row,
            field,
            value,
            RuleKind::InvalidMonthYearFormat,
            "should be a month code and year (DDD.YYYY or DDD/YYYY) or a year (YYYY)",
        ));
        return;
    };

    let month_code = caps.get(1).map_or(DEFAULT_MONTH_CODE, |m| m.as_str());
    let is_month = month_code
        .parse::<u8>()
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .is_some();
    if !is_month {
        out.push(Violation::field(
            row,
            field,
            value,
            RuleKind::InvalidMonth,
            format!("month {} is not between 1 and 12", month_code),
        ));
    }

    if let Ok(year) = caps[2].parse::<i32>() {
        check_window(field, row, value, year, window, out);
    }
}

fn check_window(
    field: &str,
    row: usize,
    value: &str,
    year: i32,
    window: &YearWindow,
    out: &mut Vec<Violation>,
) {
    if !window.contains(year) {
        out.push(Violation::field(
            row,
            field,
            value,
            RuleKind::YearOutOfRange,
            format!(
                "year {} is outside {}-{}",
                year,
                window.min_year(),
                window.max_year()
            ),
        ));
    }
}
