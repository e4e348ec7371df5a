//! Value shape patterns shared by the field rules.

use regex::Regex;
use std::sync::LazyLock;

/// ASCII letters and digits, possibly empty.
pub(crate) static ALPHA_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]*$").expect("valid alpha_numeric pattern"));

/// Unsigned integer digits.
pub(crate) static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid numeric pattern"));

/// Integer digits, a point, and fractional digits.
pub(crate) static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("valid decimal pattern"));

/// Loose decimal split into integer and fractional digit groups.
pub(crate) static DECIMAL_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]*)(?:\.([0-9]*))?$").expect("valid decimal parts pattern")
});

/// Four-digit year.
pub(crate) static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})$").expect("valid year pattern"));

/// Optional three-digit month code with a `.` or `/` separator, then a year.
pub(crate) static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9]{3})[./])?([0-9]{4})$").expect("valid month_year pattern")
});
