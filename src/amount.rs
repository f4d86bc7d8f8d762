use std::sync::LazyLock;

use regex::Regex;

const THOUSAND: i64 = 1_000;
const MILLION: i64 = 1_000_000;

/// Shorthand grammar, first match wins: digits with a scale unit and an
/// optional fractional tail (`2k5`, `1m250`), digits with a bare scale unit
/// (`150k`, `1tr`), or bare digits. `tr` is a synonym for `m`.
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:k|tr|m)\d+|\d+(?:k|tr|m)|\d+").expect("valid amount pattern")
});

/// A monetary amount extracted from free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountToken {
    /// Normalized integer value. Zero when the matched shorthand is
    /// malformed (fractional tail longer than the scale allows).
    pub value: i64,
    /// The shorthand substring that matched, after separator stripping.
    pub matched: String,
}

/// Best-effort extraction of the first monetary shorthand in `source`.
///
/// Dots are treated as thousands separators and stripped before matching
/// (`"2.500k"` reads as `2500k`). Returns `None` when no shorthand occurs
/// anywhere in the input; this is not a validating parser.
pub fn extract_amount(source: &str) -> Option<AmountToken> {
    let stripped = source.replace('.', "");
    let matched = AMOUNT_PATTERN.find(&stripped)?.as_str().to_string();
    let value = evaluate(&matched);
    Some(AmountToken { value, matched })
}

fn evaluate(shorthand: &str) -> i64 {
    if shorthand.contains('k') {
        thousand(shorthand)
    } else if shorthand.contains("tr") || shorthand.contains('m') {
        million(shorthand)
    } else {
        shorthand.parse().unwrap_or(0)
    }
}

/// `<p>k<s>`: `p` thousands plus `s` read as the decimal fraction of a
/// thousand (`2k5` = 2500). A tail longer than 3 digits cannot encode a
/// sub-thousand fraction and yields zero.
fn thousand(shorthand: &str) -> i64 {
    let (prefix, suffix) = match shorthand.split_once('k') {
        Some(parts) => parts,
        None => return 0,
    };
    if suffix.len() > 3 {
        return 0;
    }
    let whole: i64 = prefix.parse().unwrap_or(0);
    whole * THOUSAND + fraction_of(suffix, 100.0)
}

/// `<p>m<s>` (or `tr`): `p` millions plus `s` read as the decimal fraction
/// of a million (`1m250` = 1,250,000, `1m2345` = 1,234,500). The fraction is
/// scaled in one step so tails past 3 digits keep their precision. Tail
/// ceiling is 6 digits.
fn million(shorthand: &str) -> i64 {
    let normalized = shorthand.replace("tr", "m");
    let (prefix, suffix) = match normalized.split_once('m') {
        Some(parts) => parts,
        None => return 0,
    };
    if suffix.len() > 6 {
        return 0;
    }
    let whole: i64 = prefix.parse().unwrap_or(0);
    whole * MILLION + fraction_of(suffix, 100_000.0)
}

/// Reads `digits` as a decimal fraction scaled by `unit`, truncating like
/// the integer arithmetic callers expect: `"5"` with unit 100 is 500,
/// `"25"` is 250, `"250"` is 250.
#[allow(clippy::cast_possible_truncation)]
fn fraction_of(digits: &str, unit: f64) -> i64 {
    if digits.is_empty() {
        return 0;
    }
    let value: f64 = digits.parse().unwrap_or(0.0);
    let denominator = 10f64.powi(i32::try_from(digits.len()).unwrap_or(i32::MAX) - 1);
    (value / denominator * unit) as i64
}
