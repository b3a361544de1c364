//! Digit extraction and padding helpers shared by the identifier modules.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn non_digit() -> &'static Regex {
    static NON_DIGIT: OnceLock<Regex> = OnceLock::new();
    NON_DIGIT.get_or_init(|| Regex::new(r"[^0-9]").expect("valid regex"))
}

/// Remove every non-numeric character from an identifier.
#[must_use]
pub fn clean(identifier: &str) -> Cow<'_, str> {
    non_digit().replace_all(identifier, "")
}

/// Left-pad a digit string with zeros up to `width`.
///
/// Strings already at least `width` long are returned unchanged.
#[must_use]
pub fn zero_pad(digits: &str, width: usize) -> String {
    format!("{digits:0>width$}")
}

/// Convert an all-digit string into its digit values.
///
/// Returns `None` if any character is not an ASCII digit.
#[must_use]
pub fn to_digits(digits: &str) -> Option<Vec<u32>> {
    digits.chars().map(|c| c.to_digit(10)).collect()
}

/// Weighted sum of `digits` against `weights`, pairwise up to the shorter.
#[must_use]
pub fn weighted_sum(digits: &[u32], weights: &[u32]) -> u32 {
    digits.iter().zip(weights).map(|(d, w)| d * w).sum()
}
