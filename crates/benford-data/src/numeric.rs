//! Integer literal recognition on raw column values.
//!
//! Accepted form: optional surrounding whitespace (vertical tab included), an optional `+` or
//! `-` sign, then decimal digits. Single underscores may separate digits
//! (`1_000`). Values are never converted to a fixed-width integer, so
//! arbitrarily long literals are accepted.

use crate::splitter::trim_whitespace;

/// Returns the literal's digits (sign and underscores removed), or `None`
/// when `value` is not an integer literal.
fn integer_digits(value: &[u8]) -> Option<Vec<u8>> {
    let trimmed = trim_whitespace(value);
    let unsigned = match trimmed.first() {
        Some(b'+') | Some(b'-') => &trimmed[1..],
        _ => trimmed,
    };

    let mut digits = Vec::with_capacity(unsigned.len());
    let mut prev_digit = false;
    for &b in unsigned {
        match b {
            b'0'..=b'9' => {
                digits.push(b);
                prev_digit = true;
            }
            b'_' if prev_digit => prev_digit = false,
            _ => return None,
        }
    }

    // Empty input, or a dangling underscore.
    if digits.is_empty() || !prev_digit {
        return None;
    }
    Some(digits)
}

/// `true` when `value` parses as an integer.
pub fn is_integer(value: &[u8]) -> bool {
    integer_digits(value).is_some()
}

/// The first significant decimal digit (1–9) of an integer literal.
///
/// Returns `None` for zero and for values that are not integers.
pub fn leading_digit(value: &[u8]) -> Option<u8> {
    integer_digits(value)?
        .into_iter()
        .find(|b| *b != b'0')
        .map(|b| b - b'0')
}
