//! First-digit distribution of a numeric column.
//!
//! The pipeline only depends on the [`DigitDistribution`] trait;
//! [`BenfordFirstDigits`] is the implementation used by the binary.

use benford_core::models::{DigitFrequency, DigitTable};
use tracing::debug;

use crate::numeric::leading_digit;

/// Computes an expected-vs-found table over raw integer values.
pub trait DigitDistribution {
    /// Returns one entry per digit 1–9, in digit order.
    fn distribution(&self, values: &[&[u8]]) -> DigitTable;
}

// ── BenfordFirstDigits ────────────────────────────────────────────────────────

/// Compares leading digits against Benford's law.
///
/// Values without a leading digit (zero, or anything that is not an
/// integer) are left out of the `found` shares.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenfordFirstDigits;

impl BenfordFirstDigits {
    /// Benford share of `digit` as a leading digit.
    pub fn expected(digit: u8) -> f64 {
        (1.0 + 1.0 / f64::from(digit)).log10()
    }

    /// Occurrences of each leading digit; index 0 counts digit 1.
    pub fn count_leading_digits(values: &[&[u8]]) -> [usize; 9] {
        let mut counts = [0usize; 9];
        for digit in values.iter().filter_map(|v| leading_digit(v)) {
            counts[usize::from(digit - 1)] += 1;
        }
        counts
    }
}

impl DigitDistribution for BenfordFirstDigits {
    fn distribution(&self, values: &[&[u8]]) -> DigitTable {
        let counts = Self::count_leading_digits(values);
        let total: usize = counts.iter().sum();
        debug!(
            "{} of {} values have a leading digit",
            total,
            values.len()
        );

        (1..=9u8)
            .map(|digit| {
                let count = counts[usize::from(digit - 1)];
                let found = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                (
                    digit,
                    DigitFrequency {
                        expected: Self::expected(digit),
                        found,
                    },
                )
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vals<'a>(items: &[&'a str]) -> Vec<&'a [u8]> {
        items.iter().map(|s| s.as_bytes()).collect()
    }

    fn round3(v: f64) -> f64 {
        (v * 1000.0).round() / 1000.0
    }

    #[test]
    fn test_expected_distribution() {
        let table = BenfordFirstDigits.distribution(&[]);
        let expected: Vec<f64> = table.values().map(|f| round3(f.expected)).collect();
        assert_eq!(
            expected,
            vec![0.301, 0.176, 0.125, 0.097, 0.079, 0.067, 0.058, 0.051, 0.046]
        );
    }

    #[test]
    fn test_expected_sums_to_one() {
        let sum: f64 = (1..=9).map(BenfordFirstDigits::expected).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_labels_are_one_to_nine() {
        let table = BenfordFirstDigits.distribution(&vals(&["1"]));
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), (1..=9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_all_zero_values_find_nothing() {
        let values = vals(&["0", "0", "0", "0"]);
        let table = BenfordFirstDigits.distribution(&values);
        assert!(table.values().all(|f| f.found == 0.0));
    }

    #[test]
    fn test_found_shares() {
        let values = vals(&["2930", "4782", "709", "433", " 0 "]);
        let table = BenfordFirstDigits.distribution(&values);
        assert_eq!(table[&2].found, 0.25);
        assert_eq!(table[&4].found, 0.5);
        assert_eq!(table[&7].found, 0.25);
        assert_eq!(table[&1].found, 0.0);

        let total: f64 = table.values().map(|f| f.found).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_count_leading_digits_ignores_non_integers() {
        let values = vals(&["-19", "x", "1_5", "900"]);
        let counts = BenfordFirstDigits::count_leading_digits(&values);
        assert_eq!(counts, [2, 0, 0, 0, 0, 0, 0, 0, 1]);
    }
}
