use crate::delimiter::Delimiter;
use crate::models::DigitTable;

/// Format a share in `[0, 1]` as a percentage with a fixed number of
/// decimal places.
///
/// # Examples
///
/// ```
/// use benford_core::formatting::format_percentage;
///
/// assert_eq!(format_percentage(0.30103, 1), "30.1%");
/// assert_eq!(format_percentage(0.0, 2), "0.00%");
/// assert_eq!(format_percentage(1.0, 0), "100%");
/// ```
pub fn format_percentage(share: f64, decimals: usize) -> String {
    format!("{:.prec$}%", share * 100.0, prec = decimals)
}

/// Format a byte count with thousands separators.
///
/// # Examples
///
/// ```
/// use benford_core::formatting::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 bytes");
/// assert_eq!(format_bytes(1_048_576), "1,048,576 bytes");
/// ```
pub fn format_bytes(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped} bytes")
}

/// Render a raw row back into delimited text, lossily decoding each value.
pub fn format_row(row: &[Vec<u8>], delimiter: Delimiter) -> String {
    let sep = char::from(delimiter.byte()).to_string();
    row.iter()
        .map(|value| String::from_utf8_lossy(value).into_owned())
        .collect::<Vec<_>>()
        .join(&sep)
}

/// Render a digit table as aligned text, one line per digit.
///
/// ```text
/// digit  expected    found
///     1     30.1%    40.0%
/// ```
pub fn format_digit_table(table: &DigitTable) -> String {
    let mut out = format!("{:>5}  {:>8}  {:>8}\n", "digit", "expected", "found");
    for (digit, freq) in table {
        out.push_str(&format!(
            "{:>5}  {:>8}  {:>8}\n",
            digit,
            format_percentage(freq.expected, 1),
            format_percentage(freq.found, 1)
        ));
    }
    out
}
