//! Raw bytes → [`Grid`] of column values.
//!
//! Lines are split with universal newline semantics (`\n`, `\r\n` and `\r`),
//! then each line is split on the configured delimiter. Header values are
//! stripped of surrounding whitespace, data values are kept verbatim.

use std::collections::BTreeMap;

use benford_core::delimiter::Delimiter;
use benford_core::models::{Row, ValidationIssue};
use tracing::debug;

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Rows of column values; row 0 is the header row.
///
/// Built once per validation run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// All rows, header first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The stripped header values.
    pub fn header(&self) -> &Row {
        &self.rows[0]
    }

    /// Every row after the header.
    pub fn data_rows(&self) -> &[Row] {
        &self.rows[1..]
    }

    /// Number of rows including the header; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when at least one data row follows the header.
    pub fn has_data_rows(&self) -> bool {
        self.rows.len() > 1
    }

    /// Row index → number of values in that row.
    pub fn row_lengths(&self) -> BTreeMap<usize, usize> {
        self.rows.iter().map(Vec::len).enumerate().collect()
    }
}

// ── Whitespace ────────────────────────────────────────────────────────────────

/// Bytes treated as surrounding whitespace. Unlike
/// [`u8::is_ascii_whitespace`], this includes vertical tab (`\x0b`).
const WHITESPACE: &[u8] = b" \t\n\r\x0b\x0c";

/// Strip leading and trailing [`WHITESPACE`] bytes.
pub fn trim_whitespace(value: &[u8]) -> &[u8] {
    let start = value
        .iter()
        .position(|b| !WHITESPACE.contains(b))
        .unwrap_or(value.len());
    let end = value
        .iter()
        .rposition(|b| !WHITESPACE.contains(b))
        .map_or(start, |i| i + 1);
    &value[start..end]
}

// ── Splitting ─────────────────────────────────────────────────────────────────

/// Split `data` into lines on `\n`, `\r\n` or `\r`.
///
/// A trailing line terminator does not produce an extra empty line, and an
/// empty buffer yields no lines at all.
pub fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'\n' => {
                lines.push(&data[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&data[start..i]);
                i += if data.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < data.len() {
        lines.push(&data[start..]);
    }
    lines
}

/// Split one line on `delimiter`. An empty line yields a single empty value.
pub fn split_columns(line: &[u8], delimiter: Delimiter) -> Row {
    let sep = delimiter.byte();
    line.split(|b| *b == sep).map(<[u8]>::to_vec).collect()
}

/// Build a [`Grid`] from raw bytes.
///
/// Fails with [`ValidationIssue::MalformedInput`] when no rows can be
/// produced.
pub fn split_grid(data: &[u8], delimiter: Delimiter) -> Result<Grid, ValidationIssue> {
    let mut rows: Vec<Row> = split_lines(data)
        .into_iter()
        .map(|line| split_columns(line, delimiter))
        .collect();

    let Some(header) = rows.first_mut() else {
        debug!("Nothing to split with delimiter {}", delimiter);
        return Err(ValidationIssue::MalformedInput { delimiter });
    };
    for value in header.iter_mut() {
        *value = trim_whitespace(value).to_vec();
    }

    debug!(
        "Split {} bytes into {} rows ({} header columns)",
        data.len(),
        rows.len(),
        rows[0].len()
    );

    Ok(Grid { rows })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn values(row: &Row) -> Vec<&str> {
        row.iter()
            .map(|v| std::str::from_utf8(v).unwrap())
            .collect()
    }

    fn lines(data: &[u8]) -> Vec<&str> {
        split_lines(data)
            .into_iter()
            .map(|l| std::str::from_utf8(l).unwrap())
            .collect()
    }

    // ── split_lines ───────────────────────────────────────────────────────────

    #[test]
    fn test_split_lines_empty_buffer() {
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_split_lines_universal_newlines() {
        assert_eq!(lines(b"a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_lines_trailing_newline_not_a_line() {
        assert_eq!(lines(b"a\nb\n"), vec!["a", "b"]);
        assert_eq!(lines(b"a\r\n"), vec!["a"]);
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(lines(b"a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(lines(b"\n"), vec![""]);
    }

    #[test]
    fn test_split_lines_without_separator_is_one_line() {
        assert_eq!(lines(b"Test1\tTest2"), vec!["Test1\tTest2"]);
    }

    // ── split_columns ─────────────────────────────────────────────────────────

    #[test]
    fn test_split_columns_tab() {
        let row = split_columns(b"Alabama\tAkron \t433", Delimiter::Tab);
        assert_eq!(values(&row), vec!["Alabama", "Akron ", "433"]);
    }

    #[test]
    fn test_split_columns_trailing_delimiter_adds_empty_value() {
        let row = split_columns(b"433;3;6;", Delimiter::Semicolon);
        assert_eq!(values(&row), vec!["433", "3", "6", ""]);
    }

    #[test]
    fn test_split_columns_empty_line() {
        assert_eq!(split_columns(b"", Delimiter::Tab), vec![Vec::<u8>::new()]);
    }

    // ── trim_whitespace ───────────────────────────────────────────────────────

    #[test]
    fn test_trim_whitespace_includes_vertical_tab() {
        assert_eq!(trim_whitespace(b"\x0ba\x0c"), b"a");
        assert_eq!(trim_whitespace(b" \t7_2009\r\n"), b"7_2009");
        assert_eq!(trim_whitespace(b"a b"), b"a b");
    }

    #[test]
    fn test_trim_whitespace_all_blank() {
        assert_eq!(trim_whitespace(b" \x0b\t"), b"");
        assert_eq!(trim_whitespace(b""), b"");
    }

    // ── split_grid ────────────────────────────────────────────────────────────

    #[test]
    fn test_split_grid_empty_is_malformed() {
        let err = split_grid(b"", Delimiter::Semicolon).unwrap_err();
        assert_eq!(
            err,
            ValidationIssue::MalformedInput {
                delimiter: Delimiter::Semicolon
            }
        );
    }

    #[test]
    fn test_split_grid_strips_header_only() {
        let grid = split_grid(b" State \t  Town\n  Alabama\t Akron ", Delimiter::Tab).unwrap();
        assert_eq!(values(grid.header()), vec!["State", "Town"]);
        assert_eq!(values(&grid.data_rows()[0]), vec!["  Alabama", " Akron "]);
    }

    #[test]
    fn test_split_grid_strips_vertical_tab_from_header() {
        let grid = split_grid(b"\x0b7_2009\x0b\tb\n1\t2", Delimiter::Tab).unwrap();
        assert_eq!(values(grid.header()), vec!["7_2009", "b"]);
    }

    #[test]
    fn test_split_grid_header_only_has_no_data_rows() {
        let grid = split_grid(b"Test1\tTest2\t7_2009\tTest_3", Delimiter::Tab).unwrap();
        assert_eq!(grid.len(), 1);
        assert!(!grid.has_data_rows());
        assert!(grid.data_rows().is_empty());
    }

    #[test]
    fn test_row_lengths() {
        let grid = split_grid(b"a\tb\tc\n1\t2\t3\n1\t2", Delimiter::Tab).unwrap();
        let lengths = grid.row_lengths();
        assert_eq!(lengths.get(&0), Some(&3));
        assert_eq!(lengths.get(&1), Some(&3));
        assert_eq!(lengths.get(&2), Some(&2));
    }

    #[test]
    fn test_split_grid_is_deterministic() {
        let data = b"a;b\n1;2\n3";
        assert_eq!(
            split_grid(data, Delimiter::Semicolon).unwrap(),
            split_grid(data, Delimiter::Semicolon).unwrap()
        );
    }
}
