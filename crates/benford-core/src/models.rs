use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::delimiter::{DataFormat, Delimiter};

/// Header name of the column analysed when nothing else is configured.
pub const DEFAULT_DATA_COLUMN: &[u8] = b"7_2009";

/// One row of raw, untrimmed column values.
pub type Row = Vec<Vec<u8>>;

// ── RawDocument ───────────────────────────────────────────────────────────────

/// An uploaded file: its bytes plus the extension tag it arrived with.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    data: Vec<u8>,
    extension: String,
}

impl RawDocument {
    pub fn new(data: impl Into<Vec<u8>>, extension: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            extension: extension.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The [`DataFormat`] implied by this document's extension.
    pub fn format(&self) -> DataFormat {
        DataFormat::new(self.extension.clone())
    }
}

// ── Validation findings ───────────────────────────────────────────────────────

/// Whether a finding blocks analysis or is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding recorded during a validation run.
///
/// `Display` renders the human-readable message surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// The buffer could not be split into rows and columns.
    #[error(
        "File is empty or not allowed column separators are used. \
         Expected column separator for given file format: {delimiter}"
    )]
    MalformedInput { delimiter: Delimiter },

    /// The required column is absent from the header row.
    #[error("Main column header: {column} not found")]
    MissingRequiredColumn { column: String },

    /// Only a header row was supplied.
    #[error("No data to analyze")]
    NoDataRows,

    /// At least one value of the required column is not an integer.
    #[error("All data in {column} column should be a numeric type")]
    NonNumericData { column: String },

    /// Some data rows have a different value count than the header.
    #[error(
        "Number of headers: {header_count} is not equal to number of data in each row. \
         Rows: {rows:?} are going to be omitted"
    )]
    RowLengthMismatch { header_count: usize, rows: Vec<usize> },

    /// The required column name occurs more than once in the header.
    #[error(
        "More than one column with required header found. \
         Data are going to be collected from first one"
    )]
    RepeatedColumnHeader { column: String, occurrences: usize },
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::RowLengthMismatch { .. }
            | ValidationIssue::RepeatedColumnHeader { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// `true` when no further checks can run after this finding.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ValidationIssue::MalformedInput { .. }
                | ValidationIssue::MissingRequiredColumn { .. }
                | ValidationIssue::NoDataRows
        )
    }
}

// ── Digit distribution ────────────────────────────────────────────────────────

/// Expected and observed share of one leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigitFrequency {
    pub expected: f64,
    pub found: f64,
}

/// Leading digit (1–9) → frequencies, iterated in digit order.
pub type DigitTable = BTreeMap<u8, DigitFrequency>;

/// A digit table flattened into parallel series for charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<u8>,
    pub expected_values: Vec<f64>,
    pub found_values: Vec<f64>,
}

impl From<&DigitTable> for ChartSeries {
    fn from(table: &DigitTable) -> Self {
        let mut series = ChartSeries::default();
        for (digit, freq) in table {
            series.labels.push(*digit);
            series.expected_values.push(freq.expected);
            series.found_values.push(freq.found);
        }
        series
    }
}
