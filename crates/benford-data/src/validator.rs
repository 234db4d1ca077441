//! Structural validation of an uploaded delimited file.
//!
//! [`DataValidator`] runs a fixed pipeline over one [`RawDocument`]:
//!
//! 1. the buffer splits into a header and rows;
//! 2. the required column is in the header;
//! 3. at least one data row follows the header;
//! 4. every value of the required column is an integer;
//! 5. every data row has as many values as the header.
//!
//! Steps 1–3 stop the pipeline on failure. Steps 4 and 5 always both run
//! once 1–3 passed. Rows failing step 5 are reported as a warning and left
//! out of the [`CleanedDataset`].
//!
//! Derived values (grid, column index, row lengths, corrupted rows) are
//! computed on first use and cached for the lifetime of the validator.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};

use benford_core::delimiter::DataFormat;
use benford_core::error::{BenfordError, Result};
use benford_core::models::{RawDocument, Severity, ValidationIssue, DEFAULT_DATA_COLUMN};
use tracing::{debug, info, warn};

use crate::cleaned::CleanedDataset;
use crate::numeric::is_integer;
use crate::splitter::{split_grid, Grid};

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unvalidated,
    Validated,
}

// ── DataValidator ─────────────────────────────────────────────────────────────

/// Validates one document against the required column.
#[derive(Debug)]
pub struct DataValidator {
    document: RawDocument,
    format: DataFormat,
    required_column: Vec<u8>,
    phase: Phase,
    issues: Vec<ValidationIssue>,
    errors: Vec<String>,
    warnings: Vec<String>,
    cleaned: Option<CleanedDataset>,

    grid: OnceCell<std::result::Result<Grid, ValidationIssue>>,
    column_index: OnceCell<Option<usize>>,
    row_lengths: OnceCell<BTreeMap<usize, usize>>,
    corrupted_rows: OnceCell<BTreeSet<usize>>,
}

impl DataValidator {
    /// Create a validator for `document` using [`DEFAULT_DATA_COLUMN`].
    pub fn new(document: RawDocument) -> Self {
        let format = document.format();
        Self {
            document,
            format,
            required_column: DEFAULT_DATA_COLUMN.to_vec(),
            phase: Phase::Unvalidated,
            issues: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            cleaned: None,
            grid: OnceCell::new(),
            column_index: OnceCell::new(),
            row_lengths: OnceCell::new(),
            corrupted_rows: OnceCell::new(),
        }
    }

    /// Shorthand for `DataValidator::new(RawDocument::new(data, extension))`.
    pub fn from_bytes(data: impl Into<Vec<u8>>, extension: &str) -> Self {
        Self::new(RawDocument::new(data, extension))
    }

    /// Use `column` as the required header name.
    ///
    /// Drops a column index cached for the previous name.
    pub fn with_required_column(mut self, column: impl Into<Vec<u8>>) -> Self {
        self.required_column = column.into();
        self.column_index = OnceCell::new();
        self
    }

    pub fn document(&self) -> &RawDocument {
        &self.document
    }

    pub fn format(&self) -> &DataFormat {
        &self.format
    }

    pub fn required_column(&self) -> &[u8] {
        &self.required_column
    }

    fn column_label(&self) -> String {
        String::from_utf8_lossy(&self.required_column).into_owned()
    }

    // ── Validation run ────────────────────────────────────────────────────────

    /// Run the validation pipeline and report whether no errors were found.
    ///
    /// The pipeline runs once; later calls reuse the recorded findings.
    /// With `raise_on_error`, a run with errors returns
    /// [`BenfordError::InvalidDataFormat`] carrying every error string.
    pub fn is_valid(&mut self, raise_on_error: bool) -> Result<bool> {
        if self.phase == Phase::Unvalidated {
            self.run_checks();
            self.phase = Phase::Validated;
            info!(
                "Validated {} bytes ({}): {} errors, {} warnings",
                self.document.len(),
                self.format.delimiter(),
                self.errors.len(),
                self.warnings.len()
            );
        } else {
            debug!("Validation already ran; reusing recorded findings");
        }

        if raise_on_error && !self.errors.is_empty() {
            return Err(BenfordError::InvalidDataFormat {
                errors: self.errors.clone(),
            });
        }
        Ok(self.errors.is_empty())
    }

    /// `true` once [`DataValidator::is_valid`] has run.
    pub fn is_validated(&self) -> bool {
        self.phase == Phase::Validated
    }

    fn run_checks(&mut self) {
        if let Some(issue) = self.structural_issue() {
            let fatal = issue.is_fatal();
            self.record(issue);
            if fatal {
                return;
            }
        }

        self.check_data_type();
        self.check_row_lengths();

        if let Ok(grid) = self.grid() {
            let cleaned = CleanedDataset::assemble(grid, self.corrupted_rows());
            debug!(
                "Cleaned dataset keeps {} of {} rows",
                cleaned.len(),
                grid.len()
            );
            self.cleaned = Some(cleaned);
        }
    }

    fn record(&mut self, issue: ValidationIssue) {
        let message = issue.to_string();
        match issue.severity() {
            Severity::Error => {
                debug!("Validation error: {}", message);
                self.errors.push(message);
            }
            Severity::Warning => {
                warn!("{}", message);
                self.warnings.push(message);
            }
        }
        self.issues.push(issue);
    }

    // ── Checks ────────────────────────────────────────────────────────────────

    /// First failure among splitting, the required column and data rows.
    fn structural_issue(&self) -> Option<ValidationIssue> {
        if let Err(issue) = self.grid() {
            return Some(issue.clone());
        }
        if !self.main_column_present() {
            return Some(ValidationIssue::MissingRequiredColumn {
                column: self.column_label(),
            });
        }
        if !self.has_data_rows() {
            return Some(ValidationIssue::NoDataRows);
        }
        None
    }

    fn main_column_present(&self) -> bool {
        self.required_column_index().is_some()
    }

    fn has_data_rows(&self) -> bool {
        self.grid().map(Grid::has_data_rows).unwrap_or(false)
    }

    fn check_data_type(&mut self) {
        let occurrences = self.required_column_occurrences();
        if occurrences > 1 {
            let column = self.column_label();
            self.record(ValidationIssue::RepeatedColumnHeader {
                column,
                occurrences,
            });
        }

        let all_numeric = self.required_column_values().iter().all(|v| is_integer(v));
        if !all_numeric {
            let column = self.column_label();
            self.record(ValidationIssue::NonNumericData { column });
        }
    }

    fn check_row_lengths(&mut self) {
        let rows: Vec<usize> = self.corrupted_rows().iter().copied().collect();
        if rows.is_empty() {
            return;
        }
        let header_count = self.grid().map(|g| g.header().len()).unwrap_or(0);
        self.record(ValidationIssue::RowLengthMismatch { header_count, rows });
    }

    // ── Derived values ────────────────────────────────────────────────────────

    /// The split grid, or the `MalformedInput` finding when splitting failed.
    pub fn grid(&self) -> std::result::Result<&Grid, &ValidationIssue> {
        self.grid
            .get_or_init(|| split_grid(self.document.data(), self.format.delimiter()))
            .as_ref()
    }

    /// Position of the first header equal to the required column.
    pub fn required_column_index(&self) -> Option<usize> {
        *self.column_index.get_or_init(|| {
            self.grid()
                .ok()?
                .header()
                .iter()
                .position(|h| *h == self.required_column)
        })
    }

    /// How many headers equal the required column.
    pub fn required_column_occurrences(&self) -> usize {
        self.grid()
            .map(|g| {
                g.header()
                    .iter()
                    .filter(|h| **h == self.required_column)
                    .count()
            })
            .unwrap_or(0)
    }

    /// The required column's value from every data row long enough to hold
    /// it. Shorter rows are skipped.
    pub fn required_column_values(&self) -> Vec<&[u8]> {
        let (Ok(grid), Some(index)) = (self.grid(), self.required_column_index()) else {
            return Vec::new();
        };
        grid.data_rows()
            .iter()
            .filter_map(|row| row.get(index).map(Vec::as_slice))
            .collect()
    }

    /// Row index → value count, header included.
    pub fn row_lengths(&self) -> &BTreeMap<usize, usize> {
        self.row_lengths.get_or_init(|| {
            self.grid()
                .map(Grid::row_lengths)
                .unwrap_or_default()
        })
    }

    /// Indices of rows whose value count differs from the header's.
    pub fn corrupted_rows(&self) -> &BTreeSet<usize> {
        self.corrupted_rows.get_or_init(|| {
            let Ok(grid) = self.grid() else {
                return BTreeSet::new();
            };
            let header_count = grid.header().len();
            self.row_lengths()
                .iter()
                .filter(|(_, len)| **len != header_count)
                .map(|(index, _)| *index)
                .collect()
        })
    }

    // ── Results ───────────────────────────────────────────────────────────────

    fn ensure_validated(&self, what: &str) -> Result<()> {
        if self.phase == Phase::Unvalidated {
            return Err(BenfordError::Usage(format!(
                "You must call `is_valid()` before accessing `{what}`."
            )));
        }
        Ok(())
    }

    /// Recorded error messages, in pipeline order.
    pub fn errors(&self) -> Result<&[String]> {
        self.ensure_validated("errors")?;
        Ok(&self.errors)
    }

    /// Recorded warning messages, in pipeline order.
    pub fn warnings(&self) -> Result<&[String]> {
        self.ensure_validated("warnings")?;
        Ok(&self.warnings)
    }

    /// Every recorded finding, errors and warnings interleaved in the order
    /// they were found.
    pub fn issues(&self) -> Result<&[ValidationIssue]> {
        self.ensure_validated("issues")?;
        Ok(&self.issues)
    }

    /// The cleaned dataset.
    ///
    /// `None` when splitting failed, the required column was missing, or
    /// there were no data rows. A non-numeric column does not prevent it.
    pub fn cleaned_dataset(&self) -> Result<Option<&CleanedDataset>> {
        self.ensure_validated("cleaned_dataset")?;
        Ok(self.cleaned.as_ref())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
