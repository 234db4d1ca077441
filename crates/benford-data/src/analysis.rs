//! Main analysis pipeline.
//!
//! Validates a [`RawDocument`], hands the cleaned required column to a
//! [`DigitDistribution`] and returns an [`AnalysisResult`] ready for
//! rendering.

use benford_core::delimiter::Delimiter;
use benford_core::error::Result;
use benford_core::models::{ChartSeries, DigitTable, RawDocument, ValidationIssue};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzer::{BenfordFirstDigits, DigitDistribution};
use crate::cleaned::CleanedDataset;
use crate::validator::DataValidator;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this result was generated.
    pub generated_at: String,
    /// Extension tag the document was validated with.
    pub extension: String,
    /// Delimiter implied by the extension.
    pub delimiter: Delimiter,
    /// Required column name.
    pub column: String,
    /// Size of the upload in bytes.
    pub bytes: usize,
    /// Data rows found after the header.
    pub rows_read: usize,
    /// Data rows left out for having the wrong value count.
    pub rows_dropped: usize,
}

/// The complete output of [`analyze_document`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// `true` when validation recorded no errors.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Structured form of `errors` and `warnings`.
    pub issues: Vec<ValidationIssue>,
    /// Present whenever the required column and data rows were found.
    #[serde(skip)]
    pub cleaned: Option<CleanedDataset>,
    /// Present only for valid documents.
    #[serde(skip)]
    pub distribution: Option<DigitTable>,
    #[serde(flatten)]
    pub chart: Option<ChartSeries>,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline with [`BenfordFirstDigits`].
pub fn analyze_document(
    document: RawDocument,
    column: &[u8],
    raise_on_error: bool,
) -> Result<AnalysisResult> {
    analyze_with(document, column, raise_on_error, &BenfordFirstDigits)
}

/// Run the full pipeline with any [`DigitDistribution`].
///
/// 1. Validate the document against `column`.
/// 2. With `raise_on_error`, return the `InvalidDataFormat` error if any
///    error was recorded.
/// 3. For valid documents, extract the column from the cleaned dataset and
///    compute its digit distribution.
pub fn analyze_with<D: DigitDistribution + ?Sized>(
    document: RawDocument,
    column: &[u8],
    raise_on_error: bool,
    analyzer: &D,
) -> Result<AnalysisResult> {
    let mut validator = DataValidator::new(document).with_required_column(column);
    let valid = validator.is_valid(raise_on_error)?;

    let metadata = build_metadata(&validator);
    let cleaned = validator.cleaned_dataset()?.cloned();

    let distribution = if valid {
        cleaned
            .as_ref()
            .and_then(|c| c.column_values(column))
            .map(|values| analyzer.distribution(&values))
    } else {
        debug!("Skipping digit distribution for invalid document");
        None
    };
    let chart = distribution.as_ref().map(ChartSeries::from);

    info!(
        "Analysed column {} ({} rows read, {} dropped, valid: {})",
        metadata.column, metadata.rows_read, metadata.rows_dropped, valid
    );

    Ok(AnalysisResult {
        valid,
        errors: validator.errors()?.to_vec(),
        warnings: validator.warnings()?.to_vec(),
        issues: validator.issues()?.to_vec(),
        cleaned,
        distribution,
        chart,
        metadata,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn build_metadata(validator: &DataValidator) -> AnalysisMetadata {
    let rows_read = validator
        .grid()
        .map(|g| g.data_rows().len())
        .unwrap_or(0);

    AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        extension: validator.format().extension().to_string(),
        delimiter: validator.format().delimiter(),
        column: String::from_utf8_lossy(validator.required_column()).into_owned(),
        bytes: validator.document().len(),
        rows_read,
        rows_dropped: validator.corrupted_rows().len(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
