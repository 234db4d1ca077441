//! Text and JSON rendering of per-file outcomes.

use std::path::Path;

use benford_core::error::BenfordError;
use benford_core::formatting::{format_bytes, format_digit_table, format_row};
use benford_data::analysis::AnalysisResult;
use serde_json::json;

/// Result of checking one file.
pub type Outcome = Result<AnalysisResult, BenfordError>;

/// `true` when the file passed every guard and had no data errors.
pub fn is_success(outcome: &Outcome) -> bool {
    matches!(outcome, Ok(result) if result.valid)
}

/// Human-readable block for one file.
pub fn render_text(path: &Path, outcome: &Outcome, show_cleaned: bool) -> String {
    let mut out = format!("== {}\n", path.display());

    let result = match outcome {
        Ok(result) => result,
        Err(BenfordError::InvalidDataFormat { errors }) => {
            out.push_str("status: invalid\n");
            for error in errors {
                out.push_str(&format!("error: {error}\n"));
            }
            return out;
        }
        Err(BenfordError::FileTooLarge { size, limit }) => {
            out.push_str(&format!(
                "error: File is too large ({} > {})\n",
                format_bytes(*size),
                format_bytes(*limit)
            ));
            return out;
        }
        Err(e) => {
            out.push_str(&format!("error: {e}\n"));
            return out;
        }
    };

    let status = if result.valid { "valid" } else { "invalid" };
    out.push_str(&format!(
        "status: {} ({} rows, {} dropped)\n",
        status, result.metadata.rows_read, result.metadata.rows_dropped
    ));
    for error in &result.errors {
        out.push_str(&format!("error: {error}\n"));
    }
    for warning in &result.warnings {
        out.push_str(&format!("warning: {warning}\n"));
    }
    if let Some(table) = &result.distribution {
        out.push_str(&format_digit_table(table));
    }
    if show_cleaned {
        if let Some(cleaned) = &result.cleaned {
            out.push_str("cleaned rows:\n");
            for row in cleaned.rows() {
                out.push_str(&format!(
                    "  {}\n",
                    format_row(row, result.metadata.delimiter)
                ));
            }
        }
    }
    out
}

/// JSON document for one file.
///
/// Invalid data is reported under `idf`, other failures under `error`.
pub fn render_json(path: &Path, outcome: &Outcome, show_cleaned: bool) -> serde_json::Value {
    let file = path.display().to_string();
    match outcome {
        Ok(result) => {
            let mut value = serde_json::to_value(result)
                .unwrap_or_else(|e| json!({ "error": e.to_string() }));
            if let Some(obj) = value.as_object_mut() {
                obj.insert("file".to_string(), json!(file));
                if show_cleaned {
                    let rows: Vec<String> = result
                        .cleaned
                        .iter()
                        .flat_map(|c| c.rows())
                        .map(|row| format_row(row, result.metadata.delimiter))
                        .collect();
                    obj.insert("cleaned_rows".to_string(), json!(rows));
                }
            }
            value
        }
        Err(e) => match e {
            BenfordError::InvalidDataFormat { errors } => json!({
                "file": file,
                "idf": e.to_string(),
                "errors": errors,
            }),
            _ => json!({
                "file": file,
                "error": e.to_string(),
            }),
        },
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
