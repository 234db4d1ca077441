mod bootstrap;
mod report;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use benford_core::settings::Settings;
use benford_data::analysis::analyze_document;
use benford_data::reader::{expand_inputs, read_upload};

use report::Outcome;

fn main() -> Result<ExitCode> {
    let settings = Settings::load()?;

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("benford-check v{} starting", env!("CARGO_PKG_VERSION"));
    if !settings.uses_default_column() {
        tracing::info!("Required column: {}", settings.column);
    }

    let files = expand_inputs(&settings.inputs);
    if files.is_empty() {
        tracing::warn!("No uploads found in the given inputs");
        return Ok(ExitCode::FAILURE);
    }

    let mut all_ok = true;
    for path in &files {
        let outcome = check_file(path, &settings);
        if let Err(e) = &outcome {
            tracing::debug!("{}: {}", path.display(), e);
        }
        all_ok &= report::is_success(&outcome);

        if settings.is_json_output() {
            let value = report::render_json(path, &outcome, settings.show_cleaned);
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print!(
                "{}",
                report::render_text(path, &outcome, settings.show_cleaned)
            );
        }
    }

    tracing::info!(
        "Checked {} file(s), {}",
        files.len(),
        if all_ok { "all valid" } else { "some failed" }
    );

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Guards, then the analysis pipeline, for one upload.
fn check_file(path: &Path, settings: &Settings) -> Outcome {
    let document = read_upload(path, settings.format_override(), settings.max_bytes)?;
    analyze_document(document, settings.required_column(), !settings.lenient)
}
