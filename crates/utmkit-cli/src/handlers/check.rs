//! Batch check command handler

use super::utils::{read_document, read_file, DocumentFormat};
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument, warn};
use utmkit_core::{validate_utm_campaign, ValidationContext, ValidationMode, ValidationResult};

/// One checked campaign name
#[derive(Debug, Serialize)]
struct CheckEntry {
    name: String,
    #[serde(flatten)]
    result: ValidationResult,
}

/// Outcome of a batch check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckSummary {
    mode: ValidationMode,
    total: usize,
    valid: usize,
    invalid: usize,
    with_warnings: usize,
    entries: Vec<CheckEntry>,
}

impl CheckSummary {
    fn new(mode: ValidationMode, entries: Vec<CheckEntry>) -> Self {
        let invalid = entries.iter().filter(|e| !e.result.is_valid()).count();
        let with_warnings = entries
            .iter()
            .filter(|e| !e.result.warnings().is_empty())
            .count();

        Self {
            mode,
            total: entries.len(),
            valid: entries.len() - invalid,
            invalid,
            with_warnings,
            entries,
        }
    }
}

/// Handle the check command
#[instrument(skip(config, ctx, output), fields(file = %args.file.display()))]
pub fn handle_check(
    args: CheckArgs,
    config: &Config,
    ctx: &ValidationContext,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details("check_command", &format!("file: {}", args.file.display()));
    let mode = args.mode.unwrap_or(config.defaults.mode);

    let names = load_campaign_names(&args.file)?;
    output.info(&format!(
        "Checking {} campaign names from {} ({} mode)",
        names.len(),
        args.file.display(),
        mode
    ))?;

    let spinner = output.spinner("Validating campaign names...");
    let entries = names
        .into_iter()
        .map(|name| {
            let result = validate_utm_campaign(&name, mode, ctx);
            CheckEntry { name, result }
        })
        .collect();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let summary = CheckSummary::new(mode, entries);
    info!(
        total = summary.total,
        invalid = summary.invalid,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Batch check completed"
    );

    if output.is_human() {
        for entry in &summary.entries {
            let show = !entry.result.is_valid()
                || (!args.errors_only && !entry.result.warnings().is_empty());
            if show {
                output.campaign_result(&entry.name, mode, &entry.result)?;
            }
        }
        output.section("Summary")?;
        output.info(&format!(
            "{} checked: {} valid, {} invalid, {} with warnings",
            summary.total, summary.valid, summary.invalid, summary.with_warnings
        ))?;
    } else {
        output.data(&summary)?;
    }

    if summary.invalid > 0 {
        warn!("{} campaign names failed validation", summary.invalid);
        return Err(Error::ValidationFailed {
            count: summary.invalid,
        });
    }

    output.success("✓ All campaign names are valid")?;
    Ok(())
}

/// Campaign names from a structured document or a plain list
///
/// Structured files hold an array of names or of campaign objects with a
/// `name` key, either at the top level or under `campaigns`. Any other file
/// is read as one name per line; blank lines and `#` comments are skipped.
fn load_campaign_names(path: &Path) -> Result<Vec<String>> {
    if DocumentFormat::of(path) == DocumentFormat::Text {
        let content = read_file(path)?;
        return Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect());
    }

    let document = read_document(path)?;
    let invalid = || Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: "an array of campaign names or campaign objects".to_string(),
    };

    let items = match &document {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("campaigns")
            .and_then(Value::as_array)
            .ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(name) => Some(name.clone()),
            Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)
}
