//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for campaign results, field reports, tables and spinners.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, trace};
use utmkit_core::{FieldReport, ValidationMode, ValidationResult};

/// Trait for formatting output with specialized support for validation types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the full outcome of validating one campaign name
    fn format_campaign_result(
        &self,
        value: &str,
        mode: ValidationMode,
        result: &ValidationResult,
    ) -> Result<String>;

    /// Format flattened per-field reports
    fn format_field_reports(&self, reports: &[FieldReport]) -> Result<String>;
}

/// Machine-readable shape of a campaign result
#[derive(Serialize)]
struct CampaignResultView<'a> {
    value: &'a str,
    mode: ValidationMode,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_campaign_result(
        &self,
        value: &str,
        mode: ValidationMode,
        result: &ValidationResult,
    ) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_campaign_result_human(value, mode, result)),
            _ => self.format(&CampaignResultView {
                value,
                mode,
                result,
            }),
        }
    }

    fn format_field_reports(&self, reports: &[FieldReport]) -> Result<String> {
        match (self, reports) {
            (OutputFormat::Human, _) => Ok(format_field_reports_human(reports)),
            (_, [single]) => self.format(single),
            _ => self.format(&reports),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && format == OutputFormat::Human && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Whether the output is meant for people rather than scripts
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting data: {} bytes", formatted.len());

        if self.format == OutputFormat::Yaml {
            // serde_yaml already terminates the document
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write the outcome of validating one campaign name
    pub fn campaign_result(
        &mut self,
        value: &str,
        mode: ValidationMode,
        result: &ValidationResult,
    ) -> Result<()> {
        let formatted = self.format.format_campaign_result(value, mode, result)?;
        self.emit(&formatted)
    }

    /// Write flattened field reports
    pub fn field_reports(&mut self, reports: &[FieldReport]) -> Result<()> {
        let formatted = self.format.format_field_reports(reports)?;
        self.emit(&formatted)
    }

    /// Human output is colorized line by line by its leading marker
    fn emit(&mut self, formatted: &str) -> Result<()> {
        if !self.is_human() {
            return self.writeln(formatted.trim_end());
        }

        for line in formatted.lines() {
            let line = if !self.use_color {
                line.to_string()
            } else if line.trim_start().starts_with('✗') {
                line.red().to_string()
            } else if line.trim_start().starts_with('⚠') {
                line.yellow().to_string()
            } else if line.trim_start().starts_with('✓') {
                line.green().to_string()
            } else {
                line.to_string()
            };
            self.writeln(&line)?;
        }
        Ok(())
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        // Print header
        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        // Print separator
        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        // Print rows
        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format a campaign result for human reading
fn format_campaign_result_human(value: &str, mode: ValidationMode, result: &ValidationResult) -> String {
    let mut output = String::new();

    let verdict = if result.is_valid() { "✓" } else { "✗" };
    let state = if result.is_valid() { "valid" } else { "invalid" };
    output.push_str(&format!("{} '{}' is {} ({} mode)\n", verdict, value.trim(), state, mode));

    for error in result.errors() {
        output.push_str(&format!("  ✗ {}\n", error));
    }
    for warning in result.warnings() {
        output.push_str(&format!("  ⚠ {}\n", warning));
    }

    output
}

/// Format field reports for human reading, one line per message
fn format_field_reports_human(reports: &[FieldReport]) -> String {
    let mut output = String::new();

    for report in reports {
        match report.error() {
            Some(error) => output.push_str(&format!("✗ {}: {}\n", report.field(), error)),
            None => output.push_str(&format!("✓ {}\n", report.field())),
        }
        if let Some(warning) = report.warning() {
            output.push_str(&format!("  ⚠ {}\n", warning));
        }
    }

    output
}
