//! Campaign name validation
//!
//! A campaign value is checked by an ordered table of rules. The shared
//! character-class rules always run first, then the table owned by the
//! selected [`ValidationMode`]. Every rule appends to the same
//! [`ValidationResult`]; no rule stops the ones after it.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use super::patterns;
use super::types::{ValidationContext, ValidationMode, ValidationResult};
use super::{distinct_chars, join_chars};
use tracing::trace;

/// A single campaign rule
pub(crate) type Rule = fn(&str, &ValidationContext, &mut ValidationResult);

/// Placeholders every ad platform we ship to understands
pub const KNOWN_PLACEHOLDERS: [&str; 5] = [
    "{campaign}",
    "{keyword}",
    "{placement}",
    "{adgroup}",
    "{device}",
];

/// Maximum campaign length accepted in builder mode
pub const MAX_BUILDER_LENGTH: usize = 100;

const REQUIRED: &str = "campaign name is required";

const SHARED_RULES: &[Rule] = &[check_whitespace, check_uppercase, check_charset];

const LIBRARY_RULES: &[Rule] = &[
    check_library_structure,
    check_double_underscore,
    check_edge_underscore,
];

const BUILDER_RULES: &[Rule] = &[
    check_placeholders,
    check_license_search,
    check_structure_hint,
    check_length,
    check_double_underscore,
    check_edge_underscore,
    check_trailing_digits,
];

impl ValidationMode {
    /// Rules owned by this mode, in evaluation order
    pub(crate) fn rules(self) -> &'static [Rule] {
        match self {
            Self::Library => LIBRARY_RULES,
            Self::Builder => BUILDER_RULES,
        }
    }
}

/// Validate the `campaign` field in the given mode
///
/// Empty or whitespace-only input is the one case where emptiness is itself
/// an error. Everything else is trimmed before the rules run.
pub fn validate_utm_campaign(
    value: &str,
    mode: ValidationMode,
    ctx: &ValidationContext,
) -> ValidationResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationResult::invalid(REQUIRED);
    }

    let mut result = ValidationResult::new();
    for rule in SHARED_RULES.iter().chain(mode.rules()) {
        rule(trimmed, ctx, &mut result);
    }

    trace!(
        value = trimmed,
        mode = %mode,
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "Campaign validated"
    );

    result
}

/// Validate a campaign name for registration in the campaign library
pub fn validate_library_campaign(value: &str, ctx: &ValidationContext) -> ValidationResult {
    validate_utm_campaign(value, ValidationMode::Library, ctx)
}

/// Validate a campaign name typed in the URL builder
pub fn validate_builder_campaign(value: &str, ctx: &ValidationContext) -> ValidationResult {
    validate_utm_campaign(value, ValidationMode::Builder, ctx)
}

fn is_campaign_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '{' | '}' | '%')
}

fn check_whitespace(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    if value.chars().any(char::is_whitespace) {
        result.push_error("no spaces allowed");
    }
}

fn check_uppercase(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        result.push_error("lowercase letters only");
    }
}

fn check_charset(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    let invalid = distinct_chars(value, |c| !is_campaign_char(c));
    if !invalid.is_empty() {
        result.push_error(format!(
            "invalid characters: {} (only a-z, 0-9, _, {{}}, % allowed)",
            join_chars(&invalid)
        ));
    }
}

fn check_double_underscore(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    if value.contains("__") {
        result.push_error("double underscores not allowed");
    }
}

fn check_edge_underscore(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    if value.starts_with('_') || value.ends_with('_') {
        result.push_error("campaign name must not start or end with underscore");
    }
}

// Library mode

fn check_library_structure(value: &str, ctx: &ValidationContext, result: &mut ValidationResult) {
    let segments: Vec<&str> = value.split('_').collect();

    if patterns::canonical_campaign().is_match(value) {
        trace!(value, "Canonical pattern matched");
        advise_canonical(&segments, ctx, result);
        return;
    }

    if segments.len() < 3 {
        result.push_error("format must contain at least YYYY_MM_action");
        return;
    }

    diagnose_year(segments[0], ctx, result);
    diagnose_month(segments[1], result);
    diagnose_action(segments[2], result);

    for (i, segment) in segments.iter().enumerate().skip(3) {
        if segment.is_empty() {
            result.push_error(format!("empty variant at position {}", i + 1));
        } else if !patterns::variant().is_match(segment) {
            result.push_error(format!("variant '{}' must start with a letter or digit", segment));
        }
    }
}

/// Advisory checks for a name that already matches the convention
fn advise_canonical(segments: &[&str], ctx: &ValidationContext, result: &mut ValidationResult) {
    let year: i32 = segments[0].parse().unwrap_or_default();
    let month: i32 = segments[1].parse().unwrap_or_default();

    warn_year_distance(year, ctx, result);

    if year == ctx.current_year() && ctx.current_month() as i32 - month > 1 {
        result.push_warning("campaign is several months in the past");
    }

    if segments[2].chars().count() < 3 {
        result.push_warning("action name is very short — consider a more descriptive name");
    }
}

fn diagnose_year(year: &str, ctx: &ValidationContext, result: &mut ValidationResult) {
    if !patterns::four_digits().is_match(year) {
        result.push_error("year must be 4 digits (e.g. 2025)");
    } else if !year.starts_with("20") {
        result.push_error("year must start with 20 (e.g. 2025)");
    } else if let Ok(parsed) = year.parse::<i32>() {
        warn_year_distance(parsed, ctx, result);
    }
}

fn warn_year_distance(year: i32, ctx: &ValidationContext, result: &mut ValidationResult) {
    let current = ctx.current_year();
    if year < current - 1 {
        result.push_warning(format!("year {} is far in the past", year));
    } else if year > current + 2 {
        result.push_warning(format!("year {} is far in the future", year));
    }
}

fn diagnose_month(month: &str, result: &mut ValidationResult) {
    if matches!(month.as_bytes(), [b'1'..=b'9']) {
        result.push_error("month must be zero-padded (e.g. 08 not 8)");
        return;
    }

    if !patterns::two_digits().is_match(month) {
        result.push_error("month must be 2 digits (01-12)");
    } else if month == "00" {
        result.push_error("month 00 is invalid (use 01-12)");
    } else if month.parse::<u32>().map_or(true, |m| m > 12) {
        result.push_error("month must be between 01 and 12");
    }
}

fn diagnose_action(action: &str, result: &mut ValidationResult) {
    match action.chars().next() {
        None => result.push_error("action missing after year and month"),
        Some(c) if !c.is_ascii_lowercase() => {
            result.push_error("action must start with a lowercase letter")
        }
        Some(_) if !patterns::action().is_match(action) => {
            result.push_error("action may only contain lowercase letters, digits, underscores")
        }
        Some(_) => {}
    }
}

// Builder mode

fn check_placeholders(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    let mut empty_reported = false;
    let mut reported: Vec<&str> = Vec::new();

    for found in patterns::placeholder().find_iter(value) {
        let placeholder = found.as_str();

        if placeholder == "{}" {
            if !empty_reported {
                result.push_error("empty placeholders {} not allowed");
                empty_reported = true;
            }
            continue;
        }

        let lowered = placeholder.to_lowercase();
        let known = KNOWN_PLACEHOLDERS.iter().any(|k| *k == lowered);
        if !known && !reported.contains(&placeholder) {
            result.push_warning(format!("unusual placeholder: {}", placeholder));
            reported.push(placeholder);
        }
    }
}

fn check_license_search(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    let count = value.matches('%').count();
    if count > 1 {
        result.push_error("only one % allowed for license search");
        return;
    }

    let Some((before, after)) = value.split_once('%') else {
        return;
    };

    if before.ends_with('_') && after.is_empty() {
        trace!(value, "License search trigger");
    } else if !after.is_empty() {
        if !patterns::search_term().is_match(after) {
            result.push_error(
                "search term after % may only contain lowercase letters, digits, underscores",
            );
        }
    } else {
        result.push_warning("% should follow an underscore for readability");
    }
}

fn check_structure_hint(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    if !value.contains('_') && !value.contains('%') && !patterns::placeholder().is_match(value) {
        result.push_warning("campaign should be structured (e.g. with underscores)");
    }
}

fn check_length(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    let length = value.chars().count();
    if length < 3 {
        result.push_warning("very short campaign name");
    } else if length > MAX_BUILDER_LENGTH {
        result.push_error(format!(
            "campaign name too long (max {} characters)",
            MAX_BUILDER_LENGTH
        ));
    }
}

fn check_trailing_digits(value: &str, _ctx: &ValidationContext, result: &mut ValidationResult) {
    if patterns::trailing_digits().is_match(value) {
        result.push_warning("long digit sequence at the end — is this intentional?");
    }
}
