//! Field-specific validation logic
//!
//! Dispatches a raw value to the rules for its UTM field and collapses the
//! outcome into a [`FieldReport`]. Only `campaign` treats an empty value as
//! an error; the other fields have no opinion on empty input.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use super::campaign::validate_utm_campaign;
use super::patterns;
use super::types::{Field, FieldReport, ValidationContext, ValidationMode};
use super::{distinct_chars, join_chars};
use crate::channel::allows_placement_macro;
use tracing::debug;

/// Ad-platform macros accepted verbatim in `content` for placement channels
pub const PLACEMENT_MACROS: [&str; 2] = ["{{placement}}", "__PLACEMENT__"];

/// Validate one UTM field
///
/// `mode` only affects the `campaign` field. `channel` is the name of the
/// selected marketing channel, used for the placement-macro exemption.
pub fn validate_field(
    value: &str,
    field: Field,
    mode: ValidationMode,
    channel: Option<&str>,
    ctx: &ValidationContext,
) -> FieldReport {
    let report = match field {
        Field::Campaign => {
            let result = validate_utm_campaign(value, mode, ctx);
            FieldReport::from_result(field, &result)
        }
        Field::CustomParams => FieldReport::new(field, check_custom_params(value), None),
        Field::Content | Field::Term => {
            FieldReport::new(field, check_content_like(value, field, channel), None)
        }
    };

    debug!(
        field = %field,
        blocking = report.is_blocking(),
        "Field validated"
    );

    report
}

/// `key=value` pairs joined by `&`; stops at the first bad pair
fn check_custom_params(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    for pair in value.split('&').map(str::trim) {
        if pair.is_empty() {
            return Some("empty parameters not allowed".to_string());
        }
        if !patterns::custom_param().is_match(pair) {
            return Some("format must be key=value, e.g. param1=value1".to_string());
        }
    }

    None
}

fn is_content_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '{' | '}')
}

fn check_content_like(value: &str, field: Field, channel: Option<&str>) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    if field == Field::Content
        && channel.is_some_and(allows_placement_macro)
        && PLACEMENT_MACROS.iter().any(|m| *m == value)
    {
        return None;
    }

    if value.chars().all(is_content_char) {
        return None;
    }

    let message = if value.chars().any(|c| c.is_ascii_uppercase()) {
        "lowercase only".to_string()
    } else if value.chars().any(char::is_whitespace) {
        "no spaces allowed".to_string()
    } else {
        let invalid = distinct_chars(value, |c| !is_content_char(c));
        format!("invalid characters: {}", join_chars(&invalid))
    };

    Some(message)
}
