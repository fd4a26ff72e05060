//! Campaign nomenclature validation
//!
//! This module enforces the campaign naming convention `YYYY_MM_action[_variant]`
//! and the character rules for the other UTM fields. It supports two modes:
//!
//! - **Library**: strict rules with detailed diagnostics, used when a name is
//!   registered as a reusable campaign
//! - **Builder**: lenient rules for names typed while composing a URL,
//!   allowing `{placeholder}` tokens and the `%searchterm` license shorthand
//!
//! The validator is organized into focused modules:
//! - `types`: Modes, fields, date context and result types
//! - `patterns`: Compiled regular expressions
//! - `campaign`: Shared, library and builder rule tables
//! - `field`: Per-field dispatcher for campaign, content, term and customParams
//! - `tests`: Test suite
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

pub mod campaign;
pub mod field;
pub(crate) mod patterns;
pub mod types;
mod tests;

// Re-export public API
pub use campaign::{
    validate_builder_campaign, validate_library_campaign, validate_utm_campaign,
    KNOWN_PLACEHOLDERS, MAX_BUILDER_LENGTH,
};
pub use field::{validate_field, PLACEMENT_MACROS};
pub use types::{
    CampaignName, Field, FieldReport, ValidationContext, ValidationInput, ValidationMode,
    ValidationResult,
};

/// Distinct characters matching `predicate`, in first-seen order
pub(crate) fn distinct_chars(value: &str, predicate: impl Fn(char) -> bool) -> Vec<char> {
    let mut found = Vec::new();
    for c in value.chars().filter(|c| predicate(*c)) {
        if !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

pub(crate) fn join_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
