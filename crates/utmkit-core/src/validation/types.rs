//! Core validation types
//!
//! This module contains the value objects passed into and returned from the
//! nomenclature validator: the validation mode, the field being validated,
//! the injected date context and the result types.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use crate::error::Error;
use chrono::{Datelike, Local, NaiveDate};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::patterns;

/// Validation mode selecting one of the two campaign rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Strict rules for names registered in the campaign library
    Library,
    /// Lenient rules for names typed while composing a tracking URL
    Builder,
}

impl ValidationMode {
    /// Map the legacy "is library screen" flag onto a mode
    pub fn from_library_flag(is_library_screen: bool) -> Self {
        if is_library_screen {
            Self::Library
        } else {
            Self::Builder
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Builder => "builder",
        }
    }
}

impl Default for ValidationMode {
    fn default() -> Self {
        Self::Builder
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "library" | "strict" => Ok(Self::Library),
            "builder" | "lenient" => Ok(Self::Builder),
            _ => Err(Error::UnknownMode { name: s.to_string() }),
        }
    }
}

/// UTM field handled by the field dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "campaign")]
    Campaign,
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "term")]
    Term,
    #[serde(rename = "customParams", alias = "custom_params", alias = "custom-params")]
    CustomParams,
}

impl Field {
    /// All fields in the order they appear in a tracking URL
    pub const ALL: [Field; 4] = [Field::Campaign, Field::Content, Field::Term, Field::CustomParams];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Content => "content",
            Self::Term => "term",
            Self::CustomParams => "customParams",
        }
    }

    /// Key used for the advisory message in the flattened report shape
    pub fn warning_key(self) -> String {
        format!("{}_warning", self.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "campaign" => Ok(Self::Campaign),
            "content" => Ok(Self::Content),
            "term" => Ok(Self::Term),
            "customparams" => Ok(Self::CustomParams),
            _ => Err(Error::UnknownField { name: s.to_string() }),
        }
    }
}

/// Date context for the recency warnings
///
/// The validator never reads the clock itself; callers inject "today" so the
/// same input always yields the same result for a given context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    today: NaiveDate,
}

impl ValidationContext {
    /// Context for the current local date
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Context pinned to a specific date
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    pub fn current_month(&self) -> u32 {
        self.today.month()
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::now()
    }
}

/// Outcome of validating one campaign value
///
/// Errors block submission, warnings are advisory. Validity is derived from
/// the error list so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result holding a single error
    pub fn invalid(message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.push_error(message);
        result
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether any error contains the given fragment
    pub fn has_error(&self, fragment: &str) -> bool {
        self.errors.iter().any(|e| e.contains(fragment))
    }

    /// Whether any warning contains the given fragment
    pub fn has_warning(&self, fragment: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(fragment))
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.errors, self.warnings)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// Flattened per-field outcome: at most one error and one warning string
///
/// Serializes as `{ "<field>": error-or-null, "<field>_warning": warning }`,
/// with the warning key omitted when there is nothing to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    field: Field,
    error: Option<String>,
    warning: Option<String>,
}

impl FieldReport {
    pub fn new(field: Field, error: Option<String>, warning: Option<String>) -> Self {
        Self {
            field,
            error,
            warning,
        }
    }

    /// Report with no opinion on the value
    pub fn clear(field: Field) -> Self {
        Self::new(field, None, None)
    }

    /// Collapse a campaign result, joining multiple messages with `"; "`
    pub fn from_result(field: Field, result: &ValidationResult) -> Self {
        let join = |messages: &[String]| {
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        };

        Self::new(field, join(result.errors()), join(result.warnings()))
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Whether this report must block submission
    pub fn is_blocking(&self) -> bool {
        self.error.is_some()
    }
}

impl Serialize for FieldReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.warning.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.field.as_str(), &self.error)?;
        if let Some(warning) = &self.warning {
            map.serialize_entry(&self.field.warning_key(), warning)?;
        }
        map.end()
    }
}

/// A single validation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationInput {
    pub value: String,
    pub field: Field,
    #[serde(default)]
    pub mode: ValidationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ValidationInput {
    pub fn new(value: impl Into<String>, field: Field, mode: ValidationMode) -> Self {
        Self {
            value: value.into(),
            field,
            mode,
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Run the field dispatcher for this input
    pub fn validate(&self, ctx: &ValidationContext) -> FieldReport {
        super::validate_field(
            &self.value,
            self.field,
            self.mode,
            self.channel.as_deref(),
            ctx,
        )
    }
}

/// A campaign name decomposed along the library naming convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignName {
    pub year: u16,
    pub month: u8,
    pub action: String,
    pub variants: Vec<String>,
}

impl CampaignName {
    /// Decompose a value that fully satisfies the library convention
    ///
    /// Returns `None` for anything the library validator would reject,
    /// including names with empty segments.
    pub fn parse(value: &str) -> Option<Self> {
        if !patterns::canonical_campaign().is_match(value) {
            return None;
        }

        let mut segments = value.split('_');
        let year = segments.next()?.parse().ok()?;
        let month = segments.next()?.parse().ok()?;
        let action = segments.next()?.to_string();
        let variants: Vec<String> = segments.map(str::to_string).collect();

        if variants.iter().any(String::is_empty) {
            return None;
        }

        Some(Self {
            year,
            month,
            action,
            variants,
        })
    }
}

impl fmt::Display for CampaignName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}_{:02}_{}", self.year, self.month, self.action)?;
        for variant in &self.variants {
            write!(f, "_{}", variant)?;
        }
        Ok(())
    }
}
