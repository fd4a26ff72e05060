//! Error types for the utmkit core library
//!
//! Validation findings are never errors: they are reported as data inside
//! [`ValidationResult`](crate::validation::ValidationResult). The types here
//! cover the fallible operations around the validator, such as parsing a
//! field name, building a tracking URL or editing the campaign library.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use crate::validation::FieldReport;
use thiserror::Error;

/// Main error type for utmkit operations
#[derive(Error, Debug)]
pub enum Error {
    /// One or more fields failed nomenclature validation
    #[error("Validation error: {field} - {message}")]
    Validation {
        field: String,
        message: String,
        reports: Vec<FieldReport>,
    },

    /// A parameter required to complete the operation was empty
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    /// The base URL could not be parsed
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Channel name not present in the catalog
    #[error("Unknown channel: {name}")]
    UnknownChannel { name: String },

    /// Field name outside campaign/content/term/customParams
    #[error("Unknown field: {name} (expected campaign, content, term or customParams)")]
    UnknownField { name: String },

    /// Mode name other than library/builder
    #[error("Unknown validation mode: {name} (expected library or builder)")]
    UnknownMode { name: String },

    /// Campaign id not present in the library
    #[error("Campaign {id} not found")]
    CampaignNotFound { id: u64 },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a missing parameter error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Build a validation error from the blocking field reports
    ///
    /// The first blocking report becomes the headline `field` / `message`;
    /// all reports are kept for callers that render every field.
    pub fn from_reports(reports: Vec<FieldReport>) -> Self {
        let (field, message) = reports
            .iter()
            .find_map(|r| r.error().map(|e| (r.field().to_string(), e.to_string())))
            .unwrap_or_else(|| ("unknown".to_string(), "validation failed".to_string()));

        Self::Validation {
            field,
            message,
            reports,
        }
    }

    /// Whether this error is a nomenclature violation rather than a usage problem
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            message: source.to_string(),
            source,
        }
    }
}

/// Result type alias for utmkit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    #[test]
    fn test_from_reports_uses_first_blocking_field() {
        let reports = vec![
            FieldReport::new(Field::Campaign, None, Some("very short campaign name".to_string())),
            FieldReport::new(Field::Content, Some("lowercase only".to_string()), None),
        ];

        let error = Error::from_reports(reports);
        assert!(error.is_validation());
        assert_eq!(error.to_string(), "Validation error: content - lowercase only");
    }

    #[test]
    fn test_missing_parameter_display() {
        let error = Error::missing("base_url");
        assert_eq!(error.to_string(), "Missing required parameter: base_url");
        assert!(!error.is_validation());
    }
}
