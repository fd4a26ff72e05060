//! utmkit Core - Campaign nomenclature validation for UTM tracking URLs
//!
//! This crate provides the decision logic behind utmkit: validating campaign
//! names against the `YYYY_MM_action[_variant]` naming convention and building
//! tracking URLs from validated UTM parameters.
//!
//! # Main Components
//!
//! - **Validation**: Library (strict) and builder (lenient) campaign validators
//!   plus the per-field dispatcher for `content`, `term` and `customParams`
//! - **Channels**: The fixed catalog of marketing channels and their
//!   `utm_source` / `utm_medium` defaults
//! - **Tracking**: Tracking URL generation gated on validation
//! - **Licenses**: The `%searchterm` license-search shorthand and catalog lookup
//! - **Library**: The in-memory campaign library with validated inserts
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use utmkit_core::{validate_utm_campaign, ValidationContext, ValidationMode};
//!
//! let ctx = ValidationContext::at(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap());
//! let result = validate_utm_campaign("2025_08_urlaubsrabatt_01", ValidationMode::Library, &ctx);
//! assert!(result.is_valid());
//! ```
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

pub mod channel;
pub mod error;
pub mod library;
pub mod license;
pub mod tracking;
pub mod validation;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use channel::Channel;
pub use library::{Campaign, CampaignLibrary, DEFAULT_CATEGORIES};
pub use license::{License, LicenseCatalog, LicenseQuery};
pub use tracking::{build_tracking_url, TrackingUrlBuilder, UtmParams};
pub use validation::{
    validate_builder_campaign, validate_field, validate_library_campaign, validate_utm_campaign,
    CampaignName, Field, FieldReport, ValidationContext, ValidationInput, ValidationMode,
    ValidationResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
