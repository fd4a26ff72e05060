//! Tracking URL generation
//!
//! Builds the final `?utm_source=...&utm_medium=...` URL from a base URL and
//! a set of UTM parameters. Generation is gated on the field validator:
//! any blocking field error stops the build, warnings never do.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use crate::channel::Channel;
use crate::error::{Error, Result};
use crate::validation::{validate_field, Field, FieldReport, ValidationContext, ValidationMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

/// UTM parameter values for one tracking URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtmParams {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub content: String,
    pub term: String,
    #[serde(rename = "customParams", alias = "custom_params")]
    pub custom_params: String,
}

impl UtmParams {
    /// Parameters seeded with the channel's source and medium
    pub fn for_channel(channel: &Channel) -> Self {
        Self {
            source: channel.source.to_string(),
            medium: channel.medium.to_string(),
            ..Self::default()
        }
    }

    pub fn with_campaign(mut self, campaign: impl Into<String>) -> Self {
        self.campaign = campaign.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_custom_params(mut self, params: impl Into<String>) -> Self {
        self.custom_params = params.into();
        self
    }

    /// Run the field validator over every user-editable parameter
    ///
    /// `term` is skipped for channels that do not carry keywords, since it
    /// never reaches the URL for them.
    pub fn validate(
        &self,
        mode: ValidationMode,
        channel: Option<&Channel>,
        ctx: &ValidationContext,
    ) -> Vec<FieldReport> {
        let channel_name = channel.map(|c| c.name);
        let show_term = channel.map_or(true, |c| c.show_term);

        let mut reports = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let value = match field {
                Field::Campaign => &self.campaign,
                Field::Content => &self.content,
                Field::Term if !show_term => continue,
                Field::Term => &self.term,
                Field::CustomParams => &self.custom_params,
            };
            reports.push(validate_field(value, field, mode, channel_name, ctx));
        }

        reports
    }
}

/// Whether any report must block URL generation
pub fn has_blocking_errors(reports: &[FieldReport]) -> bool {
    reports.iter().any(FieldReport::is_blocking)
}

/// Append the UTM parameters to `base_url`
///
/// Base URL, source, medium and campaign are required. `utm_term` is only
/// emitted for channels that show a term. Query pairs already on the base
/// URL are kept ahead of the UTM pairs.
pub fn build_tracking_url(
    base_url: &str,
    channel: Option<&Channel>,
    params: &UtmParams,
) -> Result<Url> {
    let base_url = base_url.trim();
    let required = [
        ("base_url", base_url),
        ("source", params.source.trim()),
        ("medium", params.medium.trim()),
        ("campaign", params.campaign.trim()),
    ];
    if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(Error::missing(*name));
    }

    let mut url = Url::parse(base_url).map_err(|source| Error::InvalidUrl {
        url: base_url.to_string(),
        source,
    })?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("utm_source", params.source.trim());
        query.append_pair("utm_medium", params.medium.trim());
        query.append_pair("utm_campaign", params.campaign.trim());

        if !params.content.is_empty() {
            query.append_pair("utm_content", &params.content);
        }
        if !params.term.is_empty() && channel.is_some_and(|c| c.show_term) {
            query.append_pair("utm_term", &params.term);
        }

        for pair in params.custom_params.split('&').map(str::trim) {
            if let Some((key, value)) = pair.split_once('=') {
                query.append_pair(key, value);
            }
        }
    }

    Ok(url)
}

/// Validating front-end for [`build_tracking_url`]
#[derive(Debug, Clone)]
pub struct TrackingUrlBuilder {
    base_url: String,
    channel: Option<Channel>,
    params: UtmParams,
    mode: ValidationMode,
    ctx: ValidationContext,
}

impl TrackingUrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            channel: None,
            params: UtmParams::default(),
            mode: ValidationMode::Builder,
            ctx: ValidationContext::now(),
        }
    }

    /// Select a channel, resetting source and medium to its defaults
    pub fn channel(mut self, channel: &Channel) -> Self {
        self.params.source = channel.source.to_string();
        self.params.medium = channel.medium.to_string();
        if !channel.show_term {
            self.params.term.clear();
        }
        self.channel = Some(*channel);
        self
    }

    pub fn params(mut self, params: UtmParams) -> Self {
        self.params = params;
        self
    }

    pub fn campaign(mut self, campaign: impl Into<String>) -> Self {
        self.params.campaign = campaign.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.params.content = content.into();
        self
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.params.term = term.into();
        self
    }

    pub fn custom_params(mut self, params: impl Into<String>) -> Self {
        self.params.custom_params = params.into();
        self
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn context(mut self, ctx: ValidationContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn utm_params(&self) -> &UtmParams {
        &self.params
    }

    /// Field reports for the current parameters
    pub fn validate(&self) -> Vec<FieldReport> {
        self.params
            .validate(self.mode, self.channel.as_ref(), &self.ctx)
    }

    /// Validate, then generate the URL
    #[instrument(skip(self), fields(channel = self.channel.map(|c| c.name).unwrap_or("none")))]
    pub fn build(&self) -> Result<Url> {
        let reports = self.validate();
        if has_blocking_errors(&reports) {
            debug!("Tracking URL blocked by validation errors");
            return Err(Error::from_reports(reports));
        }

        build_tracking_url(&self.base_url, self.channel.as_ref(), &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> ValidationContext {
        ValidationContext::at(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap())
    }

    fn channel(name: &str) -> &'static Channel {
        Channel::find(name).unwrap()
    }

    #[test]
    fn test_build_search_channel_url() {
        let google = channel("Google Ads");
        let params = UtmParams::for_channel(google)
            .with_campaign("2025_08_sale")
            .with_term("{keyword}");

        let url = build_tracking_url("https://example.com", Some(google), &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/?utm_source=google&utm_medium=cpc&utm_campaign=2025_08_sale&utm_term=%7Bkeyword%7D"
        );
    }

    #[test]
    fn test_term_dropped_for_channels_without_term() {
        let facebook = channel("Facebook Ads");
        let params = UtmParams::for_channel(facebook)
            .with_campaign("2025_08_sale")
            .with_content("{{placement}}")
            .with_term("shoes");

        let url = build_tracking_url("https://example.com/landing", Some(facebook), &params).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("utm_content".to_string(), "{{placement}}".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "utm_term"));
    }

    #[test]
    fn test_custom_params_and_existing_query_are_kept() {
        let email = channel("Email");
        let params = UtmParams::for_channel(email)
            .with_campaign("2025_08_newsletter")
            .with_custom_params("ref=abc & id=42");

        let url = build_tracking_url("https://example.com/?lang=de", Some(email), &params).unwrap();
        assert_eq!(
            url.query(),
            Some("lang=de&utm_source=newsletter&utm_medium=email&utm_campaign=2025_08_newsletter&ref=abc&id=42")
        );
    }

    #[test]
    fn test_missing_required_parameters() {
        let params = UtmParams::default().with_campaign("2025_08_sale");
        let err = build_tracking_url("https://example.com", None, &params).unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref name } if name == "source"));

        let params = UtmParams::for_channel(channel("SEO"));
        let err = build_tracking_url("", None, &params).unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref name } if name == "base_url"));
    }

    #[test]
    fn test_invalid_base_url() {
        let params = UtmParams::for_channel(channel("SEO")).with_campaign("2025_08_sale");
        let err = build_tracking_url("not a url", None, &params).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_builder_blocks_on_errors_but_not_warnings() {
        let blocked = TrackingUrlBuilder::new("https://example.com")
            .context(ctx())
            .channel(channel("Google Ads"))
            .campaign("2025_08_sale")
            .content("Banner Top")
            .build()
            .unwrap_err();
        match blocked {
            Error::Validation { field, message, reports } => {
                assert_eq!(field, "content");
                assert_eq!(message, "lowercase only");
                assert_eq!(reports.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }

        let url = TrackingUrlBuilder::new("https://example.com")
            .context(ctx())
            .channel(channel("Push"))
            .campaign("summer")
            .build()
            .unwrap();
        assert!(url.as_str().contains("utm_campaign=summer"));
    }

    #[test]
    fn test_term_not_validated_for_channels_without_term() {
        let reports = UtmParams::for_channel(channel("Email"))
            .with_campaign("2025_08_sale")
            .with_term("Not Valid")
            .validate(ValidationMode::Builder, Some(channel("Email")), &ctx());

        assert_eq!(reports.len(), 3);
        assert!(!has_blocking_errors(&reports));
    }
}
