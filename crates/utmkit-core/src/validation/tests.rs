//! Tests for the validation system
//!
//! All tests run against a pinned date so the recency warnings are
//! deterministic.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

#[cfg(test)]
mod tests {
    use super::super::{
        validate_builder_campaign, validate_field, validate_library_campaign,
        validate_utm_campaign, CampaignName, Field, FieldReport, ValidationContext,
        ValidationInput, ValidationMode, ValidationResult,
    };
    use chrono::NaiveDate;
    use serde_json::json;

    fn ctx() -> ValidationContext {
        ValidationContext::at(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap())
    }

    fn library(value: &str) -> ValidationResult {
        validate_library_campaign(value, &ctx())
    }

    fn builder(value: &str) -> ValidationResult {
        validate_builder_campaign(value, &ctx())
    }

    fn assert_error(result: &ValidationResult, fragment: &str) {
        assert!(
            result.has_error(fragment),
            "expected error containing {:?}, got {:?}",
            fragment,
            result.errors()
        );
        assert!(!result.is_valid());
    }

    // Shared checks

    #[test]
    fn test_empty_campaign_is_required() {
        for value in ["", "   ", "\t\n"] {
            for mode in [ValidationMode::Library, ValidationMode::Builder] {
                let result = validate_utm_campaign(value, mode, &ctx());
                assert_eq!(result.errors(), ["campaign name is required"]);
                assert!(result.warnings().is_empty());
            }
        }
    }

    #[test]
    fn test_value_is_trimmed_before_rules() {
        let result = library("  2025_08_urlaubsrabatt_01  ");
        assert!(result.is_valid(), "{:?}", result.errors());
    }

    #[test]
    fn test_shared_checks_accumulate() {
        let result = builder("Sale now!");
        assert_error(&result, "no spaces allowed");
        assert_error(&result, "lowercase letters only");
        assert_error(
            &result,
            "invalid characters: S,  , ! (only a-z, 0-9, _, {}, % allowed)",
        );
    }

    #[test]
    fn test_invalid_characters_listed_once_in_order() {
        let result = builder("sale-x-y.z");
        assert_error(&result, "invalid characters: -, . (only");
    }

    // Library mode

    #[test]
    fn test_library_canonical_name_is_clean() {
        let result = library("2025_08_urlaubsrabatt_01");
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_library_month_out_of_range() {
        assert_error(&library("2025_13_sale"), "month must be between 01 and 12");
    }

    #[test]
    fn test_library_month_not_zero_padded() {
        assert_error(&library("2025_8_sale"), "zero-padded");
    }

    #[test]
    fn test_library_month_diagnostics() {
        assert_error(&library("2025_00_sale"), "month 00 is invalid (use 01-12)");
        assert_error(&library("2025_ab_sale"), "month must be 2 digits (01-12)");
        assert_error(&library("2025_123_sale"), "month must be 2 digits (01-12)");
        assert!(!library("2025_0_sale").has_error("zero-padded"));
    }

    #[test]
    fn test_library_edge_underscores() {
        assert_error(&library("_2025_08_sale_"), "must not start or end with underscore");
        assert_error(&library("2025_08_sale_"), "must not start or end with underscore");
    }

    #[test]
    fn test_library_double_underscore_even_when_pattern_matches() {
        let result = library("2025_08_sale__01");
        assert_error(&result, "double underscores not allowed");
    }

    #[test]
    fn test_library_too_few_segments() {
        let result = library("2025_08");
        assert_eq!(result.errors(), ["format must contain at least YYYY_MM_action"]);
    }

    #[test]
    fn test_library_year_diagnostics() {
        assert_error(&library("25_08_sale"), "year must be 4 digits (e.g. 2025)");
        assert_error(&library("1999_08_sale"), "year must start with 20 (e.g. 2025)");
    }

    #[test]
    fn test_library_year_recency_warnings() {
        let past = library("2020_8_sale");
        assert!(past.has_warning("year 2020 is far in the past"));

        let future = library("2030_8_sale");
        assert!(future.has_warning("year 2030 is far in the future"));

        let near = library("2027_8_sale");
        assert!(!near.has_warning("far in the"));
    }

    #[test]
    fn test_library_year_recency_on_canonical_names() {
        let result = library("2019_03_sommerfest");
        assert!(result.is_valid());
        assert!(result.has_warning("year 2019 is far in the past"));
    }

    #[test]
    fn test_library_action_diagnostics() {
        assert_error(&library("2025_08_"), "action missing after year and month");
        assert_error(&library("2025_08_1sale"), "action must start with a lowercase letter");
        assert_error(
            &library("2025_08_s{a}le"),
            "action may only contain lowercase letters, digits, underscores",
        );
    }

    #[test]
    fn test_library_variant_diagnostics() {
        assert_error(
            &library("2025_08_sale_{x}"),
            "variant '{x}' must start with a letter or digit",
        );
        assert_error(&library("2025_08_sale_01__{x}"), "empty variant at position 5");
    }

    #[test]
    fn test_library_rejects_placeholders_and_search() {
        assert!(!library("2025_08_%").is_valid());
        assert!(!library("2025_08_{keyword}").is_valid());
    }

    #[test]
    fn test_library_success_path_warnings() {
        let stale = library("2025_05_sale");
        assert!(stale.is_valid());
        assert_eq!(stale.warnings(), ["campaign is several months in the past"]);

        let recent = library("2025_07_sale");
        assert!(recent.warnings().is_empty());

        let short = library("2025_08_ab");
        assert!(short.is_valid());
        assert!(short.has_warning("action name is very short"));
    }

    // Builder mode

    #[test]
    fn test_builder_license_search_trigger() {
        let result = builder("2025_08_%");
        assert!(result.is_valid(), "{:?}", result.errors());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_builder_single_percent_only() {
        assert_error(&builder("2025_08_%ab%cd"), "only one % allowed for license search");
    }

    #[test]
    fn test_builder_search_term_characters() {
        assert!(builder("2025_08_%fc_bay").is_valid());
        assert_error(
            &builder("2025_08_%a{b}"),
            "search term after % may only contain lowercase letters, digits, underscores",
        );
    }

    #[test]
    fn test_builder_percent_without_underscore_warns() {
        let result = builder("sale%");
        assert!(result.is_valid());
        assert_eq!(result.warnings(), ["% should follow an underscore for readability"]);
    }

    #[test]
    fn test_builder_empty_placeholder() {
        assert_error(&builder("land_{}"), "empty placeholders {} not allowed");
        assert_eq!(builder("land_{}_{}").errors().len(), 1);
    }

    #[test]
    fn test_builder_unusual_placeholder_warns() {
        let result = builder("land_{foo}");
        assert!(result.is_valid());
        assert_eq!(result.warnings(), ["unusual placeholder: {foo}"]);
    }

    #[test]
    fn test_builder_known_placeholders_are_silent() {
        let result = builder("2025_08_sale_{keyword}_{device}");
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_builder_structure_and_length_warnings() {
        let result = builder("summer");
        assert_eq!(result.warnings(), ["campaign should be structured (e.g. with underscores)"]);

        let short = builder("ab");
        assert!(short.is_valid());
        assert!(short.has_warning("very short campaign name"));

        let placeholder_only = builder("{keyword}");
        assert!(!placeholder_only.has_warning("should be structured"));
    }

    #[test]
    fn test_builder_too_long() {
        let value = format!("a_{}", "b".repeat(99));
        assert_error(&builder(&value), "campaign name too long (max 100 characters)");
        assert!(builder(&value[..100]).is_valid());
    }

    #[test]
    fn test_builder_underscore_rules() {
        assert_error(&builder("sale__x"), "double underscores not allowed");
        assert_error(&builder("_sale"), "campaign name must not start or end with underscore");
    }

    #[test]
    fn test_builder_trailing_digits_warns() {
        let result = builder("sale_2025");
        assert!(result.is_valid());
        assert!(result.has_warning("long digit sequence at the end"));
        assert!(!builder("sale_01").has_warning("long digit sequence"));
    }

    #[test]
    fn test_mode_from_library_flag() {
        assert_eq!(ValidationMode::from_library_flag(true), ValidationMode::Library);
        assert_eq!(ValidationMode::from_library_flag(false), ValidationMode::Builder);
        assert_eq!("Strict".parse::<ValidationMode>().unwrap(), ValidationMode::Library);
        assert!("loose".parse::<ValidationMode>().is_err());
    }

    // Field dispatcher

    fn field(value: &str, field: Field, channel: &str) -> FieldReport {
        let channel = if channel.is_empty() { None } else { Some(channel) };
        validate_field(value, field, ValidationMode::Builder, channel, &ctx())
    }

    #[test]
    fn test_content_placement_exemption() {
        assert!(field("{{placement}}", Field::Content, "Facebook Ads").error().is_none());
        assert!(field("__PLACEMENT__", Field::Content, "Tiktok Ads").error().is_none());
        assert_eq!(
            field("__PLACEMENT__", Field::Content, "Google Ads").error(),
            Some("lowercase only")
        );
        assert_eq!(
            field("__PLACEMENT__", Field::Term, "Facebook Ads").error(),
            Some("lowercase only")
        );
    }

    #[test]
    fn test_content_diagnostics() {
        assert_eq!(field("Banner_Header", Field::Content, "").error(), Some("lowercase only"));
        assert_eq!(field("banner header", Field::Content, "").error(), Some("no spaces allowed"));
        assert_eq!(
            field("banner-header.v2", Field::Term, "").error(),
            Some("invalid characters: -, .")
        );
        assert!(field("banner_{placement}", Field::Content, "").error().is_none());
        assert!(field("", Field::Term, "").error().is_none());
    }

    #[test]
    fn test_custom_params_short_circuit() {
        assert!(field("", Field::CustomParams, "").error().is_none());
        assert!(field("a=1&b_2=X", Field::CustomParams, "").error().is_none());
        assert!(field("a=1 & b=2", Field::CustomParams, "").error().is_none());
        assert_eq!(
            field("a=1&&b", Field::CustomParams, "").error(),
            Some("empty parameters not allowed")
        );
        assert_eq!(
            field("a=1&b", Field::CustomParams, "").error(),
            Some("format must be key=value, e.g. param1=value1")
        );
        assert_eq!(
            field("a=1&", Field::CustomParams, "").error(),
            Some("empty parameters not allowed")
        );
    }

    #[test]
    fn test_campaign_field_joins_messages() {
        let report = field("Sale now", Field::Campaign, "");
        let error = report.error().unwrap();
        assert!(error.contains("no spaces allowed; lowercase letters only"));

        let report = field("", Field::Campaign, "");
        assert_eq!(report.error(), Some("campaign name is required"));

        let report = field("land_{foo}", Field::Campaign, "");
        assert!(report.error().is_none());
        assert_eq!(report.warning(), Some("unusual placeholder: {foo}"));
    }

    #[test]
    fn test_field_mode_only_affects_campaign() {
        let library = validate_field("2025_08_%", Field::Campaign, ValidationMode::Library, None, &ctx());
        let builder = validate_field("2025_08_%", Field::Campaign, ValidationMode::Builder, None, &ctx());
        assert!(library.is_blocking());
        assert!(!builder.is_blocking());
    }

    #[test]
    fn test_validation_input_dispatch() {
        let input = ValidationInput::new("__PLACEMENT__", Field::Content, ValidationMode::Builder)
            .with_channel("Facebook Ads");
        assert!(!input.validate(&ctx()).is_blocking());

        let parsed: ValidationInput = serde_json::from_value(json!({
            "value": "a=1",
            "field": "customParams"
        }))
        .unwrap();
        assert_eq!(parsed.mode, ValidationMode::Builder);
        assert!(!parsed.validate(&ctx()).is_blocking());
    }

    // Serialization

    #[test]
    fn test_result_serialization_shape() {
        let value = serde_json::to_value(builder("land_{foo}")).unwrap();
        assert_eq!(
            value,
            json!({
                "isValid": true,
                "errors": [],
                "warnings": ["unusual placeholder: {foo}"]
            })
        );
    }

    #[test]
    fn test_field_report_serialization_shape() {
        let clean = serde_json::to_value(field("banner", Field::Content, "")).unwrap();
        assert_eq!(clean, json!({ "content": null }));

        let warned = serde_json::to_value(field("summer", Field::Campaign, "")).unwrap();
        assert_eq!(
            warned,
            json!({
                "campaign": null,
                "campaign_warning": "campaign should be structured (e.g. with underscores)"
            })
        );
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("customParams".parse::<Field>().unwrap(), Field::CustomParams);
        assert_eq!("custom-params".parse::<Field>().unwrap(), Field::CustomParams);
        assert_eq!("Campaign".parse::<Field>().unwrap(), Field::Campaign);
        assert!("source".parse::<Field>().is_err());
    }

    // Campaign names

    #[test]
    fn test_campaign_name_decomposition() {
        let name = CampaignName::parse("2025_08_trikotgewinnspiel_liga2_01").unwrap();
        assert_eq!(name.year, 2025);
        assert_eq!(name.month, 8);
        assert_eq!(name.action, "trikotgewinnspiel");
        assert_eq!(name.variants, vec!["liga2", "01"]);
        assert_eq!(name.to_string(), "2025_08_trikotgewinnspiel_liga2_01");

        assert!(CampaignName::parse("2025_08_sale__01").is_none());
        assert!(CampaignName::parse("2025_8_sale").is_none());
    }

    #[test]
    fn test_validation_is_idempotent() {
        for value in ["2025_13_sale", "land_{foo}", "Sale now!", "2025_08_%"] {
            for mode in [ValidationMode::Library, ValidationMode::Builder] {
                let first = validate_utm_campaign(value, mode, &ctx());
                let second = validate_utm_campaign(value, mode, &ctx());
                assert_eq!(first, second);
                assert_eq!(first.is_valid(), first.errors().is_empty());
            }
        }
    }
}
