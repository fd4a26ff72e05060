//! Tracking URL build command handler

use super::utils::{load_license_catalog, resolve_data_file};
use crate::cli::BuildArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use tracing::{debug, info, instrument};
use utmkit_core::{
    Channel, FieldReport, LicenseQuery, TrackingUrlBuilder, UtmParams, ValidationContext,
};

/// Machine-readable result of a successful build
#[derive(Serialize)]
struct BuildOutput<'a> {
    url: String,
    channel: &'static str,
    params: &'a UtmParams,
    reports: &'a [FieldReport],
}

/// Handle the build command
#[instrument(skip(config, ctx, output), fields(campaign = %args.campaign))]
pub fn handle_build(
    args: BuildArgs,
    config: &Config,
    ctx: &ValidationContext,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("build_command");

    let channel_name = args
        .channel
        .as_deref()
        .or(config.defaults.channel.as_deref())
        .ok_or_else(|| {
            Error::invalid_args("no channel given; pass --channel or set defaults.channel")
        })?;
    let channel = Channel::lookup(channel_name)?;

    let base_url = args
        .base_url
        .as_deref()
        .or(config.defaults.base_url.as_deref())
        .ok_or_else(|| {
            Error::invalid_args("no landing page given; pass --base-url or set defaults.base_url")
        })?;

    let campaign = match LicenseQuery::detect(&args.campaign) {
        Some(query) => resolve_license(&query, &args, config, output)?,
        None => args.campaign.clone(),
    };
    debug!(channel = channel.name, campaign = %campaign, "Resolved build inputs");

    let mut builder = TrackingUrlBuilder::new(base_url)
        .context(*ctx)
        .channel(channel)
        .campaign(campaign);
    if let Some(content) = args.content {
        builder = builder.content(content);
    }
    if let Some(term) = args.term {
        builder = builder.term(term);
    }
    if let Some(params) = args.params {
        builder = builder.custom_params(params);
    }

    let reports = builder.validate();
    if output.is_human() {
        output.section("Field Validation")?;
        output.field_reports(&reports)?;
    }

    let url = builder.build()?;
    info!(url = %url, "Tracking URL generated");

    if output.is_human() {
        output.section("Tracking URL")?;
        output.writeln(url.as_str())?;
    } else {
        output.data(&BuildOutput {
            url: url.to_string(),
            channel: channel.name,
            params: builder.utm_params(),
            reports: &reports,
        })?;
    }

    Ok(())
}

/// Substitute a `%searchterm` with a license's UTM spelling
///
/// Without `--license` the matching licenses are listed and the build stops;
/// an unresolved search term never reaches a URL.
fn resolve_license(
    query: &LicenseQuery,
    args: &BuildArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<String> {
    let path = resolve_data_file(
        args.licenses_file.clone(),
        config.data.licenses_file.as_ref(),
        "data.licenses_file",
    )?;
    let catalog = load_license_catalog(&path)?;

    if let Some(name) = &args.license {
        let license = catalog
            .find_by_name(name)
            .ok_or_else(|| Error::invalid_args(format!("license '{}' not found", name)))?;
        let campaign = query.apply(license);
        output.info(&format!("License search '%{}' resolved to {}", query.term, campaign))?;
        return Ok(campaign);
    }

    let matches = catalog.search(&query.term);
    output.section(&format!("Licenses matching '{}'", query.term))?;
    let rows = matches
        .values()
        .flatten()
        .map(|l| vec![l.category.clone(), l.name.clone(), query.apply(l)])
        .collect();
    output.table(&["Category", "License", "Campaign"], rows)?;
    if !output.is_human() {
        output.data(&matches)?;
    }

    Err(Error::invalid_args(format!(
        "campaign contains the license search '%{}'; choose a license with --license",
        query.term
    )))
}
