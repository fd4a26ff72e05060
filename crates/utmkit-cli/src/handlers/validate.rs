//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tracing::{debug, info, instrument, warn};
use utmkit_core::{validate_utm_campaign, Channel, Field, ValidationContext, ValidationInput};

/// Handle the validate command
#[instrument(skip(config, ctx, output), fields(field = %args.field))]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    ctx: &ValidationContext,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("field: {}", args.field));
    let mode = args.mode.unwrap_or(config.defaults.mode);

    // Catalog spelling decides the placement exemption
    let channel = args
        .channel
        .as_deref()
        .map(Channel::lookup)
        .transpose()?
        .map(|c| c.name);
    debug!(mode = %mode, channel = channel.unwrap_or("none"), "Resolved validation settings");

    let valid = if args.field == Field::Campaign {
        let result = validate_utm_campaign(&args.value, mode, ctx);
        output.campaign_result(&args.value, mode, &result)?;
        result.is_valid()
    } else {
        let mut input = ValidationInput::new(args.value.as_str(), args.field, mode);
        if let Some(name) = channel {
            input = input.with_channel(name);
        }
        let report = input.validate(ctx);
        output.field_reports(std::slice::from_ref(&report))?;
        !report.is_blocking()
    };

    if valid {
        info!("Value passed validation");
        Ok(())
    } else {
        warn!("Value failed validation");
        Err(Error::ValidationFailed { count: 1 })
    }
}
