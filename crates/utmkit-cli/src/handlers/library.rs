//! Campaign library command handlers

use super::utils::{load_library, resolve_data_file, save_library};
use crate::cli::{LibraryAction, LibraryAddArgs, LibraryArgs, LibraryIdArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};
use utmkit_core::{Campaign, ValidationContext, ValidationMode, ValidationResult, DEFAULT_CATEGORIES};

/// Re-validation outcome for one stored campaign
#[derive(Serialize)]
struct CheckedCampaign<'a> {
    #[serde(flatten)]
    campaign: &'a Campaign,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Handle the library command
#[instrument(skip_all)]
pub fn handle_library(
    args: LibraryArgs,
    config: &Config,
    ctx: &ValidationContext,
    output: &mut OutputWriter,
) -> Result<()> {
    let file = args.file;
    let library_file = || {
        resolve_data_file(file.clone(), config.data.library_file.as_ref(), "data.library_file")
    };

    match args.action {
        None => handle_list(&library_file()?, args.search.as_deref(), args.archived, output),
        Some(LibraryAction::Add(add_args)) => handle_add(&library_file()?, add_args, ctx, output),
        Some(LibraryAction::Archive(id_args)) => handle_archive(&library_file()?, id_args, output),
        Some(LibraryAction::Remove(id_args)) => handle_remove(&library_file()?, id_args, output),
        Some(LibraryAction::Check) => handle_check(&library_file()?, ctx, output),
        Some(LibraryAction::Categories) => handle_categories(output),
    }
}

fn handle_list(
    path: &Path,
    search: Option<&str>,
    archived: bool,
    output: &mut OutputWriter,
) -> Result<()> {
    let library = load_library(path)?;
    let campaigns = library.filter(search.unwrap_or_default(), archived);

    if !output.is_human() {
        return output.data(&campaigns);
    }

    let state = if archived { "archived" } else { "active" };
    if campaigns.is_empty() {
        output.info(&format!("No {} campaigns found", state))?;
        return Ok(());
    }

    output.section(&format!("Campaigns ({})", state))?;
    let rows = campaigns
        .iter()
        .map(|c| vec![c.id.to_string(), c.name.clone(), c.category.clone()])
        .collect();
    output.table(&["ID", "Name", "Category"], rows)
}

fn handle_add(
    path: &Path,
    args: LibraryAddArgs,
    ctx: &ValidationContext,
    output: &mut OutputWriter,
) -> Result<()> {
    let mut library = load_library(path)?;
    let id = library.add(&args.name, &args.category, ctx)?;
    save_library(path, &library)?;

    if output.is_human() {
        output.success(&format!("✓ Added campaign {} as #{}", args.name.trim(), id))?;
    } else if let Some(campaign) = library.get(id) {
        output.data(campaign)?;
    }
    Ok(())
}

fn handle_archive(path: &Path, args: LibraryIdArgs, output: &mut OutputWriter) -> Result<()> {
    let mut library = load_library(path)?;
    let archived = library.toggle_archive(args.id)?;
    save_library(path, &library)?;
    info!(id = args.id, archived, "Campaign archive state changed");

    let action = if archived { "Archived" } else { "Restored" };
    output.success(&format!("✓ {} campaign #{}", action, args.id))
}

fn handle_remove(path: &Path, args: LibraryIdArgs, output: &mut OutputWriter) -> Result<()> {
    let mut library = load_library(path)?;
    let removed = library.remove(args.id)?;
    save_library(path, &library)?;

    output.success(&format!("✓ Removed campaign #{} ({})", removed.id, removed.name))
}

fn handle_check(path: &Path, ctx: &ValidationContext, output: &mut OutputWriter) -> Result<()> {
    let library = load_library(path)?;
    let checked = library.check(ctx);
    let invalid = checked.iter().filter(|(_, r)| !r.is_valid()).count();

    if output.is_human() {
        for (campaign, result) in &checked {
            if !result.is_valid() || !result.warnings().is_empty() {
                output.campaign_result(&campaign.name, ValidationMode::Library, result)?;
            }
        }
        output.info(&format!(
            "{} stored campaigns checked, {} invalid",
            checked.len(),
            invalid
        ))?;
    } else {
        let view: Vec<_> = checked
            .iter()
            .map(|(campaign, result)| CheckedCampaign { campaign, result })
            .collect();
        output.data(&view)?;
    }

    if invalid > 0 {
        warn!(invalid, "Stored campaigns no longer pass validation");
        return Err(Error::ValidationFailed { count: invalid });
    }
    Ok(())
}

fn handle_categories(output: &mut OutputWriter) -> Result<()> {
    if !output.is_human() {
        return output.data(&DEFAULT_CATEGORIES);
    }

    output.section("Campaign Categories")?;
    for category in DEFAULT_CATEGORIES {
        output.writeln(&format!("• {}", category))?;
    }
    Ok(())
}
