//! License catalog command handler

use super::utils::{load_license_catalog, resolve_data_file};
use crate::cli::LicensesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use tracing::{info, instrument};

/// Handle the licenses command
#[instrument(skip(config, output), fields(search = ?args.search))]
pub fn handle_licenses(args: LicensesArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let path = resolve_data_file(args.file, config.data.licenses_file.as_ref(), "data.licenses_file")?;
    let catalog = load_license_catalog(&path)?;

    let term = args.search.unwrap_or_default();
    let grouped = catalog.search(&term);
    let total: usize = grouped.values().map(Vec::len).sum();
    info!(total, "Listed licenses");

    if !output.is_human() {
        return output.data(&grouped);
    }

    if grouped.is_empty() {
        output.warning(&format!("No licenses match '{}'", term))?;
        return Ok(());
    }

    for (category, licenses) in &grouped {
        output.section(category)?;
        let rows = licenses
            .iter()
            .map(|l| {
                vec![
                    l.name.clone(),
                    l.utm_writing.clone(),
                    l.tags.clone().unwrap_or_default(),
                ]
            })
            .collect();
        output.table(&["Name", "UTM Writing", "Tags"], rows)?;
    }
    output.info(&format!("{} licenses in {} categories", total, grouped.len()))
}
