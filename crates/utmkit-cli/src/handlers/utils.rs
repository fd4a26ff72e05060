//! Shared utilities for command handlers

use crate::error::{Error, ErrorContext, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use utmkit_core::{Campaign, CampaignLibrary, LicenseCatalog};

/// Document formats recognized by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
    Text,
}

impl DocumentFormat {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Text,
        }
    }
}

/// Read a file, failing with [`Error::FileNotFound`] when it is absent
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Parse a structured document into a JSON value
///
/// Files without a JSON/YAML/TOML extension are parsed as JSON.
pub fn read_document(path: &Path) -> Result<serde_json::Value> {
    let content = read_file(path)?;
    parse_document(&content, DocumentFormat::of(path)).ok_or_else(|| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: match DocumentFormat::of(path) {
            DocumentFormat::Yaml => "YAML",
            DocumentFormat::Toml => "TOML",
            _ => "JSON",
        }
        .to_string(),
    })
}

fn parse_document(content: &str, format: DocumentFormat) -> Option<serde_json::Value> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).ok(),
        DocumentFormat::Toml => toml::from_str(content).ok(),
        DocumentFormat::Json | DocumentFormat::Text => serde_json::from_str(content).ok(),
    }
}

/// Pick the explicit path, else the configured one
pub fn resolve_data_file(
    explicit: Option<PathBuf>,
    configured: Option<&PathBuf>,
    key: &str,
) -> Result<PathBuf> {
    explicit.or_else(|| configured.cloned()).ok_or_else(|| {
        Error::config(format!(
            "No file given; pass --file or set {} in the configuration",
            key
        ))
    })
}

/// Load the license catalog from a JSON or YAML file
pub fn load_license_catalog(path: &Path) -> Result<LicenseCatalog> {
    let document = read_document(path)?;
    let catalog = LicenseCatalog::from_value(document)?;
    debug!("Loaded {} licenses from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load the campaign library; a missing file is an empty library
pub fn load_library(path: &Path) -> Result<CampaignLibrary> {
    if !path.exists() {
        debug!("No library at {}, starting empty", path.display());
        return Ok(CampaignLibrary::new());
    }

    let campaigns: Vec<Campaign> = serde_json::from_value(read_document(path)?)?;
    Ok(CampaignLibrary::from_campaigns(campaigns))
}

/// Write the campaign library back in the format its extension names
pub fn save_library(path: &Path, library: &CampaignLibrary) -> Result<()> {
    let content = match DocumentFormat::of(path) {
        DocumentFormat::Yaml => serde_yaml::to_string(library.campaigns())?,
        _ => serde_json::to_string_pretty(library.campaigns())?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Saved {} campaigns to {}", library.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use utmkit_core::ValidationContext;

    #[test]
    fn test_library_round_trip_through_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaigns.yaml");
        let ctx = ValidationContext::at(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap());

        let mut library = load_library(&path).unwrap();
        assert!(library.is_empty());
        library.add("2025_08_sale", "Rabattaktionen", &ctx).unwrap();
        save_library(&path, &library).unwrap();

        let reloaded = load_library(&path).unwrap();
        assert_eq!(reloaded.campaigns(), library.campaigns());
    }

    #[test]
    fn test_grouped_license_catalog_from_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("licenses.yml");
        fs::write(
            &path,
            "Fussball:\n  - name: FC Bayern\n    tags: bundesliga\n    utm_writing: fcbayern\n",
        )
        .unwrap();

        let catalog = load_license_catalog(&path).unwrap();
        assert_eq!(catalog.find_by_name("FC Bayern").unwrap().category, "Fussball");
    }

    #[test]
    fn test_missing_and_malformed_documents() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(read_document(&missing), Err(Error::FileNotFound { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        assert!(matches!(
            read_document(&broken),
            Err(Error::InvalidFormat { ref expected, .. }) if expected == "JSON"
        ));
    }

    #[test]
    fn test_resolve_data_file_prefers_explicit_path() {
        let configured = PathBuf::from("configured.json");
        let explicit = PathBuf::from("explicit.json");
        assert_eq!(
            resolve_data_file(Some(explicit.clone()), Some(&configured), "data.library_file").unwrap(),
            explicit
        );
        assert_eq!(
            resolve_data_file(None, Some(&configured), "data.library_file").unwrap(),
            configured
        );
        assert!(resolve_data_file(None, None, "data.library_file").is_err());
    }
}
