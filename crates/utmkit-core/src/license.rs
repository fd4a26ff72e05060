//! License-search shorthand
//!
//! In builder mode a campaign may end in `%searchterm` (for example
//! `2025_08_%bayern`). The term is looked up in the license catalog and the
//! `%searchterm` suffix is replaced by the chosen license's UTM spelling.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::validation::patterns;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A licensed brand or property that campaigns can reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct License {
    pub category: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Spelling used inside campaign names
    pub utm_writing: String,
}

impl License {
    fn matches(&self, needle: &str) -> bool {
        self.category.to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self
                .tags
                .as_deref()
                .is_some_and(|tags| tags.to_lowercase().contains(needle))
    }
}

/// A `%searchterm` detected in a campaign value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseQuery {
    /// Everything before the `%`
    pub prefix: String,
    /// The search term after the `%`, possibly empty
    pub term: String,
}

impl LicenseQuery {
    /// Detect the shorthand in a campaign value
    ///
    /// Requires exactly one `%` and a term of lowercase letters, digits and
    /// underscores; anything else is not a usable query.
    pub fn detect(campaign: &str) -> Option<Self> {
        let campaign = campaign.trim();
        if campaign.matches('%').count() != 1 {
            return None;
        }

        let (prefix, term) = campaign.split_once('%')?;
        if !patterns::search_term().is_match(term) {
            return None;
        }

        Some(Self {
            prefix: prefix.to_string(),
            term: term.to_string(),
        })
    }

    /// Campaign value with `%term` replaced by the license's UTM spelling
    pub fn apply(&self, license: &License) -> String {
        format!("{}{}", self.prefix, license.utm_writing)
    }
}

/// Searchable list of licenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseCatalog {
    licenses: Vec<License>,
}

#[derive(Deserialize)]
struct GroupedEntry {
    name: String,
    #[serde(default)]
    tags: Option<String>,
    utm_writing: String,
}

/// Accepted on-disk shapes: a flat list, or licenses grouped by category
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Flat(Vec<License>),
    Grouped(BTreeMap<String, Vec<GroupedEntry>>),
}

impl LicenseCatalog {
    pub fn new(licenses: Vec<License>) -> Self {
        Self { licenses }
    }

    /// Load from a JSON value in either the flat or the grouped shape
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let licenses = match serde_json::from_value(value)? {
            CatalogDocument::Flat(licenses) => licenses,
            CatalogDocument::Grouped(groups) => groups
                .into_iter()
                .flat_map(|(category, entries)| {
                    entries.into_iter().map(move |entry| License {
                        category: category.clone(),
                        name: entry.name,
                        tags: entry.tags,
                        utm_writing: entry.utm_writing,
                    })
                })
                .collect(),
        };

        Ok(Self::new(licenses))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(content)?)
    }

    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }

    /// Case-insensitive substring search over category, name and tags
    ///
    /// Results are de-duplicated and grouped by category, ordered by
    /// category then name. An empty term matches everything.
    pub fn search(&self, term: &str) -> BTreeMap<String, Vec<License>> {
        let needle = term.trim().to_lowercase();
        let matched: BTreeSet<&License> = self
            .licenses
            .iter()
            .filter(|license| license.matches(&needle))
            .collect();

        let mut grouped: BTreeMap<String, Vec<License>> = BTreeMap::new();
        for license in matched {
            grouped
                .entry(license.category.clone())
                .or_default()
                .push(license.clone());
        }

        debug!(term, categories = grouped.len(), "License search completed");
        grouped
    }

    /// Find a license by name or UTM spelling, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&License> {
        let name = name.trim();
        self.licenses.iter().find(|license| {
            license.name.eq_ignore_ascii_case(name) || license.utm_writing.eq_ignore_ascii_case(name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> LicenseCatalog {
        LicenseCatalog::from_value(json!({
            "Fussball": [
                {"name": "FC Bayern", "tags": "bundesliga, muenchen", "utm_writing": "fcbayern"},
                {"name": "Borussia Dortmund", "tags": "bundesliga", "utm_writing": "bvb"}
            ],
            "Film": [
                {"name": "Star Wars", "tags": null, "utm_writing": "starwars"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_detect_query() {
        let query = LicenseQuery::detect("2025_08_%bay").unwrap();
        assert_eq!(query.prefix, "2025_08_");
        assert_eq!(query.term, "bay");

        let trigger = LicenseQuery::detect("2025_08_%").unwrap();
        assert_eq!(trigger.term, "");

        assert!(LicenseQuery::detect("2025_08_sale").is_none());
        assert!(LicenseQuery::detect("2025_08_%a%b").is_none());
        assert!(LicenseQuery::detect("2025_08_%Bay").is_none());
    }

    #[test]
    fn test_apply_replaces_search_term() {
        let catalog = catalog();
        let query = LicenseQuery::detect("2025_08_%bay").unwrap();
        let license = catalog.find_by_name("fc bayern").unwrap();
        assert_eq!(query.apply(license), "2025_08_fcbayern");
    }

    #[test]
    fn test_search_groups_and_orders() {
        let results = catalog().search("BUNDESLIGA");
        assert_eq!(results.len(), 1);
        let names: Vec<&str> = results["Fussball"].iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Borussia Dortmund", "FC Bayern"]);

        let everything = catalog().search("");
        let categories: Vec<&String> = everything.keys().collect();
        assert_eq!(categories, vec!["Film", "Fussball"]);
    }

    #[test]
    fn test_search_removes_duplicates() {
        let license = License {
            category: "Film".to_string(),
            name: "Star Wars".to_string(),
            tags: None,
            utm_writing: "starwars".to_string(),
        };
        let catalog = LicenseCatalog::new(vec![license.clone(), license]);
        assert_eq!(catalog.search("star")["Film"].len(), 1);
    }

    #[test]
    fn test_flat_document() {
        let catalog = LicenseCatalog::from_json_str(
            r#"[{"category": "Film", "name": "Star Wars", "utm_writing": "starwars"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_by_name("STARWARS").is_some());
        assert!(LicenseCatalog::from_json_str("42").is_err());
    }
}
