//! Campaign library
//!
//! The library is the registry of approved campaign names. Every name that
//! enters it has passed library-mode validation at insert time; [`CampaignLibrary::check`]
//! re-runs the validator later, since the recency warnings drift with the date.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::validation::{
    validate_library_campaign, Field, FieldReport, ValidationContext, ValidationResult,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Categories offered for new campaigns
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Saisonale Aktionen",
    "Produktlaunches",
    "Gewinnspiele",
    "Rabattaktionen",
    "Brand Awareness",
    "Sonstiges",
];

/// A registered campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub archived: bool,
}

/// In-memory campaign registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignLibrary {
    campaigns: Vec<Campaign>,
    next_id: u64,
}

impl CampaignLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap campaigns loaded from storage; they are not re-validated
    pub fn from_campaigns(campaigns: Vec<Campaign>) -> Self {
        let next_id = campaigns.iter().map(|c| c.id + 1).max().unwrap_or_default();
        Self { campaigns, next_id }
    }

    /// Load a JSON array of campaigns
    pub fn from_json_str(content: &str) -> Result<Self> {
        let campaigns: Vec<Campaign> = serde_json::from_str(content)?;
        Ok(Self::from_campaigns(campaigns))
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn get(&self, id: u64) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Register a new campaign, returning its id
    ///
    /// Name and category are required and the name must pass library-mode
    /// validation. Warnings do not block registration.
    pub fn add(
        &mut self,
        name: &str,
        category: &str,
        ctx: &ValidationContext,
    ) -> Result<u64> {
        let name = name.trim();
        let category = category.trim();
        require(name, category)?;
        let result = validate_library_campaign(name, ctx);
        ensure_valid(&result)?;

        let id = self.next_id;
        self.next_id += 1;
        self.campaigns.push(Campaign {
            id,
            name: name.to_string(),
            category: category.to_string(),
            archived: false,
        });

        info!(id, name, category, "Campaign added to library");
        Ok(id)
    }

    /// Rename or recategorize an existing campaign
    pub fn update(
        &mut self,
        id: u64,
        name: &str,
        category: &str,
        ctx: &ValidationContext,
    ) -> Result<()> {
        let name = name.trim();
        let category = category.trim();
        require(name, category)?;
        ensure_valid(&validate_library_campaign(name, ctx))?;

        let campaign = self.get_mut(id)?;
        campaign.name = name.to_string();
        campaign.category = category.to_string();

        debug!(id, name, "Campaign updated");
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<Campaign> {
        let index = self
            .campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::CampaignNotFound { id })?;

        debug!(id, "Campaign removed");
        Ok(self.campaigns.remove(index))
    }

    /// Flip the archived flag, returning the new state
    pub fn toggle_archive(&mut self, id: u64) -> Result<bool> {
        let campaign = self.get_mut(id)?;
        campaign.archived = !campaign.archived;
        Ok(campaign.archived)
    }

    /// Campaigns in one archive state whose name or category contains `search`
    pub fn filter(&self, search: &str, show_archived: bool) -> Vec<&Campaign> {
        let needle = search.trim().to_lowercase();
        self.campaigns
            .iter()
            .filter(|c| c.archived == show_archived)
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Re-validate every stored name against today's date
    pub fn check(&self, ctx: &ValidationContext) -> Vec<(&Campaign, ValidationResult)> {
        self.campaigns
            .iter()
            .map(|c| (c, validate_library_campaign(&c.name, ctx)))
            .collect()
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Campaign> {
        self.campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::CampaignNotFound { id })
    }
}

fn require(name: &str, category: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::missing("name"));
    }
    if category.is_empty() {
        return Err(Error::missing("category"));
    }
    Ok(())
}

fn ensure_valid(result: &ValidationResult) -> Result<()> {
    if result.is_valid() {
        return Ok(());
    }
    Err(Error::from_reports(vec![FieldReport::from_result(
        Field::Campaign,
        result,
    )]))
}
