//! Marketing channel catalog
//!
//! Each channel fixes the `utm_source` / `utm_medium` pair and decides
//! whether `utm_term` is meaningful for it (only paid search carries
//! keywords).
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::Serialize;

/// A marketing channel with its UTM defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub name: &'static str,
    pub source: &'static str,
    pub medium: &'static str,
    pub show_term: bool,
}

/// Channels whose ad platforms substitute a placement macro into `utm_content`
const PLACEMENT_CHANNELS: [&str; 2] = ["Facebook Ads", "Tiktok Ads"];

const CATALOG: [Channel; 10] = [
    Channel::new("Google Ads", "google", "cpc", true),
    Channel::new("Bing Ads", "bing", "cpc", true),
    Channel::new("Facebook Ads", "facebook", "paid", false),
    Channel::new("Tiktok Ads", "tiktok", "paid", false),
    Channel::new("Email", "newsletter", "email", false),
    Channel::new("Social Organic", "organic", "social", false),
    Channel::new("SEO", "google", "organic", false),
    Channel::new("Affiliate", "affiliate", "referral", false),
    Channel::new("Koop", "partner", "koop", false),
    Channel::new("Push", "website", "push", false),
];

impl Channel {
    const fn new(
        name: &'static str,
        source: &'static str,
        medium: &'static str,
        show_term: bool,
    ) -> Self {
        Self {
            name,
            source,
            medium,
            show_term,
        }
    }

    /// Every channel in catalog order
    pub fn all() -> &'static [Channel] {
        &CATALOG
    }

    /// Look up a channel by name, exact match first, then case-insensitive
    pub fn find(name: &str) -> Option<&'static Channel> {
        let name = name.trim();
        CATALOG
            .iter()
            .find(|c| c.name == name)
            .or_else(|| CATALOG.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    /// Like [`Channel::find`], failing with [`Error::UnknownChannel`]
    pub fn lookup(name: &str) -> Result<&'static Channel> {
        Self::find(name).ok_or_else(|| Error::UnknownChannel {
            name: name.to_string(),
        })
    }

    /// Whether `{{placement}}` / `__PLACEMENT__` are accepted in `utm_content`
    pub fn allows_placement_macro(&self) -> bool {
        allows_placement_macro(self.name)
    }
}

/// Placement-macro exemption by exact channel name
pub fn allows_placement_macro(channel_name: &str) -> bool {
    PLACEMENT_CHANNELS.iter().any(|c| *c == channel_name)
}
