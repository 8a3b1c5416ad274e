//! Campaign draft record and partial updates.
//!
//! A draft accumulates user input across wizard steps. Patches only ever add
//! or overwrite fields; nothing is cleared by a patch that does not name it.

use crate::catalog::{ContentType, Platform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rate per 1K views a new draft starts with.
pub const DEFAULT_RATE_PER_K_VIEWS: f64 = 1.5;

/// Total budget a new draft starts with.
pub const DEFAULT_TOTAL_BUDGET: f64 = 1000.0;

/// A record that can be updated with partial patches.
pub trait Draft {
    /// Partial update type.
    type Patch;

    /// Merge `patch` into the record, overwriting named fields only.
    fn apply(&mut self, patch: Self::Patch);
}

/// Uncommitted campaign input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignDraft {
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub content_type: Option<ContentType>,
    pub platforms: BTreeSet<Platform>,
    pub rate_per_k_views: f64,
    pub total_budget: f64,
    pub daily_budget: Option<f64>,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self::seeded(DEFAULT_RATE_PER_K_VIEWS, DEFAULT_TOTAL_BUDGET)
    }
}

impl CampaignDraft {
    /// Create an empty draft with the default rate and budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty draft with the given rate and budget.
    #[must_use]
    pub const fn seeded(rate_per_k_views: f64, total_budget: f64) -> Self {
        Self {
            title: String::new(),
            short_description: String::new(),
            description: String::new(),
            content_type: None,
            platforms: BTreeSet::new(),
            rate_per_k_views,
            total_budget,
            daily_budget: None,
        }
    }

    /// Add `platform` to the selection. Returns `false` if already selected.
    pub fn select_platform(&mut self, platform: Platform) -> bool {
        self.platforms.insert(platform)
    }

    /// Remove `platform` from the selection. Returns `false` if absent.
    pub fn deselect_platform(&mut self, platform: Platform) -> bool {
        self.platforms.remove(&platform)
    }

    /// Set or clear `platform` according to a checkbox state.
    pub fn set_platform(&mut self, platform: Platform, checked: bool) -> bool {
        if checked {
            self.select_platform(platform)
        } else {
            self.deselect_platform(platform)
        }
    }

    /// Flip `platform`. Returns whether it is selected afterwards.
    pub fn toggle_platform(&mut self, platform: Platform) -> bool {
        if self.platforms.contains(&platform) {
            self.platforms.remove(&platform);
            false
        } else {
            self.platforms.insert(platform);
            true
        }
    }
}

impl Draft for CampaignDraft {
    type Patch = DraftPatch;

    fn apply(&mut self, patch: DraftPatch) {
        let DraftPatch {
            title,
            short_description,
            description,
            content_type,
            platforms,
            rate_per_k_views,
            total_budget,
            daily_budget,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = short_description {
            self.short_description = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = content_type {
            self.content_type = Some(v);
        }
        if let Some(v) = platforms {
            self.platforms = v;
        }
        if let Some(v) = rate_per_k_views {
            self.rate_per_k_views = v;
        }
        if let Some(v) = total_budget {
            self.total_budget = v;
        }
        if let Some(v) = daily_budget {
            self.daily_budget = Some(v);
        }
    }
}

/// Partial update for a [`CampaignDraft`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub content_type: Option<ContentType>,
    pub platforms: Option<BTreeSet<Platform>>,
    pub rate_per_k_views: Option<f64>,
    pub total_budget: Option<f64>,
    pub daily_budget: Option<f64>,
}

impl DraftPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the patch names no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the short description.
    #[must_use]
    pub fn short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    /// Set the full description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Set the content type.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Replace the platform selection.
    #[must_use]
    pub fn platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = Some(platforms.into_iter().collect());
        self
    }

    /// Set the rate per 1K views.
    #[must_use]
    pub const fn rate_per_k_views(mut self, rate: f64) -> Self {
        self.rate_per_k_views = Some(rate);
        self
    }

    /// Set the total budget.
    #[must_use]
    pub const fn total_budget(mut self, budget: f64) -> Self {
        self.total_budget = Some(budget);
        self
    }

    /// Set the daily budget cap.
    #[must_use]
    pub const fn daily_budget(mut self, budget: f64) -> Self {
        self.daily_budget = Some(budget);
        self
    }
}

/// Parse a rate field the way a numeric form input does: leading decimal
/// number, anything unparsable becomes 0.
#[must_use]
pub fn parse_rate_input(text: &str) -> f64 {
    numeric_prefix(text, true)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a budget field: leading integer, fraction truncated, anything
/// unparsable becomes 0.
#[must_use]
pub fn parse_budget_input(text: &str) -> f64 {
    numeric_prefix(text, false)
        .parse::<i64>()
        .map_or(0.0, |v| v as f64)
}

fn numeric_prefix(text: &str, allow_fraction: bool) -> &str {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if allow_fraction && !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_values() {
        let draft = CampaignDraft::new();
        assert_eq!(draft.rate_per_k_views, 1.5);
        assert_eq!(draft.total_budget, 1000.0);
        assert!(draft.title.is_empty());
        assert!(draft.content_type.is_none());
        assert!(draft.platforms.is_empty());
        assert!(draft.daily_budget.is_none());
    }

    #[test]
    fn test_apply_merges_named_fields_only() {
        let mut draft = CampaignDraft::new();
        draft.apply(DraftPatch::new().title("X").short_description("Y"));
        draft.apply(DraftPatch::new().description("Long"));

        assert_eq!(draft.title, "X");
        assert_eq!(draft.short_description, "Y");
        assert_eq!(draft.description, "Long");
        assert_eq!(draft.rate_per_k_views, 1.5);
    }

    #[test]
    fn test_apply_overwrites() {
        let mut draft = CampaignDraft::new();
        draft.apply(DraftPatch::new().title("First"));
        draft.apply(DraftPatch::new().title("Second").total_budget(250.0));
        assert_eq!(draft.title, "Second");
        assert_eq!(draft.total_budget, 250.0);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut draft = CampaignDraft::new();
        draft.apply(DraftPatch::new().content_type(ContentType::Slideshow));
        let before = draft.clone();
        draft.apply(DraftPatch::new());
        assert_eq!(draft, before);
        assert!(DraftPatch::new().is_empty());
        assert!(!DraftPatch::new().daily_budget(10.0).is_empty());
    }

    #[test]
    fn test_platform_selection_sequence() {
        let mut draft = CampaignDraft::new();
        assert!(draft.select_platform(Platform::Tiktok));
        assert!(draft.select_platform(Platform::Youtube));
        assert!(!draft.select_platform(Platform::Youtube));
        assert!(draft.deselect_platform(Platform::Tiktok));
        assert!(!draft.deselect_platform(Platform::Tiktok));

        assert_eq!(draft.platforms.len(), 1);
        assert!(draft.platforms.contains(&Platform::Youtube));
    }

    #[test]
    fn test_toggle_and_set_platform() {
        let mut draft = CampaignDraft::new();
        assert!(draft.toggle_platform(Platform::Twitter));
        assert!(!draft.toggle_platform(Platform::Twitter));
        assert!(draft.set_platform(Platform::Instagram, true));
        assert!(draft.set_platform(Platform::Instagram, false));
        assert!(draft.platforms.is_empty());
    }

    #[test]
    fn test_patch_platforms_deduplicates() {
        let mut draft = CampaignDraft::new();
        draft.apply(DraftPatch::new().platforms([Platform::Tiktok, Platform::Tiktok]));
        assert_eq!(draft.platforms.len(), 1);
    }

    #[test]
    fn test_patch_deserializes_from_yaml() {
        let patch: DraftPatch = serde_yaml_ng::from_str(
            "title: Launch\nplatforms: [tiktok, youtube]\nrate_per_k_views: 2.5\n",
        )
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("Launch"));
        assert_eq!(patch.platforms.map(|p| p.len()), Some(2));
        assert_eq!(patch.rate_per_k_views, Some(2.5));
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let result: Result<DraftPatch, _> = serde_yaml_ng::from_str("budget: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rate_input() {
        assert_eq!(parse_rate_input("2.5"), 2.5);
        assert_eq!(parse_rate_input(" 1.25usd"), 1.25);
        assert_eq!(parse_rate_input(".5"), 0.5);
        assert_eq!(parse_rate_input(""), 0.0);
        assert_eq!(parse_rate_input("abc"), 0.0);
        assert_eq!(parse_rate_input("-"), 0.0);
    }

    #[test]
    fn test_parse_budget_input() {
        assert_eq!(parse_budget_input("1500"), 1500.0);
        assert_eq!(parse_budget_input("1500.9"), 1500.0);
        assert_eq!(parse_budget_input("-20"), -20.0);
        assert_eq!(parse_budget_input("x100"), 0.0);
    }
}
