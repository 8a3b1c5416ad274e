//! Campaign builder rules: the five-step table, derived budget figures and
//! the summaries shown on the review step and on campaign cards.

use crate::catalog::{platform_badge, ContentType};
use crate::draft::CampaignDraft;
use crate::format::{format_cents_rate, format_short_count, format_usd_2dp, format_views};
use crate::validation::{Positive, Required, Selected, ValidationReport};
use crate::wizard::{StepDefinition, StepRule, WizardController};
use serde::{Deserialize, Serialize};

/// Share of the per-1K rate paid out to creators.
pub const CREATOR_SHARE: f64 = 0.75;

/// Number of platform badges shown on a card before collapsing to `+N`.
pub const MAX_CARD_BADGES: usize = 3;

/// Wizard over a [`CampaignDraft`].
pub type CampaignWizard = WizardController<CampaignDraft>;

/// Steps of the campaign builder, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignStep {
    BasicInfo,
    ContentType,
    Platforms,
    Budget,
    Review,
}

impl CampaignStep {
    /// All steps in order.
    pub const ALL: [Self; 5] = [
        Self::BasicInfo,
        Self::ContentType,
        Self::Platforms,
        Self::Budget,
        Self::Review,
    ];

    /// Step number, from 1.
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::BasicInfo => 1,
            Self::ContentType => 2,
            Self::Platforms => 3,
            Self::Budget => 4,
            Self::Review => 5,
        }
    }

    /// Step for a number from 1.
    #[must_use]
    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Table entry for this step.
    #[must_use]
    pub const fn definition(self) -> StepDefinition<CampaignDraft> {
        let (key, title, description) = match self {
            Self::BasicInfo => ("basic_info", "Basic Info", "Campaign name and description"),
            Self::ContentType => ("content_type", "Content Type", "Choose content format"),
            Self::Platforms => ("platforms", "Platforms", "Select target platforms"),
            Self::Budget => ("budget", "Budget", "Set rates and budget"),
            Self::Review => ("review", "Review", "Review and publish"),
        };
        StepDefinition::new(key, title, description, self.rule())
    }

    /// Requirement to leave this step.
    #[must_use]
    pub const fn rule(self) -> StepRule<CampaignDraft> {
        match self {
            Self::BasicInfo => check_basic_info,
            Self::ContentType => check_content_type,
            Self::Platforms => check_platforms,
            Self::Budget => check_budget,
            Self::Review => check_review,
        }
    }

    /// Whether `draft` satisfies this step.
    #[must_use]
    pub fn can_proceed(self, draft: &CampaignDraft) -> bool {
        (self.rule())(draft).is_valid()
    }
}

fn check_basic_info(draft: &CampaignDraft) -> ValidationReport {
    ValidationReport::valid()
        .check(
            "title",
            draft.title.as_str(),
            &Required::with_message("Campaign title is required"),
        )
        .check(
            "short_description",
            draft.short_description.as_str(),
            &Required::with_message("Short description is required"),
        )
}

fn check_content_type(draft: &CampaignDraft) -> ValidationReport {
    ValidationReport::valid().check(
        "content_type",
        &draft.content_type,
        &Selected::with_message("Choose a content type"),
    )
}

fn check_platforms(draft: &CampaignDraft) -> ValidationReport {
    ValidationReport::valid().check(
        "platforms",
        &draft.platforms,
        &Selected::with_message("Select at least one platform"),
    )
}

fn check_budget(draft: &CampaignDraft) -> ValidationReport {
    ValidationReport::valid()
        .check(
            "rate_per_k_views",
            &draft.rate_per_k_views,
            &Positive::with_message("Rate per 1,000 views must be greater than zero"),
        )
        .check(
            "total_budget",
            &draft.total_budget,
            &Positive::with_message("Total budget must be greater than zero"),
        )
}

fn check_review(_: &CampaignDraft) -> ValidationReport {
    ValidationReport::valid()
}

/// The campaign builder's step table.
#[must_use]
pub fn campaign_steps() -> Vec<StepDefinition<CampaignDraft>> {
    CampaignStep::ALL.iter().map(|s| s.definition()).collect()
}

/// Start a campaign builder with `draft` as the seed.
#[must_use]
pub fn campaign_wizard(draft: CampaignDraft) -> CampaignWizard {
    WizardController::new(campaign_steps(), draft)
}

impl CampaignDraft {
    /// Views the budget buys at the current rate.
    ///
    /// `None` when the rate is not a positive finite number. A negative
    /// budget gives a negative reach.
    #[must_use]
    pub fn estimated_reach(&self) -> Option<i64> {
        let rate = self.rate_per_k_views;
        if !(rate > 0.0 && rate.is_finite() && self.total_budget.is_finite()) {
            return None;
        }
        let reach = (self.total_budget / rate * 1000.0).floor();
        Some(reach as i64)
    }

    /// Creator earnings per 1K views.
    #[must_use]
    pub fn creator_payout_per_k(&self) -> f64 {
        self.rate_per_k_views * CREATOR_SHARE
    }
}

/// Everything shown on the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub title: String,
    pub content_type: Option<&'static str>,
    pub platforms: String,
    pub rate: String,
    pub total_budget: String,
    pub estimated_reach: String,
    pub creator_payout: String,
}

impl ReviewSummary {
    /// Build the summary from the current draft.
    #[must_use]
    pub fn from_draft(draft: &CampaignDraft) -> Self {
        Self {
            title: draft.title.clone(),
            content_type: draft.content_type.map(ContentType::wizard_label),
            platforms: draft
                .platforms
                .iter()
                .map(|p| p.label())
                .collect::<Vec<_>>()
                .join(", "),
            rate: format!("${} per 1K views", draft.rate_per_k_views),
            total_budget: format!("${}", draft.total_budget),
            estimated_reach: draft
                .estimated_reach()
                .map_or_else(|| "—".to_string(), format_views),
            creator_payout: format!(
                "Creators earn {} per 1K views ({}%)",
                format_usd_2dp(draft.creator_payout_per_k()),
                CREATOR_SHARE * 100.0
            ),
        }
    }
}

/// Brand attached to a published campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub company_name: String,
    #[serde(default)]
    pub company_logo_url: String,
}

/// A published campaign as listed on the discovery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignListing {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub content_type: String,
    pub target_platforms: Vec<String>,
    pub rate_per_1k_views_cents: i64,
    pub total_views: u64,
    pub active_creators: u64,
    pub brand: Brand,
}

/// Display strings for a campaign card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignCardSummary {
    pub brand_name: String,
    /// Placeholder letter when the brand has no logo.
    pub brand_initial: Option<char>,
    pub title: String,
    pub short_description: String,
    pub rate: String,
    pub views: String,
    pub creators: String,
    pub content_type: String,
    pub platform_badges: Vec<String>,
    /// `+N` when more platforms exist than badges shown.
    pub platform_overflow: Option<String>,
    pub detail_path: String,
}

impl From<&CampaignListing> for CampaignCardSummary {
    fn from(listing: &CampaignListing) -> Self {
        let brand_initial = if listing.brand.company_logo_url.is_empty() {
            listing.brand.company_name.chars().next()
        } else {
            None
        };
        let hidden = listing.target_platforms.len().saturating_sub(MAX_CARD_BADGES);

        Self {
            brand_name: listing.brand.company_name.clone(),
            brand_initial,
            title: listing.title.clone(),
            short_description: listing.short_description.clone(),
            rate: format_cents_rate(listing.rate_per_1k_views_cents),
            views: format_short_count(listing.total_views),
            creators: listing.active_creators.to_string(),
            content_type: ContentType::card_label_for(&listing.content_type).to_string(),
            platform_badges: listing
                .target_platforms
                .iter()
                .take(MAX_CARD_BADGES)
                .map(|p| platform_badge(p))
                .collect(),
            platform_overflow: (hidden > 0).then(|| format!("+{hidden}")),
            detail_path: format!("/campaigns/{}", listing.id),
        }
    }
}
