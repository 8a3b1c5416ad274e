//! Core logic for the campaign marketplace dashboard and campaign builder.
//!
//! This crate provides:
//! - Count-up animation: [`ValueAnimator`], driven frame by frame through a
//!   [`FrameScheduler`], and the [`CountUp`] display built on it
//! - Display formatting: [`DisplayFormat`] and [`format_value`]
//! - The campaign builder: [`WizardController`] over a [`CampaignDraft`],
//!   with the five-step table from [`campaign_steps`]
//! - Configuration: [`CampaignKitConfig`] loaded from YAML or TOML

pub mod animation;
pub mod campaign;
pub mod catalog;
pub mod config;
pub mod count_up;
pub mod draft;
pub mod error;
pub mod format;
pub mod scheduler;
pub mod validation;
pub mod wizard;

pub use animation::{Easing, ValueAnimator, DEFAULT_DURATION_MS};
pub use campaign::{
    campaign_steps, campaign_wizard, CampaignCardSummary, CampaignListing, CampaignStep,
    CampaignWizard, ReviewSummary, CREATOR_SHARE,
};
pub use catalog::{ContentType, Platform};
pub use config::{AnimationConfig, CampaignKitConfig, DraftDefaults, MAX_DURATION_MS, MAX_FPS};
pub use count_up::{CountUp, CountUpOptions, StatCard, StatValue, Trend};
pub use draft::{CampaignDraft, Draft, DraftPatch};
pub use error::{AnimationError, CatalogError, ConfigError, WizardError};
pub use format::{format_value, DisplayFormat};
pub use scheduler::{FrameCallback, FrameHandle, FrameLoop, FrameScheduler};
pub use validation::{FieldError, ValidationReport, ValidationResult, Validator};
pub use wizard::{StepDefinition, StepStatus, WizardController, WizardPhase};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Seeding a wizard from configuration
    // ==========================================================================

    #[test]
    fn test_config_seeds_wizard_draft() {
        let config = CampaignKitConfig::from_yaml_str(
            "draft:\n  rate_per_k_views: 4.0\n  total_budget: 2000\n",
        )
        .unwrap();
        let wizard = campaign_wizard(config.seed_draft());

        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.draft().rate_per_k_views, 4.0);
        assert_eq!(wizard.draft().estimated_reach(), Some(500_000));
    }

    // ==========================================================================
    // Count-up under configured options
    // ==========================================================================

    #[test]
    fn test_config_drives_count_up() {
        let config =
            CampaignKitConfig::from_toml_str("[animation]\nduration_ms = 100.0\nfps = 20\n")
                .unwrap();
        let mut frames = FrameLoop::new();
        let count_up = CountUp::mount(
            StatValue::Number(75_000.0),
            config.count_up_options(DisplayFormat::Currency),
            |_: &str| {},
            0.0,
            &mut frames,
        )
        .unwrap();

        frames.run_until_idle(0.0, config.animation.frame_interval_ms(), 10);
        assert_eq!(count_up.text(), "$75,000");
        assert!(frames.frames_run() <= 4);
    }
}
