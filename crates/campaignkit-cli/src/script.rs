//! Wizard replay scripts.
//!
//! A script is a YAML document with a list of actions applied in order to a
//! campaign builder:
//!
//! ```yaml
//! actions:
//!   - update: { title: Launch, short_description: New wallet }
//!   - advance
//!   - toggle_platform: tiktok
//!   - enter_rate: "2.50"
//!   - go_to: 5
//!   - submit
//! ```

use campaignkit_core::draft::{parse_budget_input, parse_rate_input};
use campaignkit_core::{
    campaign_wizard, CampaignDraft, CampaignWizard, Draft, DraftPatch, Platform, ReviewSummary,
    WizardPhase,
};
use serde::{Deserialize, Serialize};

/// One user interaction with the builder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    Update(DraftPatch),
    SelectPlatform(Platform),
    DeselectPlatform(Platform),
    TogglePlatform(Platform),
    /// Raw text typed into the rate field.
    EnterRate(String),
    /// Raw text typed into the budget field.
    EnterBudget(String),
    Advance,
    Retreat,
    GoTo(usize),
    Submit,
    Cancel,
}

impl WizardAction {
    fn label(&self) -> String {
        match self {
            Self::Update(_) => "update".to_string(),
            Self::SelectPlatform(p) => format!("select_platform {p}"),
            Self::DeselectPlatform(p) => format!("deselect_platform {p}"),
            Self::TogglePlatform(p) => format!("toggle_platform {p}"),
            Self::EnterRate(text) => format!("enter_rate {text:?}"),
            Self::EnterBudget(text) => format!("enter_budget {text:?}"),
            Self::Advance => "advance".to_string(),
            Self::Retreat => "retreat".to_string(),
            Self::GoTo(step) => format!("go_to {step}"),
            Self::Submit => "submit".to_string(),
            Self::Cancel => "cancel".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WizardScript {
    /// Fields applied to the configured seed before the first action.
    #[serde(default)]
    pub seed: Option<DraftPatch>,
    /// Actions as singleton maps (`- go_to: 3`) or bare names (`- advance`).
    #[serde(default, with = "serde_yaml_ng::with::singleton_map_recursive")]
    pub actions: Vec<WizardAction>,
}

impl WizardScript {
    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(contents)
    }
}

/// What happened on one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub action: String,
    pub accepted: bool,
    /// Step after the action, from 1.
    pub step: usize,
    pub step_title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub outcomes: Vec<ActionOutcome>,
    pub final_step: usize,
    pub phase: &'static str,
    pub review: ReviewSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<CampaignDraft>,
}

const fn phase_name(phase: WizardPhase) -> &'static str {
    match phase {
        WizardPhase::Editing => "editing",
        WizardPhase::Submitted => "submitted",
        WizardPhase::Cancelled => "cancelled",
    }
}

/// Run `script` against a builder seeded with `seed`.
pub fn replay(script: &WizardScript, mut seed: CampaignDraft) -> ReplayReport {
    if let Some(patch) = script.seed.clone() {
        seed.apply(patch);
    }
    let mut wizard = campaign_wizard(seed);
    let mut submitted = None;
    let mut outcomes = Vec::with_capacity(script.actions.len());

    for action in &script.actions {
        let (accepted, note) = apply(&mut wizard, action, &mut submitted);
        log::debug!("replay: {} accepted={accepted}", action.label());
        outcomes.push(ActionOutcome {
            action: action.label(),
            accepted,
            step: wizard.current_step(),
            step_title: wizard.current_definition().title,
            note,
        });
    }

    ReplayReport {
        outcomes,
        final_step: wizard.current_step(),
        phase: phase_name(wizard.phase()),
        review: ReviewSummary::from_draft(wizard.draft()),
        submitted,
    }
}

fn apply(
    wizard: &mut CampaignWizard,
    action: &WizardAction,
    submitted: &mut Option<CampaignDraft>,
) -> (bool, Option<String>) {
    match action {
        WizardAction::Update(patch) if patch.is_empty() => {
            (false, Some("update names no field".to_string()))
        }
        WizardAction::Update(patch) => (wizard.update_draft(patch.clone()), None),
        WizardAction::EnterRate(text) => {
            let rate = parse_rate_input(text);
            let accepted = wizard.update_draft(DraftPatch::new().rate_per_k_views(rate));
            (accepted, Some(format!("rate {rate}")))
        }
        WizardAction::EnterBudget(text) => {
            let budget = parse_budget_input(text);
            let accepted = wizard.update_draft(DraftPatch::new().total_budget(budget));
            (accepted, Some(format!("budget {budget}")))
        }
        WizardAction::SelectPlatform(p) => {
            let changed = wizard.edit_draft(|d| d.select_platform(*p));
            (changed.is_some(), None)
        }
        WizardAction::DeselectPlatform(p) => {
            let changed = wizard.edit_draft(|d| d.deselect_platform(*p));
            (changed.is_some(), None)
        }
        WizardAction::TogglePlatform(p) => {
            let selected = wizard.edit_draft(|d| d.toggle_platform(*p));
            let note = selected.map(|on| if on { "selected" } else { "deselected" }.to_string());
            (selected.is_some(), note)
        }
        WizardAction::Advance => {
            if wizard.advance() {
                (true, None)
            } else {
                let note = wizard.blocking_reasons().first_error_message().map(str::to_string);
                (false, note)
            }
        }
        WizardAction::Retreat => (wizard.retreat(), None),
        WizardAction::GoTo(step) => {
            let before = wizard.current_step();
            match wizard.go_to(*step) {
                Ok(reached) if reached == *step => (true, None),
                Ok(reached) => (
                    reached != before,
                    wizard.blocking_reasons().first_error_message().map(str::to_string),
                ),
                Err(e) => (false, Some(e.to_string())),
            }
        }
        WizardAction::Submit => match wizard.submit() {
            Ok(draft) => {
                *submitted = Some(draft);
                (true, None)
            }
            Err(e) => (false, Some(e.to_string())),
        },
        WizardAction::Cancel => (wizard.cancel(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAPPY_PATH: &str = r"
actions:
  - advance
  - update: { title: Launch, short_description: New wallet }
  - advance
  - update: { content_type: demo }
  - advance
  - toggle_platform: tiktok
  - select_platform: youtube
  - advance
  - update: { rate_per_k_views: 2.5 }
  - advance
  - submit
";

    #[test]
    fn test_parse_actions() {
        let script = WizardScript::from_yaml_str(HAPPY_PATH).unwrap();
        assert_eq!(script.actions.len(), 11);
        assert_eq!(script.actions[0], WizardAction::Advance);
        assert_eq!(script.actions[5], WizardAction::TogglePlatform(Platform::Tiktok));
    }

    #[test]
    fn test_replay_happy_path() {
        let script = WizardScript::from_yaml_str(HAPPY_PATH).unwrap();
        let report = replay(&script, CampaignDraft::new());

        assert!(!report.outcomes[0].accepted);
        assert_eq!(
            report.outcomes[0].note.as_deref(),
            Some("Campaign title is required")
        );
        assert!(report.outcomes[2].accepted);
        assert_eq!(report.outcomes[2].step, 2);
        assert_eq!(report.final_step, 5);
        assert_eq!(report.phase, "submitted");
        assert_eq!(report.review.estimated_reach, "400,000 views");
        assert_eq!(report.submitted.map(|d| d.platforms.len()), Some(2));
    }

    #[test]
    fn test_replay_seed_and_early_submit() {
        let script = WizardScript::from_yaml_str(
            "seed: { title: Seeded }\nactions:\n  - submit\n  - go_to: 9\n  - cancel\n  - advance\n",
        )
        .unwrap();
        let report = replay(&script, CampaignDraft::new());

        assert_eq!(report.review.title, "Seeded");
        assert_eq!(
            report.outcomes[0].note.as_deref(),
            Some("cannot submit from step 1 of 5")
        );
        assert!(!report.outcomes[1].accepted);
        assert!(report.outcomes[2].accepted);
        assert!(!report.outcomes[3].accepted);
        assert_eq!(report.phase, "cancelled");
        assert!(report.submitted.is_none());
    }

    #[test]
    fn test_parse_scalar_actions() {
        let script = WizardScript::from_yaml_str(
            "actions:\n  - go_to: 3\n  - select_platform: instagram\n  - enter_budget: \"1500.9\"\n  - cancel\n",
        )
        .unwrap();
        assert_eq!(
            script.actions,
            vec![
                WizardAction::GoTo(3),
                WizardAction::SelectPlatform(Platform::Instagram),
                WizardAction::EnterBudget("1500.9".to_string()),
                WizardAction::Cancel,
            ]
        );
    }

    #[test]
    fn test_form_text_parsed_like_inputs() {
        let script = WizardScript::from_yaml_str(
            "actions:\n  - enter_rate: \" 2.5usd\"\n  - enter_budget: \"1500.9\"\n  - update: {}\n",
        )
        .unwrap();
        let report = replay(&script, CampaignDraft::new());

        assert!(report.outcomes[0].accepted);
        assert_eq!(report.outcomes[0].note.as_deref(), Some("rate 2.5"));
        assert_eq!(report.outcomes[1].note.as_deref(), Some("budget 1500"));
        assert!(!report.outcomes[2].accepted);
        assert_eq!(report.review.rate, "$2.5 per 1K views");
        assert_eq!(report.review.total_budget, "$1500");
        assert_eq!(report.review.estimated_reach, "600,000 views");
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(WizardScript::from_yaml_str("actions:\n  - jump\n").is_err());
        assert!(WizardScript::from_yaml_str("steps: []\n").is_err());
    }
}
