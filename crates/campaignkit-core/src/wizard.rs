//! Linear multi-step wizard over a draft record.
//!
//! The controller owns a fixed table of steps, a current-step pointer and the
//! draft. Forward navigation is gated by the current step's rule; a refused
//! transition is a silent no-op, and the reasons are available separately
//! through [`WizardController::blocking_reasons`].
//!
//! Steps are numbered from 1 in the public API.

use crate::draft::Draft;
use crate::error::WizardError;
use crate::validation::ValidationReport;
use std::fmt;

/// Rule deciding whether a step's requirements hold on the draft.
pub type StepRule<D> = fn(&D) -> ValidationReport;

/// One entry of the wizard's step table.
pub struct StepDefinition<D> {
    /// Stable key, e.g. `"basic_info"`.
    pub key: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Requirements to leave this step.
    pub rule: StepRule<D>,
}

impl<D> StepDefinition<D> {
    /// Create a step definition.
    pub const fn new(
        key: &'static str,
        title: &'static str,
        description: &'static str,
        rule: StepRule<D>,
    ) -> Self {
        Self {
            key,
            title,
            description,
            rule,
        }
    }

    /// Evaluate the rule against `draft`.
    pub fn check(&self, draft: &D) -> ValidationReport {
        (self.rule)(draft)
    }

    /// Whether `draft` satisfies this step.
    pub fn can_proceed(&self, draft: &D) -> bool {
        self.check(draft).is_valid()
    }
}

impl<D> Clone for StepDefinition<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for StepDefinition<D> {}

impl<D> fmt::Debug for StepDefinition<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("key", &self.key)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Lifecycle phase of a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    /// Accepting input and navigation.
    #[default]
    Editing,
    /// Draft handed to the submitter.
    Submitted,
    /// Abandoned by the user.
    Cancelled,
}

/// How a step should be drawn in a progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Before the current step.
    Completed,
    /// The current step.
    Current,
    /// After the current step.
    Upcoming,
}

/// Wizard state machine.
pub struct WizardController<D> {
    steps: Vec<StepDefinition<D>>,
    current: usize,
    draft: D,
    phase: WizardPhase,
}

impl<D: fmt::Debug> fmt::Debug for WizardController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardController")
            .field("step", &(self.current + 1))
            .field("of", &self.steps.len())
            .field("phase", &self.phase)
            .field("draft", &self.draft)
            .finish()
    }
}

impl<D: Draft> WizardController<D> {
    /// Create a wizard at step 1 with `draft` as the seed.
    ///
    /// An empty step table is given a single always-passing step so that
    /// the current index is always valid.
    pub fn new(steps: Vec<StepDefinition<D>>, draft: D) -> Self {
        let steps = if steps.is_empty() {
            vec![StepDefinition::new("done", "Done", "", |_| {
                ValidationReport::valid()
            })]
        } else {
            steps
        };
        Self {
            steps,
            current: 0,
            draft,
            phase: WizardPhase::Editing,
        }
    }

    /// The step table.
    pub fn steps(&self) -> &[StepDefinition<D>] {
        &self.steps
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Current step number, from 1.
    pub const fn current_step(&self) -> usize {
        self.current + 1
    }

    /// Definition of the current step.
    pub fn current_definition(&self) -> &StepDefinition<D> {
        &self.steps[self.current]
    }

    /// Whether the current step is the last one.
    pub fn is_terminal(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Read-only view of the draft.
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    /// Lifecycle phase.
    pub const fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// Whether input and navigation are still accepted.
    pub fn is_editing(&self) -> bool {
        self.phase == WizardPhase::Editing
    }

    /// Whether step `step` (from 1) accepts the current draft.
    ///
    /// Out-of-range steps never accept.
    pub fn can_proceed(&self, step: usize) -> bool {
        step.checked_sub(1)
            .and_then(|i| self.steps.get(i))
            .is_some_and(|def| def.can_proceed(&self.draft))
    }

    /// Unmet requirements of the current step.
    pub fn blocking_reasons(&self) -> ValidationReport {
        self.current_definition().check(&self.draft)
    }

    /// Move to the next step if the current step's rule holds.
    ///
    /// Returns whether the step changed.
    pub fn advance(&mut self) -> bool {
        if !self.is_editing() || self.is_terminal() {
            return false;
        }
        let def = &self.steps[self.current];
        if !def.can_proceed(&self.draft) {
            log::debug!("wizard: advance refused on step {} ({})", self.current + 1, def.key);
            return false;
        }
        self.current += 1;
        log::debug!(
            "wizard: advanced to step {} ({})",
            self.current + 1,
            self.steps[self.current].key
        );
        true
    }

    /// Move to the previous step. The draft is left untouched.
    ///
    /// Returns whether the step changed.
    pub fn retreat(&mut self) -> bool {
        if !self.is_editing() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        log::debug!("wizard: retreated to step {}", self.current + 1);
        true
    }

    /// Navigate to `step` (from 1).
    ///
    /// Backward jumps always succeed. Forward jumps advance one step at a
    /// time and stop at the first step whose rule fails. Returns the step
    /// reached.
    pub fn go_to(&mut self, step: usize) -> Result<usize, WizardError> {
        let total = self.steps.len();
        if step == 0 || step > total {
            return Err(WizardError::StepOutOfRange { step, total });
        }
        if !self.is_editing() {
            return Err(WizardError::AlreadyFinished);
        }
        while self.current_step() > step {
            self.retreat();
        }
        while self.current_step() < step && self.advance() {}
        Ok(self.current_step())
    }

    /// Merge `patch` into the draft. Returns `false` once finished.
    pub fn update_draft(&mut self, patch: D::Patch) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.draft.apply(patch);
        true
    }

    /// Mutate the draft in place, for edits a patch cannot express such as
    /// toggling one entry of a multi-select. Returns `None` once finished.
    pub fn edit_draft<R>(&mut self, edit: impl FnOnce(&mut D) -> R) -> Option<R> {
        if !self.is_editing() {
            return None;
        }
        Some(edit(&mut self.draft))
    }

    /// Progress-indicator state of `step` (from 1).
    pub fn step_status(&self, step: usize) -> StepStatus {
        let current = self.current_step();
        match step.cmp(&current) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }

    /// Finalize from the last step.
    ///
    /// Every step's rule must hold on the draft. On success the wizard is
    /// `Submitted` and a copy of the draft is returned for the submitter.
    pub fn submit(&mut self) -> Result<D, WizardError>
    where
        D: Clone,
    {
        if !self.is_editing() {
            return Err(WizardError::AlreadyFinished);
        }
        if !self.is_terminal() {
            return Err(WizardError::NotOnTerminalStep {
                current: self.current_step(),
                total: self.steps.len(),
            });
        }
        if let Some((i, def)) = self
            .steps
            .iter()
            .enumerate()
            .find(|(_, def)| !def.can_proceed(&self.draft))
        {
            log::debug!("wizard: submit refused, step {} ({}) incomplete", i + 1, def.key);
            return Err(WizardError::IncompleteDraft {
                step: i + 1,
                title: def.title,
            });
        }
        self.phase = WizardPhase::Submitted;
        log::info!("wizard: submitted after {} steps", self.steps.len());
        Ok(self.draft.clone())
    }

    /// Abandon the wizard. Returns `false` if already finished.
    pub fn cancel(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.phase = WizardPhase::Cancelled;
        log::debug!("wizard: cancelled on step {}", self.current_step());
        true
    }

    /// Consume the wizard and return the draft.
    pub fn into_draft(self) -> D {
        self.draft
    }
}
