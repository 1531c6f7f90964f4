//! StepController — owns the form and gates movement between its two steps.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::state::SignupStep;
use crate::error::{FlowError, ValidationError};
use crate::form::{FieldName, FormModel, PASSWORD_MISMATCH_MESSAGE, SubmitOutcome};
use crate::notify::{Notifier, Toast};

/// Result of a forward transition attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// The guard held; the controller is now on `Credentials`.
    Advanced,
    /// The guard failed; these fields are invalid or were never edited.
    Blocked { invalid: Vec<FieldName> },
}

/// Two-step form flow over one [`FormModel`].
#[derive(Debug, Clone, Default)]
pub struct StepController {
    step: SignupStep,
    form: FormModel,
}

impl StepController {
    /// Starts on `Intro` with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    /// Edit a field. Allowed on either step.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) -> Option<&ValidationError> {
        let error = self.form.set_field(name, value);
        debug!(field = %name, valid = error.is_none(), "Field updated");
        error
    }

    /// Revalidate the intro fields, storing their errors, and report whether
    /// every one is valid and dirty.
    fn check_intro(&mut self) -> bool {
        self.form.validate_fields(SignupStep::Intro.fields())
    }

    /// Move from `Intro` to `Credentials` if the guard holds.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, FlowError> {
        let target = self.transition_target(self.step.next(), SignupStep::Credentials)?;

        if !self.check_intro() {
            let invalid = self.form.blocking_fields(SignupStep::Intro.fields());
            info!(step = %self.step, ?invalid, "Advance blocked");
            return Ok(AdvanceOutcome::Blocked { invalid });
        }

        info!(from = %self.step, to = %target, "Step advanced");
        self.step = target;
        Ok(AdvanceOutcome::Advanced)
    }

    /// Move from `Credentials` back to `Intro`. No validation; values and
    /// errors are kept.
    pub fn retreat(&mut self) -> Result<SignupStep, FlowError> {
        let target = self.transition_target(self.step.previous(), SignupStep::Intro)?;
        info!(from = %self.step, to = %target, "Step retreated");
        self.step = target;
        Ok(target)
    }

    /// `neighbour` is the adjacent step in the direction of travel; `None`
    /// means the move runs off the end and is reported against `toward`.
    fn transition_target(
        &self,
        neighbour: Option<SignupStep>,
        toward: SignupStep,
    ) -> Result<SignupStep, FlowError> {
        neighbour
            .filter(|target| self.step.can_transition_to(*target))
            .ok_or(FlowError::InvalidTransition {
                from: self.step,
                to: toward,
            })
    }

    /// Validate everything and produce the record.
    ///
    /// A password mismatch raises a destructive toast through `notifier` and
    /// still completes. The step does not change.
    pub fn submit(&mut self, notifier: &dyn Notifier) -> Result<SubmitOutcome, FlowError> {
        if self.step != SignupStep::Credentials {
            return Err(FlowError::SubmitOutsideCredentials { step: self.step });
        }

        let outcome = self.form.submit();
        match &outcome {
            SubmitOutcome::Completed(submission) => {
                if submission.password_mismatch {
                    warn!("Submitted with mismatched passwords");
                    notifier.notify(Toast::destructive(PASSWORD_MISMATCH_MESSAGE));
                }
                info!(
                    role = %submission.record.role,
                    password_mismatch = submission.password_mismatch,
                    "Sign-up submitted"
                );
            }
            SubmitOutcome::Rejected { errors } => {
                let fields: Vec<FieldName> = errors.iter().map(|e| e.field).collect();
                info!(invalid = ?fields, "Submit rejected");
            }
        }
        Ok(outcome)
    }
}
