//! Multi-step registration wizards
//!
//! A wizard is a linear sequence of steps numbered from 1. Moving forward
//! runs the current step's validator and is refused while it reports
//! problems; moving back is always allowed. Submitting from the last step
//! builds the profile and saves it.

mod distributor;
mod farmer;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::new_profile_id;
use crate::store::{Record, RecordStore, StoreError};
use crate::types::Role;

pub use distributor::{DistributorDraft, BUSINESS_TYPES, CERTIFICATION_OPTIONS};
pub use farmer::{FarmerDraft, CROP_OPTIONS};

/// Message shown when saving the finished profile fails
pub const SUBMIT_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

/// 1-based wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(1);

    pub fn number(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks one step of a form, pushing a message per problem
pub type StepValidator<F> = fn(&F, &mut Vec<String>);

/// Form data collected by a wizard
pub trait RegistrationForm: Clone + Sized + 'static {
    type Profile: Record;

    const ROLE: Role;

    /// One validator per step, in step order
    fn steps() -> &'static [StepValidator<Self>];

    /// Runs after `from` validated, before the wizard moves past it
    fn on_advance(&mut self, _from: Step, _today: NaiveDate) {}

    fn into_profile(self, id: String, now: DateTime<Utc>) -> Self::Profile;
}

/// Validator for steps that only present information
pub fn no_checks<F>(_form: &F, _errors: &mut Vec<String>) {}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("step {step} has {} validation error(s)", .messages.len())]
    Invalid { step: Step, messages: Vec<String> },

    #[error("registration can only be submitted from step {terminal}, currently at step {current}")]
    NotAtFinalStep { current: Step, terminal: Step },

    #[error("failed to save profile: {0}")]
    Store(#[from] StoreError),
}

/// Wizard state: the form, the current step and the last validation messages
#[derive(Debug, Clone)]
pub struct RegistrationFlow<F> {
    form: F,
    step: Step,
    errors: Vec<String>,
}

impl<F: RegistrationForm> RegistrationFlow<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            step: Step::FIRST,
            errors: Vec::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn total_steps(&self) -> u8 {
        F::steps().len() as u8
    }

    pub fn is_final_step(&self) -> bool {
        self.step.number() == self.total_steps()
    }

    /// Completion percentage shown in the progress bar
    pub fn progress_percent(&self) -> u8 {
        (u32::from(self.step.number()) * 100 / u32::from(self.total_steps())) as u8
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Messages from the most recent validation
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Re-run the current step's validator, recording its messages
    pub fn validate_current(&mut self) -> bool {
        let mut errors = Vec::new();
        if let Some(validator) = F::steps().get(self.step.index()) {
            validator(&self.form, &mut errors);
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Advance one step if the current step validates. At the final step the
    /// position is unchanged.
    pub fn next(&mut self) -> Result<Step, RegistrationError> {
        self.next_on(Utc::now().date_naive())
    }

    /// [`next`](Self::next) with an explicit current date for step hooks
    pub fn next_on(&mut self, today: NaiveDate) -> Result<Step, RegistrationError> {
        if !self.validate_current() {
            return Err(RegistrationError::Invalid {
                step: self.step,
                messages: self.errors.clone(),
            });
        }
        if !self.is_final_step() {
            self.form.on_advance(self.step, today);
            self.step = Step(self.step.number() + 1);
        }
        Ok(self.step)
    }

    /// Go back one step without validating
    pub fn previous(&mut self) -> Step {
        if self.step > Step::FIRST {
            self.step = Step(self.step.number() - 1);
        }
        self.errors.clear();
        self.step
    }

    /// Validate the final step, build the profile and save it
    pub fn submit(
        &mut self,
        store: &RecordStore<F::Profile>,
        now: DateTime<Utc>,
    ) -> Result<F::Profile, RegistrationError> {
        if !self.is_final_step() {
            return Err(RegistrationError::NotAtFinalStep {
                current: self.step,
                terminal: Step(self.total_steps()),
            });
        }
        if !self.validate_current() {
            return Err(RegistrationError::Invalid {
                step: self.step,
                messages: self.errors.clone(),
            });
        }

        let profile = self
            .form
            .clone()
            .into_profile(new_profile_id(F::ROLE, now), now);

        if let Err(e) = store.save(profile.clone()) {
            let role = F::ROLE;
            tracing::error!(role = %role, error = %e, "failed to save registration");
            self.errors = vec![SUBMIT_FAILED_MESSAGE.to_string()];
            return Err(e.into());
        }
        Ok(profile)
    }
}

/// Add `item` when absent, remove it when present
pub fn toggle_selection(list: &mut Vec<String>, item: &str) {
    if let Some(index) = list.iter().position(|existing| existing == item) {
        list.remove(index);
    } else {
        list.push(item.to_string());
    }
}

/// `None` for blank text
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_selection() {
        let mut crops = Vec::new();
        toggle_selection(&mut crops, "Rice");
        toggle_selection(&mut crops, "Wheat");
        assert_eq!(crops, vec!["Rice", "Wheat"]);
        toggle_selection(&mut crops, "Rice");
        assert_eq!(crops, vec!["Wheat"]);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }
}
