//! Step validation policy.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::form::{FieldName, FormData};
use crate::validation::validators::{self, Validator};
use crate::validation::FieldError;
use crate::wizard::WizardStep;

/// Errors of one step, at most one per field.
pub type StepErrors = BTreeMap<FieldName, FieldError>;

const IDENTITY_RULES: &[(FieldName, Validator)] = &[
    (FieldName::FirstName, validators::first_name),
    (FieldName::LastName, validators::last_name),
    (FieldName::Username, validators::username),
];

const CREDENTIAL_RULES: &[(FieldName, Validator)] = &[
    (FieldName::Email, validators::email),
    (FieldName::Phone, validators::phone),
    (FieldName::Password, validators::password),
    (FieldName::ConfirmPassword, validators::confirm_password),
];

const PROFILE_RULES: &[(FieldName, Validator)] = &[
    (FieldName::Dob, validators::dob),
    (FieldName::ProfileImage, validators::profile_image),
];

/// Maps each wizard step to its ordered validator table.
pub struct StepValidationPolicy;

impl StepValidationPolicy {
    pub fn rules(step: WizardStep) -> &'static [(FieldName, Validator)] {
        match step {
            WizardStep::Identity => IDENTITY_RULES,
            WizardStep::Credentials => CREDENTIAL_RULES,
            WizardStep::Profile => PROFILE_RULES,
        }
    }

    /// Run every validator of `step`. Empty iff the step is valid.
    pub fn compute_errors(step: WizardStep, data: &FormData, today: NaiveDate) -> StepErrors {
        Self::rules(step)
            .iter()
            .filter_map(|(field, validate)| validate(data, today).map(|err| (*field, err)))
            .collect()
    }

    pub fn is_valid(step: WizardStep, data: &FormData, today: NaiveDate) -> bool {
        Self::rules(step)
            .iter()
            .all(|(_, validate)| validate(data, today).is_none())
    }

    /// Earliest step, in wizard order, that currently fails validation.
    pub fn first_invalid_step(data: &FormData, today: NaiveDate) -> Option<(WizardStep, StepErrors)> {
        WizardStep::ALL.into_iter().find_map(|step| {
            let errors = Self::compute_errors(step, data, today);
            (!errors.is_empty()).then_some((step, errors))
        })
    }
}

pub fn compute_errors(step: WizardStep, data: &FormData, today: NaiveDate) -> StepErrors {
    StepValidationPolicy::compute_errors(step, data, today)
}
