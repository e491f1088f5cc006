use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::form::FieldName;

/// Wizard steps, in order.
///
/// 向导步骤。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    /// First name, last name, username.
    #[default]
    Identity,
    /// Email, phone, password and its confirmation.
    Credentials,
    /// Date of birth and profile image.
    Profile,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Identity;
    pub const LAST: WizardStep = WizardStep::Profile;
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Identity,
        WizardStep::Credentials,
        WizardStep::Profile,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Identity => 1,
            WizardStep::Credentials => 2,
            WizardStep::Profile => 3,
        }
    }

    pub fn from_number(n: i64) -> Option<WizardStep> {
        match n {
            1 => Some(WizardStep::Identity),
            2 => Some(WizardStep::Credentials),
            3 => Some(WizardStep::Profile),
            _ => None,
        }
    }

    /// Following step, `None` on the last one.
    pub fn next(self) -> Option<WizardStep> {
        WizardStep::from_number(i64::from(self.number()) + 1)
    }

    /// Preceding step, saturating at the first one.
    pub fn prev(self) -> WizardStep {
        WizardStep::from_number(i64::from(self.number()) - 1).unwrap_or(WizardStep::FIRST)
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::LAST
    }

    /// Fields owned by this step, in display order.
    pub fn fields(self) -> &'static [FieldName] {
        match self {
            WizardStep::Identity => &[FieldName::FirstName, FieldName::LastName, FieldName::Username],
            WizardStep::Credentials => &[
                FieldName::Email,
                FieldName::Phone,
                FieldName::Password,
                FieldName::ConfirmPassword,
            ],
            WizardStep::Profile => &[FieldName::Dob, FieldName::ProfileImage],
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> u8 {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        WizardStep::from_number(i64::from(n)).ok_or_else(|| format!("invalid wizard step {n}"))
    }
}

/// Navigation state of the wizard.
///
/// Errors are deliberately absent: they are derived from the form data on
/// every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub done: bool,
    pub touched: BTreeSet<FieldName>,
}

impl WizardState {
    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    pub fn touch(&mut self, field: FieldName) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self, fields: &[FieldName]) {
        self.touched.extend(fields.iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_navigation_is_bounded() {
        assert_eq!(WizardStep::Identity.next(), Some(WizardStep::Credentials));
        assert_eq!(WizardStep::Profile.next(), None);
        assert_eq!(WizardStep::Identity.prev(), WizardStep::Identity);
        assert_eq!(WizardStep::Profile.prev(), WizardStep::Credentials);
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(4), None);
    }

    #[test]
    fn steps_own_disjoint_field_sets_covering_the_form() {
        let mut seen: Vec<FieldName> = WizardStep::ALL
            .iter()
            .flat_map(|step| step.fields().iter().copied())
            .collect();
        seen.sort();
        let mut all = FieldName::ALL.to_vec();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn initial_state_is_step_one_not_done() {
        let state = WizardState::default();
        assert_eq!(state.step.number(), 1);
        assert!(!state.done);
        assert!(state.touched.is_empty());
    }
}
