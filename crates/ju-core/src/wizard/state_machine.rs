//! Wizard state machine.
//!
//! Defines a pure state transition function for the onboarding wizard.
//! Side effects (snapshot writes) are returned as actions and executed by
//! the caller.

use chrono::NaiveDate;

use crate::form::{FieldName, FormData};
use crate::validation::StepValidationPolicy;
use crate::wizard::state::WizardState;

/// Events that drive the wizard.
///
/// 驱动向导流程的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The user interacted with a field without changing it.
    Touch { field: FieldName },
    /// A field value was changed.
    Edited { field: FieldName },
    /// Continue to the following step.
    Next,
    /// Return to the preceding step.
    Back,
    /// Finish the wizard from the last step.
    Submit,
    /// Start over ("submit again").
    Reset,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Write the current form snapshot.
    PersistSnapshot,
    /// Delete the stored snapshot.
    ClearSnapshot,
}

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(
        state: WizardState,
        event: WizardEvent,
        data: &FormData,
        today: NaiveDate,
    ) -> (WizardState, Vec<WizardAction>) {
        match (state.done, event) {
            (_, WizardEvent::Reset) => (WizardState::default(), vec![WizardAction::ClearSnapshot]),
            (true, _event) => (state, Vec::new()),
            (false, WizardEvent::Edited { field }) => {
                let mut next = state;
                next.touch(field);
                (next, vec![WizardAction::PersistSnapshot])
            }
            (false, WizardEvent::Touch { field }) => {
                let mut next = state.clone();
                next.touch(field);
                Self::persist_if_changed(&state, next)
            }
            (false, WizardEvent::Next) => Self::advance(state, data, today),
            (false, WizardEvent::Submit) if state.step.is_last() => {
                Self::advance(state, data, today)
            }
            (false, WizardEvent::Back) => {
                let mut next = state.clone();
                next.step = state.step.prev();
                Self::persist_if_changed(&state, next)
            }
            (false, _event) => (state, Vec::new()),
        }
    }

    fn advance(
        state: WizardState,
        data: &FormData,
        today: NaiveDate,
    ) -> (WizardState, Vec<WizardAction>) {
        let mut next = state.clone();
        next.touch_all(state.step.fields());

        if !StepValidationPolicy::is_valid(state.step, data, today) {
            return Self::persist_if_changed(&state, next);
        }

        match state.step.next() {
            Some(step) => next.step = step,
            None => match StepValidationPolicy::first_invalid_step(data, today) {
                // An earlier step was edited into an invalid state after it
                // was left; send the user back there instead of completing.
                Some((step, _errors)) => {
                    next.step = step;
                    next.touch_all(step.fields());
                }
                None => next.done = true,
            },
        }
        (next, vec![WizardAction::PersistSnapshot])
    }

    fn persist_if_changed(
        before: &WizardState,
        after: WizardState,
    ) -> (WizardState, Vec<WizardAction>) {
        if *before == after {
            (after, Vec::new())
        } else {
            (after, vec![WizardAction::PersistSnapshot])
        }
    }
}
