//! Wizard domain module.
//!
//! This module defines the onboarding wizard state machine types.

pub mod state;
pub mod state_machine;

pub use state::{WizardState, WizardStep};
pub use state_machine::{WizardAction, WizardEvent, WizardStateMachine};
