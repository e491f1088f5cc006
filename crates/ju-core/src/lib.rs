//! # ju-core
//!
//! Core domain models and business logic for the Join-Us onboarding wizard.
//!
//! This crate contains the pure wizard state machine, the field validators
//! and the snapshot schema, without any infrastructure dependencies.

pub mod config;
pub mod form;
pub mod media;
pub mod ports;
pub mod snapshot;
pub mod validation;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use form::{FieldName, FormData};
pub use media::{DataUrl, IngestOutcome, MediaFile, MediaInput};
pub use snapshot::{FormSnapshot, SnapshotError, SNAPSHOT_KEY};
pub use validation::{compute_errors, FieldError, StepErrors};
pub use wizard::{WizardAction, WizardEvent, WizardState, WizardStateMachine, WizardStep};
