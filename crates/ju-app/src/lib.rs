//! Join-Us Application Orchestration Layer
//!
//! This crate contains the wizard use cases: the controller that drives the
//! pure state machine, the background snapshot writer, and profile image
//! ingestion.

pub mod usecases;
pub mod view;

pub use usecases::media::IngestProfileImage;
pub use usecases::wizard::{
    AttachReport, IngestionTicket, NavOutcome, SnapshotPersistence, SnapshotSink,
    WizardController, WizardSession,
};
pub use view::{FieldView, WizardView};
