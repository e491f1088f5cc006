//! Wizard use cases.
//!
//! 向导用例：控制器、快照持久化与会话。

pub mod controller;
pub mod persistence;
pub mod session;

pub use controller::{IngestionTicket, NavOutcome, SnapshotSink, WizardController};
pub use persistence::SnapshotPersistence;
pub use session::{AttachReport, WizardSession};
