//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard use cases and the
//! infrastructure implementations (file storage, system clock, file
//! reading), keeping the state machine independent of I/O.

mod clock;
pub mod media_reader;
pub mod snapshot_store;

pub use clock::*;
pub use media_reader::MediaReaderPort;
pub use snapshot_store::SnapshotStorePort;
