//! Media use cases.

pub mod ingest;

pub use ingest::IngestProfileImage;
