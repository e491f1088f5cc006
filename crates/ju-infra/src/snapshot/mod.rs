mod file_store;

pub use file_store::{FileSnapshotRepository, SNAPSHOT_FILE_EXTENSION};
