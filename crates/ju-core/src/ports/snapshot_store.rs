//! Snapshot store port
//!
//! This port defines the contract for persisting and retrieving the wizard
//! snapshot under its fixed key. Implementations are provided by the
//! infrastructure layer (e.g., file-based storage).

use async_trait::async_trait;

use crate::snapshot::FormSnapshot;

#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    /// Load the stored snapshot. `Ok(None)` when nothing is stored.
    async fn load(&self) -> anyhow::Result<Option<FormSnapshot>>;

    /// Replace the stored snapshot.
    async fn save(&self, snapshot: &FormSnapshot) -> anyhow::Result<()>;

    /// Delete the stored snapshot. Deleting a missing snapshot succeeds.
    async fn clear(&self) -> anyhow::Result<()>;
}
