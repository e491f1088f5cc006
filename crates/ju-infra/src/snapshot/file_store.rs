//! File-based snapshot repository
//!
//! This module provides a file-based implementation of the SnapshotStorePort,
//! persisting the wizard snapshot to `<base dir>/<key>.json`.

use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use ju_core::ports::SnapshotStorePort;
use ju_core::snapshot::{FormSnapshot, SNAPSHOT_KEY};

pub const SNAPSHOT_FILE_EXTENSION: &str = "json";

pub struct FileSnapshotRepository {
    snapshot_file_path: PathBuf,
}

impl FileSnapshotRepository {
    /// Create repository with custom file path
    pub fn new(snapshot_file_path: PathBuf) -> Self {
        Self { snapshot_file_path }
    }

    /// Create repository storing `key` under `base_dir`
    pub fn with_key(base_dir: PathBuf, key: &str) -> Self {
        Self {
            snapshot_file_path: base_dir.join(format!("{key}.{SNAPSHOT_FILE_EXTENSION}")),
        }
    }

    /// Create repository with the default key
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::with_key(base_dir, SNAPSHOT_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.snapshot_file_path
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.snapshot_file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create snapshot dir failed: {}", parent.display()))?;
        }
        Ok(())
    }

    /// Write to a sibling temp file, then rename over the target, so a
    /// crash mid-write leaves the previous snapshot intact.
    async fn atomic_write(&self, content: &str) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.snapshot_file_path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("create temp snapshot failed: {}", tmp_path.display()))?;
        file.write_all(content.as_bytes())
            .await
            .with_context(|| format!("write temp snapshot failed: {}", tmp_path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("sync temp snapshot failed: {}", tmp_path.display()))?;
        drop(file);

        fs::rename(&tmp_path, &self.snapshot_file_path)
            .await
            .with_context(|| {
                format!(
                    "rename temp snapshot to target failed: {} -> {}",
                    tmp_path.display(),
                    self.snapshot_file_path.display()
                )
            })?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotStorePort for FileSnapshotRepository {
    async fn load(&self) -> anyhow::Result<Option<FormSnapshot>> {
        let content = match fs::read_to_string(&self.snapshot_file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("read snapshot failed: {}", self.snapshot_file_path.display())
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let snapshot = FormSnapshot::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse form snapshot: {e}"))?;

        debug!(
            path = %self.snapshot_file_path.display(),
            step = snapshot.step.number(),
            done = snapshot.done,
            "loaded form snapshot"
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &FormSnapshot) -> anyhow::Result<()> {
        let json = snapshot
            .to_json()
            .map_err(|e| anyhow::anyhow!("Failed to serialize form snapshot: {e}"))?;
        self.atomic_write(&json).await
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.snapshot_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("remove snapshot failed: {}", self.snapshot_file_path.display())
            }),
        }
    }
}
