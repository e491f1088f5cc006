//! Dependency wiring: concrete adapters behind the wizard ports.

use std::sync::Arc;

use ju_app::WizardSession;
use ju_core::ports::{ClockPort, MediaReaderPort, SnapshotStorePort};
use ju_infra::{FileSnapshotRepository, FsMediaReader, LocalClock};
use tracing::info;

use super::config::ResolvedConfig;

pub struct WizardDeps {
    pub store: Arc<dyn SnapshotStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub reader: Arc<dyn MediaReaderPort>,
}

pub fn build_deps(config: &ResolvedConfig) -> WizardDeps {
    let store = FileSnapshotRepository::with_key(config.data_dir.clone(), &config.snapshot_key);
    info!(path = %store.path().display(), "using form snapshot file");

    WizardDeps {
        store: Arc::new(store),
        clock: Arc::new(LocalClock),
        reader: Arc::new(FsMediaReader::new()),
    }
}

/// Restore the session from the configured snapshot file.
pub async fn wire_session(deps: WizardDeps) -> WizardSession {
    WizardSession::open(deps.store, deps.clock, deps.reader).await
}
