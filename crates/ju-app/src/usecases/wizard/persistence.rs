//! Background snapshot persistence.
//! 后台快照持久化。
//!
//! The interaction path only enqueues commands; a single writer task applies
//! them in order, so a `Clear` is never overtaken by an earlier `Save`.
//! Write failures are logged and swallowed.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info_span, warn, Instrument};

use ju_core::ports::SnapshotStorePort;
use ju_core::snapshot::FormSnapshot;

use super::controller::SnapshotSink;

enum PersistCommand {
    Save(FormSnapshot),
    Clear,
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget front of a [`SnapshotStorePort`].
pub struct SnapshotPersistence {
    store: Arc<dyn SnapshotStorePort>,
    command_tx: mpsc::UnboundedSender<PersistCommand>,
}

impl SnapshotPersistence {
    /// Spawn the writer task on the current tokio runtime.
    pub fn spawn(store: Arc<dyn SnapshotStorePort>) -> Arc<Self> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let writer = SnapshotWriterTask::new(command_rx, store.clone());
        tokio::spawn(writer.run().instrument(info_span!("snapshot.writer")));
        Arc::new(Self { store, command_tx })
    }

    /// Load the stored snapshot. Any failure reads as "nothing stored".
    pub async fn load(&self) -> Option<FormSnapshot> {
        match self.store.load().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "Failed to load form snapshot; starting fresh");
                None
            }
        }
    }

    /// Wait until every command enqueued before this call has been applied.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.command_tx.send(PersistCommand::Flush(ack_tx)).is_err() {
            warn!("snapshot writer is gone; nothing to flush");
            return;
        }
        if ack_rx.await.is_err() {
            warn!("snapshot writer stopped before flush completed");
        }
    }

    fn enqueue(&self, command: PersistCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("snapshot writer is gone; dropping snapshot command");
        }
    }
}

impl SnapshotSink for SnapshotPersistence {
    fn save(&self, snapshot: FormSnapshot) {
        self.enqueue(PersistCommand::Save(snapshot));
    }

    fn clear(&self) {
        self.enqueue(PersistCommand::Clear);
    }
}

struct SnapshotWriterTask {
    command_rx: mpsc::UnboundedReceiver<PersistCommand>,
    store: Arc<dyn SnapshotStorePort>,
}

impl SnapshotWriterTask {
    fn new(
        command_rx: mpsc::UnboundedReceiver<PersistCommand>,
        store: Arc<dyn SnapshotStorePort>,
    ) -> Self {
        Self { command_rx, store }
    }

    /// Run until every sender is dropped.
    async fn run(mut self) {
        let mut carried: Option<PersistCommand> = None;
        loop {
            let command = match carried.take() {
                Some(command) => command,
                None => match self.command_rx.recv().await {
                    Some(command) => command,
                    None => break,
                },
            };

            match command {
                PersistCommand::Save(snapshot) => {
                    let (latest, skipped, next) = self.coalesce(snapshot);
                    carried = next;
                    self.write(latest, skipped).await;
                }
                PersistCommand::Clear => {
                    if let Err(err) = self.store.clear().await {
                        warn!(error = %err, "Failed to clear form snapshot");
                    } else {
                        debug!("form snapshot cleared");
                    }
                }
                PersistCommand::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }
        debug!("snapshot writer stopped");
    }

    /// Drain queued saves, keeping only the newest one. The first non-save
    /// command is handed back so ordering is preserved.
    fn coalesce(
        &mut self,
        mut latest: FormSnapshot,
    ) -> (FormSnapshot, usize, Option<PersistCommand>) {
        let mut skipped = 0;
        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                PersistCommand::Save(snapshot) => {
                    latest = snapshot;
                    skipped += 1;
                }
                other => return (latest, skipped, Some(other)),
            }
        }
        (latest, skipped, None)
    }

    async fn write(&self, snapshot: FormSnapshot, skipped: usize) {
        match self.store.save(&snapshot).await {
            Ok(()) => debug!(
                step = snapshot.step.number(),
                done = snapshot.done,
                coalesced = skipped,
                "form snapshot saved"
            ),
            Err(err) => warn!(error = %err, "Failed to save form snapshot"),
        }
    }
}
