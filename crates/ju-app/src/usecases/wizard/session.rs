//! Wizard session.
//!
//! Shared handle over one [`WizardController`]. The controller is synchronous;
//! the session adds the only suspend point, image ingestion, and releases its
//! lock while the file is read so other actions keep flowing.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info_span, Instrument};

use ju_core::media::{drop_disposition, DropDisposition, IngestOutcome, MediaInput};
use ju_core::ports::{ClockPort, MediaReaderPort, SnapshotStorePort};

use crate::usecases::media::IngestProfileImage;
use crate::view::WizardView;

use super::controller::WizardController;
use super::persistence::SnapshotPersistence;

/// What happened to one picked or dropped file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachReport {
    pub outcome: IngestOutcome,
    /// Whether the form now shows this image.
    pub applied: bool,
    /// Set for drops: the host must suppress its default handling.
    pub disposition: Option<DropDisposition>,
}

pub struct WizardSession {
    controller: Arc<Mutex<WizardController>>,
    ingest: Arc<IngestProfileImage>,
    persistence: Arc<SnapshotPersistence>,
}

impl WizardSession {
    /// Load the stored snapshot (if any) and build the controller on top of it.
    pub async fn open(
        store: Arc<dyn SnapshotStorePort>,
        clock: Arc<dyn ClockPort>,
        reader: Arc<dyn MediaReaderPort>,
    ) -> Self {
        let persistence = SnapshotPersistence::spawn(store);
        let snapshot = persistence.load().await;
        let controller = WizardController::restore(snapshot, clock, persistence.clone());

        Self {
            controller: Arc::new(Mutex::new(controller)),
            ingest: Arc::new(IngestProfileImage::new(reader)),
            persistence,
        }
    }

    /// Exclusive access to the controller for synchronous actions.
    pub async fn controller(&self) -> MutexGuard<'_, WizardController> {
        self.controller.lock().await
    }

    pub async fn view(&self) -> WizardView {
        self.controller.lock().await.view()
    }

    /// Ingest the first file of a selection or drop.
    ///
    /// When several ingestions overlap, only the most recently started one
    /// may change the form, whichever finishes last.
    pub async fn attach_profile_image(&self, input: MediaInput) -> AttachReport {
        let disposition = input.is_drop().then(|| drop_disposition(&input));
        let span = info_span!("usecase.wizard.attach_profile_image", drop = input.is_drop());

        async {
            // Rejected and empty selections never take a ticket, so they
            // cannot supersede an image that is still being read.
            let file = match self.ingest.select(&input) {
                Ok(file) => file,
                Err(outcome) => {
                    return AttachReport {
                        outcome,
                        applied: false,
                        disposition,
                    }
                }
            };

            let ticket = self.controller.lock().await.begin_image_ingestion();
            let outcome = self.ingest.read(file).await;
            let applied = self
                .controller
                .lock()
                .await
                .complete_image_ingestion(ticket, outcome.clone());
            debug!(ticket = ticket.seq(), applied, "profile image ingestion finished");

            AttachReport {
                outcome,
                applied,
                disposition,
            }
        }
        .instrument(span)
        .await
    }

    /// Wait for all snapshot writes issued so far.
    pub async fn flush(&self) {
        self.persistence.flush().await;
    }
}
