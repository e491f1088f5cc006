//! Wizard controller.
//!
//! Owns the form record and the wizard state of one session, drives the pure
//! [`WizardStateMachine`] and hands every resulting snapshot to a
//! [`SnapshotSink`]. Errors are never stored: they are recomputed from the
//! form data, the current step and today's date on every read.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, info_span};

use ju_core::form::{DobParts, FieldName, FormData};
use ju_core::media::IngestOutcome;
use ju_core::ports::ClockPort;
use ju_core::snapshot::FormSnapshot;
use ju_core::validation::{compute_errors, StepErrors};
use ju_core::wizard::{WizardAction, WizardEvent, WizardState, WizardStateMachine, WizardStep};

use crate::view::{FieldView, WizardView};

/// Receiver of snapshot writes.
///
/// Implementations must not block: the controller calls them on the
/// interaction path and never waits for the write to land.
pub trait SnapshotSink: Send + Sync {
    fn save(&self, snapshot: FormSnapshot);
    fn clear(&self);
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { from: WizardStep, to: WizardStep },
    Completed,
    /// The current step has errors; the step did not change.
    Blocked(StepErrors),
    /// Nothing to do (first step on back, submit before the last step,
    /// or the wizard is already done).
    Unchanged,
}

/// Sequence number of one image ingestion. Only the most recently issued
/// ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IngestionTicket(u64);

impl IngestionTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

pub struct WizardController {
    data: FormData,
    state: WizardState,
    dob_parts: DobParts,
    ingestion_seq: u64,
    clock: Arc<dyn ClockPort>,
    sink: Arc<dyn SnapshotSink>,
}

impl WizardController {
    /// Fresh wizard: empty form, step 1.
    pub fn new(clock: Arc<dyn ClockPort>, sink: Arc<dyn SnapshotSink>) -> Self {
        Self::restore(None, clock, sink)
    }

    /// Resume from a loaded snapshot, or start fresh when there is none.
    pub fn restore(
        snapshot: Option<FormSnapshot>,
        clock: Arc<dyn ClockPort>,
        sink: Arc<dyn SnapshotSink>,
    ) -> Self {
        let (state, data) = match snapshot {
            Some(snapshot) => {
                info!(
                    step = snapshot.step.number(),
                    done = snapshot.done,
                    "restoring wizard from snapshot"
                );
                (snapshot.wizard_state(), snapshot.data)
            }
            None => (WizardState::default(), FormData::default()),
        };
        let dob_parts = DobParts::from_iso(&data.dob).unwrap_or_default();

        Self {
            data,
            state,
            dob_parts,
            ingestion_seq: 0,
            clock,
            sink,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.step
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }

    pub fn dob_parts(&self) -> &DobParts {
        &self.dob_parts
    }

    /// Full error set of the current step.
    pub fn errors(&self) -> StepErrors {
        compute_errors(self.state.step, &self.data, self.clock.today())
    }

    /// Errors of the current step the user should see: touched fields only.
    pub fn visible_errors(&self) -> StepErrors {
        self.errors()
            .into_iter()
            .filter(|(field, _)| self.state.is_touched(*field))
            .collect()
    }

    pub fn field(&self, field: FieldName) -> FieldView {
        let touched = self.state.is_touched(field);
        let error = if touched {
            self.errors().get(&field).map(|e| e.message())
        } else {
            None
        };
        FieldView {
            value: self.data.get(field).to_string(),
            error,
            touched,
        }
    }

    pub fn view(&self) -> WizardView {
        let errors = self.errors();
        let visible_errors = errors
            .iter()
            .filter(|(field, _)| self.state.is_touched(**field))
            .map(|(field, err)| (*field, err.message()))
            .collect();
        let fields: BTreeMap<FieldName, FieldView> = self
            .state
            .step
            .fields()
            .iter()
            .map(|field| (*field, self.field(*field)))
            .collect();

        WizardView {
            current_step: self.state.step.number(),
            is_done: self.state.done,
            errors: errors
                .iter()
                .map(|(field, err)| (*field, err.message()))
                .collect(),
            visible_errors,
            fields,
            dob_display: ju_core::form::format_nice_date(&self.data.dob),
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new(&self.state, &self.data)
    }

    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        if self.state.done {
            debug!(field = %field, "wizard is done; ignoring edit");
            return;
        }
        self.data.set(field, value);
        if field.is_secret() {
            debug!(field = %field, "field edited");
        } else {
            debug!(field = %field, value = %self.data.get(field), "field edited");
        }
        if field == FieldName::Dob {
            self.dob_parts = DobParts::from_iso(&self.data.dob).unwrap_or_default();
        }
        self.dispatch(WizardEvent::Edited { field });
    }

    pub fn mark_touched(&mut self, field: FieldName) {
        self.dispatch(WizardEvent::Touch { field });
    }

    /// Update the segmented date widget. `dob` holds the composed ISO date
    /// once all parts are present and is cleared otherwise.
    pub fn set_dob_parts(&mut self, parts: DobParts) {
        if self.state.done {
            return;
        }
        self.data.dob = parts.compose().unwrap_or_default();
        self.dob_parts = parts;
        self.dispatch(WizardEvent::Edited {
            field: FieldName::Dob,
        });
    }

    pub fn clear_profile_image(&mut self) {
        self.set_field(FieldName::ProfileImage, String::new());
    }

    pub fn go_next(&mut self) -> NavOutcome {
        let _span = info_span!("usecase.wizard.next", step = self.state.step.number()).entered();
        self.navigate(WizardEvent::Next)
    }

    pub fn go_back(&mut self) -> NavOutcome {
        let _span = info_span!("usecase.wizard.back", step = self.state.step.number()).entered();
        self.navigate(WizardEvent::Back)
    }

    pub fn submit(&mut self) -> NavOutcome {
        let _span = info_span!("usecase.wizard.submit", step = self.state.step.number()).entered();
        if !self.state.step.is_last() {
            debug!("submit is only available on the last step");
            return NavOutcome::Unchanged;
        }
        self.navigate(WizardEvent::Submit)
    }

    /// Start over. The stored snapshot is deleted and pending image
    /// ingestions are invalidated.
    pub fn reset(&mut self) {
        let _span = info_span!("usecase.wizard.reset").entered();
        self.data = FormData::default();
        self.dob_parts = DobParts::default();
        self.ingestion_seq += 1;
        self.dispatch(WizardEvent::Reset);
    }

    pub fn begin_image_ingestion(&mut self) -> IngestionTicket {
        self.ingestion_seq += 1;
        IngestionTicket(self.ingestion_seq)
    }

    /// Apply the result of an ingestion. Returns whether the form changed.
    pub fn complete_image_ingestion(
        &mut self,
        ticket: IngestionTicket,
        outcome: IngestOutcome,
    ) -> bool {
        if ticket.0 != self.ingestion_seq {
            debug!(
                ticket = ticket.0,
                latest = self.ingestion_seq,
                "discarding superseded image ingestion"
            );
            return false;
        }
        match outcome {
            IngestOutcome::Accepted(url) if !self.state.done => {
                self.set_field(FieldName::ProfileImage, url.into_inner());
                true
            }
            _ => false,
        }
    }

    fn navigate(&mut self, event: WizardEvent) -> NavOutcome {
        let from = self.state.step;
        let was_done = self.state.done;
        let event_is_back = event == WizardEvent::Back;
        self.dispatch(event);

        if self.state.done && !was_done {
            info!(from = from.number(), "wizard completed");
            return NavOutcome::Completed;
        }
        if self.state.step != from {
            info!(from = from.number(), to = self.state.step.number(), "wizard step changed");
            return NavOutcome::Moved {
                from,
                to: self.state.step,
            };
        }
        if was_done || event_is_back {
            return NavOutcome::Unchanged;
        }
        let errors = self.errors();
        if errors.is_empty() {
            NavOutcome::Unchanged
        } else {
            debug!(step = from.number(), errors = errors.len(), "wizard step blocked");
            NavOutcome::Blocked(errors)
        }
    }

    fn dispatch(&mut self, event: WizardEvent) {
        let today = self.clock.today();
        let event_name = format!("{event:?}");
        let (next, actions) =
            WizardStateMachine::transition(self.state.clone(), event, &self.data, today);
        debug!(event = %event_name, step = next.step.number(), done = next.done, "wizard transition");
        self.state = next;
        self.execute_actions(actions);
    }

    fn execute_actions(&self, actions: Vec<WizardAction>) {
        for action in actions {
            match action {
                WizardAction::PersistSnapshot => self.sink.save(self.snapshot()),
                WizardAction::ClearSnapshot => self.sink.clear(),
            }
        }
    }
}
