//! Persisted form snapshot.
//!
//! The snapshot is the resume-after-restart record:
//!
//! ```json
//! { "step": 2, "done": false,
//!   "data": { "firstName": "...", ..., "dob": "", "profileImageUrl": "" },
//!   "touched": { "firstName": true } }
//! ```
//!
//! Decoding never trusts the stored shape: known keys are merged over a
//! default record, unknown keys are dropped, and anything that breaks the
//! structure is reported as a [`SnapshotError`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::form::{FieldName, FormData};
use crate::wizard::{WizardState, WizardStep};

/// Fixed storage key of the snapshot.
pub const SNAPSHOT_KEY: &str = "join-us-form-v1";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot root is not an object")]
    NotAnObject,
    #[error("snapshot step is not in 1..=3: {0}")]
    InvalidStep(Value),
    #[error("snapshot field `{0}` has the wrong type")]
    WrongType(&'static str),
}

/// Everything needed to resume the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub step: WizardStep,
    pub done: bool,
    pub data: FormData,
    pub touched: BTreeSet<FieldName>,
}

#[derive(Serialize)]
struct SnapshotRecord<'a> {
    step: u8,
    done: bool,
    data: &'a FormData,
    touched: BTreeMap<&'static str, bool>,
}

impl FormSnapshot {
    pub fn new(state: &WizardState, data: &FormData) -> Self {
        Self {
            step: state.step,
            done: state.done,
            data: data.clone(),
            touched: state.touched.clone(),
        }
    }

    pub fn wizard_state(&self) -> WizardState {
        WizardState {
            step: self.step,
            done: self.done,
            touched: self.touched.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        let record = SnapshotRecord {
            step: self.step.number(),
            done: self.done,
            data: &self.data,
            touched: self.touched.iter().map(|f| (f.as_str(), true)).collect(),
        };
        Ok(serde_json::to_string(&record)?)
    }

    /// Decode a stored snapshot, merging it over the default record.
    ///
    /// Missing `step`, `done`, `data` and `touched` fall back to 1, false
    /// and empty maps. Present values of the wrong shape reject the whole
    /// snapshot.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(raw)?;
        let root = value.as_object().ok_or(SnapshotError::NotAnObject)?;

        let step = match root.get("step") {
            None | Some(Value::Null) => WizardStep::FIRST,
            Some(raw_step) => raw_step
                .as_i64()
                .and_then(WizardStep::from_number)
                .ok_or_else(|| SnapshotError::InvalidStep(raw_step.clone()))?,
        };

        let done = match root.get("done") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(done)) => *done,
            Some(_) => return Err(SnapshotError::WrongType("done")),
        };

        let data = match optional_object(root, "data")? {
            Some(stored) => merge_data(stored),
            None => FormData::default(),
        };

        let touched = match optional_object(root, "touched")? {
            Some(stored) => stored
                .iter()
                .filter(|(_, flag)| flag.as_bool() == Some(true))
                .filter_map(|(name, _)| FieldName::parse(name))
                .collect(),
            None => BTreeSet::new(),
        };

        Ok(Self {
            step,
            done,
            data,
            touched,
        })
    }
}

fn optional_object<'a>(
    root: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a Map<String, Value>>, SnapshotError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(SnapshotError::WrongType(key)),
    }
}

fn merge_data(stored: &Map<String, Value>) -> FormData {
    let mut data = FormData::default();
    for (key, value) in stored {
        match (FieldName::from_data_key(key), value.as_str()) {
            (Some(field), Some(text)) => data.set(field, text),
            _ => tracing::debug!(key = %key, "dropping unknown or non-string snapshot data entry"),
        }
    }
    data
}
