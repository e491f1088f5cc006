//! Presentation contract.
//!
//! Read-only projections of the controller handed to whatever renders the
//! wizard. Error maps carry the display messages, keyed by field name.

use std::collections::BTreeMap;

use serde::Serialize;

use ju_core::form::FieldName;

/// One input as the renderer needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub value: String,
    /// Present only when the field is touched and currently invalid.
    pub error: Option<String>,
    pub touched: bool,
}

/// Whole-wizard projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub current_step: u8,
    pub is_done: bool,
    /// Every error of the current step.
    pub errors: BTreeMap<FieldName, String>,
    /// Errors of touched fields only.
    pub visible_errors: BTreeMap<FieldName, String>,
    /// Fields of the current step.
    pub fields: BTreeMap<FieldName, FieldView>,
    /// Date of birth as shown on the summary, empty when unset.
    pub dob_display: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_view_serializes_field_names_as_keys() {
        let mut errors = BTreeMap::new();
        errors.insert(FieldName::ConfirmPassword, "Нууц үг таарахгүй байна".to_string());
        let view = WizardView {
            current_step: 2,
            is_done: false,
            errors: errors.clone(),
            visible_errors: BTreeMap::new(),
            fields: BTreeMap::new(),
            dob_display: String::new(),
        };

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["currentStep"], 2);
        assert_eq!(json["isDone"], false);
        assert_eq!(json["errors"]["confirmPassword"], "Нууц үг таарахгүй байна");
        assert!(json["visibleErrors"].as_object().unwrap().is_empty());
    }
}
