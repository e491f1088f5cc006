//! Field rules as the user meets them, step by step.

use chrono::NaiveDate;

use ju_core::validation::{FieldError, StepValidationPolicy};
use ju_core::{compute_errors, FieldName, FormData, WizardStep};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn credentials(email: &str, phone: &str, password: &str, confirm: &str) -> FormData {
    FormData {
        email: email.into(),
        phone: phone.into(),
        password: password.into(),
        confirm_password: confirm.into(),
        ..Default::default()
    }
}

fn error_of(data: &FormData, field: FieldName) -> Option<FieldError> {
    compute_errors(WizardStep::Credentials, data, today())
        .get(&field)
        .copied()
}

#[test]
fn phone_counts_digits_only() {
    let ok = credentials("a@b.c", "1234-5678", "abcdef", "abcdef");
    assert_eq!(error_of(&ok, FieldName::Phone), None);

    for phone in ["123456789", "1234567", ""] {
        let data = credentials("a@b.c", phone, "abcdef", "abcdef");
        assert_eq!(error_of(&data, FieldName::Phone), Some(FieldError::PhoneInvalid));
    }
}

#[test]
fn email_needs_user_domain_and_dot() {
    assert_eq!(
        error_of(&credentials("a@b.c", "", "", ""), FieldName::Email),
        None
    );
    for email in ["a@b", "a.com", "", "a b@c.d"] {
        assert_eq!(
            error_of(&credentials(email, "", "", ""), FieldName::Email),
            Some(FieldError::EmailInvalid),
            "{email:?} should be rejected"
        );
    }
}

#[test]
fn password_and_confirmation() {
    let short = credentials("a@b.c", "12345678", "abcde", "abcde");
    assert_eq!(
        error_of(&short, FieldName::Password),
        Some(FieldError::PasswordTooShort)
    );

    let mismatch = credentials("a@b.c", "12345678", "abcdef", "abcdeg");
    assert_eq!(error_of(&mismatch, FieldName::Password), None);
    assert_eq!(
        error_of(&mismatch, FieldName::ConfirmPassword),
        Some(FieldError::PasswordMismatch)
    );

    let missing = credentials("a@b.c", "12345678", "abcdef", "");
    assert_eq!(
        error_of(&missing, FieldName::ConfirmPassword),
        Some(FieldError::ConfirmPasswordRequired)
    );

    let matching = credentials("a@b.c", "12345678", "abcdef", "abcdef");
    assert!(StepValidationPolicy::is_valid(
        WizardStep::Credentials,
        &matching,
        today()
    ));
}

#[test]
fn errors_are_scoped_to_the_requested_step() {
    let data = FormData::default();

    let identity = compute_errors(WizardStep::Identity, &data, today());
    assert_eq!(
        identity.keys().copied().collect::<Vec<_>>(),
        vec![FieldName::FirstName, FieldName::LastName, FieldName::Username]
    );

    let profile = compute_errors(WizardStep::Profile, &data, today());
    assert_eq!(profile.get(&FieldName::Dob), Some(&FieldError::DobRequired));
    assert_eq!(
        profile.get(&FieldName::ProfileImage),
        Some(&FieldError::ProfileImageRequired)
    );
    assert_eq!(profile.len(), 2);
}
