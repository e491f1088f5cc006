//! Validation domain module.
//!
//! Field validators are pure functions over [`FormData`](crate::form::FormData);
//! the step policy groups them per wizard step. Validation failures are
//! data, never `Err`.

pub mod policy;
pub mod validators;

pub use policy::{compute_errors, StepErrors, StepValidationPolicy};

/// A user-correctable validation failure.
///
/// The display string is the fixed message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Нэрээ оруулна уу")]
    FirstNameRequired,
    #[error("Овгоо оруулна уу.")]
    LastNameRequired,
    #[error("Хэрэглэгчийн нэрээ оруулна уу")]
    UsernameRequired,
    #[error("Зөв мэйл хаяг оруулна уу")]
    EmailInvalid,
    #[error("8 оронтой дугаар оруулна уу.")]
    PhoneInvalid,
    #[error("6 оронтой тоо оруулна уу")]
    PasswordTooShort,
    #[error("Нууц үгээ давтан оруулна уу")]
    ConfirmPasswordRequired,
    #[error("Нууц үг таарахгүй байна")]
    PasswordMismatch,
    #[error("Төрсөн огноогоо оруулна уу")]
    DobRequired,
    #[error("Та 18 ба түүнээс дээш настай байх ёстой.")]
    Underage,
    #[error("Профайл зургаа оруулна уу")]
    ProfileImageRequired,
}

impl FieldError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}
