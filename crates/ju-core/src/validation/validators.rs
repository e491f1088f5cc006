//! Field validators.
//!
//! Every validator has the same shape, `(data, today) -> Option<FieldError>`,
//! so the step policy can hold them in a table. Only the date-of-birth rule
//! reads `today`.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::form::FormData;
use crate::validation::FieldError;

pub type Validator = fn(&FormData, NaiveDate) -> Option<FieldError>;

pub const PHONE_DIGITS: usize = 8;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_AGE_YEARS: i32 = 18;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

pub fn only_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Whole years between `dob` and `today`, decremented when the birthday
/// has not come round yet this year.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Age for a stored date string. Unparseable input counts as zero.
pub fn age_from_str(dob: &str, today: NaiveDate) -> i32 {
    NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d")
        .map(|date| age_on(date, today))
        .unwrap_or(0)
}

fn required(value: &str, error: FieldError) -> Option<FieldError> {
    value.trim().is_empty().then_some(error)
}

pub fn first_name(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    required(&data.first_name, FieldError::FirstNameRequired)
}

pub fn last_name(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    required(&data.last_name, FieldError::LastNameRequired)
}

pub fn username(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    required(&data.username, FieldError::UsernameRequired)
}

pub fn email(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    if data.email.trim().is_empty() || !is_email(&data.email) {
        return Some(FieldError::EmailInvalid);
    }
    None
}

pub fn phone(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    (only_digits(&data.phone).len() != PHONE_DIGITS).then_some(FieldError::PhoneInvalid)
}

pub fn password(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    (data.password.chars().count() < MIN_PASSWORD_LEN).then_some(FieldError::PasswordTooShort)
}

pub fn confirm_password(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    if data.confirm_password.is_empty() {
        return Some(FieldError::ConfirmPasswordRequired);
    }
    (data.confirm_password != data.password).then_some(FieldError::PasswordMismatch)
}

pub fn dob(data: &FormData, today: NaiveDate) -> Option<FieldError> {
    if data.dob.is_empty() {
        return Some(FieldError::DobRequired);
    }
    (age_from_str(&data.dob, today) < MIN_AGE_YEARS).then_some(FieldError::Underage)
}

pub fn profile_image(data: &FormData, _today: NaiveDate) -> Option<FieldError> {
    (!data.has_profile_image()).then_some(FieldError::ProfileImageRequired)
}
