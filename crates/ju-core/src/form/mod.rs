//! Form domain models
//!
//! This module defines the record collected by the onboarding wizard and
//! the field names used to address it. Values are stored exactly as the
//! user typed them; trimming happens in the validators.

pub mod dob;

pub use dob::{format_nice_date, DobParts};

use serde::{Deserialize, Serialize};

/// Addressable fields of the onboarding form.
///
/// The serialized names are the keys used in the `touched` map of the
/// persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Username,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Dob,
    /// Backed by the `profileImageUrl` data key.
    ProfileImage,
}

impl FieldName {
    pub const ALL: [FieldName; 9] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Username,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Password,
        FieldName::ConfirmPassword,
        FieldName::Dob,
        FieldName::ProfileImage,
    ];

    /// Name used in the `touched` map and in error mappings.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Username => "username",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirmPassword",
            FieldName::Dob => "dob",
            FieldName::ProfileImage => "profileImage",
        }
    }

    /// Key of the value in the persisted `data` object.
    pub fn data_key(self) -> &'static str {
        match self {
            FieldName::ProfileImage => "profileImageUrl",
            other => other.as_str(),
        }
    }

    pub fn parse(name: &str) -> Option<FieldName> {
        FieldName::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Resolve a persisted `data` key back to its field.
    pub fn from_data_key(key: &str) -> Option<FieldName> {
        FieldName::ALL.into_iter().find(|f| f.data_key() == key)
    }

    /// Fields whose values must never reach logs.
    pub fn is_secret(self) -> bool {
        matches!(self, FieldName::Password | FieldName::ConfirmPassword)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values collected by the wizard.
///
/// `profile_image_url` holds a self-contained `data:` URL so the preview
/// survives a restart; an empty string means no image was ingested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub dob: String,
    pub profile_image_url: String,
}

impl FormData {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Username => &self.username,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::Password => &self.password,
            FieldName::ConfirmPassword => &self.confirm_password,
            FieldName::Dob => &self.dob,
            FieldName::ProfileImage => &self.profile_image_url,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::FirstName => &mut self.first_name,
            FieldName::LastName => &mut self.last_name,
            FieldName::Username => &mut self.username,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
            FieldName::Password => &mut self.password,
            FieldName::ConfirmPassword => &mut self.confirm_password,
            FieldName::Dob => &mut self.dob,
            FieldName::ProfileImage => &mut self.profile_image_url,
        };
        *slot = value.into();
    }

    pub fn has_profile_image(&self) -> bool {
        !self.profile_image_url.is_empty()
    }
}
