//! Per-record validation and normalization of users.
//!
//! Everything in this module is pure and infallible: a malformed record becomes an invalid
//! [`NormalizedUser`], never an error.

mod email;
mod phone;

pub use email::is_valid_email;
pub use phone::{format_phone, is_valid_phone, sanitize_phone};

use serde_json::{Map, Value};

use crate::types::{
    EMAIL_KEY, FIRST_NAME_KEY, LAST_NAME_KEY, OutputRecord, PHONE_KEY, RawRecord,
};

/// A user built from a [`RawRecord`], with the phone pulled out of `moreData`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedUser {
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    more_data: Map<String, Value>,
}

impl NormalizedUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
        more_data: Map<String, Value>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            phone,
            more_data,
        }
    }

    /// Normalizes a raw record.
    ///
    /// Missing or non-string names become empty strings, which makes the user invalid. A
    /// missing or non-object `moreData` is treated as empty.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let mut more_data = raw.more_data().cloned().unwrap_or_default();
        let phone = match more_data.remove(PHONE_KEY) {
            Some(Value::String(phone)) => Some(phone),
            _ => None,
        };

        Self {
            first_name: raw.string_field(FIRST_NAME_KEY).unwrap_or_default().to_owned(),
            last_name: raw.string_field(LAST_NAME_KEY).unwrap_or_default().to_owned(),
            email: raw.string_field(EMAIL_KEY).map(str::to_owned),
            phone,
            more_data,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the phone as received, before sanitization.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the auxiliary data, without the phone.
    pub fn more_data(&self) -> &Map<String, Value> {
        &self.more_data
    }

    /// A user is valid when both names are non-empty and it can be reached by email or phone.
    pub fn is_valid(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && (self.has_valid_email() || self.has_valid_phone())
    }

    pub fn has_valid_email(&self) -> bool {
        is_valid_email(self.email())
    }

    pub fn sanitized_phone(&self) -> String {
        sanitize_phone(self.phone())
    }

    pub fn has_valid_phone(&self) -> bool {
        is_valid_phone(self.phone())
    }

    pub fn formatted_phone(&self) -> Option<String> {
        format_phone(self.phone())
    }

    /// Identity used for deduplication: first name immediately followed by last name.
    pub fn unique_key(&self) -> String {
        format!("{}{}", self.first_name, self.last_name)
    }

    /// Builds the output form of this user.
    pub fn to_output_record(&self) -> OutputRecord {
        OutputRecord {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            more_data: self.more_data.clone(),
            email: self.email.clone().filter(|_| self.has_valid_email()),
            phone: self.formatted_phone(),
        }
    }
}
