//! FormModel: the six fields, their values, dirty flags and errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{self, Field, FieldName};
use super::schema::ROLE_OPTIONS;
use crate::error::ValidationError;

/// Message of the cross-field warning raised when the passwords differ.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "비밀번호가 일치하지 않습니다";

/// Role chosen in the select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "관리자")]
    Admin,
    #[serde(rename = "일반사용자")]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_OPTIONS[0],
            Self::Member => ROLE_OPTIONS[1],
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        [Self::Admin, Self::Member]
            .into_iter()
            .find(|role| role.as_str() == value)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated payload produced by a completed submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRecord {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password: String,
    pub confirm_password: String,
}

/// A completed submit. A password mismatch is reported, not enforced.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub record: SignupRecord,
    pub password_mismatch: bool,
    pub submitted_at: DateTime<Utc>,
}

/// One field's current error, paired with the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FieldName,
    pub error: ValidationError,
}

/// Result of validating the whole form for submission.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Completed(Submission),
    Rejected { errors: Vec<FieldError> },
}

/// Holds the six fields in form order.
#[derive(Debug, Clone)]
pub struct FormModel {
    fields: [Field; 6],
}

impl Default for FormModel {
    fn default() -> Self {
        Self::new()
    }
}

impl FormModel {
    /// All fields empty, pristine and error-free.
    pub fn new() -> Self {
        Self {
            fields: FieldName::ALL.map(Field::new),
        }
    }

    pub fn field(&self, name: FieldName) -> &Field {
        &self.fields[field::slot(name)]
    }

    fn field_mut(&mut self, name: FieldName) -> &mut Field {
        &mut self.fields[field::slot(name)]
    }

    /// Fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn value(&self, name: FieldName) -> &str {
        &self.field(name).value
    }

    pub fn error(&self, name: FieldName) -> Option<&ValidationError> {
        self.field(name).error.as_ref()
    }

    pub fn is_dirty(&self, name: FieldName) -> bool {
        self.field(name).dirty
    }

    /// Every stored error, in form order.
    pub fn errors(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|f| {
                f.error.clone().map(|error| FieldError {
                    field: f.name,
                    error,
                })
            })
            .collect()
    }

    /// Store a new value, mark the field dirty and revalidate that field only.
    ///
    /// Returns the field's error after revalidation, if any.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) -> Option<&ValidationError> {
        let field = self.field_mut(name);
        field.value = value.into();
        field.dirty = true;
        field.revalidate();
        field.error.as_ref()
    }

    /// Revalidate the named fields, storing or clearing their errors.
    ///
    /// Returns `true` only if every named field is valid and dirty. Every
    /// field is evaluated even after the first failure so all errors surface.
    pub fn validate_fields(&mut self, names: &[FieldName]) -> bool {
        names.iter().fold(true, |all, &name| {
            let field = self.field_mut(name);
            let valid = field.revalidate();
            all && valid && field.dirty
        })
    }

    /// Named fields that would block a guard: invalid or never edited.
    pub fn blocking_fields(&self, names: &[FieldName]) -> Vec<FieldName> {
        names
            .iter()
            .copied()
            .filter(|&name| {
                let field = self.field(name);
                !field.dirty || !field.is_valid()
            })
            .collect()
    }

    pub fn passwords_match(&self) -> bool {
        self.value(FieldName::Password) == self.value(FieldName::ConfirmPassword)
    }

    /// Validate all six fields and build the record.
    ///
    /// Any invalid field rejects the submit. Differing passwords do not: the
    /// record is still produced with both values and the mismatch flagged.
    pub fn submit(&mut self) -> SubmitOutcome {
        let all_valid = self.validate_all();
        // The role check and `Role::from_value` share ROLE_OPTIONS, so a role
        // that fails to parse has already left an error on the role field.
        match Role::from_value(self.value(FieldName::Role)) {
            Some(role) if all_valid => SubmitOutcome::Completed(Submission {
                record: self.record(role),
                password_mismatch: !self.passwords_match(),
                submitted_at: Utc::now(),
            }),
            _ => SubmitOutcome::Rejected {
                errors: self.errors(),
            },
        }
    }

    fn validate_all(&mut self) -> bool {
        self.fields
            .iter_mut()
            .fold(true, |all, field| field.revalidate() && all)
    }

    fn record(&self, role: Role) -> SignupRecord {
        SignupRecord {
            username: self.value(FieldName::Username).to_string(),
            email: self.value(FieldName::Email).to_string(),
            phone: self.value(FieldName::Phone).to_string(),
            role,
            password: self.value(FieldName::Password).to_string(),
            confirm_password: self.value(FieldName::ConfirmPassword).to_string(),
        }
    }
}
