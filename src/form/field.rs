//! Field identities and per-field state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::schema::{self, FieldRule};
use crate::error::{FlowError, ValidationError};

/// The six inputs of the sign-up form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Username,
    Email,
    Phone,
    Role,
    Password,
    ConfirmPassword,
}

impl FieldName {
    /// Every field in declaration order.
    pub const ALL: [FieldName; 6] = [
        Self::Username,
        Self::Email,
        Self::Phone,
        Self::Role,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Role => "role",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Whether the value is a secret and must not be echoed back.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| FlowError::UnknownField(s.to_string()))
    }
}

/// One named, independently validated input.
#[derive(Clone, Serialize)]
pub struct Field {
    pub name: FieldName,
    pub value: String,
    #[serde(skip)]
    pub rule: &'static FieldRule,
    /// Set by the first edit and never cleared.
    pub dirty: bool,
    pub error: Option<ValidationError>,
}

impl Field {
    /// A pristine field bound to its schema rule.
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            value: String::new(),
            rule: schema::rule_for(name),
            dirty: false,
            error: None,
        }
    }

    /// Re-run the rule against the current value, storing or clearing the error.
    pub fn revalidate(&mut self) -> bool {
        self.error = self.rule.validate(&self.value).err();
        self.error.is_none()
    }

    pub fn is_valid(&self) -> bool {
        self.rule.validate(&self.value).is_ok()
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: &str = if self.name.is_secret() {
            "<redacted>"
        } else {
            &self.value
        };
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &value)
            .field("dirty", &self.dirty)
            .field("error", &self.error)
            .finish()
    }
}

pub(super) fn slot(name: FieldName) -> usize {
    name.index()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for name in FieldName::ALL {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.as_str()));
        }
    }

    #[test]
    fn parse_round_trips_every_name() {
        for name in FieldName::ALL {
            assert_eq!(name.as_str().parse::<FieldName>().unwrap(), name);
        }
    }

    #[test]
    fn parse_rejects_unknown_name() {
        let err = "confirm_password".parse::<FieldName>().unwrap_err();
        assert_eq!(err, FlowError::UnknownField("confirm_password".to_string()));
    }

    #[test]
    fn slots_follow_declaration_order() {
        for (i, name) in FieldName::ALL.into_iter().enumerate() {
            assert_eq!(slot(name), i);
        }
    }

    #[test]
    fn new_field_is_pristine() {
        let field = Field::new(FieldName::Email);
        assert!(field.value.is_empty());
        assert!(!field.dirty);
        assert!(field.error.is_none());
        assert_eq!(field.rule.field, FieldName::Email);
    }

    #[test]
    fn debug_redacts_secret_values() {
        let mut field = Field::new(FieldName::Password);
        field.value = "Abcdef1!".to_string();
        let rendered = format!("{field:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("Abcdef1!"));

        let mut field = Field::new(FieldName::Username);
        field.value = "홍길동".to_string();
        assert!(format!("{field:?}").contains("홍길동"));
    }
}
