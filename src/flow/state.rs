//! Step state machine — tracks which panel of the form is active.

use serde::{Deserialize, Serialize};

use crate::form::FieldName;

/// The two steps of the form.
///
/// Forward: Intro → Credentials (guarded). Backward: Credentials → Intro.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStep {
    /// Username, email, phone and role.
    #[default]
    Intro,
    /// Password and confirmation.
    Credentials,
}

impl SignupStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: SignupStep) -> bool {
        use SignupStep::*;
        matches!((self, target), (Intro, Credentials) | (Credentials, Intro))
    }

    /// The step after this one, if any.
    pub fn next(&self) -> Option<SignupStep> {
        match self {
            Self::Intro => Some(Self::Credentials),
            Self::Credentials => None,
        }
    }

    /// The step before this one, if any.
    pub fn previous(&self) -> Option<SignupStep> {
        match self {
            Self::Intro => None,
            Self::Credentials => Some(Self::Intro),
        }
    }

    /// Page number: 0 for Intro, 1 for Credentials.
    pub fn index(&self) -> u8 {
        match self {
            Self::Intro => 0,
            Self::Credentials => 1,
        }
    }

    /// Fields shown and edited on this step.
    pub fn fields(&self) -> &'static [FieldName] {
        match self {
            Self::Intro => &[
                FieldName::Username,
                FieldName::Email,
                FieldName::Phone,
                FieldName::Role,
            ],
            Self::Credentials => &[FieldName::Password, FieldName::ConfirmPassword],
        }
    }
}

impl std::fmt::Display for SignupStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Intro => "intro",
            Self::Credentials => "credentials",
        };
        write!(f, "{s}")
    }
}
