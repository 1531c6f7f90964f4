//! Error types for the sign-up form.

use serde::{Deserialize, Serialize};

use crate::flow::SignupStep;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by the step controller when an operation does not apply to
/// the current step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: SignupStep, to: SignupStep },

    #[error("Submit is only available on the credentials step (current: {step})")]
    SubmitOutsideCredentials { step: SignupStep },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Terminal REPL input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: set <field> <value>")]
    MissingField,

    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// HTTP/WebSocket adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server stopped: {0}")]
    Serve(#[from] std::io::Error),
}

/// A single field's validation failure, shown inline beneath the field.
///
/// Every variant carries the user-facing message of the check that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{message}")]
    TooShort { min: usize, message: String },

    #[error("{message}")]
    TooLong { max: usize, message: String },

    #[error("{message}")]
    WrongFormat { message: String },

    #[error("{message}")]
    Unset { message: String },
}

impl ValidationError {
    /// The message rendered under the field.
    pub fn message(&self) -> &str {
        match self {
            Self::TooShort { message, .. }
            | Self::TooLong { message, .. }
            | Self::WrongFormat { message }
            | Self::Unset { message } => message,
        }
    }
}
