//! Form model: field state and the declarative validation schema.

pub mod field;
pub mod model;
pub mod schema;

pub use field::{Field, FieldName};
pub use model::{
    FieldError, FormModel, PASSWORD_MISMATCH_MESSAGE, Role, SignupRecord, SubmitOutcome,
    Submission,
};
pub use schema::{Check, FieldRule, ROLE_OPTIONS};
