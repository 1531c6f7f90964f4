//! Two-step flow: Intro (who you are) then Credentials (password).
//!
//! The forward move is guarded by the intro fields being valid and edited;
//! the backward move is unconditional. Submission happens on Credentials and
//! never changes the step.

pub mod controller;
pub mod state;

pub use controller::{AdvanceOutcome, StepController};
pub use state::SignupStep;
