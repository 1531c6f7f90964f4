//! Sign-up form — a two-step account creation form with declarative field
//! validation and a guarded step flow.

pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod form;
pub mod notify;
pub mod server;
pub mod view;
