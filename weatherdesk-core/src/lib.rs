//! Core library for the `weatherdesk` CLI.
//!
//! This crate defines:
//! - Field state machines and draft assembly for the request form
//! - The submission and lookup controllers
//! - The HTTP client for the request backend, and configuration handling
//!
//! It is used by `weatherdesk-cli`, but can also be reused by other binaries
//! or services.

pub mod backend;
pub mod config;
pub mod controller;
pub mod feedback;
pub mod field;
pub mod model;

pub use backend::{BackendError, HttpBackend, WeatherBackend};
pub use config::{Config, DEFAULT_BACKEND_URL};
pub use controller::{
    LookupController, LookupPhase, SubmissionController, SubmissionResult, SubmitOutcome,
    SubmitPhase,
};
pub use feedback::CopyFeedback;
pub use field::{DateField, DateValidation, LocationField, LocationValidation};
pub use model::{RequestDraft, WeatherRecord};
