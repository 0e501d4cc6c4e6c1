//! Controllers for the two workflows: submitting a request and looking one
//! up again. Each owns its state exclusively and talks to the backend only
//! through the [`crate::backend::WeatherBackend`] seam, so both are testable
//! against an in-memory double.

pub mod lookup;
pub mod submit;

pub use lookup::{LOOKUP_ERROR_MESSAGE, LookupController, LookupPhase, LookupTicket};
pub use submit::{
    SUBMIT_FAILED_MESSAGE, SUBMIT_OFFLINE_MESSAGE, SUBMIT_OK_MESSAGE, SubmissionController,
    SubmissionResult, SubmitOutcome, SubmitPhase,
};
