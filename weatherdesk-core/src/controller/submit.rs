use std::sync::Arc;

use chrono::NaiveDate;

use crate::backend::{BackendError, WeatherBackend};
use crate::feedback::CopyFeedback;
use crate::field::{self, DateField, LocationField};
use crate::model::RequestDraft;

pub const SUBMIT_OK_MESSAGE: &str = "Weather request submitted successfully!";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit weather request";
pub const SUBMIT_OFFLINE_MESSAGE: &str = "Network error: Could not connect to the server";

/// Submission lifecycle. `Validating` and `Submitting` are passed through on
/// the way to a terminal phase; a terminal phase is left by submitting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Failure,
}

/// What the last submission attempt produced. `id` is present iff the
/// outcome was a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub outcome: SubmitOutcome,
    pub message: String,
    pub id: Option<String>,
}

impl SubmissionResult {
    fn success(id: String) -> Self {
        Self {
            outcome: SubmitOutcome::Success,
            message: SUBMIT_OK_MESSAGE.to_string(),
            id: Some(id),
        }
    }

    fn failure(message: String) -> Self {
        Self { outcome: SubmitOutcome::Failure, message, id: None }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == SubmitOutcome::Success
    }
}

/// Validates the draft, issues the create call, and tracks the lifecycle.
///
/// Owns the form fields, the last result, and the copy feedback. The new
/// identifier of a successful submission is parked in a hand-off slot for
/// the lookup side; only the most recent value matters.
#[derive(Debug)]
pub struct SubmissionController {
    backend: Arc<dyn WeatherBackend>,
    date: DateField,
    location: LocationField,
    notes: String,
    phase: SubmitPhase,
    result: Option<SubmissionResult>,
    feedback: CopyFeedback,
    handoff: Option<String>,
}

impl SubmissionController {
    pub fn new(backend: Arc<dyn WeatherBackend>) -> Self {
        Self {
            backend,
            date: DateField::new(field::today()),
            location: LocationField::new(),
            notes: String::new(),
            phase: SubmitPhase::Idle,
            result: None,
            feedback: CopyFeedback::new(),
            handoff: None,
        }
    }

    pub fn on_date_text_changed(&mut self, text: &str) {
        self.date.set_text(text, field::today());
    }

    pub fn on_date_selected(&mut self, date: NaiveDate) {
        self.date.select(date, field::today());
    }

    pub fn on_location_changed(&mut self, text: &str) {
        self.location.set_text(text);
    }

    pub fn on_notes_changed(&mut self, text: &str) {
        self.notes = text.to_string();
    }

    /// Run the submission workflow once.
    ///
    /// A no-op while a submission is already in flight, and a no-op (apart
    /// from returning to `Idle`) when either field is invalid: the field
    /// messages stay visible and nothing reaches the network.
    pub async fn submit(&mut self) {
        if self.phase == SubmitPhase::Submitting {
            tracing::debug!("submit ignored, already in flight");
            return;
        }

        self.phase = SubmitPhase::Validating;
        let Some(draft) = RequestDraft::from_fields(&self.date, &self.location, &self.notes)
        else {
            self.phase = SubmitPhase::Idle;
            return;
        };

        self.phase = SubmitPhase::Submitting;
        self.result = None;

        match self.backend.create_request(&draft).await {
            Ok(id) => {
                tracing::info!("request stored as {id}");
                self.result = Some(SubmissionResult::success(id.clone()));
                self.phase = SubmitPhase::Success;
                self.handoff = Some(id);
                self.reset_form();
            }
            Err(err) => {
                tracing::warn!("submission failed: {err}");
                self.result = Some(SubmissionResult::failure(failure_message(&err)));
                self.phase = SubmitPhase::Failure;
            }
        }
    }

    /// Copy feedback for the stored identifier.
    ///
    /// Returns the id text for the caller to place on the clipboard and
    /// starts (or restarts) the "Copied!" window. `None` when there is no
    /// successful result to copy from.
    pub fn copy_id(&mut self) -> Option<&str> {
        self.result.as_ref().and_then(|result| result.id.as_ref())?;
        self.feedback.mark_copied();
        self.result.as_ref().and_then(|result| result.id.as_deref())
    }

    pub fn copied(&self) -> bool {
        self.feedback.copied()
    }

    /// Drain the hand-off slot. Fire-and-forget: once taken, it stays empty
    /// until the next successful submission overwrites it.
    pub fn take_handoff(&mut self) -> Option<String> {
        self.handoff.take()
    }

    pub fn date_field(&self) -> &DateField {
        &self.date
    }

    pub fn location_field(&self) -> &LocationField {
        &self.location
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    fn reset_form(&mut self) {
        self.date = DateField::new(field::today());
        self.location = LocationField::new();
        self.notes.clear();
    }
}

fn failure_message(err: &BackendError) -> String {
    match err {
        BackendError::Server { detail: Some(detail), .. } => detail.clone(),
        BackendError::Server { detail: None, .. } | BackendError::NotFound { .. } => {
            SUBMIT_FAILED_MESSAGE.to_string()
        }
        BackendError::Transport(_) | BackendError::Decode(_) => {
            SUBMIT_OFFLINE_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::DateValidation;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    enum CreateMode {
        Ok(&'static str),
        Rejected(Option<&'static str>),
        Offline,
    }

    #[derive(Debug)]
    struct FakeBackend {
        mode: CreateMode,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new(mode: CreateMode) -> Arc<Self> {
            Arc::new(Self { mode, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherBackend for FakeBackend {
        async fn create_request(&self, _draft: &RequestDraft) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.mode {
                CreateMode::Ok(id) => Ok((*id).to_string()),
                CreateMode::Rejected(detail) => Err(BackendError::Server {
                    status: StatusCode::BAD_REQUEST,
                    detail: detail.map(str::to_string),
                }),
                CreateMode::Offline => {
                    Err(BackendError::Transport("connection refused".to_string()))
                }
            }
        }

        async fn fetch_record(
            &self,
            _id: &str,
        ) -> Result<crate::model::WeatherRecord, BackendError> {
            unreachable!("submission never fetches records")
        }
    }

    fn filled_controller(backend: Arc<dyn WeatherBackend>) -> SubmissionController {
        let mut controller = SubmissionController::new(backend);
        controller.on_location_changed("Paris");
        controller.on_notes_changed("first trip");
        controller
    }

    #[tokio::test]
    async fn successful_submit_stores_id_and_resets_the_form() {
        let backend = FakeBackend::new(CreateMode::Ok("abc123"));
        let mut controller = filled_controller(backend.clone());

        controller.submit().await;

        assert_eq!(controller.phase(), SubmitPhase::Success);
        let result = controller.result().expect("result recorded");
        assert!(result.is_success());
        assert_eq!(result.id.as_deref(), Some("abc123"));
        assert_eq!(result.message, SUBMIT_OK_MESSAGE);

        // Form back to defaults: today's date, empty location and notes.
        assert_eq!(controller.date_field().parsed(), Some(field::today()));
        assert!(controller.date_field().is_valid());
        assert_eq!(controller.location_field().text(), "");
        assert!(!controller.location_field().is_valid());
        assert_eq!(controller.notes(), "");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn successful_submit_publishes_the_id_once() {
        let backend = FakeBackend::new(CreateMode::Ok("abc123"));
        let mut controller = filled_controller(backend);

        controller.submit().await;

        assert_eq!(controller.take_handoff().as_deref(), Some("abc123"));
        assert!(controller.take_handoff().is_none());
    }

    #[tokio::test]
    async fn invalid_location_blocks_the_network_call() {
        let backend = FakeBackend::new(CreateMode::Ok("abc123"));
        let mut controller = SubmissionController::new(backend.clone());
        controller.on_location_changed("Area 51");

        controller.submit().await;

        assert_eq!(controller.phase(), SubmitPhase::Idle);
        assert!(controller.result().is_none());
        assert!(controller.location_field().message().is_some());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn future_date_blocks_the_network_call() {
        let backend = FakeBackend::new(CreateMode::Ok("abc123"));
        let mut controller = filled_controller(backend.clone());
        let tomorrow = field::today() + chrono::Days::new(1);
        controller.on_date_selected(tomorrow);

        controller.submit().await;

        assert_eq!(controller.date_field().validation(), DateValidation::FutureRejected);
        assert_eq!(controller.phase(), SubmitPhase::Idle);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn submit_while_in_flight_is_a_no_op() {
        let backend = FakeBackend::new(CreateMode::Ok("abc123"));
        let mut controller = filled_controller(backend.clone());
        controller.phase = SubmitPhase::Submitting;

        controller.submit().await;

        assert_eq!(controller.phase(), SubmitPhase::Submitting);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn server_detail_is_surfaced_verbatim() {
        let backend = FakeBackend::new(CreateMode::Rejected(Some("Unable to resolve location")));
        let mut controller = filled_controller(backend);

        controller.submit().await;

        assert_eq!(controller.phase(), SubmitPhase::Failure);
        let result = controller.result().expect("result recorded");
        assert_eq!(result.message, "Unable to resolve location");
        assert!(result.id.is_none());
        // The form keeps its values for a retry.
        assert_eq!(controller.location_field().text(), "Paris");
    }

    #[tokio::test]
    async fn missing_detail_falls_back_to_the_generic_message() {
        let backend = FakeBackend::new(CreateMode::Rejected(None));
        let mut controller = filled_controller(backend);

        controller.submit().await;

        let result = controller.result().expect("result recorded");
        assert_eq!(result.message, SUBMIT_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn transport_failure_uses_the_connectivity_message() {
        let backend = FakeBackend::new(CreateMode::Offline);
        let mut controller = filled_controller(backend);

        controller.submit().await;

        assert_eq!(controller.phase(), SubmitPhase::Failure);
        let result = controller.result().expect("result recorded");
        assert_eq!(result.message, SUBMIT_OFFLINE_MESSAGE);
    }

    #[tokio::test]
    async fn failure_then_retry_reaches_success() {
        let backend = FakeBackend::new(CreateMode::Offline);
        let mut controller = filled_controller(backend);

        controller.submit().await;
        assert_eq!(controller.phase(), SubmitPhase::Failure);

        controller.backend = FakeBackend::new(CreateMode::Ok("second"));
        controller.submit().await;

        assert_eq!(controller.phase(), SubmitPhase::Success);
        assert_eq!(controller.take_handoff().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn copy_id_returns_the_id_and_sets_the_flag() {
        let backend = FakeBackend::new(CreateMode::Ok("abc123"));
        let mut controller = filled_controller(backend);
        controller.submit().await;

        assert!(!controller.copied());
        let copied = controller.copy_id().map(str::to_string);

        assert_eq!(copied.as_deref(), Some("abc123"));
        assert!(controller.copied());
    }

    #[tokio::test]
    async fn copy_id_without_a_success_is_a_no_op() {
        let backend = FakeBackend::new(CreateMode::Rejected(None));
        let mut controller = filled_controller(backend);
        controller.submit().await;

        assert!(controller.copy_id().is_none());
        assert!(!controller.copied());
    }
}
