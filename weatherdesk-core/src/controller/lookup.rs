use std::sync::Arc;

use crate::backend::{BackendError, WeatherBackend};
use crate::model::WeatherRecord;

/// Shown for every fetch failure. Missing ids and unreachable service are
/// not distinguished to the user, only in the phase and the logs.
pub const LOOKUP_ERROR_MESSAGE: &str = "Could not fetch weather data for that ID.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Idle,
    Fetching,
    Found,
    NotFound,
    NetworkError,
}

/// Proof that a fetch was started. `finish` only applies an outcome carrying
/// the current generation; anything older is a superseded fetch whose result
/// must not be shown.
#[derive(Debug)]
pub struct LookupTicket {
    id: String,
    generation: u64,
}

impl LookupTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Fetches stored records by identifier and renders them progressively.
///
/// The disclosure flag is orthogonal to the fetch lifecycle: toggled freely,
/// reset to collapsed only when a new lookup begins.
#[derive(Debug)]
pub struct LookupController {
    backend: Arc<dyn WeatherBackend>,
    input_id: String,
    phase: LookupPhase,
    record: Option<WeatherRecord>,
    show_advanced: bool,
    generation: u64,
}

impl LookupController {
    pub fn new(backend: Arc<dyn WeatherBackend>) -> Self {
        Self {
            backend,
            input_id: String::new(),
            phase: LookupPhase::Idle,
            record: None,
            show_advanced: false,
            generation: 0,
        }
    }

    pub fn on_input_changed(&mut self, text: &str) {
        self.input_id = text.to_string();
    }

    /// Hand-off from the submission side: overwrite the input, nothing more.
    /// Fetching stays a user decision.
    pub fn receive_id(&mut self, id: String) {
        self.input_id = id;
    }

    pub fn toggle_advanced(&mut self) {
        self.show_advanced = !self.show_advanced;
    }

    /// Begin a fetch for the current input.
    ///
    /// `None` when the input is blank. Otherwise the previous record is
    /// cleared, disclosure collapses, and any fetch still in flight is
    /// superseded.
    pub fn start(&mut self) -> Option<LookupTicket> {
        let id = self.input_id.trim();
        if id.is_empty() {
            return None;
        }

        self.generation += 1;
        self.record = None;
        self.show_advanced = false;
        self.phase = LookupPhase::Fetching;

        Some(LookupTicket { id: id.to_string(), generation: self.generation })
    }

    /// Apply a fetch outcome, unless a newer fetch has started since.
    pub fn finish(&mut self, ticket: LookupTicket, outcome: Result<WeatherRecord, BackendError>) {
        if ticket.generation != self.generation {
            tracing::debug!("discarding stale fetch result for {:?}", ticket.id);
            return;
        }

        match outcome {
            Ok(record) => {
                self.record = Some(record);
                self.phase = LookupPhase::Found;
            }
            Err(err) => {
                tracing::warn!("lookup for {:?} failed: {err}", ticket.id);
                self.phase = match err {
                    BackendError::Transport(_) | BackendError::Decode(_) => {
                        LookupPhase::NetworkError
                    }
                    BackendError::NotFound { .. } | BackendError::Server { .. } => {
                        LookupPhase::NotFound
                    }
                };
            }
        }
    }

    /// Run the whole lookup workflow once: start, fetch, finish.
    pub async fn lookup(&mut self) {
        let Some(ticket) = self.start() else {
            return;
        };

        let outcome = self.backend.fetch_record(ticket.id()).await;
        self.finish(ticket, outcome);
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn phase(&self) -> LookupPhase {
        self.phase
    }

    pub fn record(&self) -> Option<&WeatherRecord> {
        self.record.as_ref()
    }

    pub fn show_advanced(&self) -> bool {
        self.show_advanced
    }

    /// The generic failure message, present in both failure phases.
    pub fn error_message(&self) -> Option<&'static str> {
        match self.phase {
            LookupPhase::NotFound | LookupPhase::NetworkError => Some(LOOKUP_ERROR_MESSAGE),
            LookupPhase::Idle | LookupPhase::Fetching | LookupPhase::Found => None,
        }
    }
}
