use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::model::{RequestDraft, WeatherRecord};

/// Failures talking to the request backend.
///
/// `NotFound` and `Transport` stay distinct so logs can tell a missing id
/// from an unreachable service, even though the lookup surface shows one
/// generic message for both.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Create path: the service answered with a non-success status.
    #[error("backend rejected the request ({status})")]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },

    /// Fetch path: any non-success status counts as "not found".
    #[error("no stored request for that id ({status})")]
    NotFound { status: StatusCode },

    /// The request never completed.
    #[error("could not reach the backend: {0}")]
    Transport(String),

    /// A success response whose body was not the expected JSON.
    #[error("could not decode the backend response: {0}")]
    Decode(String),
}

/// The two operations the backend collaborator exposes.
#[async_trait]
pub trait WeatherBackend: Send + Sync + std::fmt::Debug {
    /// Submit a draft; returns the opaque identifier of the stored record.
    async fn create_request(&self, draft: &RequestDraft) -> Result<String, BackendError>;

    /// Fetch a stored record by its identifier.
    async fn fetch_record(&self, id: &str) -> Result<WeatherRecord, BackendError>;
}

/// `WeatherBackend` over HTTP, against an injected base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid backend URL: {base_url}"))?;

        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "Backend URL cannot be used as a base: {base_url}"
        );

        Ok(Self { base_url, http: Client::new() })
    }

    /// `{base}/weather` or `{base}/weather/{id}` with the id percent-encoded
    /// as a single path segment.
    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("weather");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

#[async_trait]
impl WeatherBackend for HttpBackend {
    async fn create_request(&self, draft: &RequestDraft) -> Result<String, BackendError> {
        let url = self.endpoint(None);
        tracing::debug!("POST {url}");

        let res = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        if !status.is_success() {
            tracing::warn!("create request failed with status {status}: {}", truncate_body(&body));
            let detail = serde_json::from_str::<ErrorBody>(&body).ok().and_then(|b| b.detail);
            return Err(BackendError::Server { status, detail });
        }

        let created: CreatedBody =
            serde_json::from_str(&body).map_err(|err| BackendError::Decode(err.to_string()))?;

        Ok(created.id)
    }

    async fn fetch_record(&self, id: &str) -> Result<WeatherRecord, BackendError> {
        let url = self.endpoint(Some(id));
        tracing::debug!("GET {url}");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        if !status.is_success() {
            tracing::warn!("fetch for {id:?} failed with status {status}: {}", truncate_body(&body));
            return Err(BackendError::NotFound { status });
        }

        serde_json::from_str(&body).map_err(|err| BackendError::Decode(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
