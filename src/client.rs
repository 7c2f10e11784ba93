use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Connection settings for the answering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    /// `None` waits on the transport's own defaults.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Error)]
pub enum AskError {
    #[error("failed to reach answering service at {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("answering service returned {status}: {body}")]
    Status {
        status: StatusCode,
        /// Top-level `error` string of the response body, when there is one.
        detail: Option<String>,
        body: String,
    },

    #[error("malformed response from answering service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl AskError {
    /// Server-provided explanation, only ever present for non-success responses.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AskError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

// Body of the POST; the service reads the question from this single field.
#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// HTTP client for the answering service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AskClient {
    http: Client,
    endpoint: String,
}

impl AskClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AskError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AskError::Build)?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `question` and returns the `answer` field of the reply.
    ///
    /// A missing or non-string `answer` in a successful reply is returned as
    /// an empty string rather than an error.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn ask(&self, question: &str) -> Result<String, AskError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|source| AskError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| AskError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        if !status.is_success() {
            let detail = error_detail(&body);
            warn!(%status, ?detail, "Answering service request failed");
            return Err(AskError::Status {
                status,
                detail,
                body,
            });
        }

        let reply: Value = serde_json::from_str(&body)?;
        let answer = reply
            .get("answer")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        debug!(answer_len = answer.len(), "Received answer");
        Ok(answer)
    }
}

fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .as_str()
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
