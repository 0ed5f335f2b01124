//! HTTP Classifier Backend
//!
//! Classifier for the remote sentiment service.
//!
//! # Wire Format
//!
//! - Request: `POST <endpoint>` with body `{"text": "..."}`
//! - Success: `{"sentiment": "positive"|"negative"|"neutral", "confidence": 0.0..1.0}`
//! - Failure: any non-2xx status; the reference service answers
//!   `400 {"error": "No text provided"}` for blank input

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::traits::Classifier;
use crate::analysis::{AnalysisError, ProtocolError};
use crate::sentiment::{AnalysisResult, Sentiment};

/// Built-in endpoint, overridable when compiling via `AURA_DEFAULT_ENDPOINT`
pub const DEFAULT_ENDPOINT: &str = match option_env!("AURA_DEFAULT_ENDPOINT") {
    Some(endpoint) => endpoint,
    None => "http://localhost:5000/analyze",
};

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    sentiment: String,
    confidence: f64,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Classifier backed by the remote HTTP endpoint
#[derive(Clone, Debug)]
pub struct HttpClassifier {
    /// Full URL of the analyze endpoint
    endpoint: String,
    /// Client-level bound on one exchange
    timeout: Duration,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpClassifier {
    /// Create a classifier for `endpoint`
    ///
    /// `timeout` bounds the whole exchange at the client level; the
    /// controller applies its own timeout on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (e.g. the
    /// TLS backend fails to initialize).
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Endpoint this classifier posts to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Map a transport failure; client timeouts keep their own variant
    fn transport_error(&self, error: &reqwest::Error) -> AnalysisError {
        if error.is_timeout() {
            AnalysisError::Timeout {
                after: self.timeout,
            }
        } else {
            AnalysisError::Network {
                reason: error.to_string(),
            }
        }
    }

    /// Turn a response body into a result
    fn parse_success(body: &str) -> Result<AnalysisResult, ProtocolError> {
        let parsed: ClassifyResponse = serde_json::from_str(body)
            .map_err(|e| ProtocolError::MalformedBody(e.to_string()))?;

        let sentiment = Sentiment::from_label(&parsed.sentiment)
            .ok_or_else(|| ProtocolError::UnknownSentiment(parsed.sentiment.clone()))?;

        AnalysisResult::new(sentiment, parsed.confidence)
            .ok_or(ProtocolError::ConfidenceOutOfRange(parsed.confidence))
    }

    /// Pull the service's error message out of a failure body
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) => body.trim().to_string(),
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn classify(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&ClassifyRequest { text })
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                message: Self::error_message(&body),
            }
            .into());
        }

        Ok(Self::parse_success(&body)?)
    }
}
