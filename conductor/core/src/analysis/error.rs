//! Analysis Errors
//!
//! Failures a submitted request can end in. Every variant is recoverable:
//! the controller lands in `Failed` and accepts the next submission.

use std::time::Duration;

use thiserror::Error;

/// Why a classification request failed
///
/// Errors are stored inside `RequestState`, so they carry rendered strings
/// instead of the underlying client error types.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// The endpoint could not be reached (refused, DNS, reset, ...)
    #[error("could not reach the classifier: {reason}")]
    Network {
        /// Rendered transport error
        reason: String,
    },

    /// No response within the configured request timeout
    #[error("classifier did not answer within {}ms", .after.as_millis())]
    Timeout {
        /// The timeout that expired
        after: Duration,
    },

    /// The endpoint answered, but not with a usable classification
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// The classifier answered with something other than a valid result
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// Non-success HTTP status
    #[error("classifier returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the body, or the raw body when it has none
        message: String,
    },

    /// Body was not the expected JSON object
    #[error("malformed classifier response: {0}")]
    MalformedBody(String),

    /// `sentiment` was not one of the known labels
    #[error("unknown sentiment label {0:?}")]
    UnknownSentiment(String),

    /// `confidence` was outside `[0, 1]` or not finite
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

impl AnalysisError {
    /// Whether the failure happened before any response was received
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Short headline for display
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Network { .. } => "Classifier unreachable",
            Self::Timeout { .. } => "Classifier timed out",
            Self::Protocol(_) => "Unexpected classifier response",
        }
    }
}
