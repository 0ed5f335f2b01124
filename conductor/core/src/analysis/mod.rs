//! Analysis Request Controller
//!
//! Owns the lifecycle of a single classification request:
//!
//! ```text
//!   Idle ──submit──► InFlight ──success (after result_delay)──► Succeeded
//!                       │                                          │
//!                       └──failure (immediately)──► Failed         │
//!                                                     │            │
//!                       InFlight ◄──────submit────────┴────────────┘
//! ```
//!
//! The network call and the result delay run in a spawned task. The task
//! never touches controller state; it reports a [`Completion`] over a channel
//! and the controller, the single writer of [`RequestState`], applies it from
//! [`AnalysisController::poll`] or [`AnalysisController::completed`].
//!
//! Disposal cancels the controller's token. The task watches the token while
//! waiting on the network and during the result delay, and the controller
//! drops anything that still arrives afterwards.

mod error;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub use error::{AnalysisError, ProtocolError};

use crate::backend::Classifier;
use crate::sentiment::AnalysisResult;

/// Default minimum time between response receipt and showing a result
pub const DEFAULT_RESULT_DELAY: Duration = Duration::from_millis(2000);

/// Default bound on a single classification request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timing configuration for the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Bound on the network call; expiry fails the request
    pub request_timeout: Duration,
    /// Delay between a successful response and the `Succeeded` transition
    pub result_delay: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            result_delay: DEFAULT_RESULT_DELAY,
        }
    }
}

/// Identifier of one accepted submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Live state of the request lifecycle
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is on the wire or waiting out the result delay
    InFlight {
        /// The accepted submission
        request_id: RequestId,
    },
    /// Last request produced a result
    Succeeded(AnalysisResult),
    /// Last request failed
    Failed(AnalysisError),
}

impl RequestState {
    /// Whether a request is outstanding
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    /// Result of the last request, if it succeeded
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Error of the last request, if it failed
    #[must_use]
    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short description for status lines
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::InFlight { .. } => "Analyzing...",
            Self::Succeeded(_) => "Done",
            Self::Failed(_) => "Failed",
        }
    }
}

/// Why a submission was not accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Text was empty or whitespace only
    EmptyInput,
    /// Another request is still outstanding
    AlreadyInFlight,
    /// The controller has been disposed
    Disposed,
}

/// Outcome of [`AnalysisController::submit`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request was started
    Accepted(RequestId),
    /// Nothing happened
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    /// Whether a request was started
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Terminal report from a request task
#[derive(Debug)]
pub struct Completion {
    /// Submission this belongs to
    pub request_id: RequestId,
    /// What the classifier produced
    pub outcome: Result<AnalysisResult, AnalysisError>,
    /// When the classifier answered (or the request failed)
    pub received_at: Instant,
}

/// Controller for the classification request lifecycle
pub struct AnalysisController<C: Classifier> {
    /// Classifier shared with request tasks
    classifier: Arc<C>,
    /// Timing configuration
    config: AnalysisConfig,
    /// Current state (only written here)
    state: RequestState,
    /// Sequence for request ids
    next_id: u64,
    /// Handed to request tasks
    completion_tx: mpsc::Sender<Completion>,
    /// Completions waiting to be applied
    completion_rx: mpsc::Receiver<Completion>,
    /// Cancelled on disposal
    lifetime: CancellationToken,
}

impl<C: Classifier + 'static> AnalysisController<C> {
    /// Create a controller in the `Idle` state
    pub fn new(classifier: C, config: AnalysisConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel(8);
        Self {
            classifier: Arc::new(classifier),
            config,
            state: RequestState::Idle,
            next_id: 0,
            completion_tx,
            completion_rx,
            lifetime: CancellationToken::new(),
        }
    }

    /// Current request state
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Timing configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Whether [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    /// Submit text for classification
    ///
    /// Blank text, an outstanding request, or a disposed controller make
    /// this a silent no-op. Otherwise the state becomes `InFlight` and
    /// exactly one classifier call is spawned onto the current tokio
    /// runtime.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if self.is_disposed() {
            return SubmitOutcome::Ignored(IgnoreReason::Disposed);
        }
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank submission");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }
        if self.state.is_in_flight() {
            tracing::debug!("Ignoring submission while a request is in flight");
            return SubmitOutcome::Ignored(IgnoreReason::AlreadyInFlight);
        }

        self.next_id += 1;
        let request_id = RequestId(self.next_id);
        self.state = RequestState::InFlight { request_id };

        tracing::info!(
            %request_id,
            classifier = self.classifier.name(),
            chars = text.chars().count(),
            "Submitting text for analysis"
        );

        tokio::spawn(run_request(
            Arc::clone(&self.classifier),
            text.to_string(),
            request_id,
            self.config.clone(),
            self.completion_tx.clone(),
            self.lifetime.clone(),
        ));

        SubmitOutcome::Accepted(request_id)
    }

    /// Apply every completion that has already arrived (non-blocking)
    ///
    /// Returns `true` if the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Wait until a completion changes the state
    ///
    /// Cancel-safe, so it can be used as a `tokio::select!` arm. Never
    /// resolves when nothing is in flight or after disposal.
    pub async fn completed(&mut self) -> &RequestState {
        loop {
            match self.completion_rx.recv().await {
                Some(completion) => {
                    if self.apply(completion) {
                        return &self.state;
                    }
                }
                // The controller holds a sender, so this is unreachable in practice
                None => std::future::pending::<()>().await,
            }
        }
    }

    /// Stop applying completions and cancel outstanding request tasks
    ///
    /// Idempotent. Also runs on drop.
    pub fn dispose(&mut self) {
        if !self.lifetime.is_cancelled() {
            tracing::debug!(state = self.state.description(), "Disposing analysis controller");
            self.lifetime.cancel();
        }
    }

    /// Apply one completion; returns `true` if the state changed
    fn apply(&mut self, completion: Completion) -> bool {
        if self.is_disposed() {
            tracing::debug!(
                request_id = %completion.request_id,
                "Dropping completion after disposal"
            );
            return false;
        }

        match self.state {
            RequestState::InFlight { request_id } if request_id == completion.request_id => {}
            _ => {
                tracing::debug!(
                    request_id = %completion.request_id,
                    "Dropping stale completion"
                );
                return false;
            }
        }

        self.state = match completion.outcome {
            Ok(result) => {
                tracing::info!(
                    request_id = %completion.request_id,
                    sentiment = %result.sentiment,
                    confidence = result.confidence,
                    shown_after_ms = completion.received_at.elapsed().as_millis() as u64,
                    "Analysis succeeded"
                );
                RequestState::Succeeded(result)
            }
            Err(error) => {
                tracing::warn!(
                    request_id = %completion.request_id,
                    error = %error,
                    "Analysis failed"
                );
                RequestState::Failed(error)
            }
        };
        true
    }
}

impl<C: Classifier> Drop for AnalysisController<C> {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

/// Body of a request task
///
/// Failures are reported immediately; successes after `result_delay`.
/// Nothing is reported once `lifetime` is cancelled.
async fn run_request<C: Classifier>(
    classifier: Arc<C>,
    text: String,
    request_id: RequestId,
    config: AnalysisConfig,
    tx: mpsc::Sender<Completion>,
    lifetime: CancellationToken,
) {
    let call = tokio::time::timeout(config.request_timeout, classifier.classify(&text));

    let outcome = tokio::select! {
        () = lifetime.cancelled() => {
            tracing::debug!(%request_id, "Request abandoned: controller disposed");
            return;
        }
        result = call => match result {
            Ok(outcome) => outcome,
            Err(_) => Err(AnalysisError::Timeout { after: config.request_timeout }),
        },
    };
    let received_at = Instant::now();

    if outcome.is_ok() && !config.result_delay.is_zero() {
        tokio::select! {
            () = lifetime.cancelled() => {
                tracing::debug!(%request_id, "Result dropped: controller disposed");
                return;
            }
            () = tokio::time::sleep(config.result_delay) => {}
        }
    }

    if lifetime.is_cancelled() {
        return;
    }

    let completion = Completion {
        request_id,
        outcome,
        received_at,
    };
    if tx.send(completion).await.is_err() {
        tracing::debug!(%request_id, "Controller gone before completion");
    }
}
