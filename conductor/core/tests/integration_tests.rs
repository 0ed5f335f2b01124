//! Session integration tests
//!
//! These tests drive a full `Session` the way a surface does: surface
//! events in, a `tokio::select!` loop over ambient ticks and request
//! completions, state out. The classifier is an in-process mock so timing
//! can run on tokio's paused clock.
//!
//! Tests cover:
//! - Input editing and submission
//! - Result smoothing and failure recovery
//! - Ambient ticks continuing while a request is outstanding
//! - Disposal freezing every container

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::time::Instant;

use aura_conductor::{
    AmbientConfig, AmbientEngine, AnalysisConfig, AnalysisController, AnalysisError,
    AnalysisResult, Classifier, IgnoreReason, PointerAnchor, RequestState, Sentiment, Session,
    SubmitOutcome, SurfaceEvent, Viewport,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Scripted classifier: answers from a queue, with optional latency
struct ScriptedClassifier {
    answers: Mutex<Vec<Result<AnalysisResult, AnalysisError>>>,
    latency: Duration,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    fn new(latency: Duration, answers: Vec<Result<AnalysisResult, AnalysisError>>) -> Arc<Self> {
        let mut answers = answers;
        answers.reverse();
        Arc::new(Self {
            answers: Mutex::new(answers),
            latency,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn classify(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());
        tokio::time::sleep(self.latency).await;
        self.answers
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(AnalysisError::Network { reason: "script exhausted".into() }))
    }
}

fn result(sentiment: Sentiment, confidence: f64) -> AnalysisResult {
    AnalysisResult::new(sentiment, confidence).unwrap()
}

fn session_with(classifier: Arc<ScriptedClassifier>) -> Session<Arc<ScriptedClassifier>> {
    let controller = AnalysisController::new(classifier, AnalysisConfig::default());
    let ambient = AmbientEngine::new(
        &AmbientConfig {
            seed: Some(2024),
            ..AmbientConfig::default()
        },
        Viewport::new(800.0, 600.0),
    );
    Session::new(controller, ambient)
}

fn type_text(session: &mut Session<Arc<ScriptedClassifier>>, text: &str) {
    for ch in text.chars() {
        session.handle_event(SurfaceEvent::InputAppended { ch });
    }
}

// =============================================================================
// Input and Submission
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_typed_text_is_what_gets_classified() {
    let classifier = ScriptedClassifier::new(
        Duration::from_millis(100),
        vec![Ok(result(Sentiment::Positive, 0.9))],
    );
    let mut session = session_with(Arc::clone(&classifier));

    type_text(&mut session, "I love it!x");
    session.handle_event(SurfaceEvent::InputBackspace);
    assert_eq!(session.input().as_str(), "I love it!");
    assert!(session.can_submit());

    assert!(session.handle_event(SurfaceEvent::Submit));
    assert!(!session.can_submit());

    let state = session.completed().await.clone();
    assert_eq!(state, RequestState::Succeeded(result(Sentiment::Positive, 0.9)));
    assert_eq!(classifier.texts(), vec!["I love it!".to_string()]);
    // The buffer survives submission
    assert_eq!(session.input().as_str(), "I love it!");
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_submission_never_reaches_network() {
    let classifier = ScriptedClassifier::new(Duration::ZERO, vec![]);
    let mut session = session_with(Arc::clone(&classifier));

    session.handle_event(SurfaceEvent::InputChanged { text: "  \n ".into() });
    assert!(!session.can_submit());
    assert_eq!(session.submit(), SubmitOutcome::Ignored(IgnoreReason::EmptyInput));
    assert!(!session.handle_event(SurfaceEvent::Submit));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!session.poll());
    assert_eq!(session.request_state(), &RequestState::Idle);
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_double_submit_is_single_request() {
    let classifier = ScriptedClassifier::new(
        Duration::from_millis(300),
        vec![Ok(result(Sentiment::Neutral, 0.5))],
    );
    let mut session = session_with(Arc::clone(&classifier));

    session.handle_event(SurfaceEvent::InputChanged { text: "normal day".into() });
    assert!(session.submit().is_accepted());
    assert_eq!(session.submit(), SubmitOutcome::Ignored(IgnoreReason::AlreadyInFlight));

    session.completed().await;
    assert_eq!(classifier.calls(), 1);
}

// =============================================================================
// Result Smoothing and Recovery
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_result_is_shown_no_earlier_than_delay_after_receipt() {
    let latency = Duration::from_millis(250);
    let classifier =
        ScriptedClassifier::new(latency, vec![Ok(result(Sentiment::Positive, 0.87))]);
    let mut session = session_with(Arc::clone(&classifier));

    session.handle_event(SurfaceEvent::InputChanged { text: "wonderful".into() });
    let submitted = Instant::now();
    session.submit();

    session.completed().await;
    let shown = submitted.elapsed();

    assert!(shown >= latency + Duration::from_millis(2000), "shown after {shown:?}");
    assert_eq!(
        session.request_state().result(),
        Some(&result(Sentiment::Positive, 0.87))
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_then_resubmit() {
    let classifier = ScriptedClassifier::new(
        Duration::from_millis(10),
        vec![
            Err(AnalysisError::Network { reason: "connection refused".into() }),
            Ok(result(Sentiment::Negative, 0.66)),
        ],
    );
    let mut session = session_with(Arc::clone(&classifier));

    session.handle_event(SurfaceEvent::InputChanged { text: "terrible".into() });
    session.submit();
    let state = session.completed().await.clone();
    assert!(state.error().is_some_and(AnalysisError::is_network));

    assert!(session.can_submit());
    assert!(session.submit().is_accepted());
    assert!(session.request_state().is_in_flight());

    let state = session.completed().await.clone();
    assert_eq!(state.result().map(|r| r.sentiment), Some(Sentiment::Negative));
    assert_eq!(classifier.calls(), 2);
}

// =============================================================================
// Ambient Independence
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_ambient_keeps_ticking_while_request_hangs() {
    let classifier = ScriptedClassifier::new(
        Duration::from_secs(3),
        vec![Ok(result(Sentiment::Positive, 0.7))],
    );
    let mut session = session_with(Arc::clone(&classifier));

    session.handle_event(SurfaceEvent::InputChanged { text: "waiting".into() });
    session.submit();

    let mut ticker = session.ambient().ticker();
    let deadline = tokio::time::sleep(Duration::from_secs(1));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;
            () = &mut deadline => break,
            _ = ticker.tick() => { session.tick(); }
            _ = session.completed() => panic!("request finished early"),
        }
    }

    // One immediate tick plus one per 50ms until the deadline
    let ticks = session.ambient().ticks();
    assert!((20..=21).contains(&ticks), "ticks = {ticks}");
    assert!(session.request_state().is_in_flight());
    for p in session.particles() {
        assert!(session.viewport().contains(p.x, p.y));
    }
}

#[tokio::test(start_paused = true)]
async fn test_pointer_and_resize_route_to_ambient() {
    let classifier = ScriptedClassifier::new(Duration::ZERO, vec![]);
    let mut session = session_with(classifier);

    assert_eq!(session.pointer(), PointerAnchor::default());
    session.handle_event(SurfaceEvent::PointerMoved { x: 12.0, y: 34.0 });
    assert_eq!(session.pointer(), PointerAnchor { x: 12.0, y: 34.0 });

    session.handle_event(SurfaceEvent::Resized { width: 100.0, height: 50.0 });
    assert_eq!(session.viewport(), Viewport::new(100.0, 50.0));
    assert_eq!(session.particles().len(), 50);
    for p in session.particles() {
        assert!(session.viewport().contains(p.x, p.y));
    }
}

// =============================================================================
// Disposal
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_disposed_session_mutates_nothing() {
    let classifier = ScriptedClassifier::new(
        Duration::from_millis(100),
        vec![Ok(result(Sentiment::Positive, 0.95))],
    );
    let mut session = session_with(Arc::clone(&classifier));

    session.handle_event(SurfaceEvent::InputChanged { text: "bye".into() });
    session.submit();
    session.handle_event(SurfaceEvent::PointerMoved { x: 1.0, y: 2.0 });

    // Response arrives, then the surface goes away during the result delay
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(session.handle_event(SurfaceEvent::Disposed));
    assert!(session.is_disposed());

    let particles = session.particles().to_vec();
    let viewport = session.viewport();

    assert!(!session.tick());
    assert!(!session.handle_event(SurfaceEvent::PointerMoved { x: 9.0, y: 9.0 }));
    assert!(!session.handle_event(SurfaceEvent::Resized { width: 10.0, height: 10.0 }));
    assert!(!session.handle_event(SurfaceEvent::InputAppended { ch: 'x' }));
    assert_eq!(session.submit(), SubmitOutcome::Ignored(IgnoreReason::Disposed));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!session.poll());

    assert!(session.request_state().is_in_flight());
    assert_eq!(session.particles(), particles.as_slice());
    assert_eq!(session.viewport(), viewport);
    assert_eq!(session.pointer(), PointerAnchor { x: 1.0, y: 2.0 });
    assert_eq!(session.input().as_str(), "bye");
    assert_eq!(classifier.calls(), 1);

    // Idempotent
    session.dispose();
}
