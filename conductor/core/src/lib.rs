//! Aura Conductor - Headless Sentiment Analysis Runtime
//!
//! This crate provides the client-side runtime for aura, completely
//! independent of any UI framework. A surface (the terminal UI, a test
//! harness, anything else) feeds it [`SurfaceEvent`]s and renders the state
//! it exposes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                            │
//! │        terminal events ──► SurfaceEvent    state ◄── render   │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┼──────────────────────────────┐
//! │                      AURA CONDUCTOR                           │
//! │  ┌────────────────────────────┴───────────────────────────┐   │
//! │  │                        Session                          │   │
//! │  │  ┌─────────────┐  ┌────────────────────┐  ┌──────────┐  │   │
//! │  │  │ InputBuffer │  │ AnalysisController │  │ Ambient  │  │   │
//! │  │  │             │  │   (RequestState)   │  │  Engine  │  │   │
//! │  │  └─────────────┘  └─────────┬──────────┘  └──────────┘  │   │
//! │  └─────────────────────────────┼────────────────────────────┘   │
//! │                                │ Classifier                    │
//! └────────────────────────────────┼───────────────────────────────┘
//!                                  ▼
//!                      POST /analyze (remote service)
//! ```
//!
//! The three containers are disjoint and each has a single writer. The
//! controller's network call runs in a spawned task and reports back over a
//! channel, so the ambient tick never waits on the network.
//!
//! # Key Types
//!
//! - [`Session`]: routes surface events to the containers
//! - [`AnalysisController`]: request lifecycle and result smoothing
//! - [`AmbientEngine`]: particle field and pointer glow anchor
//! - [`HttpClassifier`]: the remote `/analyze` endpoint
//! - [`AuraConfig`]: layered configuration (defaults, file, env)
//!
//! # Quick Start
//!
//! ```ignore
//! use aura_conductor::{
//!     load_config, AmbientEngine, AnalysisController, HttpClassifier, Session,
//!     SurfaceEvent, Viewport,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let classifier = HttpClassifier::new(&config.endpoint, config.request_timeout)?;
//!     let controller = AnalysisController::new(classifier, config.analysis());
//!     let ambient = AmbientEngine::new(&config.ambient(), Viewport::default());
//!     let mut session = Session::new(controller, ambient);
//!
//!     session.handle_event(SurfaceEvent::InputChanged { text: "I love this".into() });
//!     session.handle_event(SurfaceEvent::Submit);
//!
//!     let mut ticker = session.ambient().ticker();
//!     loop {
//!         tokio::select! {
//!             _ = ticker.tick() => { session.tick(); }
//!             state = session.completed() => {
//!                 println!("{state:?}");
//!                 break;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`ambient`]: particle field, pointer tracking, tick scheduling
//! - [`analysis`]: request controller, request state, errors
//! - [`backend`]: classifier abstraction and the HTTP implementation
//! - [`config`]: TOML + environment configuration
//! - [`events`]: events from UI surfaces
//! - [`input`]: the text being composed
//! - [`sentiment`]: sentiment labels, results, confidence tiers
//! - [`session`]: composition of the above
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure client logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ambient;
pub mod analysis;
pub mod backend;
pub mod config;
pub mod events;
pub mod input;
pub mod sentiment;
pub mod session;

// Re-exports for convenience
pub use ambient::{
    AmbientConfig, AmbientEngine, Particle, ParticleField, PointerAnchor, Viewport,
};
pub use analysis::{
    AnalysisConfig, AnalysisController, AnalysisError, IgnoreReason, ProtocolError, RequestId,
    RequestState, SubmitOutcome,
};
pub use backend::{Classifier, HttpClassifier};
pub use events::SurfaceEvent;
pub use input::InputBuffer;
pub use sentiment::{AnalysisResult, ConfidenceTier, Sentiment};
pub use session::Session;

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, AuraConfig, ConfigError, ConfigSource,
};
