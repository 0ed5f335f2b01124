//! Aura TUI - Terminal surface for aura
//!
//! A full-screen terminal client: type some text, send it to the sentiment
//! classifier, and watch the result land while particles drift across a
//! night sky that glows under the mouse pointer.
//!
//! # Architecture
//!
//! - **App**: one `tokio::select!` loop over terminal events, ambient ticks,
//!   request completions and render frames
//! - **Compositor**: layered rendering with z-ordering (sky, panel, status)
//! - **Widgets**: the particle sky, the analyzer panel, the thinking dots
//!
//! All state lives in [`aura_conductor::Session`]; this crate only converts
//! terminal events into surface events and draws what the session exposes.

pub mod app;
pub mod compositor;
pub mod theme;
pub mod widgets;

pub use app::App;
