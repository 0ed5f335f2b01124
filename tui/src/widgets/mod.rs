//! Widgets
//!
//! - [`ambient`]: particle sky and pointer glow
//! - [`panel`]: input, analyze button, result card
//! - [`thinking`]: in-flight dot animation

pub mod ambient;
pub mod panel;
pub mod thinking;

pub use ambient::AmbientView;
pub use panel::AnalyzerPanel;
pub use thinking::ThinkingIndicator;
