//! Surface Events
//!
//! Events sent from a rendering surface to the session. Surfaces are "dumb"
//! renderers: they report what happened (a key, a pointer move, a resize)
//! and the session decides what it means.

use serde::{Deserialize, Serialize};

/// Events from a surface to the [`Session`](crate::session::Session)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Input Events
    // ============================================
    /// The whole input text was replaced
    InputChanged {
        /// New text
        text: String,
    },

    /// One character was typed
    InputAppended {
        /// The character
        ch: char,
    },

    /// The last character was deleted
    InputBackspace,

    /// The input was cleared
    InputCleared,

    /// User asked for the current input to be analyzed
    Submit,

    // ============================================
    // Ambient Events
    // ============================================
    /// Pointer moved (viewport pixels)
    PointerMoved {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },

    /// Drawable area changed size (viewport pixels)
    Resized {
        /// New width
        width: f64,
        /// New height
        height: f64,
    },

    // ============================================
    // Lifecycle Events
    // ============================================
    /// Surface is going away; tear everything down
    Disposed,
}

impl SurfaceEvent {
    /// Short name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InputChanged { .. } => "input_changed",
            Self::InputAppended { .. } => "input_appended",
            Self::InputBackspace => "input_backspace",
            Self::InputCleared => "input_cleared",
            Self::Submit => "submit",
            Self::PointerMoved { .. } => "pointer_moved",
            Self::Resized { .. } => "resized",
            Self::Disposed => "disposed",
        }
    }
}
