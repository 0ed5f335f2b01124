//! Session
//!
//! One ephemeral client session: the input buffer, the request controller
//! and the ambient engine. Each container has exactly one writer and none of
//! them reads another's state, so the session is only a router.
//!
//! ```text
//!  SurfaceEvent ──► Session::handle_event
//!                      ├─ Input*        ──► InputBuffer
//!                      ├─ Submit        ──► AnalysisController::submit(buffer)
//!                      ├─ PointerMoved  ──► AmbientEngine::pointer_moved
//!                      ├─ Resized       ──► AmbientEngine::resize
//!                      └─ Disposed      ──► dispose all
//! ```

use crate::ambient::{AmbientEngine, Particle, PointerAnchor, Viewport};
use crate::analysis::{AnalysisController, IgnoreReason, RequestState, SubmitOutcome};
use crate::backend::Classifier;
use crate::events::SurfaceEvent;
use crate::input::InputBuffer;

/// A single client session
pub struct Session<C: Classifier + 'static> {
    input: InputBuffer,
    controller: AnalysisController<C>,
    ambient: AmbientEngine,
    disposed: bool,
}

impl<C: Classifier + 'static> Session<C> {
    /// Compose a session from its parts
    pub fn new(controller: AnalysisController<C>, ambient: AmbientEngine) -> Self {
        Self {
            input: InputBuffer::new(),
            controller,
            ambient,
            disposed: false,
        }
    }

    /// Route one surface event
    ///
    /// Returns `true` if any state the surface renders changed.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> bool {
        if self.disposed {
            tracing::debug!(event = event.name(), "Ignoring event after disposal");
            return false;
        }

        match event {
            SurfaceEvent::InputChanged { text } => {
                self.input.set(text);
                true
            }
            SurfaceEvent::InputAppended { ch } => {
                self.input.push(ch);
                true
            }
            SurfaceEvent::InputBackspace => self.input.pop().is_some(),
            SurfaceEvent::InputCleared => {
                let changed = !self.input.is_empty();
                self.input.clear();
                changed
            }
            SurfaceEvent::Submit => self.submit().is_accepted(),
            SurfaceEvent::PointerMoved { x, y } => self.ambient.pointer_moved(x, y),
            SurfaceEvent::Resized { width, height } => {
                self.ambient.resize(Viewport::new(width, height))
            }
            SurfaceEvent::Disposed => {
                self.dispose();
                true
            }
        }
    }

    /// Submit the current input
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.disposed {
            return SubmitOutcome::Ignored(IgnoreReason::Disposed);
        }
        self.controller.submit(self.input.as_str())
    }

    /// Advance the ambient field one tick
    pub fn tick(&mut self) -> bool {
        self.ambient.tick()
    }

    /// Apply request completions that already arrived
    pub fn poll(&mut self) -> bool {
        self.controller.poll()
    }

    /// Wait for the request state to change
    ///
    /// Cancel-safe; never resolves after disposal.
    pub async fn completed(&mut self) -> &RequestState {
        self.controller.completed().await
    }

    /// Tear down the controller, the tick and the pointer subscription
    ///
    /// Idempotent. Also runs on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        tracing::info!("Session disposed");
        self.controller.dispose();
        self.ambient.dispose();
    }

    /// Whether [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Text being composed
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Request lifecycle state
    pub fn request_state(&self) -> &RequestState {
        self.controller.state()
    }

    /// Whether the analyze action is currently available
    pub fn can_submit(&self) -> bool {
        !self.disposed && self.input.is_submittable() && !self.controller.state().is_in_flight()
    }

    /// Ambient engine (ticker, tick interval, counters)
    pub fn ambient(&self) -> &AmbientEngine {
        &self.ambient
    }

    /// Current particles
    pub fn particles(&self) -> &[Particle] {
        self.ambient.particles()
    }

    /// Current glow anchor
    pub fn pointer(&self) -> PointerAnchor {
        self.ambient.pointer()
    }

    /// Current extents
    pub fn viewport(&self) -> Viewport {
        self.ambient.viewport()
    }
}

impl<C: Classifier + 'static> Drop for Session<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}
