//! Ambient Animation Engine
//!
//! A decorative particle field plus a pointer-following glow. The engine
//! runs on its own fixed period and never reads or writes request state, so
//! a slow classifier cannot freeze the background and the background cannot
//! delay a result.
//!
//! The engine itself is synchronous: the surface owns the scheduler loop and
//! calls [`AmbientEngine::tick`] whenever [`AmbientEngine::ticker`] fires.
//!
//! ```ignore
//! let mut ticker = engine.ticker();
//! loop {
//!     tokio::select! {
//!         _ = ticker.tick() => engine.tick(),
//!         // other arms...
//!     }
//! }
//! ```

mod particles;
pub mod pointer;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub use particles::{wrap, Particle, ParticleField, Viewport, DEFAULT_PARTICLE_COUNT};
pub use pointer::{PointerAnchor, PointerTracker};

/// Default tick period
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbientConfig {
    /// Number of particles allocated at start
    pub particle_count: usize,
    /// Fixed tick period
    pub tick_interval: Duration,
    /// Seed for reproducible fields; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
        }
    }
}

/// Particle field, pointer tracking and their shared lifetime
pub struct AmbientEngine {
    field: ParticleField,
    pointer: PointerTracker,
    tick_interval: Duration,
    lifetime: CancellationToken,
}

impl AmbientEngine {
    /// Start an engine over `viewport`
    #[must_use]
    pub fn new(config: &AmbientConfig, viewport: Viewport) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = ParticleField::new(config.particle_count, viewport, &mut rng);
        Self::with_field(field, config.tick_interval)
    }

    /// Start an engine over an existing field
    #[must_use]
    pub fn with_field(field: ParticleField, tick_interval: Duration) -> Self {
        tracing::debug!(
            particles = field.len(),
            width = field.viewport().width,
            height = field.viewport().height,
            tick_ms = tick_interval.as_millis() as u64,
            "Ambient engine started"
        );
        Self {
            field,
            pointer: PointerTracker::new(),
            tick_interval,
            lifetime: CancellationToken::new(),
        }
    }

    /// Fresh interval for the surface's scheduler loop
    ///
    /// Missed ticks are skipped rather than burst, so a stalled frame never
    /// fast-forwards the field.
    #[must_use]
    pub fn ticker(&self) -> Interval {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    }

    /// Advance the field one step; returns `false` after disposal
    pub fn tick(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.field.tick();
        true
    }

    /// Change the wraparound extents; returns `false` after disposal
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if self.is_disposed() {
            return false;
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "Ambient resize");
        self.field.resize(viewport);
        true
    }

    /// Move the glow anchor; returns `false` after disposal
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        self.pointer.moved(x, y)
    }

    /// Stop ticking and unsubscribe from pointer moves
    ///
    /// Idempotent.
    pub fn dispose(&mut self) {
        if self.lifetime.is_cancelled() {
            return;
        }
        tracing::debug!(ticks = self.field.ticks(), "Ambient engine disposed");
        self.lifetime.cancel();
        self.pointer.unsubscribe();
    }

    /// Whether [`dispose`](Self::dispose) has run
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    /// Current particles
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    /// Current extents
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.field.viewport()
    }

    /// Current glow anchor
    #[must_use]
    pub fn pointer(&self) -> PointerAnchor {
        self.pointer.anchor()
    }

    /// Tick period
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Ticks applied so far
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.field.ticks()
    }
}

impl Drop for AmbientEngine {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
