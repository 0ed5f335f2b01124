//! Particle Field
//!
//! A fixed set of drifting particles. Every tick moves each particle by its
//! velocity and wraps it back into the viewport; nothing else ever changes.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default number of particles
pub const DEFAULT_PARTICLE_COUNT: usize = 50;

/// Size of the drawable area in viewport pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels (>= 1)
    pub width: f64,
    /// Height in pixels (>= 1)
    pub height: f64,
}

impl Viewport {
    /// Create a viewport; degenerate or non-finite extents become 1 px
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// Whether a point lies inside `[0, width) x [0, height)`
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent >= 1.0 {
        extent
    } else {
        1.0
    }
}

/// Wrap a coordinate into `[0, extent)`
///
/// Uses `(value + extent) mod extent` with a Euclidean remainder, so negative
/// velocities never produce a negative coordinate. The final clamp catches
/// the rounding case where the remainder comes out equal to `extent`.
#[must_use]
pub fn wrap(value: f64, extent: f64) -> f64 {
    let wrapped = (value + extent).rem_euclid(extent);
    if wrapped >= extent || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

/// One drifting particle
///
/// Velocity, size and opacity are fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Stable identity
    pub id: u32,
    /// Horizontal position in pixels
    pub x: f64,
    /// Vertical position in pixels
    pub y: f64,
    /// Horizontal velocity in pixels per tick
    pub vx: f64,
    /// Vertical velocity in pixels per tick
    pub vy: f64,
    /// Diameter in pixels, in `[1, 4)`
    pub size: f64,
    /// Opacity in `[0.1, 0.6)`
    pub opacity: f64,
}

impl Particle {
    /// Draw a particle at a uniformly random spot in `viewport`
    pub fn random<R: Rng + ?Sized>(id: u32, viewport: Viewport, rng: &mut R) -> Self {
        Self {
            id,
            x: rng.gen_range(0.0..viewport.width),
            y: rng.gen_range(0.0..viewport.height),
            vx: rng.gen_range(-1.0..1.0),
            vy: rng.gen_range(-1.0..1.0),
            size: rng.gen_range(1.0..4.0),
            opacity: rng.gen_range(0.1..0.6),
        }
    }

    /// Advance one tick inside `viewport`
    fn step(&mut self, viewport: Viewport) {
        self.x = wrap(self.x + self.vx, viewport.width);
        self.y = wrap(self.y + self.vy, viewport.height);
    }
}

/// The particle set plus the extents it wraps in
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
    ticks: u64,
}

impl ParticleField {
    /// Allocate `count` random particles across `viewport`
    pub fn new<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|i| Particle::random(u32::try_from(i).unwrap_or(u32::MAX), viewport, rng))
            .collect();
        Self {
            particles,
            viewport,
            ticks: 0,
        }
    }

    /// Build a field from explicit particles (positions are wrapped in)
    #[must_use]
    pub fn from_particles(particles: Vec<Particle>, viewport: Viewport) -> Self {
        let mut field = Self {
            particles,
            viewport,
            ticks: 0,
        };
        field.rewrap();
        field
    }

    /// Advance every particle by one tick
    pub fn tick(&mut self) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.step(viewport);
        }
        self.ticks += 1;
    }

    /// Change the wraparound extents and pull particles into them
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.rewrap();
    }

    /// Current particles
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current extents
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Ticks applied so far
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of particles
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn rewrap(&mut self) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.x = wrap(particle.x, viewport.width);
            particle.y = wrap(particle.y, viewport.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            id: 0,
            x,
            y,
            vx,
            vy,
            size: 2.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn test_negative_velocity_wraps_to_far_edge() {
        let mut field =
            ParticleField::from_particles(vec![particle(0.5, 10.0, -1.9, 0.0)], Viewport::new(800.0, 600.0));
        field.tick();

        let x = field.particles()[0].x;
        assert!((x - 798.6).abs() < 1e-9, "x = {x}");
    }

    #[test]
    fn test_positive_velocity_wraps_to_origin() {
        let mut field =
            ParticleField::from_particles(vec![particle(799.5, 599.5, 0.7, 0.9)], Viewport::new(800.0, 600.0));
        field.tick();

        let p = field.particles()[0];
        assert!((p.x - 0.2).abs() < 1e-9);
        assert!((p.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_never_returns_extent() {
        assert_eq!(wrap(800.0, 800.0), 0.0);
        assert_eq!(wrap(-1e-18, 800.0), 0.0);
        assert!(wrap(-0.25, 1.0) >= 0.0);
    }

    #[test]
    fn test_random_fields_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let viewport = Viewport::new(320.0, 240.0);
        let field = ParticleField::new(DEFAULT_PARTICLE_COUNT, viewport, &mut rng);

        assert_eq!(field.len(), DEFAULT_PARTICLE_COUNT);
        for (i, p) in field.particles().iter().enumerate() {
            assert_eq!(p.id as usize, i);
            assert!(viewport.contains(p.x, p.y));
            assert!((-1.0..1.0).contains(&p.vx));
            assert!((-1.0..1.0).contains(&p.vy));
            assert!((1.0..4.0).contains(&p.size));
            assert!((0.1..0.6).contains(&p.opacity));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let viewport = Viewport::default();
        let a = ParticleField::new(10, viewport, &mut StdRng::seed_from_u64(42));
        let b = ParticleField::new(10, viewport, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_ticks_preserve_identity_and_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        let viewport = Viewport::new(97.0, 53.0);
        let mut field = ParticleField::new(DEFAULT_PARTICLE_COUNT, viewport, &mut rng);
        let before = field.particles().to_vec();

        for _ in 0..5_000 {
            field.tick();
            for p in field.particles() {
                assert!(viewport.contains(p.x, p.y), "escaped: {p:?}");
            }
        }

        assert_eq!(field.len(), before.len());
        assert_eq!(field.ticks(), 5_000);
        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.vx, new.vx);
            assert_eq!(old.vy, new.vy);
            assert_eq!(old.size, new.size);
            assert_eq!(old.opacity, new.opacity);
        }
    }

    #[test]
    fn test_shrinking_viewport_rewraps_positions() {
        let mut field =
            ParticleField::from_particles(vec![particle(700.0, 500.0, 0.0, 0.0)], Viewport::new(800.0, 600.0));
        field.resize(Viewport::new(300.0, 200.0));

        let p = field.particles()[0];
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_viewport_is_clamped() {
        let viewport = Viewport::new(0.0, f64::NAN);
        assert_eq!(viewport, Viewport::new(1.0, 1.0));
    }
}
