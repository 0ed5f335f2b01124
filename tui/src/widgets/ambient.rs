//! Ambient Sky Widget
//!
//! Draws the particle field and the pointer glow. The runtime works in
//! viewport pixels; one terminal cell is [`CELL_WIDTH`] x [`CELL_HEIGHT`]
//! pixels, roughly the aspect ratio of a monospace glyph.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use aura_conductor::{Particle, PointerAnchor, Viewport};

use crate::theme::{blend, GLOW_CORE, PARTICLE_BRIGHT, PARTICLE_DIM, SKY, SKY_RGB};

/// Viewport pixels per cell, horizontally
pub const CELL_WIDTH: f64 = 8.0;

/// Viewport pixels per cell, vertically
pub const CELL_HEIGHT: f64 = 16.0;

/// Glow radius in viewport pixels
pub const GLOW_RADIUS: f64 = 160.0;

/// Peak glow strength at the anchor
const GLOW_STRENGTH: f64 = 0.55;

/// Viewport covering a terminal of `cols` x `rows` cells
#[must_use]
pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport::new(f64::from(cols) * CELL_WIDTH, f64::from(rows) * CELL_HEIGHT)
}

/// Pixel position of the center of a cell
#[must_use]
pub fn cell_center(col: u16, row: u16) -> (f64, f64) {
    (
        f64::from(col) * CELL_WIDTH + CELL_WIDTH / 2.0,
        f64::from(row) * CELL_HEIGHT + CELL_HEIGHT / 2.0,
    )
}

/// Glyph for a particle of the given size
#[must_use]
pub fn particle_glyph(size: f64) -> &'static str {
    if size < 2.0 {
        "·"
    } else if size < 3.0 {
        "•"
    } else {
        "●"
    }
}

/// Grey for a particle of the given opacity
#[must_use]
pub fn particle_color(opacity: f64) -> Color {
    // Opacity is drawn from [0.1, 0.6)
    let t = ((opacity - 0.1) / 0.5).clamp(0.0, 1.0);
    let level = f64::from(PARTICLE_DIM) + (f64::from(PARTICLE_BRIGHT) - f64::from(PARTICLE_DIM)) * t;
    let level = level.round() as u8;
    Color::Rgb(level, level, level)
}

/// Glow strength at a pixel (0 outside the radius)
#[must_use]
pub fn glow_at(anchor: PointerAnchor, x: f64, y: f64) -> f64 {
    let distance = (anchor.x - x).hypot(anchor.y - y);
    if distance >= GLOW_RADIUS {
        0.0
    } else {
        let falloff = 1.0 - distance / GLOW_RADIUS;
        falloff * falloff * GLOW_STRENGTH
    }
}

/// Particle field and glow, drawn over a sky background
pub struct AmbientView<'a> {
    particles: &'a [Particle],
    pointer: PointerAnchor,
}

impl<'a> AmbientView<'a> {
    pub fn new(particles: &'a [Particle], pointer: PointerAnchor) -> Self {
        Self { particles, pointer }
    }
}

impl Widget for AmbientView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Sky and glow
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = cell_center(col, row);
                let strength = glow_at(self.pointer, x, y);
                let bg = if strength > 0.0 {
                    blend(SKY_RGB, GLOW_CORE, strength)
                } else {
                    SKY
                };
                let cell = &mut buf[(area.x + col, area.y + row)];
                cell.set_symbol(" ");
                cell.set_bg(bg);
            }
        }

        // Particles
        for particle in self.particles {
            let col = (particle.x / CELL_WIDTH).floor();
            let row = (particle.y / CELL_HEIGHT).floor();
            if col < 0.0 || row < 0.0 || col >= f64::from(area.width) || row >= f64::from(area.height) {
                continue;
            }
            let (col, row) = (col as u16, row as u16);
            let cell = &mut buf[(area.x + col, area.y + row)];
            let bg = cell.bg;
            cell.set_symbol(particle_glyph(particle.size));
            cell.set_style(Style::default().fg(particle_color(particle.opacity)).bg(bg));
        }
    }
}
