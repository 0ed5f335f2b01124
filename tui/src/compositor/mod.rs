//! Layered Compositor
//!
//! The screen is built from a few stacked layers: the particle sky at the
//! back, the analyzer panel over it, the status line in front. Each layer
//! draws into its own origin-based buffer; [`Compositor::composite`] flattens
//! them back to front into one screen buffer.
//!
//! A layer cell lets the layers behind it show through only when it is a
//! blank with no background. A blank with a background (panel glass, glow
//! tint) covers what is behind it.

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;

/// Handle to a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

/// One stacked layer
struct Layer {
    id: LayerId,
    /// Higher is in front; equal depths stack in creation order
    depth: i32,
    /// Screen position
    bounds: Rect,
    /// Drawing surface at (0, 0)
    canvas: Buffer,
}

impl Layer {
    fn canvas_for(bounds: Rect) -> Buffer {
        Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height))
    }
}

/// Stack of layers plus the flattened screen
pub struct Compositor {
    /// Kept sorted back to front
    layers: Vec<Layer>,
    screen: Buffer,
}

impl Compositor {
    pub fn new(area: Rect) -> Self {
        Self {
            layers: Vec::new(),
            screen: Buffer::empty(area),
        }
    }

    /// Add a layer at `bounds`, stacked by `depth`
    pub fn create_layer(&mut self, bounds: Rect, depth: i32) -> LayerId {
        let id = LayerId(self.layers.len());
        let slot = self.layers.partition_point(|layer| layer.depth <= depth);
        self.layers.insert(
            slot,
            Layer {
                id,
                depth,
                bounds,
                canvas: Layer::canvas_for(bounds),
            },
        );
        id
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Canvas to draw a layer into
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layer_mut(id).map(|layer| &mut layer.canvas)
    }

    /// Move a layer; a size change starts it over blank
    pub fn set_layer_bounds(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layer_mut(id) {
            if layer.bounds.as_size() != bounds.as_size() {
                layer.canvas = Layer::canvas_for(bounds);
            }
            layer.bounds = bounds;
        }
    }

    /// New screen size
    pub fn resize(&mut self, area: Rect) {
        self.screen = Buffer::empty(area);
    }

    /// Flatten every layer onto the screen, back to front
    pub fn composite(&mut self) -> &Buffer {
        self.screen.reset();
        for layer in &self.layers {
            stamp(&mut self.screen, layer);
        }
        &self.screen
    }
}

fn lets_through(cell: &Cell) -> bool {
    cell.symbol() == " " && cell.bg == Color::Reset
}

/// Copy the opaque cells of `layer` onto `screen`, clipped to the screen
fn stamp(screen: &mut Buffer, layer: &Layer) {
    let visible = layer.bounds.intersection(screen.area);
    for y in visible.top()..visible.bottom() {
        for x in visible.left()..visible.right() {
            let local = Position::new(x - layer.bounds.x, y - layer.bounds.y);
            let Some(cell) = layer.canvas.cell(local) else {
                continue;
            };
            if lets_through(cell) {
                continue;
            }
            if let Some(target) = screen.cell_mut(Position::new(x, y)) {
                target.clone_from(cell);
            }
        }
    }
}
