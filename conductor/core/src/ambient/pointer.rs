//! Pointer Tracking
//!
//! The glow layer follows the last reported pointer position. There is no
//! smoothing, no rate limit and no history: each move overwrites the anchor.
//! Before the first move the anchor sits at the viewport origin.

use serde::{Deserialize, Serialize};

/// Last known pointer position in viewport pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerAnchor {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// Pointer subscription owned by the ambient engine
#[derive(Debug, Default)]
pub struct PointerTracker {
    anchor: PointerAnchor,
    subscribed: bool,
}

impl PointerTracker {
    /// New, subscribed tracker anchored at the origin
    #[must_use]
    pub fn new() -> Self {
        Self {
            anchor: PointerAnchor::default(),
            subscribed: true,
        }
    }

    /// Record a move; returns `false` once unsubscribed
    pub fn moved(&mut self, x: f64, y: f64) -> bool {
        if !self.subscribed || !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.anchor = PointerAnchor { x, y };
        true
    }

    /// Most recent anchor
    #[must_use]
    pub fn anchor(&self) -> PointerAnchor {
        self.anchor
    }

    /// Stop recording moves
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_move_wins() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.anchor(), PointerAnchor { x: 0.0, y: 0.0 });

        assert!(tracker.moved(10.0, 20.0));
        assert!(tracker.moved(300.5, 7.25));
        assert!(!tracker.moved(f64::NAN, 3.0));
        assert_eq!(tracker.anchor(), PointerAnchor { x: 300.5, y: 7.25 });
    }

    #[test]
    fn test_unsubscribed_tracker_ignores_moves() {
        let mut tracker = PointerTracker::new();
        tracker.moved(1.0, 1.0);
        tracker.unsubscribe();

        assert!(!tracker.moved(50.0, 50.0));
        assert_eq!(tracker.anchor(), PointerAnchor { x: 1.0, y: 1.0 });
    }
}
