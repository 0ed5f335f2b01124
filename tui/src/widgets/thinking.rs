//! Thinking Indicator
//!
//! Three bouncing dots shown on the analyze button while a request is in
//! flight. Playback is frame-time driven: the app feeds elapsed time and the
//! indicator advances when a frame's duration has been used up.

use std::time::Duration;

/// Dot frames, one dot raised at a time
const FRAMES: [&str; 4] = ["•··", "·•·", "··•", "···"];

/// Time each frame stays on screen
pub const FRAME_DURATION: Duration = Duration::from_millis(150);

/// Looping dot animation
#[derive(Debug, Default)]
pub struct ThinkingIndicator {
    /// Current frame index
    current_frame: usize,
    /// Time accumulated on current frame
    frame_time: Duration,
}

impl ThinkingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta`
    pub fn update(&mut self, delta: Duration) {
        self.frame_time += delta;
        while self.frame_time >= FRAME_DURATION {
            self.frame_time -= FRAME_DURATION;
            self.current_frame = (self.current_frame + 1) % FRAMES.len();
        }
    }

    /// Back to the first frame
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.frame_time = Duration::ZERO;
    }

    /// Dots to draw now
    pub fn current(&self) -> &'static str {
        FRAMES[self.current_frame]
    }
}
