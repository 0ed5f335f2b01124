//! Theme and Colors
//!
//! Aura's palette: a deep night sky behind grey particles, a cyan glow
//! following the pointer, and a glassy panel in front.

use ratatui::style::Color;

use aura_conductor::{ConfidenceTier, Sentiment};

// ============================================================================
// Sky Palette
// ============================================================================

/// RGB components of [`SKY`]
pub const SKY_RGB: (u8, u8, u8) = (12, 10, 28);

/// Background of the whole screen
pub const SKY: Color = Color::Rgb(SKY_RGB.0, SKY_RGB.1, SKY_RGB.2);

/// Glow tint at the pointer anchor (full strength)
pub const GLOW_CORE: (u8, u8, u8) = (40, 200, 230);

/// Dimmest particle grey
pub const PARTICLE_DIM: u8 = 70;

/// Brightest particle grey
pub const PARTICLE_BRIGHT: u8 = 235;

// ============================================================================
// Panel Colors
// ============================================================================

/// Panel background (dark glass)
pub const PANEL_BG: Color = Color::Rgb(24, 20, 48);

/// Panel border
pub const PANEL_BORDER: Color = Color::Rgb(120, 100, 200);

/// Title gradient start
pub const TITLE_CYAN: Color = Color::Rgb(34, 211, 238);

/// Title gradient middle
pub const TITLE_PURPLE: Color = Color::Rgb(192, 132, 252);

/// Title gradient end
pub const TITLE_PINK: Color = Color::Rgb(244, 114, 182);

/// Primary text
pub const TEXT: Color = Color::Rgb(235, 235, 245);

/// Secondary / placeholder text
pub const DIM_TEXT: Color = Color::Rgb(140, 135, 170);

/// Enabled button fill
pub const BUTTON_ACTIVE: Color = Color::Rgb(147, 51, 234);

/// Disabled button fill
pub const BUTTON_DISABLED: Color = Color::Rgb(60, 55, 80);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113);

// ============================================================================
// Sentiment Presentation
// ============================================================================

/// Example prompts offered on F1..F3
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "I absolutely love this incredible experience! 🚀",
    "This is absolutely terrible and disappointing 😞",
    "The weather seems pretty normal today 🌤️",
];

/// Accent color for a sentiment
#[must_use]
pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Rgb(74, 222, 128),
        Sentiment::Negative => Color::Rgb(248, 113, 113),
        Sentiment::Neutral => Color::Rgb(250, 204, 21),
    }
}

/// Emoji shown beside the label
#[must_use]
pub fn sentiment_emoji(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "🎉",
        Sentiment::Negative => "💔",
        Sentiment::Neutral => "🤔",
    }
}

/// Message under the confidence bar
#[must_use]
pub fn sentiment_message(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "🎊 Woah! This text is radiating positive vibes! ✨",
        Sentiment::Negative => "💫 The AI detected some negative emotions here 🌙",
        Sentiment::Neutral => "🧠 Perfectly balanced emotions detected by our AI 🤖",
    }
}

/// Badge after a tier name
#[must_use]
pub fn tier_badge(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::ExtremelyHigh => "🔥",
        ConfidenceTier::High => "⚡",
        ConfidenceTier::Medium => "📊",
        ConfidenceTier::Low => "🤔",
    }
}

/// Linear blend between two RGB triples (t in 0..=1)
#[must_use]
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| {
        let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
