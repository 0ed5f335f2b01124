//! Sentiment Types
//!
//! The value types produced by a successful classification. These are the
//! only data the remote service contributes to the session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-way sentiment label assigned by the classifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Positive emotional tone
    Positive,
    /// Negative emotional tone
    Negative,
    /// Neither clearly positive nor negative
    Neutral,
}

impl Sentiment {
    /// Parse a wire label, ignoring ASCII case and surrounding whitespace
    ///
    /// Returns `None` for anything other than the three known labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("positive") {
            Some(Self::Positive)
        } else if label.eq_ignore_ascii_case("negative") {
            Some(Self::Negative)
        } else if label.eq_ignore_ascii_case("neutral") {
            Some(Self::Neutral)
        } else {
            None
        }
    }

    /// Wire label (lowercase)
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse bucket for a confidence score, used for display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// 0.8 and above
    ExtremelyHigh,
    /// 0.6 up to 0.8
    High,
    /// 0.4 up to 0.6
    Medium,
    /// Below 0.4
    Low,
}

impl ConfidenceTier {
    /// Bucket a confidence score
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::ExtremelyHigh
        } else if confidence >= 0.6 {
            Self::High
        } else if confidence >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::ExtremelyHigh => "EXTREMELY HIGH",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// Result of one completed classification
///
/// Only ever constructed from a successful response, so `confidence` is
/// always finite and within `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Classified sentiment
    pub sentiment: Sentiment,
    /// Classifier certainty in `[0.0, 1.0]`
    pub confidence: f64,
}

impl AnalysisResult {
    /// Create a result, rejecting confidences outside `[0.0, 1.0]`
    #[must_use]
    pub fn new(sentiment: Sentiment, confidence: f64) -> Option<Self> {
        if confidence.is_finite() && (0.0..=1.0).contains(&confidence) {
            Some(Self {
                sentiment,
                confidence,
            })
        } else {
            None
        }
    }

    /// Confidence as a percentage (0-100)
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.confidence * 100.0
    }

    /// Display bucket for the confidence
    #[must_use]
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }
}
