use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores at or above this are reported without a warning.
pub const WARNING_THRESHOLD: f64 = 0.70;

/// Human-readable bucket for a similarity score.
///
/// The four ranges partition `[0, 1]` with inclusive lower bounds:
/// `[0.90, 1]` excellent, `[0.70, 0.90)` good, `[0.50, 0.70)` moderate,
/// anything below is poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl ConfidenceLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.90 {
            ConfidenceLabel::Excellent
        } else if score >= WARNING_THRESHOLD {
            ConfidenceLabel::Good
        } else if score >= 0.50 {
            ConfidenceLabel::Moderate
        } else {
            ConfidenceLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::Excellent => "excellent",
            ConfidenceLabel::Good => "good",
            ConfidenceLabel::Moderate => "moderate",
            ConfidenceLabel::Poor => "poor",
        }
    }

    /// Warning text attached to moderate and poor matches
    pub fn warning_for(&self, score: f64) -> Option<String> {
        match self {
            ConfidenceLabel::Moderate => Some(format!(
                "Moderate match score ({:.2}) - please verify this is the correct business",
                score
            )),
            ConfidenceLabel::Poor => Some(format!(
                "Low match score ({:.2}) - result may not be accurate",
                score
            )),
            ConfidenceLabel::Excellent | ConfidenceLabel::Good => None,
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
