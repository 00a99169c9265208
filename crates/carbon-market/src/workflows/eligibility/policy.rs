use serde::{Deserialize, Serialize};

pub(crate) const HIGH_CONFIDENCE_THRESHOLD: u8 = 70;
pub(crate) const MEDIUM_CONFIDENCE_THRESHOLD: u8 = 40;

pub(crate) const NOT_RECOMMENDED_MESSAGE: &str = "Carbon Credits: High Risk / Not Recommended";
pub(crate) const LIMITED_SIGNALS_WARNING: &str =
    "Limited soft signals present - additionality may be questioned during validation.";

/// Bucketed summary of the confidence score used for workflow gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    NotRecommended,
}

impl ConfidenceLevel {
    /// Maps a soft-signal score onto a tier. `NotRecommended` is never produced here; it is
    /// reserved for the hard-fail path.
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::Medium => "MEDIUM",
            ConfidenceLevel::Low => "LOW",
            ConfidenceLevel::NotRecommended => "NOT_RECOMMENDED",
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "Carbon Credits: High Confidence - Proceed with registration",
            ConfidenceLevel::Medium => {
                "Carbon Credits: Medium Confidence - Additional review recommended"
            }
            ConfidenceLevel::Low => {
                "Carbon Credits: Low Confidence - Significant additionality concerns"
            }
            ConfidenceLevel::NotRecommended => NOT_RECOMMENDED_MESSAGE,
        }
    }
}

/// `round(100 * points / max_points)` with halves rounded up, in integer arithmetic.
pub(crate) fn confidence_score(points: u32, max_points: u32) -> u8 {
    if max_points == 0 {
        return 0;
    }
    let points = points.min(max_points) as u64;
    let max_points = max_points as u64;
    ((200 * points + max_points) / (2 * max_points)) as u8
}

pub(crate) fn risk_warnings_for_score(score: u8) -> Vec<String> {
    if score < MEDIUM_CONFIDENCE_THRESHOLD {
        vec![LIMITED_SIGNALS_WARNING.to_string()]
    } else {
        Vec::new()
    }
}
