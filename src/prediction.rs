//! Threshold rule and the text shown under the preview.

use std::fmt;

/// Shown when Predict is pressed before any image was chosen.
pub const SELECT_IMAGE_FIRST: &str = "Please select an image first.";

/// Binary outcome of the threshold rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Score at or above the threshold.
    Real,
    /// Score below the threshold.
    Fake,
}

impl Verdict {
    /// Scores strictly below `threshold` are fake; everything else is real.
    pub fn from_score(score: f32, threshold: f32) -> Self {
        if score < threshold {
            Self::Fake
        } else {
            Self::Real
        }
    }

    /// Word used in the result text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Real => "Real",
            Self::Fake => "Fake",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `Prediction: <label> (<score to two decimals>)`.
pub fn format_prediction(verdict: Verdict, score: f32) -> String {
    format!("Prediction: {verdict} ({score:.2})")
}

/// `Prediction failed: <error>`.
pub fn format_failure(error: &impl fmt::Display) -> String {
    format!("Prediction failed: {error}")
}
