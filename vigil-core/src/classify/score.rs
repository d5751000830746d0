//! Score tier classification.

use serde::{Deserialize, Serialize};

use crate::errors::ClassifyError;

/// Quality-score tier. Exhaustive and mutually exclusive over `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreTier {
    /// `[0, 80)` — below the acceptance floor.
    Failure,
    /// `[80, 99)` — the accepted band.
    Goldilocks,
    /// `[99, 100]` — implausibly high; suspected gaming of the metric.
    Theater,
}

impl ScoreTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failure => "FAILURE",
            Self::Goldilocks => "GOLDILOCKS",
            Self::Theater => "THEATER",
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a quality score into its tier.
///
/// NaN and anything outside `[0, 100]` is an input-contract violation,
/// never silently coerced.
pub fn classify_score(score: f64) -> Result<ScoreTier, ClassifyError> {
    if score.is_nan() || !(0.0..=100.0).contains(&score) {
        return Err(ClassifyError::ScoreOutOfRange { score });
    }
    if score < 80.0 {
        Ok(ScoreTier::Failure)
    } else if score >= 99.0 {
        Ok(ScoreTier::Theater)
    } else {
        Ok(ScoreTier::Goldilocks)
    }
}
