//! Classification errors.

/// Errors raised at the classifier call boundary.
///
/// Both classifiers are total over their valid domain; these errors
/// only fire for input-contract violations, never mid-computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    #[error("score {score} outside [0, 100] (NaN included)")]
    ScoreOutOfRange { score: f64 },

    #[error("empty path cannot be classified")]
    EmptyPath,
}
