use crate::algorithm::Algorithm;

use serde::Serialize;

/// Outcome of scoring one (similar, target) pair with one concrete algorithm.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimilarityResult {
    /// The candidate string.
    pub left: String,

    /// The domain (or domain label) it was compared against.
    pub right: String,

    pub algorithm: Algorithm,

    /// Similarity in `[0, 1]`; `0.0` when the pair could not be scored.
    pub score: f64,

    /// `false` when the algorithm could not score the pair.
    pub valid: bool,
}

impl SimilarityResult {
    pub fn new(left: &str, right: &str, algorithm: Algorithm, score: Option<f64>) -> Self {
        SimilarityResult {
            left: left.to_string(),
            right: right.to_string(),
            algorithm,
            score: score.unwrap_or(0.0),
            valid: score.is_some(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// A result passes when it is valid and scores at least `threshold`.
    pub fn passes(&self, threshold: f64) -> bool {
        self.valid && self.score >= threshold
    }

    pub fn to_simple_string(&self) -> String {
        format!(
            "{} ~ {} [{}] {:.4}",
            self.left, self.right, self.algorithm, self.score
        )
    }
}
