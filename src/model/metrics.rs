use serde::{Deserialize, Serialize};

/// Aggregate quality of a model over an example set. All values lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub exact_match: f64,
    pub near_match: f64,
}

impl Metrics {
    pub const NAMES: [&'static str; 5] =
        ["precision", "recall", "f1_score", "exact_match", "near_match"];

    /// `(name, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        let values = [
            self.precision,
            self.recall,
            self.f1_score,
            self.exact_match,
            self.near_match,
        ];
        Self::NAMES.into_iter().zip(values)
    }
}
