use serde::{Deserialize, Serialize};

pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.01;

/// Policy dials applied when a tender's criteria are validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Accepted distance between the sum of criterion weights and 100.
    pub weight_tolerance: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
        }
    }
}
