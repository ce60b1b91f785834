use serde::{Deserialize, Serialize};

/// Outcome of a completed assessment. Computed exactly once per session and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub quiz_id: String,
    pub score: u32,
    pub max_score: u32,
    pub severity: String,
    pub interpretation: String,
}
