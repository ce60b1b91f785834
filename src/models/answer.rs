use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded answer. `answer_text` is kept for audit and display; the two
/// indices drive scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question_index: usize,
    pub answer_index: usize,
    pub answer_text: String,
    pub answered_at: DateTime<Utc>,
}
