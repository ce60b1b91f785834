pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown quiz: {0}")]
    UnknownQuiz(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Out-of-order answer: expected question {expected}, got {got}")]
    OutOfOrderAnswer { expected: usize, got: usize },

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Scoring invariant violation: {0}")]
    ScoringInvariantViolation(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
