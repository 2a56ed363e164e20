use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid term: periods must be a positive integer, got {periods}")]
    InvalidTerm { periods: u32 },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AmortError {
    fn from(e: serde_json::Error) -> Self {
        AmortError::SerializationError(e.to_string())
    }
}
