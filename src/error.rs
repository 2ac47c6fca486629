//! Configuration errors
//!
//! Everything here is raised while a prize table or settings are loaded,
//! never while the wheel is animating.

/// Wheel configuration errors
#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    #[error("Prize list is empty")]
    EmptyRegistry,

    #[error("Prize {index} has invalid probability {value}")]
    InvalidProbability { index: usize, value: f64 },

    #[error("Prize probabilities sum to {sum}, expected 1.0")]
    ProbabilitySum { sum: f64 },

    #[error("Wheel already holds the maximum of {max} prizes")]
    TooManySegments { max: usize },

    #[error("Row {index} does not exist ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Cannot rebalance: {0}")]
    Rebalance(String),

    #[error("Invalid spin tuning: {0}")]
    InvalidTuning(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WheelError>;
