use thiserror::Error;

/// Reasons a parameter set is rejected before any generation work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("max capacity must be a positive number, got {0}")]
    InvalidCapacity(String),

    #[error("target total must be a positive number, got {0}")]
    InvalidTarget(String),

    #[error("at least one location is required")]
    EmptyLocationSet,

    #[error("target total {target} is less than max capacity {capacity}")]
    ImplausibleTarget { target: f64, capacity: f64 },

    #[error("invalid reconcile settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
