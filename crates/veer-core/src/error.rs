use thiserror::Error;

/// Errors raised while building or analysing a walking session
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VeeringError {
    #[error("internal inconsistency: {reason}")]
    InternalInconsistency { reason: String },

    #[error("heading sample {index} is outside [0, 360): {value}")]
    InvalidHeading { index: usize, value: f64 },

    #[error("walked distance must be finite and non-negative, got {0}")]
    InvalidDistance(f64),

    #[error("canvas must have positive finite dimensions, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("sensor feed is closed")]
    FeedClosed,
}

impl VeeringError {
    pub(crate) fn inconsistent(reason: impl Into<String>) -> Self {
        VeeringError::InternalInconsistency {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VeeringError>;

/// Rejects NaN and infinities before they reach a displayed result.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VeeringError::inconsistent(format!(
            "{what} is not finite ({value})"
        )))
    }
}
