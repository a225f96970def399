use thiserror::Error;

use crate::shape::ObjectHandle;

/// Rejected tuning values in an [`InteractionConfig`](crate::InteractionConfig).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` range is inverted: min {min} >= max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    #[error("hand has {found} landmarks, expected {expected}")]
    LandmarkCount { expected: usize, found: usize },
}

/// Failure reported by a rendering backend. The scene mutator logs these and
/// carries on; they never abort a gesture pass.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend call `{op}` failed: {message}")]
    Call { op: &'static str, message: String },

    #[error("unknown object handle {0:?}")]
    UnknownHandle(ObjectHandle),
}

impl BackendError {
    pub fn call(op: &'static str, message: impl Into<String>) -> Self {
        Self::Call {
            op,
            message: message.into(),
        }
    }
}
