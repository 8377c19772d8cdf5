//! Error types for figures, tweens and actor timelines

use serde::{Deserialize, Serialize};

/// Error type for every fallible figure/timeline operation.
///
/// All errors are programmer-error signals surfaced synchronously; nothing is
/// retried and no operation mutates a timeline before its checks pass.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MorphoError {
    /// Two tweenables with the same name in one state
    #[error("Duplicate tweenable: {name}")]
    DuplicateTweenable { name: String },

    /// Tweenable name is not identifier-like
    #[error("Invalid tweenable name: {name:?}")]
    InvalidTweenableName { name: String },

    /// Tag name outside the tag vocabulary
    #[error("Unknown tag: {name}")]
    UnknownTag { name: String },

    /// A required tweenable is absent (e.g. `zdepth`, or the tween partner lacks a slot)
    #[error("Missing tweenable: {name}")]
    MissingTweenable { name: String },

    /// Figure of the wrong concrete type for an actor
    #[error("Figure type mismatch: expected {expected}, got {actual}")]
    FigureTypeMismatch { expected: String, actual: String },

    /// No keyframe at the given index
    #[error("Keyframe not found at frame {frame}")]
    KeyframeNotFound { frame: i64 },

    /// A figure that is not part of the timeline
    #[error("Figure not found in timeline of {figure_type}")]
    FigureNotFound { figure_type: String },

    /// Action name not registered for a figure type
    #[error("Action not found: {action} for {figure_type}")]
    ActionNotFound { figure_type: String, action: String },

    /// Pivot arc with a subtended angle that is a multiple of 2π
    #[error("Degenerate pivot angle: {angle}")]
    DegeneratePivot { angle: f64 },

    /// Value-level domain error (shape mismatch, bad parameter, ...)
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// Operation not supported for this figure/value
    #[error("Not implemented: {operation}")]
    NotImplemented { operation: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl MorphoError {
    /// Shorthand for an [`MorphoError::InvalidValue`].
    #[inline]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`MorphoError::NotImplemented`].
    #[inline]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateTweenable { .. }
            | Self::InvalidTweenableName { .. }
            | Self::UnknownTag { .. }
            | Self::MissingTweenable { .. }
            | Self::FigureTypeMismatch { .. } => "structural",
            Self::DegeneratePivot { .. } | Self::InvalidValue { .. } => "geometry",
            Self::KeyframeNotFound { .. }
            | Self::FigureNotFound { .. }
            | Self::ActionNotFound { .. } => "lookup",
            Self::NotImplemented { .. } => "unsupported",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for MorphoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
