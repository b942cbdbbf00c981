//! Error type shared by the scheduling API.
//!
//! Every variant is raised at construction time (enqueueing a step, building a
//! listener, loading configuration). Nothing in the per-frame tick path returns
//! an error.

use thiserror::Error;

/// Errors raised when an action, listener, or resource is built from bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// Duration was negative, NaN or infinite.
    #[error("invalid duration {0}: must be finite and >= 0")]
    InvalidDuration(f32),
    /// Frame rate was zero, negative, NaN or infinite.
    #[error("invalid frame rate {0}: must be finite and > 0")]
    InvalidFrameRate(f32),
    /// `animate` was called with no frames.
    #[error("frame animation needs at least one frame")]
    EmptyFrameList,
    /// `to` was called with a tween that touches no property.
    #[error("transition needs at least one property")]
    EmptyTween,
    /// Easing name did not match any known easing function.
    #[error("unknown easing function '{0}'")]
    UnknownEasing(String),
    /// `watch` was called with no queues.
    #[error("listener must watch at least one queue")]
    EmptyWatchSet,
    /// Frame clip key not present in the store.
    #[error("unknown frame clip '{0}'")]
    UnknownClip(String),
    /// Configuration file could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),
    /// Frame clip file could not be read or parsed.
    #[error("failed to load frame clips: {0}")]
    ClipLoad(String),
}

pub(crate) fn check_duration(duration: f32) -> Result<f32, ActionError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(duration)
    } else {
        Err(ActionError::InvalidDuration(duration))
    }
}

pub(crate) fn check_frame_rate(frame_rate: f32) -> Result<f32, ActionError> {
    if frame_rate.is_finite() && frame_rate > 0.0 {
        Ok(frame_rate)
    } else {
        Err(ActionError::InvalidFrameRate(frame_rate))
    }
}
