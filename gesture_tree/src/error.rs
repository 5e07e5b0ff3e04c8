//! Error types for the gesture pipeline and the application shell.
//!
//! None of these are fatal to the frame loop: an [`InitError`] leaves the
//! adapter inactive, a [`FrameClassificationError`] becomes a no-gesture
//! sample, and only [`AppError`] ever reaches `main`.

use thiserror::Error;

use dual_cloud::GroupError;

/// Why the gesture backend could not be brought up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InitError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("gesture model failed to load: {0}")]
    ModelLoad(String),

    #[error("initialization task ended without reporting a result")]
    InitTaskLost,
}

/// A single frame that could not be classified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameClassificationError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("hand has {got} landmarks, need at least {expected}")]
    MalformedLandmarks { expected: usize, got: usize },
}

/// Errors surfaced to the binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Group(#[from] GroupError),
}
