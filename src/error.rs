//! Error types.

use std::io;

use thiserror::Error;

use crate::landmark::LandmarkIdx;

/// Type-erased error returned by frame sources and landmark providers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// A hand did not consist of exactly the expected number of landmarks.
    #[error("hand has {actual} landmarks, expected {expected}")]
    LandmarkCount { expected: usize, actual: usize },

    /// A keypoint was found at the position of a different landmark.
    #[error("keypoint {position} is {found:?}, expected {expected:?}")]
    LandmarkOrder {
        position: usize,
        expected: LandmarkIdx,
        found: LandmarkIdx,
    },

    /// A [`DetectorConfig`](crate::config::DetectorConfig) value is out of range.
    #[error("invalid detector configuration: {0}")]
    Config(String),

    /// The frame source could not produce a frame.
    #[error("frame source unavailable")]
    FrameSource(#[source] BoxError),

    /// The landmark provider failed to process a frame.
    #[error("landmark provider failed")]
    Provider(#[source] BoxError),

    /// A landmark recording could not be parsed.
    #[error("recording line {line}: {msg}")]
    Recording { line: usize, msg: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
