//! Finger counting on top of 21-point hand landmarks.
//!
//! A [`LandmarkProvider`] turns a camera frame into zero or more [`RawHand`]s, each made of 21
//! normalized landmarks in the MediaPipe hand topology (see [`landmark::LandmarkIdx`]). The
//! [`HandDetector`] maps those into pixel space, computes a bounding box, resolves the
//! handedness, and decides which fingers are extended. Nothing is carried over between frames:
//! every call returns a fresh [`FrameResult`].
//!
//! # Coordinates
//!
//! Keypoints use image coordinates: X points to the right, Y points *down*. A finger tip with a
//! smaller Y coordinate than its reference joint is therefore "above" it.
//!
//! # Environment Variables
//!
//! [`DetectorConfig::with_env_overrides`] reads the following variables:
//!
//! * `HANDSIGN_FINGER_RULE`: `vertical` (the default) or `angle`. See [`fingers::FingerRule`].
//! * `HANDSIGN_HANDEDNESS`: `geometric` (the default) resolves handedness from the thumb and
//!   pinky positions, `provider` uses the landmark provider's own classification.
//! * `HANDSIGN_MAX_HANDS`: upper bound on the number of hands processed per frame.
//!
//! [`LandmarkProvider`]: provider::LandmarkProvider
//! [`RawHand`]: landmark::RawHand
//! [`HandDetector`]: detector::HandDetector
//! [`FrameResult`]: frame::FrameResult
//! [`DetectorConfig::with_env_overrides`]: config::DetectorConfig::with_env_overrides

use log::LevelFilter;

pub mod config;
pub mod detector;
pub mod error;
pub mod fingers;
pub mod frame;
pub mod geometry;
pub mod handedness;
pub mod landmark;
pub mod provider;
pub mod recording;
pub mod timer;

#[cfg(test)]
mod test;

pub use error::{Error, Result};

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this library will log at
/// *trace* level. Otherwise, they will log at *debug* level. `RUST_LOG` takes precedence.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
