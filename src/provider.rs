//! Interfaces to the collaborators upstream of the detector: frame capture and the landmark
//! model.

use image::RgbImage;

use crate::landmark::RawHand;
use crate::Result;

/// Estimates hand landmarks in a frame.
///
/// Implementations wrap a pose estimation model. They are expected to honor the confidence
/// thresholds, static image mode and hand limit of the
/// [`DetectorConfig`](crate::config::DetectorConfig) they were created with. Returning an empty
/// list means that no hand was found, which is not an error.
pub trait LandmarkProvider {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<RawHand>>;
}

impl<F> LandmarkProvider for F
where
    F: FnMut(&RgbImage) -> Result<Vec<RawHand>>,
{
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<RawHand>> {
        self(frame)
    }
}

/// A source of color frames, such as a camera.
pub trait FrameSource {
    /// Reads the next frame.
    ///
    /// Returns `Ok(None)` once the source is exhausted. An [`Error::FrameSource`] means that no
    /// frame could be acquired; callers must not continue with a previous frame in that case.
    ///
    /// [`Error::FrameSource`]: crate::Error::FrameSource
    fn read(&mut self) -> Result<Option<RgbImage>>;
}
