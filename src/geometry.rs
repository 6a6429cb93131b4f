//! Pixel-space geometry of a hand: keypoint extraction, bounding boxes and distances.

use std::fmt;

use itertools::Itertools;

use crate::landmark::{Keypoint, Keypoints, LandmarkIdx, NUM_LANDMARKS};
use crate::{Error, Result};

/// Resolution (`width x height`) of a frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// 720p resolution: `1280x720`
    pub const RES_720P: Self = Self {
        width: 1280,
        height: 720,
    };

    /// Creates a new [`Resolution`] of `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns whether either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// An axis-aligned box in pixel coordinates. Both corners are inclusive.
///
/// Boxes are allowed to have zero width and/or height.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
}

impl BoundingBox {
    /// Creates a box spanning the given corners.
    ///
    /// # Panics
    ///
    /// Panics if `x_min > x_max` or `y_min > y_max`.
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        assert!(x_min <= x_max, "x_min={}, x_max={}", x_min, x_max);
        assert!(y_min <= y_max, "y_min={}, y_max={}", y_min, y_max);
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Computes the smallest box that contains all `keypoints`.
    pub fn enclosing(keypoints: &Keypoints) -> Self {
        let (x_min, x_max) = keypoints
            .iter()
            .map(|kp| kp.x)
            .minmax()
            .into_option()
            .unwrap_or_default();
        let (y_min, y_max) = keypoints
            .iter()
            .map(|kp| kp.y)
            .minmax()
            .into_option()
            .unwrap_or_default();
        Self::new(x_min, y_min, x_max, y_max)
    }

    #[inline]
    pub fn x_min(&self) -> i32 {
        self.x_min
    }

    #[inline]
    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    #[inline]
    pub fn x_max(&self) -> i32 {
        self.x_max
    }

    #[inline]
    pub fn y_max(&self) -> i32 {
        self.y_max
    }

    pub fn width(&self) -> u32 {
        self.x_max.abs_diff(self.x_min)
    }

    pub fn height(&self) -> u32 {
        self.y_max.abs_diff(self.y_min)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    /// Adds `margin` pixels on every side, eg. to draw the box around the hand instead of through
    /// its outermost keypoints.
    #[must_use]
    pub fn grow(&self, margin: u16) -> Self {
        let margin = i32::from(margin);
        Self {
            x_min: self.x_min.saturating_sub(margin),
            y_min: self.y_min.saturating_sub(margin),
            x_max: self.x_max.saturating_add(margin),
            y_max: self.y_max.saturating_add(margin),
        }
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox(({}, {})..=({}, {}))",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// Maps normalized landmarks into the pixel space of a frame and computes their bounding box.
///
/// Coordinates outside of `[0, 1]` are mapped outside of the frame. If the resolution has a zero
/// dimension, all keypoints collapse onto that axis' origin.
pub fn extract(landmarks: &[[f32; 2]], resolution: Resolution) -> Result<(Keypoints, BoundingBox)> {
    if landmarks.len() != NUM_LANDMARKS {
        return Err(Error::LandmarkCount {
            expected: NUM_LANDMARKS,
            actual: landmarks.len(),
        });
    }

    let (w, h) = (resolution.width() as f32, resolution.height() as f32);
    let keypoints = Keypoints::from_positions(std::array::from_fn(|i| {
        let [x, y] = landmarks[i];
        // `as` saturates, so wild provider output can't overflow here.
        ((x * w).round() as i32, (y * h).round() as i32)
    }));
    let bbox = BoundingBox::enclosing(&keypoints);
    Ok((keypoints, bbox))
}

/// Computes the euclidean distance between two keypoints in pixels, rounded down.
///
/// Any pair of `i32` positions is supported, including the saturated positions [`extract`]
/// produces for wild provider output.
pub fn distance(a: Keypoint, b: Keypoint) -> u64 {
    let dx = u128::from(a.x.abs_diff(b.x));
    let dy = u128::from(a.y.abs_diff(b.y));
    let sq = dx * dx + dy * dy;

    // `f64` can be off by one for squares this large, so fix up the estimate.
    let mut root = (sq as f64).sqrt() as u128;
    while root * root > sq {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= sq {
        root += 1;
    }
    root as u64
}

/// Returns the distance between the thumb tip and the index finger tip.
pub fn pinch_distance(keypoints: &Keypoints) -> u64 {
    distance(
        keypoints[LandmarkIdx::ThumbTip],
        keypoints[LandmarkIdx::IndexFingerTip],
    )
}

/// Returns whether the thumb and index finger tips are closer than `threshold` pixels.
pub fn is_pinching(keypoints: &Keypoints, threshold: u64) -> bool {
    pinch_distance(keypoints) < threshold
}
