//! Per-frame detection results.

use crate::fingers::FingerStates;
use crate::geometry::{BoundingBox, Resolution};
use crate::handedness::Handedness;
use crate::landmark::Keypoints;

/// Everything derived from one hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandResult {
    pub keypoints: Keypoints,
    pub bounding_box: BoundingBox,
    /// Handedness used for the thumb rule.
    pub handedness: Handedness,
    /// Handedness as classified by the landmark provider.
    pub provider_handedness: Handedness,
    pub fingers: FingerStates,
}

impl HandResult {
    /// Returns the number of extended fingers of this hand.
    pub fn count(&self) -> u8 {
        self.fingers.count()
    }
}

/// All hands found in a frame, in the order the landmark provider reported them.
///
/// The order carries no meaning across frames: the first hand of one frame is not necessarily
/// the same hand as the first hand of the next.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub resolution: Resolution,
    pub hands: Vec<HandResult>,
}

impl FrameResult {
    pub fn empty(resolution: Resolution) -> Self {
        Self {
            resolution,
            hands: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandResult> + '_ {
        self.hands.iter()
    }

    /// Returns the number of extended fingers summed over all hands.
    pub fn total_fingers(&self) -> u32 {
        total_fingers(&self.hands)
    }
}

/// Sums the finger counts of `hands`.
pub fn total_fingers<'a, I>(hands: I) -> u32
where
    I: IntoIterator<Item = &'a HandResult>,
{
    hands.into_iter().map(|hand| u32::from(hand.count())).sum()
}
