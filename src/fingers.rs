//! Finger extension state.
//!
//! The decision whether a finger is up is made by a [`FingerUpRule`]. Two rules are provided:
//!
//! - [`VerticalHeuristic`] compares raw image coordinates and assumes the hand is held upright.
//! - [`AngleCorrected`] first undoes the hand's rotation in the image plane, so it also works for
//!   tilted or sideways hands.

use std::{fmt, str::FromStr};

use nalgebra::{Point2, Rotation2, Vector2};

use crate::handedness::Handedness;
use crate::landmark::{Finger, Keypoint, Keypoints, LandmarkIdx};
use crate::{Error, Result};

/// Up/down state of all five fingers, in [`Finger::ALL`] order.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    /// All fingers down. Returned when no hand is present.
    pub const NONE: Self = Self([false; 5]);

    /// All fingers up.
    pub const ALL: Self = Self([true; 5]);

    pub fn new(states: [bool; 5]) -> Self {
        Self(states)
    }

    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    /// Returns the number of extended fingers (0 to 5).
    pub fn count(&self) -> u8 {
        self.0.iter().filter(|up| **up).count() as u8
    }

    /// Returns the states as `0`/`1` values: `[thumb, index, middle, ring, pinky]`.
    pub fn as_array(&self) -> [u8; 5] {
        self.0.map(u8::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Finger, bool)> + '_ {
        Finger::ALL.into_iter().zip(self.0)
    }
}

impl fmt::Debug for FingerStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_array())
    }
}

/// Decides which fingers of a hand are extended.
pub trait FingerUpRule: Send + Sync {
    fn fingers_up(&self, keypoints: &Keypoints, handedness: Handedness) -> FingerStates;

    /// Returns the keypoints in the pose this rule evaluates them in.
    ///
    /// The detector resolves geometric handedness on these positions, so that the thumb is
    /// judged in the same frame of reference as the handedness it depends on. The default
    /// returns the keypoints unchanged.
    fn upright(&self, keypoints: &Keypoints) -> Keypoints {
        keypoints.clone()
    }
}

/// Compares image coordinates directly.
///
/// The thumb is up when its tip lies further out than its IP joint: to the right for right hands,
/// to the left for left hands. All other fingers are up when their tip lies above their PIP
/// joint. Rotated hands are misclassified.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalHeuristic;

impl FingerUpRule for VerticalHeuristic {
    fn fingers_up(&self, keypoints: &Keypoints, handedness: Handedness) -> FingerStates {
        compare(handedness, |idx| to_point(keypoints[idx]))
    }
}

/// Rotates the hand upright about its wrist before applying the [`VerticalHeuristic`]
/// comparisons.
///
/// "Upright" is derived from the wrist and middle finger MCP, see [`hand_rotation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleCorrected;

impl FingerUpRule for AngleCorrected {
    fn fingers_up(&self, keypoints: &Keypoints, handedness: Handedness) -> FingerStates {
        let upright = self.upright(keypoints);
        compare(handedness, |idx| to_point(upright[idx]))
    }

    fn upright(&self, keypoints: &Keypoints) -> Keypoints {
        let wrist = to_point(keypoints[LandmarkIdx::Wrist]);
        let unrotate = Rotation2::new(-hand_rotation(keypoints));
        keypoints.map_positions(|x, y| {
            let p = wrist + unrotate * (Point2::new(x as f32, y as f32) - wrist);
            (p.x.round() as i32, p.y.round() as i32)
        })
    }
}

/// Computes the clockwise rotation of the hand compared to an upright position, in radians.
///
/// A rotation of 0° means that the fingers are pointed upwards in the image.
pub fn hand_rotation(keypoints: &Keypoints) -> f32 {
    let finger = to_point(keypoints[LandmarkIdx::MiddleFingerMcp]);
    let wrist = to_point(keypoints[LandmarkIdx::Wrist]);

    let rel = wrist - finger;
    Rotation2::rotation_between(&Vector2::y(), &rel).angle()
}

fn to_point(kp: Keypoint) -> Point2<f32> {
    Point2::new(kp.x as f32, kp.y as f32)
}

fn compare(handedness: Handedness, pos: impl Fn(LandmarkIdx) -> Point2<f32>) -> FingerStates {
    let mut states = [false; 5];
    for (state, finger) in states.iter_mut().zip(Finger::ALL) {
        let tip = pos(finger.tip());
        let reference = pos(finger.reference());
        *state = match (finger, handedness) {
            (Finger::Thumb, Handedness::Right) => tip.x > reference.x,
            (Finger::Thumb, Handedness::Left) => tip.x < reference.x,
            // Y points down, so "up" means a smaller Y coordinate.
            _ => tip.y < reference.y,
        };
    }
    FingerStates(states)
}

/// Selects one of the built-in [`FingerUpRule`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FingerRule {
    #[default]
    VerticalHeuristic,
    AngleCorrected,
}

impl FingerRule {
    pub fn build(self) -> Box<dyn FingerUpRule> {
        match self {
            FingerRule::VerticalHeuristic => Box::new(VerticalHeuristic),
            FingerRule::AngleCorrected => Box::new(AngleCorrected),
        }
    }
}

impl FromStr for FingerRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vertical" => Ok(FingerRule::VerticalHeuristic),
            "angle" => Ok(FingerRule::AngleCorrected),
            _ => Err(Error::Config(format!(
                "unknown finger rule '{}' (expected 'vertical' or 'angle')",
                s
            ))),
        }
    }
}

/// Classifies the fingers of one hand.
///
/// An empty keypoint list means that no hand is present and yields [`FingerStates::NONE`]. Any
/// other length than 21, or keypoints out of [`LandmarkIdx`] order, is an error.
pub fn classify(
    keypoints: &[Keypoint],
    handedness: Handedness,
    rule: &dyn FingerUpRule,
) -> Result<FingerStates> {
    if keypoints.is_empty() {
        return Ok(FingerStates::NONE);
    }

    let keypoints = Keypoints::from_slice(keypoints)?;
    Ok(rule.fingers_up(&keypoints, handedness))
}
