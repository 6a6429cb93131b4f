//! Hand landmark topology and the per-hand data handed over by a landmark provider.

use std::ops::Index;

use crate::handedness::Handedness;
use crate::{Error, Result};

/// Number of landmarks making up one hand.
pub const NUM_LANDMARKS: usize = 21;

/// Names for the hand pose landmarks.
///
/// The discriminant of each variant is the landmark's index in the provider output.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **IP**: Interphalangeal joint of the thumb.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl LandmarkIdx {
    /// All landmarks, in provider order.
    pub const ALL: [LandmarkIdx; NUM_LANDMARKS] = {
        use LandmarkIdx::*;
        [
            Wrist,
            ThumbCmc,
            ThumbMcp,
            ThumbIp,
            ThumbTip,
            IndexFingerMcp,
            IndexFingerPip,
            IndexFingerDip,
            IndexFingerTip,
            MiddleFingerMcp,
            MiddleFingerPip,
            MiddleFingerDip,
            MiddleFingerTip,
            RingFingerMcp,
            RingFingerPip,
            RingFingerDip,
            RingFingerTip,
            PinkyMcp,
            PinkyPip,
            PinkyDip,
            PinkyTip,
        ]
    };

    /// Returns the landmark at position `index` of the provider output.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The five fingers, in the order used by [`FingerStates`](crate::fingers::FingerStates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn tip(self) -> LandmarkIdx {
        match self {
            Finger::Thumb => LandmarkIdx::ThumbTip,
            Finger::Index => LandmarkIdx::IndexFingerTip,
            Finger::Middle => LandmarkIdx::MiddleFingerTip,
            Finger::Ring => LandmarkIdx::RingFingerTip,
            Finger::Pinky => LandmarkIdx::PinkyTip,
        }
    }

    /// Returns the joint the tip is compared against to decide whether the finger is extended.
    ///
    /// This is the IP joint for the thumb (one below the tip) and the PIP joint for all other
    /// fingers (two below the tip).
    pub fn reference(self) -> LandmarkIdx {
        match self {
            Finger::Thumb => LandmarkIdx::ThumbIp,
            Finger::Index => LandmarkIdx::IndexFingerPip,
            Finger::Middle => LandmarkIdx::MiddleFingerPip,
            Finger::Ring => LandmarkIdx::RingFingerPip,
            Finger::Pinky => LandmarkIdx::PinkyPip,
        }
    }
}

/// A landmark mapped into pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keypoint {
    pub idx: LandmarkIdx,
    pub x: i32,
    pub y: i32,
}

impl Keypoint {
    pub fn new(idx: LandmarkIdx, x: i32, y: i32) -> Self {
        Self { idx, x, y }
    }
}

/// The 21 pixel-space keypoints of one hand, indexed by [`LandmarkIdx`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypoints([Keypoint; NUM_LANDMARKS]);

impl Keypoints {
    /// Creates a keypoint set from 21 pixel positions given in provider order.
    pub fn from_positions(positions: [(i32, i32); NUM_LANDMARKS]) -> Self {
        Self(std::array::from_fn(|i| {
            let (x, y) = positions[i];
            Keypoint::new(LandmarkIdx::ALL[i], x, y)
        }))
    }

    /// Collects keypoints from a slice, requiring exactly one keypoint per landmark in provider
    /// order.
    pub fn from_slice(keypoints: &[Keypoint]) -> Result<Self> {
        if keypoints.len() != NUM_LANDMARKS {
            return Err(Error::LandmarkCount {
                expected: NUM_LANDMARKS,
                actual: keypoints.len(),
            });
        }

        for (position, (kp, expected)) in keypoints.iter().zip(LandmarkIdx::ALL).enumerate() {
            if kp.idx != expected {
                return Err(Error::LandmarkOrder {
                    position,
                    expected,
                    found: kp.idx,
                });
            }
        }

        Ok(Self(std::array::from_fn(|i| keypoints[i])))
    }

    #[inline]
    pub fn get(&self, idx: LandmarkIdx) -> Keypoint {
        self.0[idx.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = Keypoint> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Keypoint] {
        &self.0
    }

    /// Applies `f` to every position, keeping the landmark identities.
    #[must_use]
    pub fn map_positions(&self, mut f: impl FnMut(i32, i32) -> (i32, i32)) -> Self {
        let mut out = self.clone();
        for kp in &mut out.0 {
            (kp.x, kp.y) = f(kp.x, kp.y);
        }
        out
    }
}

impl Index<LandmarkIdx> for Keypoints {
    type Output = Keypoint;

    fn index(&self, idx: LandmarkIdx) -> &Keypoint {
        &self.0[idx.index()]
    }
}

/// One hand as reported by a landmark provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHand {
    landmarks: Vec<[f32; 2]>,
    raw_handedness: f32,
}

impl RawHand {
    /// Creates a hand from normalized `[x, y]` landmarks and the provider's raw handedness score.
    ///
    /// The landmark count is not checked here, since providers are external code. It is
    /// validated when the hand is processed.
    pub fn new(landmarks: impl Into<Vec<[f32; 2]>>, raw_handedness: f32) -> Self {
        Self {
            landmarks: landmarks.into(),
            raw_handedness,
        }
    }

    /// Returns the normalized landmark positions. `(0, 0)` is the top left corner of the frame,
    /// `(1, 1)` the bottom right.
    pub fn landmarks(&self) -> &[[f32; 2]] {
        &self.landmarks
    }

    pub fn raw_handedness(&self) -> f32 {
        self.raw_handedness
    }

    /// Returns the handedness as classified by the provider.
    pub fn handedness(&self) -> Handedness {
        Handedness::from_score(self.raw_handedness)
    }
}
