//! Left/right classification of a hand.

use crate::landmark::{Keypoints, LandmarkIdx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Maps a provider's raw handedness score to a [`Handedness`].
    ///
    /// Scores above 0.5 are considered right hands.
    pub fn from_score(raw_handedness: f32) -> Self {
        if raw_handedness > 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }

    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

/// Infers the handedness from the horizontal order of the thumb tip and the pinky MCP.
///
/// A thumb tip left of the pinky base means a left hand, anything else a right hand. This only
/// holds for a palm facing the camera in the capture orientation, and may disagree with the
/// provider's classification for mirrored or rotated hands. It is kept because the thumb rule in
/// [`crate::fingers`] mirrors along the same axis.
pub fn resolve(keypoints: &Keypoints) -> Handedness {
    let thumb_tip = keypoints[LandmarkIdx::ThumbTip];
    let pinky_mcp = keypoints[LandmarkIdx::PinkyMcp];
    if thumb_tip.x < pinky_mcp.x {
        Handedness::Left
    } else {
        Handedness::Right
    }
}

#[cfg(test)]
mod tests {
    use crate::test;

    use super::*;

    #[test]
    fn score_threshold() {
        assert_eq!(Handedness::from_score(0.9), Handedness::Right);
        assert_eq!(Handedness::from_score(0.5), Handedness::Left);
        assert_eq!(Handedness::from_score(0.1), Handedness::Left);
    }

    #[test]
    fn resolves_fixtures() {
        assert_eq!(resolve(&test::open_right_hand()), Handedness::Right);
        assert_eq!(resolve(&test::right_fist()), Handedness::Right);
        assert_eq!(
            resolve(&test::mirror(&test::open_right_hand(), test::WIDTH)),
            Handedness::Left
        );
    }

    #[test]
    fn equal_x_is_right() {
        let kps = test::open_right_hand().map_positions(|_, y| (100, y));
        assert_eq!(resolve(&kps), Handedness::Right);
    }

    #[test]
    fn mirroring_flips_handedness() {
        let mut rng = fastrand::Rng::with_seed(0x4a4e);
        for _ in 0..500 {
            let kps = test::random_hand(&mut rng);
            if kps[LandmarkIdx::ThumbTip].x == kps[LandmarkIdx::PinkyMcp].x {
                // Ties always resolve to `Right`, so mirroring can't flip them.
                continue;
            }

            let mirrored = test::mirror(&kps, test::WIDTH);
            assert_eq!(resolve(&mirrored), resolve(&kps).mirrored());
        }
    }
}
