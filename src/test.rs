//! Synthetic hands shared by the unit tests.

use nalgebra::{Point2, Rotation2};

use crate::geometry::Resolution;
use crate::landmark::{Keypoints, LandmarkIdx, RawHand, NUM_LANDMARKS};

pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 1000;

pub fn resolution() -> Resolution {
    Resolution::new(WIDTH, HEIGHT)
}

/// Upright right hand, palm towards the camera, all fingers spread.
pub const OPEN_RIGHT_HAND: [[f32; 2]; NUM_LANDMARKS] = [
    [0.50, 0.90],
    // thumb
    [0.58, 0.85],
    [0.64, 0.78],
    [0.69, 0.72],
    [0.74, 0.66],
    // index
    [0.58, 0.60],
    [0.59, 0.48],
    [0.60, 0.41],
    [0.60, 0.35],
    // middle
    [0.50, 0.58],
    [0.50, 0.45],
    [0.50, 0.37],
    [0.50, 0.30],
    // ring
    [0.43, 0.60],
    [0.42, 0.48],
    [0.41, 0.41],
    [0.41, 0.36],
    // pinky
    [0.37, 0.64],
    [0.35, 0.55],
    [0.34, 0.50],
    [0.33, 0.45],
];

/// Upright right fist with the thumb tucked in front of the fingers.
pub const RIGHT_FIST: [[f32; 2]; NUM_LANDMARKS] = [
    [0.50, 0.90],
    // thumb
    [0.58, 0.85],
    [0.63, 0.78],
    [0.62, 0.70],
    [0.55, 0.68],
    // index
    [0.58, 0.62],
    [0.59, 0.54],
    [0.59, 0.62],
    [0.58, 0.66],
    // middle
    [0.50, 0.60],
    [0.50, 0.52],
    [0.50, 0.60],
    [0.50, 0.65],
    // ring
    [0.43, 0.62],
    [0.42, 0.55],
    [0.42, 0.62],
    [0.43, 0.66],
    // pinky
    [0.37, 0.66],
    [0.36, 0.60],
    [0.37, 0.65],
    [0.38, 0.68],
];

pub fn open_right_hand_raw() -> RawHand {
    RawHand::new(OPEN_RIGHT_HAND, 0.97)
}

pub fn right_fist_raw() -> RawHand {
    RawHand::new(RIGHT_FIST, 0.93)
}

fn to_pixels(landmarks: &[[f32; 2]; NUM_LANDMARKS]) -> Keypoints {
    Keypoints::from_positions(std::array::from_fn(|i| {
        let [x, y] = landmarks[i];
        (
            (x * WIDTH as f32).round() as i32,
            (y * HEIGHT as f32).round() as i32,
        )
    }))
}

pub fn open_right_hand() -> Keypoints {
    to_pixels(&OPEN_RIGHT_HAND)
}

pub fn right_fist() -> Keypoints {
    to_pixels(&RIGHT_FIST)
}

/// Mirrors all keypoints along the vertical axis of a frame `width` pixels wide.
pub fn mirror(keypoints: &Keypoints, width: u32) -> Keypoints {
    keypoints.map_positions(|x, y| (width as i32 - x, y))
}

/// Rotates all keypoints about the wrist by `angle` radians.
pub fn rotate_about_wrist(keypoints: &Keypoints, angle: f32) -> Keypoints {
    let wrist = keypoints[LandmarkIdx::Wrist];
    let wrist = Point2::new(wrist.x as f32, wrist.y as f32);
    let rot = Rotation2::new(angle);
    keypoints.map_positions(|x, y| {
        let p = wrist + rot * (Point2::new(x as f32, y as f32) - wrist);
        (p.x.round() as i32, p.y.round() as i32)
    })
}

/// Generates a hand with arbitrary keypoint positions inside the test frame.
pub fn random_hand(rng: &mut fastrand::Rng) -> Keypoints {
    Keypoints::from_positions(std::array::from_fn(|_| {
        (rng.i32(0..=WIDTH as i32), rng.i32(0..=HEIGHT as i32))
    }))
}

/// Generates normalized landmarks, some of them slightly outside of the frame.
pub fn random_raw_hand(rng: &mut fastrand::Rng) -> RawHand {
    let landmarks: Vec<[f32; 2]> = (0..NUM_LANDMARKS)
        .map(|_| [rng.f32() * 1.2 - 0.1, rng.f32() * 1.2 - 0.1])
        .collect();
    RawHand::new(landmarks, rng.f32())
}
