use std::{
    fs,
    path::{Path, PathBuf},
};

use handsign::{
    config::DetectorConfig, detector::HandDetector, handedness::Handedness, provider::FrameSource,
    recording::Recording,
};

const RECORDINGS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/recordings");

fn replay(path: &Path, detector: &HandDetector) -> Vec<u32> {
    let mut playback = Recording::load(path).unwrap().into_playback();
    let mut totals = Vec::new();
    while let Some(frame) = playback.read().unwrap() {
        let result = detector.detect(&mut playback, &frame).unwrap();
        for hand in result.iter() {
            for kp in hand.keypoints.iter() {
                assert!(hand.bounding_box.contains(kp.x, kp.y));
            }
        }
        totals.push(result.total_fingers());
    }
    totals
}

#[test]
fn recordings_replay() {
    let detector = HandDetector::new(DetectorConfig::production()).unwrap();
    let files = walkdir(RECORDINGS_DIR.as_ref());
    assert!(!files.is_empty());
    for path in files {
        let totals = replay(&path, &detector);
        assert!(!totals.is_empty(), "{} has no frames", path.display());
    }
}

#[test]
fn demo_recording() {
    let path = Path::new(RECORDINGS_DIR).join("demo.txt");
    let detector = HandDetector::new(DetectorConfig::production()).unwrap();
    assert_eq!(replay(&path, &detector), [5, 5, 0, 1, 7]);

    let recording = Recording::load(&path).unwrap();
    let frames = recording.frames();
    let second = detector
        .process(&frames[1].hands, frames[1].resolution)
        .unwrap();
    assert_eq!(second.hands[0].handedness, Handedness::Right);
    assert_eq!(second.hands[1].handedness, Handedness::Left);
    assert_eq!(second.hands[1].fingers.as_array(), [0, 0, 0, 0, 0]);

    let last = detector
        .process(&frames[4].hands, frames[4].resolution)
        .unwrap();
    assert_eq!(last.hands[0].fingers.as_array(), [0, 1, 1, 0, 0]);
    assert_eq!(last.hands[1].fingers.as_array(), [1, 1, 1, 1, 1]);
}

#[test]
fn demo_with_single_hand_limit() {
    let path = Path::new(RECORDINGS_DIR).join("demo.txt");
    let detector = HandDetector::new(DetectorConfig::production().max_hands(1)).unwrap();
    assert_eq!(replay(&path, &detector), [5, 5, 0, 1, 2]);
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut vec = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();

        if entry.file_name().into_string().unwrap().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            vec.extend(walkdir(&path));
        } else {
            vec.push(path);
        }
    }

    vec
}
