//! Recorded landmark provider output.
//!
//! Recordings make it possible to run the detector without a camera or a landmark model. They
//! use a line-based text format:
//!
//! ```text
//! # Lines starting with `#` are comments.
//! frame 1280 720
//! hand 0.97 0.50 0.90 0.58 0.85 ...
//! hand 0.12 ...
//! frame 1280 720
//! ```
//!
//! A `frame` line starts a new frame of the given resolution. Each following `hand` line holds
//! the provider's raw handedness score and the normalized `x y` pairs of the hand's landmarks.
//! A frame without `hand` lines is a frame in which no hands were found.
//!
//! The landmark count is not checked when parsing, so recordings can also capture malformed
//! provider output.

use std::{collections::VecDeque, fmt, fs, path::Path, str::FromStr};

use image::RgbImage;

use crate::geometry::Resolution;
use crate::landmark::RawHand;
use crate::provider::{FrameSource, LandmarkProvider};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub resolution: Resolution,
    pub hands: Vec<RawHand>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recording {
    frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading recording from {}", path.display());
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut frames: Vec<RecordedFrame> = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let err = |msg: String| Error::Recording { line: line_no, msg };

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut words = line.split_whitespace();
            match words.next() {
                Some("frame") => {
                    let width = parse_word::<u32>(words.next(), "frame width").map_err(err)?;
                    let height = parse_word::<u32>(words.next(), "frame height").map_err(err)?;
                    if let Some(extra) = words.next() {
                        return Err(err(format!("unexpected '{}' after frame height", extra)));
                    }
                    frames.push(RecordedFrame {
                        resolution: Resolution::new(width, height),
                        hands: Vec::new(),
                    });
                }
                Some("hand") => {
                    let frame = frames
                        .last_mut()
                        .ok_or_else(|| err("`hand` line before the first `frame`".into()))?;
                    let score =
                        parse_word::<f32>(words.next(), "handedness score").map_err(err)?;
                    let coords = words
                        .map(|w| parse_word::<f32>(Some(w), "landmark coordinate"))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(err)?;
                    if coords.len() % 2 != 0 {
                        return Err(err(format!(
                            "odd number of landmark coordinates ({})",
                            coords.len()
                        )));
                    }
                    let landmarks: Vec<[f32; 2]> =
                        coords.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
                    frame.hands.push(RawHand::new(landmarks, score));
                }
                Some(other) => return Err(err(format!("unknown record type '{}'", other))),
                None => continue,
            }
        }

        log::debug!("parsed recording with {} frames", frames.len());
        Ok(Self { frames })
    }

    /// Appends a frame, eg. to record the output of a live landmark provider.
    pub fn push_frame(&mut self, resolution: Resolution, hands: Vec<RawHand>) {
        self.frames.push(RecordedFrame { resolution, hands });
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn into_playback(self) -> Playback {
        Playback {
            frames: self.frames.into(),
            pending: None,
        }
    }
}

fn parse_word<T: FromStr>(word: Option<&str>, what: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {}", what))?;
    word.parse()
        .map_err(|_| format!("invalid {} '{}'", what, word))
}

impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            let res = frame.resolution;
            writeln!(f, "frame {} {}", res.width(), res.height())?;
            for hand in &frame.hands {
                write!(f, "hand {}", hand.raw_handedness())?;
                for [x, y] in hand.landmarks() {
                    write!(f, " {} {}", x, y)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Replays a [`Recording`].
///
/// Acts as the [`FrameSource`] and the [`LandmarkProvider`] at the same time: each call to
/// [`FrameSource::read`] yields a blank frame of the recorded resolution, and the following call
/// to [`LandmarkProvider::detect`] returns the hands recorded for it.
pub struct Playback {
    frames: VecDeque<RecordedFrame>,
    pending: Option<Vec<RawHand>>,
}

impl Playback {
    /// Returns the number of frames that have not been read yet.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for Playback {
    fn read(&mut self) -> Result<Option<RgbImage>> {
        Ok(self.frames.pop_front().map(|frame| {
            let res = frame.resolution;
            self.pending = Some(frame.hands);
            RgbImage::new(res.width(), res.height())
        }))
    }
}

impl LandmarkProvider for Playback {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<RawHand>> {
        self.pending
            .take()
            .ok_or_else(|| Error::Provider("no recorded frame has been read".into()))
    }
}

#[cfg(test)]
mod tests {
    use crate::test;

    use super::*;

    fn hand_line(score: f32, landmarks: &[[f32; 2]]) -> String {
        let mut line = format!("hand {}", score);
        for [x, y] in landmarks {
            line += &format!(" {} {}", x, y);
        }
        line
    }

    #[test]
    fn parse() {
        let text = format!(
            "# two frames\n\nframe 640 480\n{}\n{}\n  frame 1280 720\n",
            hand_line(0.97, &test::OPEN_RIGHT_HAND),
            hand_line(0.2, &test::RIGHT_FIST),
        );
        let rec = Recording::parse(&text).unwrap();
        assert_eq!(rec.frames().len(), 2);
        assert_eq!(rec.frames()[0].resolution, Resolution::new(640, 480));
        assert_eq!(
            rec.frames()[0].hands,
            [
                RawHand::new(test::OPEN_RIGHT_HAND, 0.97),
                RawHand::new(test::RIGHT_FIST, 0.2)
            ]
        );
        assert!(rec.frames()[1].hands.is_empty());
    }

    #[test]
    fn display_parses_back() {
        let mut rec = Recording::new();
        rec.push_frame(test::resolution(), vec![test::open_right_hand_raw()]);
        rec.push_frame(Resolution::RES_720P, vec![]);
        assert_eq!(Recording::parse(&rec.to_string()).unwrap(), rec);
    }

    #[test]
    fn keeps_malformed_hands() {
        let rec = Recording::parse("frame 10 10\nhand 0.5 0.1 0.2 0.3 0.4\n").unwrap();
        assert_eq!(rec.frames()[0].hands[0].landmarks(), [[0.1, 0.2], [0.3, 0.4]]);
    }

    #[test]
    fn errors() {
        let line_of = |text: &str| match Recording::parse(text) {
            Err(Error::Recording { line, .. }) => line,
            other => panic!("unexpected result: {:?}", other),
        };
        assert_eq!(line_of("hand 0.5 0.1 0.2"), 1);
        assert_eq!(line_of("frame 10\n"), 1);
        assert_eq!(line_of("frame 10 10 10"), 1);
        assert_eq!(line_of("frame -1 10"), 1);
        assert_eq!(line_of("# c\nframe 10 10\nhand 0.5 0.1"), 3);
        assert_eq!(line_of("frame 10 10\nhand x"), 2);
        assert_eq!(line_of("frame 10 10\nhand 0.5 0.1 nope"), 2);
        assert_eq!(line_of("frame 10 10\n\npalm 0.5"), 3);
    }

    #[test]
    fn playback() {
        let mut rec = Recording::new();
        rec.push_frame(Resolution::new(64, 48), vec![test::open_right_hand_raw()]);
        rec.push_frame(Resolution::new(32, 16), vec![]);
        let mut playback = rec.into_playback();
        assert_eq!(playback.remaining(), 2);

        assert!(playback.detect(&RgbImage::new(1, 1)).is_err());

        let frame = playback.read().unwrap().unwrap();
        assert_eq!(frame.dimensions(), (64, 48));
        assert_eq!(
            playback.detect(&frame).unwrap(),
            [test::open_right_hand_raw()]
        );
        assert!(playback.detect(&frame).is_err());

        let frame = playback.read().unwrap().unwrap();
        assert_eq!(frame.dimensions(), (32, 16));
        assert!(playback.detect(&frame).unwrap().is_empty());

        assert!(playback.read().unwrap().is_none());
        assert_eq!(playback.remaining(), 0);
    }
}
