//! Turns provider output into per-hand finger states.
//!
//! [`HandDetector`] holds nothing but its configuration and finger rule. Every frame is processed
//! from scratch and the result is returned to the caller, so one detector can be shared between
//! threads that process different frames.

use image::RgbImage;

use crate::config::DetectorConfig;
use crate::fingers::FingerUpRule;
use crate::frame::{FrameResult, HandResult};
use crate::geometry::{self, Resolution};
use crate::handedness;
use crate::landmark::RawHand;
use crate::provider::LandmarkProvider;
use crate::timer::Timer;
use crate::Result;

pub struct HandDetector {
    config: DetectorConfig,
    rule: Box<dyn FingerUpRule>,
    t_process: Timer,
}

impl HandDetector {
    /// Creates a detector using the finger rule selected in `config`.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let rule = config.selected_finger_rule().build();
        Self::with_rule(config, rule)
    }

    /// Creates a detector using a custom [`FingerUpRule`], ignoring the rule selected in
    /// `config`.
    pub fn with_rule(config: DetectorConfig, rule: Box<dyn FingerUpRule>) -> Result<Self> {
        config.validate()?;
        log::debug!("creating hand detector with {:?}", config);
        Ok(Self {
            config,
            rule,
            t_process: Timer::new("process"),
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Runs the landmark provider on `frame` and processes the hands it finds.
    pub fn detect<P: LandmarkProvider + ?Sized>(
        &self,
        provider: &mut P,
        frame: &RgbImage,
    ) -> Result<FrameResult> {
        let hands = provider.detect(frame)?;
        self.process(&hands, Resolution::new(frame.width(), frame.height()))
    }

    /// Processes the hands reported for a frame of the given resolution.
    ///
    /// Hands beyond the configured maximum are ignored. If any hand does not have exactly 21
    /// landmarks, the whole frame is rejected with [`Error::LandmarkCount`].
    ///
    /// [`Error::LandmarkCount`]: crate::Error::LandmarkCount
    pub fn process(&self, hands: &[RawHand], resolution: Resolution) -> Result<FrameResult> {
        let _guard = self.t_process.start();

        let max = self.config.max_hand_count();
        if hands.len() > max {
            log::debug!(
                "provider reported {} hands, only processing the first {}",
                hands.len(),
                max
            );
        }

        let hands = hands
            .iter()
            .take(max)
            .map(|hand| self.process_hand(hand, resolution))
            .collect::<Result<Vec<_>>>()?;
        Ok(FrameResult { resolution, hands })
    }

    fn process_hand(&self, hand: &RawHand, resolution: Resolution) -> Result<HandResult> {
        let (keypoints, bounding_box) = geometry::extract(hand.landmarks(), resolution)?;

        let provider_handedness = hand.handedness();
        let handedness = if self.config.uses_geometric_handedness() {
            let geometric = handedness::resolve(&self.rule.upright(&keypoints));
            if geometric != provider_handedness {
                log::trace!(
                    "geometric handedness {:?} overrides provider's {:?}",
                    geometric,
                    provider_handedness
                );
            }
            geometric
        } else {
            provider_handedness
        };

        let fingers = self.rule.fingers_up(&keypoints, handedness);
        log::trace!(
            "{:?} hand in {:?}: fingers={:?}",
            handedness,
            bounding_box,
            fingers
        );

        Ok(HandResult {
            keypoints,
            bounding_box,
            handedness,
            provider_handedness,
            fingers,
        })
    }

    /// Returns profiling timers for frame processing.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_process].into_iter()
    }
}
