//! Detector configuration.

use std::env;

use crate::fingers::FingerRule;
use crate::{Error, Result};

const ENV_VAR_FINGER_RULE: &str = "HANDSIGN_FINGER_RULE";
const ENV_VAR_HANDEDNESS: &str = "HANDSIGN_HANDEDNESS";
const ENV_VAR_MAX_HANDS: &str = "HANDSIGN_MAX_HANDS";

/// Options for a [`HandDetector`](crate::detector::HandDetector) and the landmark provider
/// feeding it.
///
/// The confidence thresholds and the static image mode are consumed by the landmark provider
/// when it is created. The detector itself only enforces `max_hands` and uses the handedness and
/// finger rule selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    static_image_mode: bool,
    max_hands: usize,
    detection_confidence: f32,
    tracking_confidence: f32,
    use_geometric_handedness: bool,
    finger_rule: FingerRule,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            static_image_mode: false,
            max_hands: 2,
            detection_confidence: 0.85,
            tracking_confidence: 0.7,
            use_geometric_handedness: true,
            finger_rule: FingerRule::VerticalHeuristic,
        }
    }
}

impl DetectorConfig {
    /// Slightly more permissive detection threshold, used for live finger counting.
    pub fn production() -> Self {
        Self::default()
            .detection_confidence(0.75)
            .tracking_confidence(0.7)
    }

    /// Treats every frame as an unrelated still image instead of a video stream.
    pub fn static_image_mode(mut self, enabled: bool) -> Self {
        self.static_image_mode = enabled;
        self
    }

    /// Sets the maximum number of hands processed per frame. Must be at least 1.
    pub fn max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    /// Sets the minimum confidence for a hand to be detected, in `(0, 1]`.
    ///
    /// Higher values produce fewer false positives but miss more hands.
    pub fn detection_confidence(mut self, confidence: f32) -> Self {
        self.detection_confidence = confidence;
        self
    }

    /// Sets the minimum confidence for a hand to keep being tracked, in `(0, 1]`.
    pub fn tracking_confidence(mut self, confidence: f32) -> Self {
        self.tracking_confidence = confidence;
        self
    }

    /// Selects between the geometric handedness heuristic (`true`) and the provider's own
    /// classification (`false`) for the thumb rule.
    pub fn use_geometric_handedness(mut self, enabled: bool) -> Self {
        self.use_geometric_handedness = enabled;
        self
    }

    pub fn finger_rule(mut self, rule: FingerRule) -> Self {
        self.finger_rule = rule;
        self
    }

    pub fn is_static_image_mode(&self) -> bool {
        self.static_image_mode
    }

    pub fn max_hand_count(&self) -> usize {
        self.max_hands
    }

    pub fn min_detection_confidence(&self) -> f32 {
        self.detection_confidence
    }

    pub fn min_tracking_confidence(&self) -> f32 {
        self.tracking_confidence
    }

    pub fn uses_geometric_handedness(&self) -> bool {
        self.use_geometric_handedness
    }

    pub fn selected_finger_rule(&self) -> FingerRule {
        self.finger_rule
    }

    /// Checks that all values are in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_hands == 0 {
            return Err(Error::Config("`max_hands` must be at least 1".into()));
        }
        for (name, value) in [
            ("detection_confidence", self.detection_confidence),
            ("tracking_confidence", self.tracking_confidence),
        ] {
            // Also rejects NaN.
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::Config(format!(
                    "`{}` must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Applies overrides from the `HANDSIGN_*` environment variables.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(rule) = lookup(ENV_VAR_FINGER_RULE) {
            log::debug!("override: `{}` is set to '{}'", ENV_VAR_FINGER_RULE, rule);
            self.finger_rule = rule.parse()?;
        }
        if let Some(source) = lookup(ENV_VAR_HANDEDNESS) {
            log::debug!("override: `{}` is set to '{}'", ENV_VAR_HANDEDNESS, source);
            self.use_geometric_handedness = match &*source {
                "geometric" => true,
                "provider" => false,
                _ => {
                    return Err(Error::Config(format!(
                        "`{}` must be 'geometric' or 'provider', got '{}'",
                        ENV_VAR_HANDEDNESS, source
                    )))
                }
            };
        }
        if let Some(max) = lookup(ENV_VAR_MAX_HANDS) {
            log::debug!("override: `{}` is set to '{}'", ENV_VAR_MAX_HANDS, max);
            self.max_hands = max.parse().map_err(|_| {
                Error::Config(format!(
                    "`{}` must be a positive integer, got '{}'",
                    ENV_VAR_MAX_HANDS, max
                ))
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults() {
        let config = DetectorConfig::default();
        assert!(!config.is_static_image_mode());
        assert_eq!(config.max_hand_count(), 2);
        assert_eq!(config.min_detection_confidence(), 0.85);
        assert_eq!(config.min_tracking_confidence(), 0.7);
        assert!(config.uses_geometric_handedness());
        assert_eq!(config.selected_finger_rule(), FingerRule::VerticalHeuristic);
        config.validate().unwrap();

        let production = DetectorConfig::production();
        assert_eq!(production.min_detection_confidence(), 0.75);
        assert_eq!(production.min_tracking_confidence(), 0.7);
        production.validate().unwrap();
    }

    #[test]
    fn validation() {
        assert!(DetectorConfig::default().max_hands(0).validate().is_err());
        assert!(DetectorConfig::default()
            .detection_confidence(0.0)
            .validate()
            .is_err());
        assert!(DetectorConfig::default()
            .tracking_confidence(1.01)
            .validate()
            .is_err());
        assert!(DetectorConfig::default()
            .tracking_confidence(f32::NAN)
            .validate()
            .is_err());
        DetectorConfig::default()
            .detection_confidence(1.0)
            .max_hands(1)
            .validate()
            .unwrap();
    }

    fn overrides(vars: &[(&str, &str)]) -> Result<DetectorConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DetectorConfig::default().apply_overrides(|var| vars.get(var).cloned())
    }

    #[test]
    fn env_overrides() {
        assert_eq!(overrides(&[]).unwrap(), DetectorConfig::default());

        let config = overrides(&[
            ("HANDSIGN_FINGER_RULE", "angle"),
            ("HANDSIGN_HANDEDNESS", "provider"),
            ("HANDSIGN_MAX_HANDS", "4"),
        ])
        .unwrap();
        assert_eq!(config.selected_finger_rule(), FingerRule::AngleCorrected);
        assert!(!config.uses_geometric_handedness());
        assert_eq!(config.max_hand_count(), 4);

        assert!(overrides(&[("HANDSIGN_FINGER_RULE", "sideways")]).is_err());
        assert!(overrides(&[("HANDSIGN_HANDEDNESS", "both")]).is_err());
        assert!(overrides(&[("HANDSIGN_MAX_HANDS", "-1")]).is_err());
    }
}
