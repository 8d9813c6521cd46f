//! Per-frame gesture classification.
//!
//! Feature order within a frame is fixed: per hand pinch, point, thumbsUp;
//! then clap across hands; then swipe per hand. Every candidate passes the
//! throttle before it becomes an event.

use std::collections::HashMap;
use std::time::Duration;

use super::event::{Gesture, GestureEvent, SwipeDirection};
use super::throttle::GestureThrottle;
use crate::error::GlobeError;
use crate::landmarks::{HandFrame, HandFrameSet, LandmarkIndexMap, NormalizedPoint};

pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.05;
pub const DEFAULT_POINT_EXTENSION: f32 = 0.10;
pub const DEFAULT_CLAP_THRESHOLD: f32 = 0.10;
pub const DEFAULT_SWIPE_SPEED: f32 = 1.5;
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(500);

/// Thresholds are in normalised image units; swipe speed in units per second.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierConfig {
    pub pinch_threshold: f32,
    pub point_extension: f32,
    pub clap_threshold: f32,
    pub swipe_speed: f32,
    pub throttle: Duration,
    pub indices: LandmarkIndexMap,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            point_extension: DEFAULT_POINT_EXTENSION,
            clap_threshold: DEFAULT_CLAP_THRESHOLD,
            swipe_speed: DEFAULT_SWIPE_SPEED,
            throttle: DEFAULT_THROTTLE,
            indices: LandmarkIndexMap::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), GlobeError> {
        let thresholds = [
            ("pinch_threshold", self.pinch_threshold),
            ("point_extension", self.point_extension),
            ("clap_threshold", self.clap_threshold),
            ("swipe_speed", self.swipe_speed),
        ];
        for (name, value) in thresholds {
            if !(value.is_finite() && value > 0.0) {
                return Err(GlobeError::StructuralInput(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.throttle.is_zero() {
            return Err(GlobeError::StructuralInput(
                "throttle interval must be positive".to_string(),
            ));
        }
        self.indices.validate()
    }
}

#[derive(Clone, Copy, Debug)]
struct WristSample {
    x: f32,
    at: Duration,
}

/// Stateful classifier: owns the throttle clock and the per-slot wrist
/// tracker used for swipe speed.
#[derive(Debug)]
pub struct GestureClassifier {
    config: ClassifierConfig,
    throttle: GestureThrottle,
    last_wrist: HashMap<usize, WristSample>,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, GlobeError> {
        config.validate()?;
        let throttle = GestureThrottle::new(config.throttle);
        Ok(Self {
            config,
            throttle,
            last_wrist: HashMap::new(),
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one detection cycle and return the gestures that survived
    /// the throttle, in feature order.
    pub fn classify(&mut self, frame: &HandFrameSet) -> Vec<GestureEvent> {
        let mut fired = Vec::new();
        if frame.is_empty() {
            return fired;
        }
        let now = frame.timestamp;

        for hand in &frame.hands {
            for gesture in self.hand_candidates(hand) {
                self.admit(now, gesture, &mut fired);
            }
        }

        if let Some(gesture) = self.clap_candidate(&frame.hands) {
            self.admit(now, gesture, &mut fired);
        }

        for (slot, hand) in frame.hands.iter().enumerate() {
            if let Some(gesture) = self.swipe_candidate(slot, hand, now) {
                self.admit(now, gesture, &mut fired);
            }
        }

        fired
    }

    fn admit(&mut self, now: Duration, gesture: Gesture, fired: &mut Vec<GestureEvent>) {
        if self.throttle.try_fire(gesture.kind(), now) {
            fired.push(GestureEvent::new(now, gesture));
        }
    }

    fn hand_candidates(&self, hand: &HandFrame) -> Vec<Gesture> {
        let idx = &self.config.indices;
        let handedness = hand.handedness();
        let thumb_tip = hand.landmark(idx.thumb_tip);
        let thumb_ip = hand.landmark(idx.thumb_ip);
        let index_tip = hand.landmark(idx.index_tip);
        let index_pip = hand.landmark(idx.index_pip);

        let pinch_dist = thumb_tip.planar_distance(index_tip);
        let index_extension = index_tip.planar_distance(index_pip);
        let folded = self.others_folded(hand);
        let thumb_up = thumb_tip.y < thumb_ip.y;
        log::trace!(
            "{} hand: pinch_dist={:.3} index_ext={:.3} folded={} thumb_up={}",
            handedness,
            pinch_dist,
            index_extension,
            folded,
            thumb_up
        );

        let mut candidates = Vec::with_capacity(3);
        if pinch_dist < self.config.pinch_threshold {
            candidates.push(Gesture::Pinch {
                handedness,
                at: NormalizedPoint::midpoint(thumb_tip, index_tip),
            });
        }
        if index_extension > self.config.point_extension && folded {
            candidates.push(Gesture::Point {
                handedness,
                at: NormalizedPoint::from(index_tip),
            });
        }
        if thumb_up && folded {
            candidates.push(Gesture::ThumbsUp { handedness });
        }
        candidates
    }

    /// Middle, ring and pinky tips below their PIP joints (image y grows down).
    fn others_folded(&self, hand: &HandFrame) -> bool {
        let idx = &self.config.indices;
        [
            (idx.middle_tip, idx.middle_pip),
            (idx.ring_tip, idx.ring_pip),
            (idx.pinky_tip, idx.pinky_pip),
        ]
        .iter()
        .all(|&(tip, pip)| hand.landmark(tip).y > hand.landmark(pip).y)
    }

    fn clap_candidate(&self, hands: &[HandFrame]) -> Option<Gesture> {
        let [a, b] = hands else {
            return None;
        };
        let wrist = self.config.indices.wrist;
        let dist = a.landmark(wrist).planar_distance(b.landmark(wrist));
        (dist < self.config.clap_threshold).then_some(Gesture::Clap)
    }

    fn swipe_candidate(&mut self, slot: usize, hand: &HandFrame, now: Duration) -> Option<Gesture> {
        let x = hand.landmark(self.config.indices.wrist).x;
        let previous = self.last_wrist.insert(slot, WristSample { x, at: now })?;

        let elapsed = now.checked_sub(previous.at)?;
        if elapsed.is_zero() {
            return None;
        }
        let dx = x - previous.x;
        let speed = dx.abs() / elapsed.as_secs_f32();
        if speed <= self.config.swipe_speed {
            return None;
        }
        let direction = if dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        Some(Gesture::Swipe {
            hand_slot: slot,
            handedness: hand.handedness(),
            direction,
            speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureKind;
    use crate::landmarks::{Handedness, Landmark, LANDMARK_COUNT, WRIST};

    fn hand_at_wrist(x: f32, y: f32) -> HandFrame {
        // Neutral hand: fingers extended upwards, thumb far from index.
        let mut points = vec![Landmark::new(x, y, 0.0); LANDMARK_COUNT];
        for (tip, pip) in [(8, 6), (12, 10), (16, 14), (20, 18)] {
            points[pip] = Landmark::new(x, y - 0.10, 0.0);
            points[tip] = Landmark::new(x, y - 0.15, 0.0);
        }
        points[3] = Landmark::new(x - 0.10, y - 0.05, 0.0);
        points[4] = Landmark::new(x - 0.12, y - 0.04, 0.0);
        points[WRIST] = Landmark::new(x, y, 0.0);
        HandFrame::new(&points, Handedness::Right).unwrap()
    }

    fn frame(ms: u64, hands: Vec<HandFrame>) -> HandFrameSet {
        HandFrameSet::new(Duration::from_millis(ms), hands)
    }

    #[test]
    fn neutral_hand_fires_nothing() {
        let mut classifier = GestureClassifier::new(ClassifierConfig::default()).unwrap();
        assert!(classifier.classify(&frame(0, vec![hand_at_wrist(0.5, 0.8)])).is_empty());
    }

    #[test]
    fn first_sighting_never_swipes() {
        let mut classifier = GestureClassifier::new(ClassifierConfig::default()).unwrap();
        let events = classifier.classify(&frame(100, vec![hand_at_wrist(0.9, 0.8)]));
        assert!(events.iter().all(|e| e.kind() != GestureKind::Swipe));
    }

    #[test]
    fn zero_elapsed_time_is_not_a_swipe() {
        let mut classifier = GestureClassifier::new(ClassifierConfig::default()).unwrap();
        classifier.classify(&frame(100, vec![hand_at_wrist(0.2, 0.8)]));
        let events = classifier.classify(&frame(100, vec![hand_at_wrist(0.6, 0.8)]));
        assert!(events.is_empty());
    }

    #[test]
    fn empty_frame_keeps_swipe_history() {
        let mut classifier = GestureClassifier::new(ClassifierConfig::default()).unwrap();
        classifier.classify(&frame(0, vec![hand_at_wrist(0.2, 0.8)]));
        assert!(classifier.classify(&frame(50, vec![])).is_empty());
        let events = classifier.classify(&frame(100, vec![hand_at_wrist(0.5, 0.8)]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), GestureKind::Swipe);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ClassifierConfig {
            swipe_speed: 0.0,
            ..ClassifierConfig::default()
        };
        assert!(GestureClassifier::new(config).is_err());
    }

    #[test]
    fn zero_throttle_interval_is_rejected() {
        let config = ClassifierConfig {
            throttle: Duration::ZERO,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GlobeError::StructuralInput(_))
        ));
        assert!(GestureClassifier::new(config).is_err());
    }
}
