//! Hand landmark frames.
//!
//! A `HandFrame` is one detected hand: exactly 21 landmarks in the usual
//! hand-model order plus a handedness label. Frames are validated at
//! construction; there is no way to build one with the wrong landmark count,
//! so the classifier never sees a malformed hand.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::GlobeError;

/// Number of landmarks in the hand model.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane (z ignored).
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Position in normalised image space, `[0,1]` on both axes, y pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(a: &Landmark, b: &Landmark) -> Self {
        Self {
            x: (a.x + b.x) * 0.5,
            y: (a.y + b.y) * 0.5,
        }
    }
}

impl From<&Landmark> for NormalizedPoint {
    fn from(l: &Landmark) -> Self {
        Self { x: l.x, y: l.y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl std::fmt::Display for Handedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handedness::Left => f.write_str("Left"),
            Handedness::Right => f.write_str("Right"),
        }
    }
}

/// Landmark positions the classifier reads.
///
/// Defaults to the 21-point hand model. A custom map must keep every index
/// inside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkIndexMap {
    pub wrist: usize,
    pub thumb_ip: usize,
    pub thumb_tip: usize,
    pub index_pip: usize,
    pub index_tip: usize,
    pub middle_pip: usize,
    pub middle_tip: usize,
    pub ring_pip: usize,
    pub ring_tip: usize,
    pub pinky_pip: usize,
    pub pinky_tip: usize,
}

impl Default for LandmarkIndexMap {
    fn default() -> Self {
        Self {
            wrist: WRIST,
            thumb_ip: THUMB_IP,
            thumb_tip: THUMB_TIP,
            index_pip: INDEX_PIP,
            index_tip: INDEX_TIP,
            middle_pip: MIDDLE_PIP,
            middle_tip: MIDDLE_TIP,
            ring_pip: RING_PIP,
            ring_tip: RING_TIP,
            pinky_pip: PINKY_PIP,
            pinky_tip: PINKY_TIP,
        }
    }
}

impl LandmarkIndexMap {
    pub fn validate(&self) -> Result<(), GlobeError> {
        let entries = [
            ("wrist", self.wrist),
            ("thumb_ip", self.thumb_ip),
            ("thumb_tip", self.thumb_tip),
            ("index_pip", self.index_pip),
            ("index_tip", self.index_tip),
            ("middle_pip", self.middle_pip),
            ("middle_tip", self.middle_tip),
            ("ring_pip", self.ring_pip),
            ("ring_tip", self.ring_tip),
            ("pinky_pip", self.pinky_pip),
            ("pinky_tip", self.pinky_tip),
        ];
        for (name, idx) in entries {
            if idx >= LANDMARK_COUNT {
                return Err(GlobeError::StructuralInput(format!(
                    "landmark index {} = {} is outside the {}-point hand model",
                    name, idx, LANDMARK_COUNT
                )));
            }
        }
        Ok(())
    }
}

/// One detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
    handedness: Handedness,
}

impl HandFrame {
    /// Build a frame from detector output. Fails on wrong landmark count or
    /// non-finite coordinates.
    pub fn new(landmarks: &[Landmark], handedness: Handedness) -> Result<Self, GlobeError> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks.try_into().map_err(|_| {
            GlobeError::StructuralInput(format!(
                "hand frame must have {} landmarks, got {}",
                LANDMARK_COUNT,
                landmarks.len()
            ))
        })?;
        if let Some(idx) = landmarks.iter().position(|l| !l.is_finite()) {
            return Err(GlobeError::StructuralInput(format!(
                "landmark {} has a non-finite coordinate",
                idx
            )));
        }
        Ok(Self {
            landmarks,
            handedness,
        })
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Landmark at `idx`. Indices come from a validated `LandmarkIndexMap`.
    pub fn landmark(&self, idx: usize) -> &Landmark {
        &self.landmarks[idx]
    }
}

/// All hands from one detection cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrameSet {
    /// Capture time relative to session start.
    pub timestamp: Duration,
    /// Hands in detector slot order.
    pub hands: Vec<HandFrame>,
}

impl HandFrameSet {
    pub fn new(timestamp: Duration, hands: Vec<HandFrame>) -> Self {
        Self { timestamp, hands }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_landmark_count() {
        let short = vec![Landmark::default(); 20];
        let err = HandFrame::new(&short, Handedness::Left).unwrap_err();
        assert!(matches!(err, GlobeError::StructuralInput(_)));

        let long = vec![Landmark::default(); 22];
        assert!(HandFrame::new(&long, Handedness::Right).is_err());
    }

    #[test]
    fn rejects_non_finite_landmarks() {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[INDEX_TIP].y = f32::NAN;
        assert!(HandFrame::new(&points, Handedness::Left).is_err());
    }

    #[test]
    fn accepts_full_hand() {
        let points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        let hand = HandFrame::new(&points, Handedness::Right).expect("valid hand");
        assert_eq!(hand.handedness(), Handedness::Right);
        assert_eq!(hand.landmark(WRIST), &Landmark::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn index_map_validation() {
        assert!(LandmarkIndexMap::default().validate().is_ok());
        let bad = LandmarkIndexMap {
            pinky_tip: 21,
            ..LandmarkIndexMap::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 9.0);
        assert!((a.planar_distance(&b) - 0.5).abs() < 1e-6);
    }
}
