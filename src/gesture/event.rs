use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::GlobeError;
use crate::landmarks::{Handedness, NormalizedPoint};

/// Gesture kinds the classifier can emit. Listeners register per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GestureKind {
    Pinch,
    Point,
    ThumbsUp,
    Clap,
    Swipe,
}

impl GestureKind {
    pub const ALL: [GestureKind; 5] = [
        GestureKind::Pinch,
        GestureKind::Point,
        GestureKind::ThumbsUp,
        GestureKind::Clap,
        GestureKind::Swipe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GestureKind::Pinch => "pinch",
            GestureKind::Point => "point",
            GestureKind::ThumbsUp => "thumbsUp",
            GestureKind::Clap => "clap",
            GestureKind::Swipe => "swipe",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GestureKind {
    type Err = GlobeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GestureKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| GlobeError::StructuralInput(format!("unknown gesture '{}'", s)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Payload of a fired gesture. Each variant carries only its own fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "gesture", rename_all = "camelCase")]
pub enum Gesture {
    /// Thumb and index tips touching; `at` is their midpoint.
    Pinch {
        handedness: Handedness,
        at: NormalizedPoint,
    },
    /// Index extended, other fingers folded; `at` is the index tip.
    Point {
        handedness: Handedness,
        at: NormalizedPoint,
    },
    ThumbsUp {
        handedness: Handedness,
    },
    Clap,
    Swipe {
        hand_slot: usize,
        handedness: Handedness,
        direction: SwipeDirection,
        /// Wrist speed in normalised units per second.
        speed: f32,
    },
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Pinch { .. } => GestureKind::Pinch,
            Gesture::Point { .. } => GestureKind::Point,
            Gesture::ThumbsUp { .. } => GestureKind::ThumbsUp,
            Gesture::Clap => GestureKind::Clap,
            Gesture::Swipe { .. } => GestureKind::Swipe,
        }
    }
}

/// A dispatched gesture together with the timestamp of the frame it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GestureEvent {
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: Duration,
    #[serde(flatten)]
    pub gesture: Gesture,
}

impl GestureEvent {
    pub fn new(timestamp: Duration, gesture: Gesture) -> Self {
        Self { timestamp, gesture }
    }

    pub fn kind(&self) -> GestureKind {
        self.gesture.kind()
    }
}

fn serialize_millis<S: serde::Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(value.as_millis() as u64)
}
