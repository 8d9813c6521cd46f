//! Scripted synthetic hand detections.
//!
//! Plays a fixed performance of the game's gestures at a configurable frame
//! rate so the classifier and session can run without a camera. Landmark
//! jitter comes from a seeded RNG, so a given seed always yields the same
//! frames.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::landmarks::{HandFrame, HandFrameSet, Handedness, Landmark, LANDMARK_COUNT};

pub const DEFAULT_SYNTHETIC_FPS: u32 = 30;
pub const DEFAULT_JITTER: f32 = 0.002;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPose {
    Open,
    Fist,
    Point,
    Pinch,
    ThumbsUp,
}

type PoseTable = [(f32, f32); LANDMARK_COUNT];

// Offsets from the wrist in image units, fingers pointing up (negative y).
const FIST: PoseTable = [
    (0.0, 0.0),
    (-0.04, -0.03),
    (-0.06, -0.06),
    (-0.08, -0.09),
    (-0.09, -0.06),
    (-0.03, -0.10),
    (-0.03, -0.13),
    (-0.03, -0.11),
    (-0.03, -0.09),
    (0.0, -0.10),
    (0.0, -0.13),
    (0.0, -0.11),
    (0.0, -0.09),
    (0.025, -0.095),
    (0.025, -0.125),
    (0.025, -0.105),
    (0.025, -0.085),
    (0.05, -0.09),
    (0.05, -0.115),
    (0.05, -0.10),
    (0.05, -0.08),
];

const OPEN: PoseTable = [
    (0.0, 0.0),
    (-0.04, -0.03),
    (-0.07, -0.05),
    (-0.09, -0.08),
    (-0.12, -0.10),
    (-0.03, -0.10),
    (-0.03, -0.15),
    (-0.03, -0.19),
    (-0.03, -0.23),
    (0.0, -0.10),
    (0.0, -0.16),
    (0.0, -0.20),
    (0.0, -0.24),
    (0.025, -0.095),
    (0.025, -0.15),
    (0.025, -0.19),
    (0.025, -0.22),
    (0.05, -0.09),
    (0.05, -0.13),
    (0.05, -0.16),
    (0.05, -0.18),
];

fn pose_table(pose: HandPose) -> PoseTable {
    let mut table = match pose {
        HandPose::Open | HandPose::Pinch => OPEN,
        HandPose::Fist | HandPose::Point | HandPose::ThumbsUp => FIST,
    };
    match pose {
        HandPose::Point => {
            table[7] = (-0.03, -0.19);
            table[8] = (-0.03, -0.25);
        }
        HandPose::ThumbsUp => {
            table[3] = (-0.07, -0.10);
            table[4] = (-0.07, -0.16);
        }
        HandPose::Pinch => {
            table[3] = (-0.08, -0.09);
            table[4] = (-0.075, -0.12);
            table[6] = (-0.03, -0.14);
            table[7] = (-0.05, -0.15);
            table[8] = (-0.07, -0.13);
        }
        HandPose::Open | HandPose::Fist => {}
    }
    table
}

/// Landmarks for `pose` with the wrist at `wrist`.
pub fn pose_landmarks(pose: HandPose, wrist: (f32, f32)) -> Vec<Landmark> {
    pose_table(pose)
        .iter()
        .map(|&(dx, dy)| Landmark::new(wrist.0 + dx, wrist.1 + dy, 0.0))
        .collect()
}

/// One hand moving linearly from `from` to `to` over a segment.
#[derive(Clone, Copy, Debug)]
pub struct HandTrack {
    pub pose: HandPose,
    pub handedness: Handedness,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

impl HandTrack {
    fn still(pose: HandPose, handedness: Handedness, at: (f32, f32)) -> Self {
        Self {
            pose,
            handedness,
            from: at,
            to: at,
        }
    }

    fn moving(pose: HandPose, handedness: Handedness, from: (f32, f32), to: (f32, f32)) -> Self {
        Self {
            pose,
            handedness,
            from,
            to,
        }
    }

    fn wrist_at(&self, progress: f32) -> (f32, f32) {
        (
            self.from.0 + (self.to.0 - self.from.0) * progress,
            self.from.1 + (self.to.1 - self.from.1) * progress,
        )
    }
}

#[derive(Clone, Debug)]
pub struct Segment {
    pub duration: Duration,
    /// Hands in detector slot order; empty means nobody in view.
    pub hands: Vec<HandTrack>,
}

/// The stock performance: point to place a guess, pinch-drag it, thumbs up
/// to confirm, clap for a hint, then swipe right to the next round.
pub fn demo_script() -> Vec<Segment> {
    use HandPose::*;
    use Handedness::{Left, Right};

    let ms = Duration::from_millis;
    vec![
        Segment {
            duration: ms(600),
            hands: vec![HandTrack::still(Open, Right, (0.55, 0.72))],
        },
        Segment {
            duration: ms(600),
            hands: vec![HandTrack::still(Point, Right, (0.55, 0.72))],
        },
        Segment {
            duration: ms(200),
            hands: vec![HandTrack::still(Open, Right, (0.55, 0.72))],
        },
        Segment {
            duration: ms(1000),
            hands: vec![HandTrack::moving(Pinch, Right, (0.55, 0.72), (0.58, 0.70))],
        },
        Segment {
            duration: ms(400),
            hands: vec![HandTrack::still(Open, Right, (0.58, 0.70))],
        },
        Segment {
            duration: ms(600),
            hands: vec![HandTrack::still(ThumbsUp, Right, (0.58, 0.70))],
        },
        Segment {
            duration: ms(200),
            hands: vec![],
        },
        Segment {
            duration: ms(600),
            hands: vec![
                HandTrack::still(Open, Right, (0.58, 0.70)),
                HandTrack::still(Open, Left, (0.53, 0.70)),
            ],
        },
        Segment {
            duration: ms(1000),
            hands: vec![HandTrack::moving(Open, Right, (0.58, 0.70), (0.25, 0.70))],
        },
        Segment {
            duration: ms(300),
            hands: vec![HandTrack::moving(Open, Right, (0.25, 0.70), (0.85, 0.70))],
        },
        Segment {
            duration: ms(300),
            hands: vec![HandTrack::still(Open, Right, (0.85, 0.70))],
        },
    ]
}

#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    pub fps: u32,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Maximum per-coordinate landmark noise.
    pub jitter: f32,
    pub script: Vec<Segment>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_SYNTHETIC_FPS,
            seed: None,
            jitter: DEFAULT_JITTER,
            script: demo_script(),
        }
    }
}

pub struct SyntheticSource {
    config: SyntheticConfig,
    rng: StdRng,
    frame_index: u64,
    total: Duration,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Result<Self> {
        if config.fps == 0 {
            return Err(anyhow!("synthetic fps must be >= 1"));
        }
        if !(config.jitter.is_finite() && config.jitter >= 0.0) {
            return Err(anyhow!("synthetic jitter must be a non-negative number"));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let total = config.script.iter().map(|s| s.duration).sum();
        Ok(Self {
            config,
            rng,
            frame_index: 0,
            total,
        })
    }

    /// Length of the scripted performance.
    pub fn duration(&self) -> Duration {
        self.total
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frame_index
    }

    /// Next frame, `None` once the script is over.
    pub fn next_frame(&mut self) -> Option<HandFrameSet> {
        let timestamp =
            Duration::from_nanos(self.frame_index * 1_000_000_000 / u64::from(self.config.fps));
        if timestamp >= self.total {
            return None;
        }
        self.frame_index += 1;

        let mut segment_start = Duration::ZERO;
        let segment = self.config.script.iter().find(|segment| {
            let end = segment_start + segment.duration;
            if timestamp < end {
                return true;
            }
            segment_start = end;
            false
        })?;
        let progress = if segment.duration.is_zero() {
            0.0
        } else {
            (timestamp - segment_start).as_secs_f32() / segment.duration.as_secs_f32()
        };

        let tracks = segment.hands.clone();
        let hands = tracks
            .iter()
            .filter_map(|track| {
                let points: Vec<Landmark> = pose_landmarks(track.pose, track.wrist_at(progress))
                    .into_iter()
                    .map(|l| self.jittered(l))
                    .collect();
                // Pose tables always have the full landmark count.
                HandFrame::new(&points, track.handedness).ok()
            })
            .collect();
        Some(HandFrameSet::new(timestamp, hands))
    }

    fn jittered(&mut self, l: Landmark) -> Landmark {
        if self.config.jitter == 0.0 {
            return l;
        }
        let j = self.config.jitter;
        Landmark::new(
            l.x + self.rng.gen_range(-j..=j),
            l.y + self.rng.gen_range(-j..=j),
            l.z,
        )
    }
}

impl Iterator for SyntheticSource {
    type Item = HandFrameSet;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}
