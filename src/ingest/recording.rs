//! Recorded detection source.
//!
//! A recording is a JSON Lines file with one detection cycle per line:
//!
//! ```text
//! {"t_ms": 33, "hands": [{"handedness": "Right", "landmarks": [[0.5, 0.8, 0.0], ...]}]}
//! ```
//!
//! Landmarks may also be written as `{"x": .., "y": .., "z": ..}` objects.
//! Blank lines are skipped. A malformed line fails only that line; the
//! caller decides whether to keep reading.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GlobeError;
use crate::landmarks::{HandFrame, HandFrameSet, Handedness, Landmark};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub t_ms: u64,
    #[serde(default)]
    pub hands: Vec<HandRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub handedness: Handedness,
    pub landmarks: Vec<LandmarkRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LandmarkRecord {
    Triple([f32; 3]),
    Object(Landmark),
}

impl From<LandmarkRecord> for Landmark {
    fn from(record: LandmarkRecord) -> Self {
        match record {
            LandmarkRecord::Triple([x, y, z]) => Landmark::new(x, y, z),
            LandmarkRecord::Object(l) => l,
        }
    }
}

impl DetectionRecord {
    /// Validate into a frame set. Any malformed hand rejects the whole cycle.
    pub fn into_frame_set(self) -> Result<HandFrameSet, GlobeError> {
        let hands = self
            .hands
            .into_iter()
            .map(|hand| {
                let points: Vec<Landmark> = hand.landmarks.into_iter().map(Landmark::from).collect();
                HandFrame::new(&points, hand.handedness)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HandFrameSet::new(Duration::from_millis(self.t_ms), hands))
    }

    pub fn from_frame_set(frame: &HandFrameSet) -> Self {
        Self {
            t_ms: frame.timestamp.as_millis() as u64,
            hands: frame
                .hands
                .iter()
                .map(|hand| HandRecord {
                    handedness: hand.handedness(),
                    landmarks: hand
                        .landmarks()
                        .iter()
                        .map(|l| LandmarkRecord::Triple([l.x, l.y, l.z]))
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RecordingConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct RecordingStats {
    pub lines_read: u64,
    pub frames_emitted: u64,
    pub frames_rejected: u64,
}

/// Reads detection cycles from a JSON Lines recording.
pub struct RecordingSource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    stats: RecordingStats,
}

impl RecordingSource {
    pub fn open(config: RecordingConfig) -> Result<Self> {
        let file = File::open(&config.path)
            .with_context(|| format!("open recording {}", config.path.display()))?;
        Ok(Self {
            path: config.path,
            lines: BufReader::new(file).lines(),
            stats: RecordingStats::default(),
        })
    }

    /// Next detection cycle, `Ok(None)` at end of file.
    pub fn next_frame(&mut self) -> Result<Option<HandFrameSet>> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            let line = line.with_context(|| format!("read {}", self.path.display()))?;
            self.stats.lines_read += 1;
            if line.trim().is_empty() {
                continue;
            }
            let lineno = self.stats.lines_read;
            let parsed = serde_json::from_str::<DetectionRecord>(&line)
                .map_err(|e| anyhow!("{}:{}: invalid record: {}", self.path.display(), lineno, e))
                .and_then(|record| {
                    record
                        .into_frame_set()
                        .map_err(|e| anyhow!("{}:{}: {}", self.path.display(), lineno, e))
                });
            return match parsed {
                Ok(frame) => {
                    self.stats.frames_emitted += 1;
                    Ok(Some(frame))
                }
                Err(err) => {
                    self.stats.frames_rejected += 1;
                    Err(err)
                }
            };
        }
    }

    pub fn stats(&self) -> RecordingStats {
        self.stats.clone()
    }
}

/// Write frames as a JSON Lines recording.
pub fn write_recording(path: &Path, frames: &[HandFrameSet]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("create recording {}", path.display()))?;
    for frame in frames {
        let line = serde_json::to_string(&DetectionRecord::from_frame_set(frame))?;
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LANDMARK_COUNT;

    #[test]
    fn accepts_triples_and_objects() {
        let mut points = vec![serde_json::json!([0.5, 0.5, 0.0]); LANDMARK_COUNT];
        points[0] = serde_json::json!({"x": 0.1, "y": 0.2, "z": 0.3});
        let json = serde_json::json!({
            "t_ms": 40,
            "hands": [{"handedness": "Left", "landmarks": points}]
        });
        let record: DetectionRecord = serde_json::from_value(json).unwrap();
        let frame = record.into_frame_set().unwrap();
        assert_eq!(frame.timestamp, Duration::from_millis(40));
        assert_eq!(frame.hands[0].handedness(), Handedness::Left);
        assert_eq!(frame.hands[0].landmark(0), &Landmark::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn short_hand_rejects_the_record() {
        let json = serde_json::json!({
            "t_ms": 0,
            "hands": [{"handedness": "Right", "landmarks": [[0.0, 0.0, 0.0]]}]
        });
        let record: DetectionRecord = serde_json::from_value(json).unwrap();
        assert!(matches!(
            record.into_frame_set(),
            Err(GlobeError::StructuralInput(_))
        ));
    }

    #[test]
    fn missing_hands_means_empty_frame() {
        let record: DetectionRecord = serde_json::from_str(r#"{"t_ms": 7}"#).unwrap();
        assert!(record.into_frame_set().unwrap().is_empty());
    }
}
