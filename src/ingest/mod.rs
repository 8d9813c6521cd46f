//! Hand detection sources.
//!
//! Sources produce `HandFrameSet`s for the classifier:
//! - recorded detections (JSON Lines, one cycle per line)
//! - a scripted synthetic performance (demos, tests)
//!
//! The live camera + landmark model pipeline stays outside this crate; it
//! only has to emit the same records.
//!
//! Sources validate every hand before handing it on. A malformed cycle is
//! reported as an error for that cycle and never reaches classification.

pub mod recording;
pub mod synthetic;

pub use recording::{
    write_recording, DetectionRecord, HandRecord, LandmarkRecord, RecordingConfig,
    RecordingSource, RecordingStats,
};
pub use synthetic::{
    demo_script, pose_landmarks, HandPose, HandTrack, Segment, SyntheticConfig, SyntheticSource,
};
