//! Gesture-controlled globe guessing game core.
//!
//! Turns per-frame hand landmarks from an external detector into discrete
//! gestures, and turns screen positions into latitude/longitude on a 3D
//! globe seen through a perspective camera.
//!
//! # Pipeline
//!
//! 1. A source (`ingest`) yields a `HandFrameSet` per detection cycle.
//! 2. `GestureRecognizer` classifies it, throttles repeats per gesture kind
//!    and dispatches events to the listeners registered with `on_gesture`.
//! 3. Listeners (`session::GameController`) project gesture positions with
//!    `geo::screen_to_geo` and drive a two-team `GameSession`.
//!
//! # Module Structure
//!
//! - `landmarks`: the 21-point hand model and validated frames
//! - `gesture`: classifier, throttle and listener bus
//! - `geo`: vectors, camera, ray casting and geographic conversions
//! - `session`: rounds, teams, scoring and the gesture wiring
//! - `ingest`: recorded and synthetic detection sources
//! - `config`: TOML + environment configuration

pub mod config;
pub mod error;
pub mod geo;
pub mod gesture;
pub mod ingest;
pub mod landmarks;
pub mod session;

pub use config::{GameConfig, GlobeSettings};
pub use error::GlobeError;
pub use geo::{
    geo_to_point3d, point3d_to_geo, screen_to_geo, screen_to_geo_or, GeoPoint, GlobeScene,
    PerspectiveCamera, ProjectionContext, Vec3,
};
pub use gesture::{
    ClassifierConfig, Gesture, GestureClassifier, GestureEvent, GestureKind, GestureRecognizer,
    SwipeDirection,
};
pub use landmarks::{HandFrame, HandFrameSet, Handedness, Landmark, NormalizedPoint};
pub use session::{GameController, GameSession, Question, RoundResult, SessionUpdate, Team};
