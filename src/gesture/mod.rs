//! Gesture recognition from hand-landmark frames.
//!
//! `GestureClassifier` turns one `HandFrameSet` into throttled gesture
//! events; `GestureBus` fans them out to listeners. `GestureRecognizer`
//! bundles both behind the `on_gesture` / `process` pair the game uses.

mod bus;
mod classifier;
mod event;
mod throttle;

pub use bus::{GestureBus, GestureListener};
pub use classifier::{
    ClassifierConfig, GestureClassifier, DEFAULT_CLAP_THRESHOLD, DEFAULT_PINCH_THRESHOLD,
    DEFAULT_POINT_EXTENSION, DEFAULT_SWIPE_SPEED, DEFAULT_THROTTLE,
};
pub use event::{Gesture, GestureEvent, GestureKind, SwipeDirection};
pub use throttle::GestureThrottle;

use crate::error::GlobeError;
use crate::landmarks::HandFrameSet;

#[derive(Debug)]
pub struct GestureRecognizer {
    classifier: GestureClassifier,
    bus: GestureBus,
}

impl GestureRecognizer {
    pub fn new(config: ClassifierConfig) -> Result<Self, GlobeError> {
        Ok(Self {
            classifier: GestureClassifier::new(config)?,
            bus: GestureBus::new(),
        })
    }

    pub fn on_gesture<F>(&mut self, kind: GestureKind, listener: F)
    where
        F: FnMut(&GestureEvent) + 'static,
    {
        self.bus.on_gesture(kind, listener);
    }

    /// Classify a frame and dispatch each surviving gesture to its listeners
    /// before returning. Returns the dispatched events.
    pub fn process(&mut self, frame: &HandFrameSet) -> Vec<GestureEvent> {
        let events = self.classifier.classify(frame);
        for event in &events {
            let ran = self.bus.dispatch(event);
            log::debug!(
                "{} at {}ms -> {} listener(s)",
                event.kind(),
                event.timestamp.as_millis(),
                ran
            );
        }
        events
    }
}
