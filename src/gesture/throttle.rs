use std::collections::HashMap;
use std::time::Duration;

use super::event::GestureKind;

/// Per-kind minimum interval between accepted firings.
///
/// A suppressed candidate is dropped, not queued, and does not move the
/// clock. The first candidate of each kind always passes.
#[derive(Clone, Debug)]
pub struct GestureThrottle {
    interval: Duration,
    last_fired: HashMap<GestureKind, Duration>,
}

impl GestureThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: HashMap::new(),
        }
    }

    /// Returns true and records `now` when `kind` may fire.
    ///
    /// A timestamp earlier than the last firing means the clock restarted;
    /// the kind fires and its clock starts over from `now`.
    pub fn try_fire(&mut self, kind: GestureKind, now: Duration) -> bool {
        if let Some(&last) = self.last_fired.get(&kind) {
            if now < last {
                log::debug!(
                    "{} clock went back from {}ms to {}ms, restarting",
                    kind,
                    last.as_millis(),
                    now.as_millis()
                );
            } else {
                let elapsed = now - last;
                if elapsed < self.interval {
                    log::debug!(
                        "throttled {} ({}ms since last, need {}ms)",
                        kind,
                        elapsed.as_millis(),
                        self.interval.as_millis()
                    );
                    return false;
                }
            }
        }
        self.last_fired.insert(kind, now);
        true
    }

    pub fn last_fired(&self, kind: GestureKind) -> Option<Duration> {
        self.last_fired.get(&kind).copied()
    }
}
