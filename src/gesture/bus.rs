use std::collections::HashMap;

use super::event::{GestureEvent, GestureKind};

/// Callback invoked with each dispatched gesture of the kind it registered for.
pub type GestureListener = Box<dyn FnMut(&GestureEvent)>;

/// Registry of gesture listeners.
///
/// Listeners are kept per kind in registration order and run synchronously on
/// the caller's thread.
#[derive(Default)]
pub struct GestureBus {
    listeners: HashMap<GestureKind, Vec<GestureListener>>,
}

impl GestureBus {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Register a listener. Multiple listeners per kind are allowed.
    pub fn on_gesture<F>(&mut self, kind: GestureKind, listener: F)
    where
        F: FnMut(&GestureEvent) + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    /// Invoke every listener for the event's kind. Returns how many ran.
    pub fn dispatch(&mut self, event: &GestureEvent) -> usize {
        let Some(listeners) = self.listeners.get_mut(&event.kind()) else {
            return 0;
        };
        for listener in listeners.iter_mut() {
            listener(event);
        }
        listeners.len()
    }

    pub fn listener_count(&self, kind: GestureKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Drop all listeners for `kind`.
    pub fn clear(&mut self, kind: GestureKind) {
        self.listeners.remove(&kind);
    }
}

impl std::fmt::Debug for GestureBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        counts.sort();
        f.debug_struct("GestureBus")
            .field("listeners", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Gesture;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn dispatches_in_registration_order() {
        let mut bus = GestureBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let order = Rc::clone(&order);
            bus.on_gesture(GestureKind::Clap, move |_| order.borrow_mut().push(id));
        }

        let ran = bus.dispatch(&GestureEvent::new(Duration::ZERO, Gesture::Clap));
        assert_eq!(ran, 3);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn unregistered_kind_is_a_no_op() {
        let mut bus = GestureBus::new();
        bus.on_gesture(GestureKind::Pinch, |_| panic!("wrong kind"));
        assert_eq!(
            bus.dispatch(&GestureEvent::new(Duration::ZERO, Gesture::Clap)),
            0
        );
        assert_eq!(bus.listener_count(GestureKind::Pinch), 1);
        bus.clear(GestureKind::Pinch);
        assert_eq!(bus.listener_count(GestureKind::Pinch), 0);
    }
}
