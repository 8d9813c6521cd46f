//! Gesture -> session wiring.
//!
//! point places the guess, pinch drags it, thumbsUp confirms, clap asks for
//! a hint and a right swipe starts the next round.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use super::{GameSession, RoundResult, Team};
use crate::error::GlobeError;
use crate::geo::{screen_to_geo_or, FeedbackMarkers, GeoPoint, GlobeScene, Vec3};
use crate::gesture::{Gesture, GestureEvent, GestureKind, GestureRecognizer, SwipeDirection};
use crate::landmarks::NormalizedPoint;

/// What a gesture changed in the session.
///
/// Placement updates carry the guess marker's world position; confirmations
/// carry both feedback markers, taken at the globe's spin of that moment.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum SessionUpdate {
    GuessPlaced { at: GeoPoint, marker: Vec3 },
    GuessMoved { at: GeoPoint, marker: Vec3 },
    Confirmed { result: RoundResult, markers: FeedbackMarkers },
    Hint { text: Option<String> },
    NextRound { round: usize, team: Team, question: String },
    Ignored,
}

/// Apply one gesture to the session, projecting screen positions onto
/// `scene`. A projection miss falls back to (0, 0).
pub fn apply_gesture(
    session: &mut GameSession,
    scene: &GlobeScene,
    event: &GestureEvent,
) -> Result<SessionUpdate, GlobeError> {
    let update = match &event.gesture {
        Gesture::Point { at, .. } => {
            if session.guess().is_some() {
                return Ok(SessionUpdate::Ignored);
            }
            let geo = project(scene, at)?;
            if session.place_guess(geo) {
                SessionUpdate::GuessPlaced {
                    at: geo,
                    marker: scene.marker_position(geo),
                }
            } else {
                SessionUpdate::Ignored
            }
        }
        Gesture::Pinch { at, .. } => {
            if session.guess().is_none() {
                return Ok(SessionUpdate::Ignored);
            }
            let geo = project(scene, at)?;
            if session.move_guess(geo) {
                SessionUpdate::GuessMoved {
                    at: geo,
                    marker: scene.marker_position(geo),
                }
            } else {
                SessionUpdate::Ignored
            }
        }
        Gesture::ThumbsUp { .. } => match session.confirm() {
            Some(result) => confirmed(scene, result),
            None => SessionUpdate::Ignored,
        },
        Gesture::Clap => SessionUpdate::Hint {
            text: session.hint().map(str::to_string),
        },
        Gesture::Swipe {
            direction: SwipeDirection::Right,
            ..
        } => {
            session.next_round(event.timestamp);
            SessionUpdate::NextRound {
                round: session.round(),
                team: session.team(),
                question: session.current_question().label.clone(),
            }
        }
        Gesture::Swipe { .. } => SessionUpdate::Ignored,
    };
    Ok(update)
}

fn project(scene: &GlobeScene, at: &NormalizedPoint) -> Result<GeoPoint, GlobeError> {
    screen_to_geo_or(scene, f64::from(at.x), f64::from(at.y), GeoPoint::ORIGIN)
}

fn confirmed(scene: &GlobeScene, result: RoundResult) -> SessionUpdate {
    let markers = scene.feedback(result.guess, result.truth);
    SessionUpdate::Confirmed { result, markers }
}

/// Shared session + scene driven by recognizer listeners.
///
/// Listeners run inside `GestureRecognizer::process`; callers must not hold
/// a borrow of the session or scene across that call.
#[derive(Clone)]
pub struct GameController {
    session: Rc<RefCell<GameSession>>,
    scene: Rc<RefCell<GlobeScene>>,
    updates: Rc<RefCell<Vec<SessionUpdate>>>,
}

impl GameController {
    pub fn new(session: GameSession, scene: GlobeScene) -> Self {
        Self {
            session: Rc::new(RefCell::new(session)),
            scene: Rc::new(RefCell::new(scene)),
            updates: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register one listener per gesture kind on `recognizer`.
    pub fn bind(&self, recognizer: &mut GestureRecognizer) {
        for kind in GestureKind::ALL {
            let controller = self.clone();
            recognizer.on_gesture(kind, move |event| controller.handle(event));
        }
    }

    fn handle(&self, event: &GestureEvent) {
        let scene = self.scene.borrow();
        let mut session = self.session.borrow_mut();
        match apply_gesture(&mut session, &*scene, event) {
            Ok(SessionUpdate::Ignored) => {}
            Ok(update) => self.updates.borrow_mut().push(update),
            Err(err) => log::warn!("{} ignored: {}", event.kind(), err),
        }
    }

    /// Per-frame housekeeping: spin the globe and run the round timer.
    pub fn tick(&self, now: std::time::Duration) {
        let mut scene = self.scene.borrow_mut();
        scene.advance_frame();
        if let Some(result) = self.session.borrow_mut().tick(now) {
            self.updates.borrow_mut().push(confirmed(&scene, result));
        }
    }

    /// Take the updates produced since the last call.
    pub fn drain_updates(&self) -> Vec<SessionUpdate> {
        std::mem::take(&mut *self.updates.borrow_mut())
    }

    pub fn session(&self) -> std::cell::Ref<'_, GameSession> {
        self.session.borrow()
    }

    pub fn scene(&self) -> std::cell::Ref<'_, GlobeScene> {
        self.scene.borrow()
    }
}
