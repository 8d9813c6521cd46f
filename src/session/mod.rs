//! Headless game session.
//!
//! Two teams take turns guessing the location of a question on the globe.
//! A round runs until the guess is confirmed or the round timer runs out;
//! confirmation reveals the true location and the great-circle distance.

mod controller;

pub use controller::{apply_gesture, GameController, SessionUpdate};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::geo::GeoPoint;

pub const DEFAULT_ROUND_DURATION: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Red => f.write_str("red"),
            Team::Blue => f.write_str("blue"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub hint: Option<String>,
}

impl Question {
    pub fn new(label: &str, lat: f64, lng: f64) -> Self {
        Self {
            label: label.to_string(),
            lat,
            lng,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(anyhow!("question label must not be empty"));
        }
        if !(self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)) {
            return Err(anyhow!(
                "question '{}' latitude {} is outside [-90, 90]",
                self.label,
                self.lat
            ));
        }
        if !(self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng)) {
            return Err(anyhow!(
                "question '{}' longitude {} is outside [-180, 180]",
                self.label,
                self.lng
            ));
        }
        Ok(())
    }
}

/// Built-in question set used when no config provides one.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new("Gent", 51.0543, 3.7174).with_hint("Europe, on the Scheldt"),
        Question::new("Tokyo", 35.6762, 139.6503).with_hint("East Asia, an island nation"),
        Question::new("Nairobi", -1.2921, 36.8219).with_hint("East Africa, near the equator"),
        Question::new("Lima", -12.0464, -77.0428).with_hint("South America, Pacific coast"),
        Question::new("Reykjavik", 64.1466, -21.9426).with_hint("North Atlantic island"),
        Question::new("Sydney", -33.8688, 151.2093).with_hint("Oceania, a harbour city"),
    ]
}

pub fn validate_questions(questions: &[Question]) -> Result<()> {
    if questions.is_empty() {
        return Err(anyhow!("at least one question is required"));
    }
    questions.iter().try_for_each(Question::validate)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Guessing,
    Feedback,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundResult {
    pub round: usize,
    pub team: Team,
    pub question: String,
    pub guess: GeoPoint,
    pub truth: GeoPoint,
    pub distance_km: f64,
    /// True when the round timer confirmed the guess.
    pub timed_out: bool,
}

#[derive(Debug)]
pub struct GameSession {
    questions: Vec<Question>,
    question_index: usize,
    round: usize,
    team: Team,
    phase: RoundPhase,
    guess: Option<GeoPoint>,
    round_started: Duration,
    round_duration: Duration,
    history: Vec<RoundResult>,
}

impl GameSession {
    pub fn new(questions: Vec<Question>, round_duration: Duration, now: Duration) -> Result<Self> {
        validate_questions(&questions)?;
        if round_duration.is_zero() {
            return Err(anyhow!("round duration must be greater than zero"));
        }
        let session = Self {
            questions,
            question_index: 0,
            round: 1,
            team: Team::Red,
            phase: RoundPhase::Guessing,
            guess: None,
            round_started: now,
            round_duration,
            history: Vec::new(),
        };
        log::info!(
            "round {} for team {}: find {}",
            session.round,
            session.team,
            session.current_question().label
        );
        Ok(session)
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.question_index]
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn guess(&self) -> Option<GeoPoint> {
        self.guess
    }

    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }

    /// Time left on the round timer; zero once feedback is showing.
    pub fn remaining(&self, now: Duration) -> Duration {
        if self.phase == RoundPhase::Feedback {
            return Duration::ZERO;
        }
        let elapsed = now.saturating_sub(self.round_started);
        self.round_duration.saturating_sub(elapsed)
    }

    /// Place the first guess of the round. Ignored once a guess exists.
    pub fn place_guess(&mut self, at: GeoPoint) -> bool {
        if self.phase != RoundPhase::Guessing || self.guess.is_some() {
            return false;
        }
        self.guess = Some(at);
        true
    }

    /// Drag an existing guess. Ignored when nothing is placed yet.
    pub fn move_guess(&mut self, at: GeoPoint) -> bool {
        if self.phase != RoundPhase::Guessing || self.guess.is_none() {
            return false;
        }
        self.guess = Some(at);
        true
    }

    /// Lock in the guess (or the origin when none was placed) and reveal
    /// the answer. Returns `None` when the round is already in feedback.
    pub fn confirm(&mut self) -> Option<RoundResult> {
        self.finish_round(false)
    }

    /// Advance the round timer; confirms automatically when it runs out.
    pub fn tick(&mut self, now: Duration) -> Option<RoundResult> {
        if self.phase == RoundPhase::Guessing && self.remaining(now).is_zero() {
            return self.finish_round(true);
        }
        None
    }

    /// Move to the next question and hand the turn to the other team.
    /// An unconfirmed round is skipped without a result.
    pub fn next_round(&mut self, now: Duration) {
        if self.phase == RoundPhase::Guessing {
            log::info!("round {} skipped by team {}", self.round, self.team);
        }
        self.question_index = (self.question_index + 1) % self.questions.len();
        self.round += 1;
        self.team = self.team.other();
        self.phase = RoundPhase::Guessing;
        self.guess = None;
        self.round_started = now;
        log::info!(
            "round {} for team {}: find {}",
            self.round,
            self.team,
            self.current_question().label
        );
    }

    pub fn hint(&self) -> Option<&str> {
        self.current_question().hint.as_deref()
    }

    /// Sum of guess distances over all finished rounds of `team`.
    pub fn team_total_km(&self, team: Team) -> f64 {
        self.history
            .iter()
            .filter(|result| result.team == team)
            .map(|result| result.distance_km)
            .sum()
    }

    fn finish_round(&mut self, timed_out: bool) -> Option<RoundResult> {
        if self.phase != RoundPhase::Guessing {
            return None;
        }
        let truth = self.current_question().location();
        let label = self.current_question().label.clone();
        let guess = *self.guess.get_or_insert(GeoPoint::ORIGIN);
        let result = RoundResult {
            round: self.round,
            team: self.team,
            question: label,
            guess,
            truth,
            distance_km: truth.distance_km(&guess),
            timed_out,
        };
        log::info!(
            "team {} was {:.1} km from {}{}",
            result.team,
            result.distance_km,
            result.question,
            if timed_out { " (time up)" } else { "" }
        );
        self.phase = RoundPhase::Feedback;
        self.history.push(result.clone());
        Some(result)
    }
}
