//! globe_session - play a gesture-driven globe session from a detection source
//!
//! This tool:
//! 1. Loads the game config (TOML via GLOBE_CONFIG or --config, env overrides)
//! 2. Reads hand detections from a JSONL recording or the synthetic script
//! 3. Classifies gestures and drives the two-team session through listeners
//! 4. Logs round updates and prints a per-team summary

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use globe_gestures::ingest::{RecordingConfig, RecordingSource, SyntheticConfig, SyntheticSource};
use globe_gestures::{
    GameConfig, GameController, GameSession, GestureKind, GestureRecognizer, HandFrameSet,
    SessionUpdate, Team,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSONL detection recording; the synthetic script is played when omitted.
    #[arg(long)]
    recording: Option<PathBuf>,
    /// Config file (TOML). Defaults to GLOBE_CONFIG when set.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Frames per second for the synthetic source.
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Deterministic seed for synthetic landmark jitter.
    #[arg(long)]
    seed: Option<u64>,
    /// Print every session update as a JSON line on stdout.
    #[arg(long)]
    json: bool,
}

enum Source {
    Recording(RecordingSource),
    Synthetic(SyntheticSource),
}

impl Source {
    fn open(args: &Args) -> Result<Self> {
        match &args.recording {
            Some(path) => Ok(Source::Recording(RecordingSource::open(RecordingConfig {
                path: path.clone(),
            })?)),
            None => Ok(Source::Synthetic(SyntheticSource::new(SyntheticConfig {
                fps: args.fps,
                seed: args.seed,
                ..SyntheticConfig::default()
            })?)),
        }
    }

    fn next_frame(&mut self) -> Result<Option<HandFrameSet>> {
        match self {
            Source::Recording(source) => source.next_frame(),
            Source::Synthetic(source) => Ok(source.next_frame()),
        }
    }

    fn emitted(&self) -> u64 {
        match self {
            Source::Recording(source) => source.stats().frames_emitted,
            Source::Synthetic(source) => source.frames_emitted(),
        }
    }

    fn rejected(&self) -> u64 {
        match self {
            Source::Recording(source) => source.stats().frames_rejected,
            Source::Synthetic(_) => 0,
        }
    }
}

#[derive(Serialize)]
struct Summary {
    frames: u64,
    frames_processed: u64,
    frames_rejected: u64,
    gestures: u64,
    rounds_scored: usize,
    red_total_km: f64,
    blue_total_km: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::load()?,
    };
    let mut recognizer = GestureRecognizer::new(cfg.gestures.clone())
        .map_err(|e| anyhow!("gesture recognizer: {}", e))?;
    for kind in GestureKind::ALL {
        recognizer.on_gesture(kind, |event| {
            log::info!("gesture {} at {:?}", event.kind(), event.timestamp)
        });
    }

    let mut source = Source::open(&args)?;
    let mut controller: Option<GameController> = None;
    let mut processed = 0u64;
    let mut gestures = 0u64;

    loop {
        let rejected_before = source.rejected();
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(err) if source.rejected() > rejected_before => {
                log::warn!("skipping detection: {:#}", err);
                continue;
            }
            Err(err) => return Err(err),
        };
        processed += 1;

        // The session clock starts at the first detection.
        if controller.is_none() {
            let session =
                GameSession::new(cfg.questions.clone(), cfg.round_duration, frame.timestamp)?;
            let game = GameController::new(session, cfg.globe.scene()?);
            game.bind(&mut recognizer);
            controller = Some(game);
        }
        let Some(game) = &controller else {
            continue;
        };

        gestures += recognizer.process(&frame).len() as u64;
        game.tick(frame.timestamp);
        for update in game.drain_updates() {
            report(&update, frame.timestamp, args.json)?;
        }
    }

    let summary = match &controller {
        Some(game) => {
            let session = game.session();
            Summary {
                frames: source.emitted(),
                frames_processed: processed,
                frames_rejected: source.rejected(),
                gestures,
                rounds_scored: session.history().len(),
                red_total_km: session.team_total_km(Team::Red),
                blue_total_km: session.team_total_km(Team::Blue),
            }
        }
        None => Summary {
            frames: source.emitted(),
            frames_processed: processed,
            frames_rejected: source.rejected(),
            gestures,
            rounds_scored: 0,
            red_total_km: 0.0,
            blue_total_km: 0.0,
        },
    };

    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "{} frames from source ({} processed, {} rejected), {} gestures, {} rounds scored",
            summary.frames,
            summary.frames_processed,
            summary.frames_rejected,
            summary.gestures,
            summary.rounds_scored
        );
        println!("red total: {:.1} km", summary.red_total_km);
        println!("blue total: {:.1} km", summary.blue_total_km);
    }
    Ok(())
}

fn report(update: &SessionUpdate, at: Duration, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(update)?);
        return Ok(());
    }
    match update {
        SessionUpdate::GuessPlaced { at: geo, marker } => log::info!(
            "[{:?}] guess placed at {:.2}, {:.2} (marker {:.1}, {:.1}, {:.1})",
            at,
            geo.lat,
            geo.lng,
            marker.x,
            marker.y,
            marker.z
        ),
        SessionUpdate::GuessMoved { at: geo, marker } => log::info!(
            "[{:?}] guess moved to {:.2}, {:.2} (marker {:.1}, {:.1}, {:.1})",
            at,
            geo.lat,
            geo.lng,
            marker.x,
            marker.y,
            marker.z
        ),
        SessionUpdate::Confirmed { result, markers } => {
            log::info!(
                "[{:?}] round {} ({}): {:.1} km from {}",
                at,
                result.round,
                result.team,
                result.distance_km,
                result.question
            );
            log::debug!(
                "feedback line from ({:.1}, {:.1}, {:.1}) to ({:.1}, {:.1}, {:.1})",
                markers.guess.x,
                markers.guess.y,
                markers.guess.z,
                markers.truth.x,
                markers.truth.y,
                markers.truth.z
            );
        }
        SessionUpdate::Hint { text } => match text {
            Some(text) => log::info!("[{:?}] hint: {}", at, text),
            None => log::info!("[{:?}] no hint for this question", at),
        },
        SessionUpdate::NextRound {
            round,
            team,
            question,
        } => log::info!("[{:?}] round {} for team {}: find {}", at, round, team, question),
        SessionUpdate::Ignored => {}
    }
    Ok(())
}
