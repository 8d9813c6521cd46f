use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::geo::{
    GlobeScene, PerspectiveCamera, DEFAULT_ASPECT, DEFAULT_CAMERA_DISTANCE, DEFAULT_FOV_DEG,
    DEFAULT_GLOBE_RADIUS, DEFAULT_SPIN_PER_FRAME,
};
use crate::gesture::{
    ClassifierConfig, DEFAULT_CLAP_THRESHOLD, DEFAULT_PINCH_THRESHOLD, DEFAULT_POINT_EXTENSION,
    DEFAULT_SWIPE_SPEED, DEFAULT_THROTTLE,
};
use crate::landmarks::LandmarkIndexMap;
use crate::session::{default_questions, validate_questions, Question, DEFAULT_ROUND_DURATION};

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GameConfigFile {
    gestures: Option<GesturesConfigFile>,
    globe: Option<GlobeConfigFile>,
    round: Option<RoundConfigFile>,
    questions: Option<Vec<Question>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GesturesConfigFile {
    pinch_threshold: Option<f32>,
    point_extension: Option<f32>,
    clap_threshold: Option<f32>,
    swipe_speed: Option<f32>,
    throttle_ms: Option<u64>,
    indices: Option<LandmarkIndexMap>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GlobeConfigFile {
    radius: Option<f64>,
    camera_distance: Option<f64>,
    fov_deg: Option<f64>,
    aspect: Option<f64>,
    spin_per_frame: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RoundConfigFile {
    seconds: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub gestures: ClassifierConfig,
    pub globe: GlobeSettings,
    pub round_duration: Duration,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobeSettings {
    pub radius: f64,
    pub camera_distance: f64,
    pub fov_deg: f64,
    pub aspect: f64,
    pub spin_per_frame: f64,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GLOBE_RADIUS,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            fov_deg: DEFAULT_FOV_DEG,
            aspect: DEFAULT_ASPECT,
            spin_per_frame: DEFAULT_SPIN_PER_FRAME,
        }
    }
}

impl GlobeSettings {
    /// Camera on +z looking at the globe centre.
    pub fn camera(&self) -> Result<PerspectiveCamera> {
        PerspectiveCamera::looking_at_origin(self.camera_distance, self.fov_deg, self.aspect)
            .map_err(|e| anyhow!("invalid globe camera: {}", e))
    }

    pub fn scene(&self) -> Result<GlobeScene> {
        let scene = GlobeScene::new(self.camera()?, self.radius)
            .map_err(|e| anyhow!("invalid globe: {}", e))?;
        Ok(scene.with_spin_per_frame(self.spin_per_frame))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gestures: ClassifierConfig::default(),
            globe: GlobeSettings::default(),
            round_duration: DEFAULT_ROUND_DURATION,
            questions: default_questions(),
        }
    }
}

impl GameConfig {
    /// Defaults, then the TOML file named by `GLOBE_CONFIG`, then env overrides.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("GLOBE_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(read_config_file(Path::new(path))?),
            _ => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Like `load`, with an explicit file and no `GLOBE_CONFIG` lookup.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut cfg = Self::from_file(read_config_file(path)?);
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: GameConfigFile) -> Self {
        let gestures = file.gestures.unwrap_or_default();
        let gestures = ClassifierConfig {
            pinch_threshold: gestures.pinch_threshold.unwrap_or(DEFAULT_PINCH_THRESHOLD),
            point_extension: gestures.point_extension.unwrap_or(DEFAULT_POINT_EXTENSION),
            clap_threshold: gestures.clap_threshold.unwrap_or(DEFAULT_CLAP_THRESHOLD),
            swipe_speed: gestures.swipe_speed.unwrap_or(DEFAULT_SWIPE_SPEED),
            throttle: gestures
                .throttle_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_THROTTLE),
            indices: gestures.indices.unwrap_or_default(),
        };
        let globe = file.globe.unwrap_or_default();
        let globe = GlobeSettings {
            radius: globe.radius.unwrap_or(DEFAULT_GLOBE_RADIUS),
            camera_distance: globe.camera_distance.unwrap_or(DEFAULT_CAMERA_DISTANCE),
            fov_deg: globe.fov_deg.unwrap_or(DEFAULT_FOV_DEG),
            aspect: globe.aspect.unwrap_or(DEFAULT_ASPECT),
            spin_per_frame: globe.spin_per_frame.unwrap_or(DEFAULT_SPIN_PER_FRAME),
        };
        let round_duration = file
            .round
            .and_then(|round| round.seconds)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ROUND_DURATION);
        Self {
            gestures,
            globe,
            round_duration,
            questions: file.questions.unwrap_or_else(default_questions),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(ms) = env_value("GLOBE_THROTTLE_MS") {
            let ms: u64 = ms
                .parse()
                .map_err(|_| anyhow!("GLOBE_THROTTLE_MS must be an integer number of milliseconds"))?;
            self.gestures.throttle = Duration::from_millis(ms);
        }
        if let Some(radius) = env_value("GLOBE_RADIUS") {
            self.globe.radius = radius
                .parse()
                .map_err(|_| anyhow!("GLOBE_RADIUS must be a number"))?;
        }
        if let Some(secs) = env_value("GLOBE_ROUND_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| anyhow!("GLOBE_ROUND_SECS must be an integer number of seconds"))?;
            self.round_duration = Duration::from_secs(secs);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.gestures
            .validate()
            .map_err(|e| anyhow!("invalid gesture config: {}", e))?;
        if !(self.globe.fov_deg.is_finite() && self.globe.fov_deg > 0.0 && self.globe.fov_deg < 180.0)
        {
            return Err(anyhow!("globe.fov_deg must be in (0, 180)"));
        }
        if !self.globe.spin_per_frame.is_finite() {
            return Err(anyhow!("globe.spin_per_frame must be a finite number"));
        }
        // Radius, aspect and camera placement are checked by building the scene.
        self.globe.scene()?;
        if self.round_duration.is_zero() {
            return Err(anyhow!("round duration must be greater than zero"));
        }
        validate_questions(&self.questions)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn read_config_file(path: &Path) -> Result<GameConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = toml::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
