use std::sync::Mutex;
use std::time::Duration;

use tempfile::NamedTempFile;

use globe_gestures::config::GameConfig;
use globe_gestures::session::default_questions;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "GLOBE_CONFIG",
        "GLOBE_THROTTLE_MS",
        "GLOBE_RADIUS",
        "GLOBE_ROUND_SECS",
    ] {
        std::env::remove_var(key);
    }
}

fn write_config(toml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    std::io::Write::write_all(&mut file, toml.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_without_config_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = GameConfig::load().expect("load defaults");
    assert_eq!(cfg.gestures.pinch_threshold, 0.05);
    assert_eq!(cfg.gestures.point_extension, 0.10);
    assert_eq!(cfg.gestures.clap_threshold, 0.10);
    assert_eq!(cfg.gestures.swipe_speed, 1.5);
    assert_eq!(cfg.gestures.throttle, Duration::from_millis(500));
    assert_eq!(cfg.globe.radius, 100.0);
    assert_eq!(cfg.globe.camera_distance, 300.0);
    assert_eq!(cfg.globe.fov_deg, 75.0);
    assert_eq!(cfg.round_duration, Duration::from_secs(30));
    assert_eq!(cfg.questions, default_questions());
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = write_config(
        r#"
[gestures]
pinch_threshold = 0.04
swipe_speed = 2.0
throttle_ms = 300

[globe]
radius = 80.0
camera_distance = 250.0
fov_deg = 60.0
aspect = 1.5
spin_per_frame = 0.0

[round]
seconds = 45

[[questions]]
label = "Quito"
lat = -0.1807
lng = -78.4678
hint = "Andes"

[[questions]]
label = "Oslo"
lat = 59.9139
lng = 10.7522
"#,
    );

    std::env::set_var("GLOBE_CONFIG", file.path());
    std::env::set_var("GLOBE_THROTTLE_MS", "750");
    std::env::set_var("GLOBE_ROUND_SECS", "20");

    let cfg = GameConfig::load().expect("load config");

    assert_eq!(cfg.gestures.pinch_threshold, 0.04);
    assert_eq!(cfg.gestures.point_extension, 0.10);
    assert_eq!(cfg.gestures.swipe_speed, 2.0);
    assert_eq!(cfg.gestures.throttle, Duration::from_millis(750));
    assert_eq!(cfg.globe.radius, 80.0);
    assert_eq!(cfg.globe.camera_distance, 250.0);
    assert_eq!(cfg.globe.fov_deg, 60.0);
    assert_eq!(cfg.globe.aspect, 1.5);
    assert_eq!(cfg.round_duration, Duration::from_secs(20));
    assert_eq!(cfg.questions.len(), 2);
    assert_eq!(cfg.questions[0].hint.as_deref(), Some("Andes"));
    assert_eq!(cfg.questions[1].hint, None);

    let scene = cfg.globe.scene().expect("scene");
    assert_eq!(scene.radius(), 80.0);

    clear_env();
}

#[test]
fn env_radius_must_leave_camera_outside_globe() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("GLOBE_RADIUS", "400");
    assert!(GameConfig::load().is_err());

    std::env::set_var("GLOBE_RADIUS", "not-a-number");
    assert!(GameConfig::load().is_err());

    clear_env();
}

#[test]
fn rejects_invalid_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    for bad in [
        "[gestures]\npinch_threshold = 0.0\n",
        "[gestures]\nthrottle_ms = -5\n",
        "[gestures]\nthrottle_ms = 0\n",
        "[[questions]]\nlabel = \"Lima\"\nlat = -12.05\nlng = -77.04\nhnt = \"Pacific\"\n",
        "[globe]\nfov_deg = 180.0\n",
        "[round]\nseconds = 0\n",
        "questions = []\n",
        "[[questions]]\nlabel = \"Pole+\"\nlat = 95.0\nlng = 0.0\n",
        "[gestures.indices]\nwrist = 30\nthumb_ip = 3\nthumb_tip = 4\nindex_pip = 6\nindex_tip = 8\nmiddle_pip = 10\nmiddle_tip = 12\nring_pip = 14\nring_tip = 16\npinky_pip = 18\npinky_tip = 20\n",
    ] {
        let file = write_config(bad);
        assert!(
            GameConfig::from_path(file.path()).is_err(),
            "accepted invalid config:\n{bad}"
        );
    }

    clear_env();
}

#[test]
fn missing_config_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let dir = tempfile::tempdir().expect("temp dir");
    std::env::set_var("GLOBE_CONFIG", dir.path().join("absent.toml"));
    assert!(GameConfig::load().is_err());

    clear_env();
}
