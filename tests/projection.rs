use std::f64::consts::PI;

use globe_gestures::geo::{
    geo_to_point3d, normalize_longitude, point3d_to_geo, screen_to_geo, screen_to_geo_or,
    GeoPoint, GlobeScene, PerspectiveCamera, ProjectionContext, Ray, Vec3,
};
use globe_gestures::GlobeError;

const LATS: [f64; 5] = [-90.0, -45.0, 0.0, 45.0, 89.9];
const LNGS: [f64; 5] = [-179.9, -90.0, 0.0, 90.0, 179.9];

fn lng_delta(a: f64, b: f64) -> f64 {
    normalize_longitude(a - b).abs()
}

fn default_scene() -> GlobeScene {
    let camera = PerspectiveCamera::looking_at_origin(300.0, 75.0, 16.0 / 9.0).unwrap();
    GlobeScene::new(camera, 100.0).unwrap()
}

/// Context whose every ray comes straight down onto `target` from outside.
struct AimedAt {
    target: Vec3,
    radius: f64,
}

impl ProjectionContext for AimedAt {
    fn camera_ray(&self, _x: f64, _y: f64) -> Result<Ray, GlobeError> {
        let origin = self.target * 3.0;
        Ray::new(origin, self.target - origin)
    }

    fn sphere_radius(&self) -> f64 {
        self.radius
    }
}

#[test]
fn forward_then_inverse_returns_the_input() {
    for radius in [1.0, 100.0] {
        for lat in LATS {
            for lng in LNGS {
                let geo = point3d_to_geo(geo_to_point3d(lat, lng, radius), radius);
                assert!((geo.lat - lat).abs() < 1e-6, "lat {lat} lng {lng} -> {geo:?}");
                assert!(lng_delta(geo.lng, lng) < 1e-6, "lat {lat} lng {lng} -> {geo:?}");
            }
        }
    }
}

#[test]
fn forward_mapping_lands_on_the_sphere() {
    for lat in LATS {
        for lng in LNGS {
            let p = geo_to_point3d(lat, lng, 100.0);
            assert!((p.length() - 100.0).abs() < 1e-9);
        }
    }
}

#[test]
fn ray_cast_through_a_custom_context_recovers_the_marker() {
    for lat in [-45.0, 0.0, 30.0, 60.0] {
        for lng in [-120.0, -10.0, 45.0, 170.0] {
            let ctx = AimedAt {
                target: geo_to_point3d(lat, lng, 100.0),
                radius: 100.0,
            };
            let geo = screen_to_geo(&ctx, 0.5, 0.5).unwrap();
            assert!((geo.lat - lat).abs() < 1e-6);
            assert!(lng_delta(geo.lng, lng) < 1e-6);
        }
    }
}

#[test]
fn spun_globe_reads_back_marker_coordinates() {
    let mut scene = default_scene();
    scene.set_spin(0.7);
    // The marker sitting under the screen centre after the spin.
    let facing = point3d_to_geo(Vec3::new(0.0, 0.0, 100.0).rotate_y(-0.7), 100.0);
    let marker = scene.marker_position(facing);
    assert!((marker.x).abs() < 1e-9);
    assert!((marker.z - 100.0).abs() < 1e-9);

    let geo = screen_to_geo(&scene, 0.5, 0.5).unwrap();
    assert!((geo.lat - facing.lat).abs() < 1e-6);
    assert!(lng_delta(geo.lng, facing.lng) < 1e-6);
}

#[test]
fn full_turn_of_spin_changes_nothing() {
    let mut scene = default_scene();
    let before = screen_to_geo(&scene, 0.45, 0.55).unwrap();
    scene.set_spin(2.0 * PI);
    let after = screen_to_geo(&scene, 0.45, 0.55).unwrap();
    assert!((before.lat - after.lat).abs() < 1e-9);
    assert!(lng_delta(before.lng, after.lng) < 1e-9);
}

#[test]
fn miss_reports_no_intersection_and_fallback_absorbs_it() {
    let scene = default_scene();
    for (x, y) in [(0.0, 0.0), (1.0, 1.0), (0.02, 0.5)] {
        match screen_to_geo(&scene, x, y) {
            Err(GlobeError::NoIntersection { .. }) => {}
            other => panic!("expected a miss at ({x}, {y}), got {other:?}"),
        }
        let geo = screen_to_geo_or(&scene, x, y, GeoPoint::ORIGIN).unwrap();
        assert_eq!(geo, GeoPoint::ORIGIN);
    }
}

#[test]
fn haversine_matches_known_distances() {
    let gent = GeoPoint::new(51.0543, 3.7174);
    let tokyo = GeoPoint::new(35.6762, 139.6503);
    let km = gent.distance_km(&tokyo);
    assert!((km - 9454.5).abs() < 1.0, "got {km}");

    let quarter = GeoPoint::ORIGIN.distance_km(&GeoPoint::new(0.0, 90.0));
    assert!((quarter - 6371.0 * PI / 2.0).abs() < 1e-6);
    assert_eq!(gent.distance_km(&gent), 0.0);
}
