//! Latitude/longitude <-> point on the globe.
//!
//! The forward mapping is a fixed contract: markers placed with
//! `geo_to_point3d` must read back through `point3d_to_geo` to the same
//! coordinates.

use super::point::{normalize_longitude, GeoPoint};
use super::vec3::Vec3;

/// Point on a sphere of `radius` for the given latitude/longitude in degrees.
pub fn geo_to_point3d(lat: f64, lng: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 180.0).to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Geographic coordinate of a point on (or near) the sphere of `radius`.
///
/// `y / radius` is clamped to `[-1, 1]` so hits a hair outside the surface
/// still land on the pole instead of producing NaN.
pub fn point3d_to_geo(point: Vec3, radius: f64) -> GeoPoint {
    let cos_phi = (point.y / radius).clamp(-1.0, 1.0);
    let lat = 90.0 - cos_phi.acos().to_degrees();
    let lng = normalize_longitude(point.z.atan2(-point.x).to_degrees() + 180.0);
    GeoPoint { lat, lng }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_meridian_on_equator_faces_positive_x() {
        let p = geo_to_point3d(0.0, 0.0, 100.0);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }

    #[test]
    fn north_pole_is_up() {
        let p = geo_to_point3d(90.0, 42.0, 50.0);
        assert!((p.y - 50.0).abs() < 1e-9);
        assert_eq!(point3d_to_geo(p, 50.0).lat, 90.0);
    }

    #[test]
    fn slightly_outside_surface_does_not_produce_nan() {
        let g = point3d_to_geo(Vec3::new(0.0, 100.0 + 1e-9, 0.0), 100.0);
        assert_eq!(g.lat, 90.0);
        assert!(g.lng.is_finite());
    }
}
