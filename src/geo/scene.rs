use std::f64::consts::TAU;

use serde::Serialize;

use super::camera::{PerspectiveCamera, ProjectionContext};
use super::point::GeoPoint;
use super::ray::Ray;
use super::sphere::geo_to_point3d;
use super::vec3::Vec3;
use crate::error::GlobeError;

pub const DEFAULT_GLOBE_RADIUS: f64 = 100.0;
pub const DEFAULT_CAMERA_DISTANCE: f64 = 300.0;
pub const DEFAULT_SPIN_PER_FRAME: f64 = 0.0005;

/// Camera plus a spinning globe centred at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeScene {
    camera: PerspectiveCamera,
    radius: f64,
    spin: f64,
    spin_per_frame: f64,
}

/// World positions for the feedback overlay: both markers and the segment
/// joining them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FeedbackMarkers {
    pub guess: Vec3,
    pub truth: Vec3,
}

impl GlobeScene {
    pub fn new(camera: PerspectiveCamera, radius: f64) -> Result<Self, GlobeError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GlobeError::InvalidRadius(radius));
        }
        if camera.position().length() <= radius {
            return Err(GlobeError::InvalidCamera(format!(
                "camera at distance {:.1} is inside the globe of radius {:.1}",
                camera.position().length(),
                radius
            )));
        }
        Ok(Self {
            camera,
            radius,
            spin: 0.0,
            spin_per_frame: 0.0,
        })
    }

    pub fn with_spin_per_frame(mut self, radians: f64) -> Self {
        self.spin_per_frame = radians;
        self
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn set_spin(&mut self, radians: f64) {
        self.spin = radians.rem_euclid(TAU);
    }

    /// Per-frame animation step.
    pub fn advance_frame(&mut self) {
        self.set_spin(self.spin + self.spin_per_frame);
    }

    /// World position of a marker pinned to `geo` on the spinning globe.
    pub fn marker_position(&self, geo: GeoPoint) -> Vec3 {
        geo_to_point3d(geo.lat, geo.lng, self.radius).rotate_y(self.spin)
    }

    pub fn feedback(&self, guess: GeoPoint, truth: GeoPoint) -> FeedbackMarkers {
        FeedbackMarkers {
            guess: self.marker_position(guess),
            truth: self.marker_position(truth),
        }
    }
}

impl ProjectionContext for GlobeScene {
    fn camera_ray(&self, x: f64, y: f64) -> Result<Ray, GlobeError> {
        self.camera.ray_through_screen(x, y)
    }

    fn sphere_radius(&self) -> f64 {
        self.radius
    }

    fn globe_spin(&self) -> f64 {
        self.spin
    }
}
