use super::ray::Ray;
use super::vec3::Vec3;
use crate::error::GlobeError;

pub const DEFAULT_FOV_DEG: f64 = 75.0;
pub const DEFAULT_ASPECT: f64 = 16.0 / 9.0;

/// Read-only view of the scene the projection core needs.
///
/// The renderer owns the camera and the globe; projection only asks for a
/// ray through a screen point and for the globe's radius and spin.
pub trait ProjectionContext {
    /// Ray from the camera through a normalised screen point (`[0,1]`, y down).
    fn camera_ray(&self, x: f64, y: f64) -> Result<Ray, GlobeError>;

    fn sphere_radius(&self) -> f64;

    /// Globe rotation about the Y axis in radians.
    fn globe_spin(&self) -> f64 {
        0.0
    }
}

/// Pinhole camera looking at a target with Y up.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    position: Vec3,
    target: Vec3,
    fov_y_deg: f64,
    aspect: f64,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, target: Vec3, fov_y_deg: f64, aspect: f64) -> Result<Self, GlobeError> {
        let camera = Self {
            position,
            target,
            fov_y_deg,
            aspect,
        };
        camera.validate()?;
        Ok(camera)
    }

    /// Camera on the +Z axis at `distance`, looking at the origin.
    pub fn looking_at_origin(distance: f64, fov_y_deg: f64, aspect: f64) -> Result<Self, GlobeError> {
        Self::new(Vec3::new(0.0, 0.0, distance), Vec3::ZERO, fov_y_deg, aspect)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn fov_y_deg(&self) -> f64 {
        self.fov_y_deg
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    fn validate(&self) -> Result<(), GlobeError> {
        if !(self.fov_y_deg.is_finite() && self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0) {
            return Err(GlobeError::InvalidCamera(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_y_deg
            )));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(GlobeError::InvalidCamera(format!(
                "aspect must be positive, got {}",
                self.aspect
            )));
        }
        self.basis().map(|_| ())
    }

    /// Forward, right and up unit vectors.
    fn basis(&self) -> Result<(Vec3, Vec3, Vec3), GlobeError> {
        let forward = (self.target - self.position).normalized().ok_or_else(|| {
            GlobeError::InvalidCamera("camera position equals its target".to_string())
        })?;
        let right = forward.cross(Vec3::UP).normalized().ok_or_else(|| {
            GlobeError::InvalidCamera("camera looks straight up or down".to_string())
        })?;
        let up = right.cross(forward);
        Ok((forward, right, up))
    }

    /// Ray through normalised device coordinates (`[-1,1]`, y up).
    pub fn ray_through_ndc(&self, ndc_x: f64, ndc_y: f64) -> Result<Ray, GlobeError> {
        let (forward, right, up) = self.basis()?;
        let tan_half = (self.fov_y_deg.to_radians() / 2.0).tan();
        let direction =
            forward + right * (ndc_x * tan_half * self.aspect) + up * (ndc_y * tan_half);
        Ray::new(self.position, direction)
    }

    /// Ray through a normalised screen point (`[0,1]`, y down).
    pub fn ray_through_screen(&self, x: f64, y: f64) -> Result<Ray, GlobeError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(GlobeError::InvalidCoordinate(format!(
                "screen point ({}, {}) is not finite",
                x, y
            )));
        }
        self.ray_through_ndc(x * 2.0 - 1.0, 1.0 - y * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_centre_looks_at_target() {
        let camera = PerspectiveCamera::looking_at_origin(300.0, 75.0, 1.5).unwrap();
        let ray = camera.ray_through_screen(0.5, 0.5).unwrap();
        let d = ray.direction();
        assert!(d.x.abs() < 1e-12 && d.y.abs() < 1e-12);
        assert!((d.z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn top_of_screen_tilts_up() {
        let camera = PerspectiveCamera::looking_at_origin(300.0, 90.0, 1.0).unwrap();
        let d = camera.ray_through_screen(0.5, 0.0).unwrap().direction();
        // 45 degrees above the view axis.
        assert!((d.y - d.z.abs()).abs() < 1e-12);
        assert!(d.y > 0.0);
    }

    #[test]
    fn right_of_screen_points_to_positive_x() {
        let camera = PerspectiveCamera::looking_at_origin(300.0, 75.0, 1.0).unwrap();
        let d = camera.ray_through_screen(1.0, 0.5).unwrap().direction();
        assert!(d.x > 0.0);
    }

    #[test]
    fn rejects_degenerate_cameras() {
        assert!(PerspectiveCamera::looking_at_origin(300.0, 0.0, 1.0).is_err());
        assert!(PerspectiveCamera::looking_at_origin(300.0, 180.0, 1.0).is_err());
        assert!(PerspectiveCamera::looking_at_origin(300.0, 75.0, 0.0).is_err());
        assert!(PerspectiveCamera::new(Vec3::ZERO, Vec3::ZERO, 75.0, 1.0).is_err());
        assert!(PerspectiveCamera::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, 75.0, 1.0).is_err());
    }
}
