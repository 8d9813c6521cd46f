use super::vec3::Vec3;
use crate::error::GlobeError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalised and must be non-zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, GlobeError> {
        if !origin.is_finite() {
            return Err(GlobeError::InvalidCamera(
                "ray origin is not finite".to_string(),
            ));
        }
        let direction = direction.normalized().ok_or_else(|| {
            GlobeError::InvalidCamera("ray direction has zero length".to_string())
        })?;
        Ok(Self { origin, direction })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest point where the ray meets the origin-centred sphere, or `None`
    /// when it misses or the sphere lies entirely behind the origin.
    pub fn intersect_sphere(&self, radius: f64) -> Option<Vec3> {
        let b = self.origin.dot(self.direction);
        let c = self.origin.dot(self.origin) - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        let t = if near >= 0.0 { near } else { -b + root };
        (t >= 0.0).then(|| self.at(t))
    }
}
