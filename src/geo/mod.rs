//! Globe geometry: lat/lng conversions, camera rays and screen projection.
//!
//! Coordinates follow the renderer's convention: Y up, globe centred at the
//! origin, camera on +Z by default.

mod camera;
mod point;
mod projection;
mod ray;
mod scene;
mod sphere;
mod vec3;

pub use camera::{PerspectiveCamera, ProjectionContext, DEFAULT_ASPECT, DEFAULT_FOV_DEG};
pub use point::{normalize_longitude, GeoPoint, EARTH_RADIUS_KM};
pub use projection::{screen_to_geo, screen_to_geo_or};
pub use ray::Ray;
pub use scene::{
    FeedbackMarkers, GlobeScene, DEFAULT_CAMERA_DISTANCE, DEFAULT_GLOBE_RADIUS,
    DEFAULT_SPIN_PER_FRAME,
};
pub use sphere::{geo_to_point3d, point3d_to_geo};
pub use vec3::Vec3;
