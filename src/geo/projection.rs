//! Screen point -> geographic coordinate.

use super::camera::ProjectionContext;
use super::point::GeoPoint;
use super::sphere::point3d_to_geo;
use crate::error::GlobeError;

/// Cast a ray through the normalised screen point and convert the nearest
/// globe hit to latitude/longitude.
///
/// Returns `GlobeError::NoIntersection` when the ray passes outside the
/// globe's silhouette.
pub fn screen_to_geo<C>(ctx: &C, x: f64, y: f64) -> Result<GeoPoint, GlobeError>
where
    C: ProjectionContext + ?Sized,
{
    let radius = ctx.sphere_radius();
    if !(radius.is_finite() && radius > 0.0) {
        return Err(GlobeError::InvalidRadius(radius));
    }
    let ray = ctx.camera_ray(x, y)?;
    let hit = ray
        .intersect_sphere(radius)
        .ok_or(GlobeError::NoIntersection { x, y })?;
    // Undo the globe spin so the hit is expressed in globe-local space.
    let local = hit.rotate_y(-ctx.globe_spin());
    Ok(point3d_to_geo(local, radius))
}

/// `screen_to_geo`, substituting `fallback` when the ray misses the globe.
/// Other failures still propagate.
pub fn screen_to_geo_or<C>(ctx: &C, x: f64, y: f64, fallback: GeoPoint) -> Result<GeoPoint, GlobeError>
where
    C: ProjectionContext + ?Sized,
{
    match screen_to_geo(ctx, x, y) {
        Err(err) if err.is_recoverable() => {
            log::debug!("{}; using fallback {:?}", err, fallback);
            Ok(fallback)
        }
        other => other,
    }
}
