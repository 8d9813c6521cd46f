use serde::{Deserialize, Serialize};

/// Mean Earth radius used for guess distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude/longitude in degrees.
///
/// Constructed values always hold latitude in `[-90, 90]` and longitude in
/// `(-180, 180]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Clamp latitude to the poles and wrap longitude into `(-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: lat.clamp(-90.0, 90.0),
            lng: normalize_longitude(lng),
        }
    }

    pub const ORIGIN: GeoPoint = GeoPoint { lat: 0.0, lng: 0.0 };

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// Wrap a longitude in degrees into `(-180, 180]`.
pub fn normalize_longitude(lng: f64) -> f64 {
    let wrapped = lng % 360.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
