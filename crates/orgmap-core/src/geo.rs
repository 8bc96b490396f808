//! Great-circle geometry on a spherical Earth.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: kilometres

use std::f64::consts::PI;

use crate::error::{OrgMapError, OrgMapResult};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

const DEG_TO_RAD: f64 = PI / 180.0;

/// A validated point on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Builds a point, rejecting out-of-range or non-finite coordinates.
    pub fn new(latitude: f64, longitude: f64) -> OrgMapResult<Self> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        great_circle_distance_km(
            (self.latitude, self.longitude),
            (other.latitude, other.longitude),
        )
    }
}

/// Calculate the great-circle distance between two positions.
///
/// Uses the spherical law of cosines:
/// `d = R · acos(sin φ1 · sin φ2 + cos φ1 · cos φ2 · cos Δλ)`.
/// The `acos` argument is clamped to `[-1, 1]`; rounding pushes it just
/// past 1.0 for coincident points, which would otherwise yield NaN.
///
/// # Example
///
/// ```
/// use orgmap_core::geo::great_circle_distance_km;
///
/// // One degree of longitude on the equator
/// let d = great_circle_distance_km((0.0, 0.0), (0.0, 1.0));
/// assert!((d - 111.19).abs() < 0.01);
/// ```
pub fn great_circle_distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let phi1 = lat1 * DEG_TO_RAD;
    let phi2 = lat2 * DEG_TO_RAD;
    let delta_lambda = (lon2 - lon1) * DEG_TO_RAD;

    let cos_angle = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();

    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

pub fn validate_latitude(latitude: f64) -> OrgMapResult<()> {
    if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
        return Err(OrgMapError::InvalidInput {
            message: format!("latitude {latitude} is outside [{MIN_LAT}, {MAX_LAT}]"),
        });
    }
    Ok(())
}

pub fn validate_longitude(longitude: f64) -> OrgMapResult<()> {
    if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
        return Err(OrgMapError::InvalidInput {
            message: format!("longitude {longitude} is outside [{MIN_LON}, {MAX_LON}]"),
        });
    }
    Ok(())
}

/// A search radius must be finite and non-negative. Zero is allowed.
pub fn validate_radius_km(radius_km: f64) -> OrgMapResult<()> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(OrgMapError::InvalidInput {
            message: format!("radius {radius_km} km must be a finite, non-negative number"),
        });
    }
    Ok(())
}
