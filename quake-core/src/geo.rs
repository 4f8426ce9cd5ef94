//! Coordinates and the local planar projection shared by every distance
//! calculation.
//!
//! Positions are projected onto a flat plane in kilometers around one
//! reference latitude. This is an approximation that holds for lines and
//! widths of tens to a few hundred kilometers; it is not geodesically exact.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Spherical Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    /// True when both components are finite and inside the degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

/// A point on the local plane, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalXY {
    pub x_km: f64,
    pub y_km: f64,
}

impl LocalXY {
    pub const fn new(x_km: f64, y_km: f64) -> Self {
        LocalXY { x_km, y_km }
    }

    pub fn dot(self, other: LocalXY) -> f64 {
        self.x_km * other.x_km + self.y_km * other.y_km
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Add for LocalXY {
    type Output = LocalXY;

    fn add(self, rhs: LocalXY) -> LocalXY {
        LocalXY::new(self.x_km + rhs.x_km, self.y_km + rhs.y_km)
    }
}

impl Sub for LocalXY {
    type Output = LocalXY;

    fn sub(self, rhs: LocalXY) -> LocalXY {
        LocalXY::new(self.x_km - rhs.x_km, self.y_km - rhs.y_km)
    }
}

impl Mul<f64> for LocalXY {
    type Output = LocalXY;

    fn mul(self, rhs: f64) -> LocalXY {
        LocalXY::new(self.x_km * rhs, self.y_km * rhs)
    }
}

/// Project `point` onto the plane around `reference_latitude` (degrees).
///
/// Longitude is scaled by `cos(reference_latitude)` for meridian convergence.
pub fn to_local_xy(point: LatLng, reference_latitude: f64) -> LocalXY {
    let cos_ref = reference_latitude.to_radians().cos();
    LocalXY {
        x_km: EARTH_RADIUS_KM * point.lng.to_radians() * cos_ref,
        y_km: EARTH_RADIUS_KM * point.lat.to_radians(),
    }
}

/// Inverse of [`to_local_xy`] for the same reference latitude.
pub fn from_local_xy(point: LocalXY, reference_latitude: f64) -> LatLng {
    let cos_ref = reference_latitude.to_radians().cos();
    LatLng {
        lat: (point.y_km / EARTH_RADIUS_KM).to_degrees(),
        lng: (point.x_km / (EARTH_RADIUS_KM * cos_ref)).to_degrees(),
    }
}

/// One projection frame, fixed once and reused for every point of an
/// operation so all coordinates are comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub reference_latitude: f64,
}

impl LocalFrame {
    /// Frame centred on the mean latitude of two endpoints.
    pub fn between(a: LatLng, b: LatLng) -> Self {
        LocalFrame {
            reference_latitude: (a.lat + b.lat) / 2.0,
        }
    }

    pub fn project(&self, point: LatLng) -> LocalXY {
        to_local_xy(point, self.reference_latitude)
    }

    pub fn unproject(&self, point: LocalXY) -> LatLng {
        from_local_xy(point, self.reference_latitude)
    }
}
