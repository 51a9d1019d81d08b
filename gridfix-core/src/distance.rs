//! Great-circle distance

use serde::{Serialize, Serializer};

use crate::point::GeoPoint;
use crate::units::{METERS_PER_MILE, METERS_PER_NAUTICAL_MILE};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A non-negative distance in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Distance {
    pub meters: f64,
}

impl Distance {
    pub fn miles(&self) -> f64 {
        self.meters / METERS_PER_MILE
    }

    pub fn nautical_miles(&self) -> f64 {
        self.meters / METERS_PER_NAUTICAL_MILE
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} meters ({:.2} miles)", self.meters, self.miles())
    }
}

impl Serialize for Distance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Distance", 3)?;
        s.serialize_field("meters", &self.meters)?;
        s.serialize_field("miles", &self.miles())?;
        s.serialize_field("nauticalMiles", &self.nautical_miles())?;
        s.end()
    }
}

/// Haversine distance between two points on a sphere of mean Earth radius
pub fn haversine(a: GeoPoint, b: GeoPoint) -> Distance {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let dphi = (b.latitude() - a.latitude()).to_radians();
    let dlambda = (b.longitude() - a.longitude()).to_radians();

    let h = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    Distance {
        meters: EARTH_RADIUS_M * c,
    }
}
