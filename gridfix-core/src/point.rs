//! Geodetic and projected point types

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// A WGS84 position in decimal degrees.
///
/// Construction validates the ranges, so a `GeoPoint` held by a caller is
/// always a real position. Values outside the ranges are rejected, never
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form, checked on deserialization
#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = RangeError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RangeError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(RangeError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(RangeError::Longitude(longitude));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    /// Build a point from values produced by our own numeric transforms.
    ///
    /// Longitude is wrapped into [-180, 180] and latitude clamped to the
    /// poles, which only matters for points far outside the projection's
    /// useful area.
    pub(crate) fn from_computed(latitude: f64, longitude: f64) -> Self {
        let mut longitude = longitude;
        if longitude.is_finite() {
            while longitude > 180.0 {
                longitude -= 360.0;
            }
            while longitude < -180.0 {
                longitude += 360.0;
            }
        }
        GeoPoint {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Easting/northing in meters on the OSGB36 transverse Mercator plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub easting: f64,
    pub northing: f64,
}

impl ProjectedPoint {
    pub fn new(easting: f64, northing: f64) -> Self {
        ProjectedPoint { easting, northing }
    }
}

impl std::fmt::Display for ProjectedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E {:.0} N {:.0}", self.easting, self.northing)
    }
}

/// Which axis of a position a single value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Compass hemisphere letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl Hemisphere {
    /// Hemisphere of a signed value on the given axis (zero counts as N/E)
    pub fn of(value: f64, axis: Axis) -> Self {
        match (axis, value >= 0.0) {
            (Axis::Latitude, true) => Hemisphere::N,
            (Axis::Latitude, false) => Hemisphere::S,
            (Axis::Longitude, true) => Hemisphere::E,
            (Axis::Longitude, false) => Hemisphere::W,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Hemisphere::N => 'N',
            Hemisphere::S => 'S',
            Hemisphere::E => 'E',
            Hemisphere::W => 'W',
        }
    }

    /// Multiplier applied to an unsigned magnitude
    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::N | Hemisphere::E => 1.0,
            Hemisphere::S | Hemisphere::W => -1.0,
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Hemisphere {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Hemisphere::N),
            'S' => Ok(Hemisphere::S),
            'E' => Ok(Hemisphere::E),
            'W' => Ok(Hemisphere::W),
            _ => Err(format!("Unknown hemisphere: {}", c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let p = GeoPoint::new(50.313611, -4.223056).unwrap();
        assert_eq!(p.latitude(), 50.313611);
        assert_eq!(p.longitude(), -4.223056);
    }

    #[test]
    fn test_range_limits_inclusive() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            GeoPoint::new(90.5, 0.0),
            Err(RangeError::Latitude(90.5))
        );
        assert_eq!(
            GeoPoint::new(0.0, -180.1),
            Err(RangeError::Longitude(-180.1))
        );
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let p: GeoPoint = serde_json::from_str(r#"{"latitude":51.5,"longitude":-0.12}"#).unwrap();
        assert_eq!(p.latitude(), 51.5);

        let bad: Result<GeoPoint, _> =
            serde_json::from_str(r#"{"latitude":120.0,"longitude":0.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let p = GeoPoint::new(1.5, -2.5).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"latitude":1.5,"longitude":-2.5}"#);
    }

    #[test]
    fn test_hemisphere_of() {
        assert_eq!(Hemisphere::of(0.0, Axis::Latitude), Hemisphere::N);
        assert_eq!(Hemisphere::of(-0.1, Axis::Latitude), Hemisphere::S);
        assert_eq!(Hemisphere::of(0.0, Axis::Longitude), Hemisphere::E);
        assert_eq!(Hemisphere::of(-4.2, Axis::Longitude), Hemisphere::W);
    }

    #[test]
    fn test_from_computed_wraps_longitude() {
        let p = GeoPoint::from_computed(10.0, 190.0);
        assert!((p.longitude() + 170.0).abs() < 1e-9);
        let p = GeoPoint::from_computed(95.0, -200.0);
        assert_eq!(p.latitude(), 90.0);
        assert!((p.longitude() - 160.0).abs() < 1e-9);
    }
}
