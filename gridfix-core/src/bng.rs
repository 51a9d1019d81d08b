//! Functional entry points for collaborators
//!
//! Thin wrappers that tie the parser, formatter, projection and grid codec
//! together over plain latitude/longitude values. The `_with` variants take
//! an explicit [`NationalGrid`] so callers can opt in to the Helmert datum
//! shift; the others use the default projection.

use crate::distance::{haversine, Distance};
use crate::error::{CoverageError, ParseError};
use crate::format::{to_ddm, to_dms, Ddm};
use crate::grid::{self, GridReference};
use crate::parser::CoordinateParser;
use crate::point::{Axis, GeoPoint};
use crate::projection::NationalGrid;

/// Parse free-form coordinate text to a WGS84 point
pub fn parse_coordinate_text(text: &str) -> Result<GeoPoint, ParseError> {
    parse_coordinate_text_with(text, NationalGrid::default())
}

pub fn parse_coordinate_text_with(text: &str, grid: NationalGrid) -> Result<GeoPoint, ParseError> {
    CoordinateParser::new(grid).parse(text).map(|parsed| parsed.point)
}

pub fn format_ddm(value: f64, axis: Axis) -> Ddm {
    to_ddm(value, axis)
}

pub fn format_dms(value: f64, axis: Axis) -> String {
    to_dms(value, axis)
}

/// Grid reference of a WGS84 position.
///
/// Latitude and longitude outside their valid ranges have no grid reference
/// either, so they are reported as out of coverage rather than a separate
/// error.
pub fn to_bng(latitude: f64, longitude: f64) -> Result<GridReference, CoverageError> {
    to_bng_with(latitude, longitude, NationalGrid::default())
}

pub fn to_bng_with(
    latitude: f64,
    longitude: f64,
    grid: NationalGrid,
) -> Result<GridReference, CoverageError> {
    let point = GeoPoint::new(latitude, longitude).map_err(|_| CoverageError::OutsideBounds {
        easting: f64::NAN,
        northing: f64::NAN,
    })?;
    grid::encode(grid.project(point))
}

/// Grid reference text, or `"Outside UK Coverage"`
pub fn to_bng_string(latitude: f64, longitude: f64) -> String {
    to_bng_string_with(latitude, longitude, NationalGrid::default())
}

pub fn to_bng_string_with(latitude: f64, longitude: f64, grid: NationalGrid) -> String {
    match to_bng_with(latitude, longitude, grid) {
        Ok(reference) => reference.to_string(),
        Err(e) => e.to_string(),
    }
}

/// Decode a ten-digit grid reference back to a WGS84 point
pub fn from_bng(text: &str) -> Option<GeoPoint> {
    from_bng_with(text, NationalGrid::default())
}

pub fn from_bng_with(text: &str, grid: NationalGrid) -> Option<GeoPoint> {
    grid::decode(text).ok().map(|p| grid.unproject(p))
}

pub fn distance_between(a: GeoPoint, b: GeoPoint) -> Distance {
    haversine(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OUTSIDE_COVERAGE;
    use crate::projection::DatumShift;

    #[test]
    fn test_plymouth_sound_is_sx() {
        let r = to_bng(50.313611, -4.223056).unwrap();
        assert_eq!(r.letters(), "SX");
        assert!(to_bng_string(50.313611, -4.223056).starts_with("SX "));
    }

    #[test]
    fn test_outside_coverage() {
        assert_eq!(to_bng_string(55.0, -10.0), OUTSIDE_COVERAGE);
        assert_eq!(to_bng_string(-33.86, 151.21), OUTSIDE_COVERAGE);
        assert_eq!(to_bng_string(95.0, 0.0), OUTSIDE_COVERAGE);
        assert!(to_bng(55.0, -10.0).is_err());
    }

    #[test]
    fn test_round_trip_within_one_meter() {
        let places = [
            (50.313611, -4.223056),
            (51.5007, -0.1246),
            (55.9533, -3.1883),
            (57.4778, -4.2247),
            (60.1546, -1.1494),
            (52.4862, -1.8904),
        ];
        for datum in [DatumShift::None, DatumShift::Helmert] {
            let grid = NationalGrid::new(datum);
            for (lat, lon) in places {
                let start = GeoPoint::new(lat, lon).unwrap();
                let r = to_bng_with(lat, lon, grid).unwrap();
                let back = from_bng_with(&r.to_string(), grid).unwrap();
                let d = distance_between(start, back);
                assert!(d.meters < 1.0, "{} {:?} moved {}", r, datum, d.meters);
            }
        }
    }

    #[test]
    fn test_from_bng_rejects_bad_text() {
        assert_eq!(from_bng("ZZ 12345 67890"), None);
        assert_eq!(from_bng("hello"), None);
        assert!(from_bng("SX 41815 48338").is_some());
    }

    #[test]
    fn test_parse_coordinate_text() {
        let p = parse_coordinate_text("50.313611, -4.223056").unwrap();
        assert_eq!((p.latitude(), p.longitude()), (50.313611, -4.223056));

        let p = parse_coordinate_text("SX 41815 48338").unwrap();
        assert_eq!(to_bng(p.latitude(), p.longitude()).unwrap().letters(), "SX");

        let err = parse_coordinate_text("not a coordinate").unwrap_err();
        let message = err.to_string();
        for example in [
            "SX 41815 48338",
            "50.313611, -4.223056",
            "50 18.817N, 4 13.383W",
            "50° 18' 49\"N, 4° 13' 23\"W",
        ] {
            assert!(message.contains(example), "missing {}", example);
        }
    }

    #[test]
    fn test_formatters() {
        assert_eq!(format_ddm(50.313611, Axis::Latitude).to_string(), "50 18.816N");
        assert_eq!(format_dms(-4.223056, Axis::Longitude), "4° 13' 23.0\" W");
    }
}
