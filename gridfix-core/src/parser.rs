//! Free-form coordinate text parser
//!
//! Detects which of four notations a piece of text is written in and
//! converts it to a WGS84 [`GeoPoint`]:
//!
//! ```text
//! Grid reference:           SX 41815 48338   SX 4181 4833   SX4181548338
//! Decimal degrees:          50.313611, -4.223056
//! Degrees decimal minutes:  50 18.817N, 4 13.383W
//! Degrees minutes seconds:  50° 18' 49"N, 4° 13' 23"W
//! ```
//!
//! Input is trimmed and upper-cased, then the notations are tried in the
//! order above. The first pattern that matches decides the notation; a
//! match whose values are invalid is an error, not a reason to try the next
//! notation.
//!
//! ```
//! use gridfix_core::parser::{parse, Notation};
//!
//! let parsed = parse("50 18.817N, 4 13.383W").unwrap();
//! assert_eq!(parsed.notation, Notation::DegreesDecimalMinutes);
//! assert!((parsed.point.latitude() - 50.313616).abs() < 1e-5);
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::grid::GridReference;
use crate::point::{GeoPoint, Hemisphere};
use crate::projection::NationalGrid;

static GRID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([A-Z]{2})\s*([0-9]{4,5})(?:\s*,\s*|\s+)([0-9]{4,5})$|^([A-Z]{2})\s*([0-9]{8,10})$",
    )
    .unwrap()
});

static DD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[0-9]+\.?[0-9]*)[,\s]+(-?[0-9]+\.?[0-9]*)$").unwrap());

static DDM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]+)\s+([0-9]+\.?[0-9]*)\s*([NS])[,\s]+([0-9]+)\s+([0-9]+\.?[0-9]*)\s*([EW])$",
    )
    .unwrap()
});

static DMS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([0-9]+)°\s*([0-9]+)'\s*([0-9]+\.?[0-9]*)"?\s*([NS])[,\s]+([0-9]+)°\s*([0-9]+)'\s*([0-9]+\.?[0-9]*)"?\s*([EW])$"#,
    )
    .unwrap()
});

/// Digits per axis in a full 1 m grid reference
const GRID_DIGITS: usize = 5;

/// Notation a coordinate was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notation {
    #[serde(rename = "BNG")]
    GridReference,
    #[serde(rename = "DD")]
    DecimalDegrees,
    #[serde(rename = "DDM")]
    DegreesDecimalMinutes,
    #[serde(rename = "DMS")]
    DegreesMinutesSeconds,
}

impl Notation {
    /// Short code, as stored with saved locations
    pub fn code(&self) -> &'static str {
        match self {
            Notation::GridReference => "BNG",
            Notation::DecimalDegrees => "DD",
            Notation::DegreesDecimalMinutes => "DDM",
            Notation::DegreesMinutesSeconds => "DMS",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Notation::GridReference => "Grid Reference",
            Notation::DecimalDegrees => "Decimal Degrees",
            Notation::DegreesDecimalMinutes => "Degrees Decimal Minutes",
            Notation::DegreesMinutesSeconds => "Degrees Minutes Seconds",
        }
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A parsed position together with the notation it was written in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParsedCoordinate {
    pub point: GeoPoint,
    pub notation: Notation,
}

/// Coordinate parser with a configurable grid projection
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateParser {
    grid: NationalGrid,
}

impl CoordinateParser {
    pub fn new(grid: NationalGrid) -> Self {
        CoordinateParser { grid }
    }

    /// Parse free-form coordinate text
    pub fn parse(&self, text: &str) -> Result<ParsedCoordinate, ParseError> {
        let cleaned = text.trim().to_uppercase();

        if let Some(caps) = GRID_REGEX.captures(&cleaned) {
            let point = self.grid_reference(&caps)?;
            return Ok(ParsedCoordinate {
                point,
                notation: Notation::GridReference,
            });
        }
        if let Some(caps) = DD_REGEX.captures(&cleaned) {
            let latitude = number(&caps[1])?;
            let longitude = number(&caps[2])?;
            return Ok(ParsedCoordinate {
                point: geo_point(latitude, longitude)?,
                notation: Notation::DecimalDegrees,
            });
        }
        if let Some(caps) = DDM_REGEX.captures(&cleaned) {
            let latitude = sexagesimal(&cleaned, &caps[1], &caps[2], "0", &caps[3])?;
            let longitude = sexagesimal(&cleaned, &caps[4], &caps[5], "0", &caps[6])?;
            return Ok(ParsedCoordinate {
                point: geo_point(latitude, longitude)?,
                notation: Notation::DegreesDecimalMinutes,
            });
        }
        if let Some(caps) = DMS_REGEX.captures(&cleaned) {
            let latitude = sexagesimal(&cleaned, &caps[1], &caps[2], &caps[3], &caps[4])?;
            let longitude = sexagesimal(&cleaned, &caps[5], &caps[6], &caps[7], &caps[8])?;
            return Ok(ParsedCoordinate {
                point: geo_point(latitude, longitude)?,
                notation: Notation::DegreesMinutesSeconds,
            });
        }

        Err(ParseError::Unrecognized)
    }

    /// Decode a matched grid reference, padding each digit group to 5
    fn grid_reference(&self, caps: &Captures) -> Result<GeoPoint, ParseError> {
        let (letters, easting, northing) = match (caps.get(1), caps.get(4)) {
            (Some(letters), _) => (letters.as_str(), &caps[2], &caps[3]),
            (None, Some(letters)) => {
                let digits = &caps[5];
                let (easting, northing) = digits.split_at(digits.len() / 2);
                (letters.as_str(), easting, northing)
            }
            (None, None) => return Err(ParseError::Unrecognized),
        };

        let text = format!(
            "{} {:0<width$} {:0<width$}",
            letters,
            easting,
            northing,
            width = GRID_DIGITS
        );
        let reference: GridReference = text.parse()?;
        Ok(self.grid.unproject(reference.to_projected()))
    }
}

fn number(text: &str) -> Result<f64, ParseError> {
    text.parse().map_err(|_| ParseError::Unrecognized)
}

fn geo_point(latitude: f64, longitude: f64) -> Result<GeoPoint, ParseError> {
    GeoPoint::new(latitude, longitude).map_err(|_| ParseError::OutOfRange {
        latitude,
        longitude,
    })
}

/// Combine degree, minute and second fields with a hemisphere letter
fn sexagesimal(
    text: &str,
    degrees: &str,
    minutes: &str,
    seconds: &str,
    hemisphere: &str,
) -> Result<f64, ParseError> {
    let degrees = number(degrees)?;
    let minutes = number(minutes)?;
    let seconds = number(seconds)?;
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(ParseError::InvalidSexagesimal(text.to_string()));
    }
    let hemisphere = hemisphere
        .chars()
        .next()
        .and_then(|c| Hemisphere::try_from(c).ok())
        .ok_or(ParseError::Unrecognized)?;

    Ok(hemisphere.sign() * (degrees + minutes / 60.0 + seconds / 3600.0))
}

/// Parse free-form text with the default projection (no datum shift)
pub fn parse(text: &str) -> Result<ParsedCoordinate, ParseError> {
    CoordinateParser::default().parse(text)
}
