//! British National Grid references
//!
//! Encodes an OSGB36 easting/northing into the lettered form
//! `"SX 41815 48338"` and decodes it back. Only the 1 m, ten-digit form is
//! produced; shorter references are padded by the coordinate parser before
//! they reach [`decode`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{CoverageError, FormatError};
use crate::point::ProjectedPoint;

pub mod squares;

pub use squares::GridSquare;

/// Side of a lettered grid square in meters
pub const SQUARE_SIZE: u32 = 100_000;
/// Largest easting with a grid reference
pub const MAX_EASTING: f64 = 700_000.0;
/// Largest northing with a grid reference
pub const MAX_NORTHING: f64 = 1_300_000.0;

static GRID_REF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2})\s*([0-9]{5})\s*([0-9]{5})$").unwrap());

/// A lettered grid reference with 1 m resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridReference {
    pub square: &'static GridSquare,
    /// Meters east of the square's west edge, 0..=99999
    pub easting: u32,
    /// Meters north of the square's south edge, 0..=99999
    pub northing: u32,
}

impl GridReference {
    /// Build a reference from square letters and in-square offsets
    pub fn new(letters: &str, easting: u32, northing: u32) -> Result<Self, FormatError> {
        let square = squares::by_letters(letters)
            .ok_or_else(|| FormatError::UnknownSquare(letters.to_string()))?;
        if easting >= SQUARE_SIZE || northing >= SQUARE_SIZE {
            return Err(FormatError::Malformed(format!(
                "{} {} {}",
                letters, easting, northing
            )));
        }
        Ok(GridReference {
            square,
            easting,
            northing,
        })
    }

    pub fn letters(&self) -> &'static str {
        self.square.letters
    }

    /// Full easting/northing of the reference's south-west corner
    pub fn to_projected(&self) -> ProjectedPoint {
        ProjectedPoint {
            easting: (self.square.false_easting() + self.easting) as f64,
            northing: (self.square.false_northing() + self.northing) as f64,
        }
    }
}

impl std::fmt::Display for GridReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:05} {:05}",
            self.square.letters, self.easting, self.northing
        )
    }
}

impl std::str::FromStr for GridReference {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = GRID_REF_REGEX
            .captures(s.trim())
            .ok_or_else(|| FormatError::Malformed(s.to_string()))?;
        let digits = |i: usize| -> Result<u32, FormatError> {
            caps[i]
                .parse()
                .map_err(|_| FormatError::Malformed(s.to_string()))
        };
        GridReference::new(&caps[1], digits(2)?, digits(3)?)
    }
}

impl Serialize for GridReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Encode a projected point as a grid reference.
///
/// Coordinates are rounded to whole meters first. Points outside the
/// national grid box, or in a block with no lettered square, are reported
/// as [`CoverageError`].
pub fn encode(point: ProjectedPoint) -> Result<GridReference, CoverageError> {
    let easting = point.easting.round();
    let northing = point.northing.round();
    if !(0.0..=MAX_EASTING).contains(&easting) || !(0.0..=MAX_NORTHING).contains(&northing) {
        return Err(CoverageError::OutsideBounds {
            easting: point.easting,
            northing: point.northing,
        });
    }

    let (easting, northing) = (easting as u32, northing as u32);
    let (east, north) = (easting / SQUARE_SIZE, northing / SQUARE_SIZE);
    let square = squares::by_block(east, north).ok_or(CoverageError::NoSquare { east, north })?;

    Ok(GridReference {
        square,
        easting: easting % SQUARE_SIZE,
        northing: northing % SQUARE_SIZE,
    })
}

/// Decode `"LL EEEEE NNNNN"` (or `"LLEEEEENNNNN"`) to a projected point
pub fn decode(text: &str) -> Result<ProjectedPoint, FormatError> {
    text.parse::<GridReference>().map(|r| r.to_projected())
}
