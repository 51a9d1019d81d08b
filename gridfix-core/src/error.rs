//! Error types for coordinate parsing and grid conversion

use thiserror::Error;

/// Message shown to users when coordinate text cannot be understood.
///
/// This wording is part of the user-facing contract and lists one example
/// for every accepted notation.
pub const ACCEPTED_FORMATS: &str = "Could not parse coordinates. Please use one of these formats: \
Grid Reference (e.g., \"SX 41815 48338\"), \
Decimal Degrees (e.g., \"50.313611, -4.223056\"), \
Degrees Decimal Minutes (e.g., \"50 18.817N, 4 13.383W\"), \
Degrees Minutes Seconds (e.g., \"50° 18' 49\"N, 4° 13' 23\"W\")";

/// Text returned when a point has no British National Grid reference
pub const OUTSIDE_COVERAGE: &str = "Outside UK Coverage";

/// Errors that can occur when parsing free-form coordinate text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Text matched none of the supported notations
    #[error("{}", ACCEPTED_FORMATS)]
    Unrecognized,

    /// Notation matched but the values are not a valid position
    #[error("Coordinates out of valid range: {latitude}, {longitude}. {}", ACCEPTED_FORMATS)]
    OutOfRange { latitude: f64, longitude: f64 },

    /// Minutes or seconds of a sexagesimal value are 60 or more
    #[error("Minutes or seconds out of range (0-60) in {0:?}. {}", ACCEPTED_FORMATS)]
    InvalidSexagesimal(String),

    /// Text looked like a grid reference but could not be decoded
    #[error("Invalid grid reference - outside UK coverage ({0}). {}", ACCEPTED_FORMATS)]
    GridReference(#[from] FormatError),
}

/// Errors that can occur when decoding grid reference text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Text is not two letters followed by two 5-digit groups
    #[error("Malformed grid reference: {0:?}")]
    Malformed(String),

    /// Letters do not name a square of the national grid
    #[error("Unknown grid square: {0}")]
    UnknownSquare(String),
}

/// A projected point has no grid reference.
///
/// This is an expected outcome for positions away from Great Britain and is
/// always displayed as [`OUTSIDE_COVERAGE`].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoverageError {
    /// Easting or northing falls outside the national grid box
    #[error("{}", OUTSIDE_COVERAGE)]
    OutsideBounds { easting: f64, northing: f64 },

    /// Inside the box, but no lettered square covers this 100 km block
    #[error("{}", OUTSIDE_COVERAGE)]
    NoSquare { east: u32, north: u32 },
}

/// Latitude or longitude outside the valid geodetic range
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RangeError {
    #[error("Latitude {0} is out of valid range (-90° ~ 90°)")]
    Latitude(f64),

    #[error("Longitude {0} is out of valid range (-180° ~ 180°)")]
    Longitude(f64),
}
