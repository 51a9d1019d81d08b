//! # Gridfix Core
//!
//! Coordinate toolkit for British waters: parsing, formatting, projection
//! onto the Ordnance Survey National Grid, great-circle distance and
//! passage planning unit tables.
//!
//! This crate is pure computation with **zero I/O dependencies** and no
//! logging; front ends own the command line, configuration and output.
//!
//! ```text
//!  text ──► parser ──► GeoPoint ──► projection ──► grid ──► "SX 41815 48338"
//!                         │            ▲   (helmert)
//!                         ├──► format  │
//!                         └──► distance
//! ```
//!
//! ## Key Modules
//!
//! - [`parser`] - Notation detection for free-form coordinate text
//! - [`format`] - Degrees decimal minutes and degrees minutes seconds
//! - [`projection`] - Transverse Mercator onto the OSGB36 plane
//! - [`grid`] - Lettered 100 km squares and grid reference text
//! - [`distance`] - Haversine distance
//! - [`units`] / [`passage`] - Speed, distance and time conversions
//!
//! ## Example
//!
//! ```rust
//! use gridfix_core::{distance_between, parse_coordinate_text, to_bng_string};
//!
//! let plymouth = parse_coordinate_text("50 18.817N, 4 13.383W").unwrap();
//! assert!(to_bng_string(plymouth.latitude(), plymouth.longitude()).starts_with("SX"));
//!
//! let london = parse_coordinate_text("51.5007, -0.1246").unwrap();
//! let d = distance_between(plymouth, london);
//! assert!(d.miles() > 150.0);
//!
//! assert_eq!(to_bng_string(55.0, -10.0), "Outside UK Coverage");
//! ```

pub mod bng;
pub mod distance;
pub mod error;
pub mod format;
pub mod grid;
pub mod parser;
pub mod passage;
pub mod point;
pub mod projection;
pub mod units;

// Re-export commonly used types
pub use bng::{
    distance_between, format_ddm, format_dms, from_bng, from_bng_with, parse_coordinate_text,
    parse_coordinate_text_with, to_bng, to_bng_string, to_bng_string_with, to_bng_with,
};
pub use distance::Distance;
pub use error::{CoverageError, FormatError, ParseError, RangeError};
pub use format::Ddm;
pub use grid::{GridReference, GridSquare};
pub use parser::{CoordinateParser, Notation, ParsedCoordinate};
pub use passage::{Passage, PassageError, PassageResult, PassageTime};
pub use point::{Axis, GeoPoint, Hemisphere, ProjectedPoint};
pub use projection::{DatumShift, NationalGrid};
pub use units::{DistanceUnit, SpeedUnit};
