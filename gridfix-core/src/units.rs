//! Distance and speed unit tables
//!
//! Conversions go through statute miles (distance) and miles per hour
//! (speed), using the per-unit factors on each enum.

use serde::{Deserialize, Serialize};

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.344;
/// Meters in one nautical mile
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Units accepted for passage distances
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "nm")]
    NauticalMiles,
    #[serde(rename = "mi")]
    Miles,
    #[serde(rename = "m")]
    Meters,
}

/// Units accepted for passage speeds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    #[default]
    #[serde(rename = "kts")]
    Knots,
    Mph,
    Kmh,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 3] = [
        DistanceUnit::NauticalMiles,
        DistanceUnit::Miles,
        DistanceUnit::Meters,
    ];

    /// Short unit label as used on screen
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::NauticalMiles => "nm",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Meters => "m",
        }
    }

    /// Statute miles in one of this unit
    pub fn to_miles_factor(&self) -> f64 {
        match self {
            DistanceUnit::NauticalMiles => 1.15078,
            DistanceUnit::Miles => 1.0,
            DistanceUnit::Meters => 0.000621371,
        }
    }
}

impl SpeedUnit {
    pub const ALL: [SpeedUnit; 3] = [SpeedUnit::Knots, SpeedUnit::Mph, SpeedUnit::Kmh];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedUnit::Knots => "kts",
            SpeedUnit::Mph => "mph",
            SpeedUnit::Kmh => "kmh",
        }
    }

    /// Miles per hour in one of this unit
    pub fn to_mph_factor(&self) -> f64 {
        match self {
            SpeedUnit::Knots => 1.15078,
            SpeedUnit::Mph => 1.0,
            SpeedUnit::Kmh => 0.621371,
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for DistanceUnit {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "nm" | "nmi" => Ok(DistanceUnit::NauticalMiles),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            "m" | "meters" | "metres" => Ok(DistanceUnit::Meters),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

impl TryFrom<&str> for SpeedUnit {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "kts" | "kn" | "knots" => Ok(SpeedUnit::Knots),
            "mph" => Ok(SpeedUnit::Mph),
            "kmh" | "km/h" | "kph" => Ok(SpeedUnit::Kmh),
            _ => Err(format!("Unknown speed unit: {}", s)),
        }
    }
}

/// Convert a distance between units
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    value * from.to_miles_factor() / to.to_miles_factor()
}

/// Convert a speed between units
pub fn convert_speed(value: f64, from: SpeedUnit, to: SpeedUnit) -> f64 {
    value * from.to_mph_factor() / to.to_mph_factor()
}
