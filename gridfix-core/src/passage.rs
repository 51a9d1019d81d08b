//! Rate / time / distance passage calculator
//!
//! Solves for one of speed, distance or time given the other two. Internally
//! everything is converted to miles and miles per hour, then back to the
//! requested unit.

use serde::Serialize;
use thiserror::Error;

use crate::units::{convert_distance, convert_speed, DistanceUnit, SpeedUnit};

/// Invalid calculator input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PassageError {
    /// A required value is zero, negative or not a number
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    /// Duration text could not be understood
    #[error("Invalid duration {0:?}, expected H:MM:SS or decimal hours")]
    InvalidDuration(String),
}

/// A duration measured in decimal hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct PassageTime {
    pub hours: f64,
}

impl PassageTime {
    pub fn from_hours(hours: f64) -> Self {
        PassageTime { hours }
    }

    /// Build from clock components; centiseconds are optional on screen
    pub fn from_hms(hours: f64, minutes: f64, seconds: f64) -> Self {
        PassageTime {
            hours: hours + minutes / 60.0 + seconds / 3600.0,
        }
    }

    /// Split into whole hours, minutes and seconds, rounded to the second
    pub fn to_hms(&self) -> (u64, u64, u64) {
        let total = (self.hours.max(0.0) * 3600.0).round() as u64;
        (total / 3600, (total % 3600) / 60, total % 60)
    }
}

impl std::fmt::Display for PassageTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (h, m, s) = self.to_hms();
        write!(f, "{}h {}m {}s", h, m, s)
    }
}

impl std::str::FromStr for PassageTime {
    type Err = PassageError;

    /// Accepts `H:MM`, `H:MM:SS`, `H:MM:SS.cc` or decimal hours
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PassageError::InvalidDuration(s.to_string());
        let s = s.trim();
        if !s.contains(':') {
            let hours: f64 = s.parse().map_err(|_| invalid())?;
            return Ok(PassageTime::from_hours(hours));
        }

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        let mut values = [0.0f64; 3];
        for (slot, part) in values.iter_mut().zip(parts.iter()) {
            *slot = part.parse().map_err(|_| invalid())?;
            if *slot < 0.0 {
                return Err(invalid());
            }
        }
        if values[1] >= 60.0 || values[2] >= 60.0 {
            return Err(invalid());
        }
        Ok(PassageTime::from_hms(values[0], values[1], values[2]))
    }
}

/// Which quantity to solve for, with the two known inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Passage {
    Speed {
        distance: f64,
        distance_unit: DistanceUnit,
        time: PassageTime,
    },
    Distance {
        speed: f64,
        speed_unit: SpeedUnit,
        time: PassageTime,
    },
    Time {
        distance: f64,
        distance_unit: DistanceUnit,
        speed: f64,
        speed_unit: SpeedUnit,
    },
}

/// Result of a passage calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "solve", rename_all = "lowercase")]
pub enum PassageResult {
    Speed { value: f64, unit: SpeedUnit },
    Distance { value: f64, unit: DistanceUnit },
    Time { value: PassageTime },
}

impl std::fmt::Display for PassageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassageResult::Speed { value, unit } => {
                write!(f, "Speed: {:.2} {}", value, unit.as_str().to_uppercase())
            }
            PassageResult::Distance { value, unit } => {
                write!(f, "Distance: {:.4} {}", value, unit.as_str().to_uppercase())
            }
            PassageResult::Time { value } => write!(f, "Time: {}", value),
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, PassageError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PassageError::NotPositive { name, value })
    }
}

impl Passage {
    /// Solve the passage.
    ///
    /// `speed_unit` and `distance_unit` select the unit of the answer where
    /// the answer is a speed or a distance.
    pub fn solve(
        &self,
        speed_unit: SpeedUnit,
        distance_unit: DistanceUnit,
    ) -> Result<PassageResult, PassageError> {
        match *self {
            Passage::Speed {
                distance,
                distance_unit: from,
                time,
            } => {
                let distance = positive("distance", distance)?;
                let hours = positive("time", time.hours)?;
                let mph = convert_distance(distance, from, DistanceUnit::Miles) / hours;
                Ok(PassageResult::Speed {
                    value: convert_speed(mph, SpeedUnit::Mph, speed_unit),
                    unit: speed_unit,
                })
            }
            Passage::Distance {
                speed,
                speed_unit: from,
                time,
            } => {
                let speed = positive("speed", speed)?;
                let hours = positive("time", time.hours)?;
                let miles = convert_speed(speed, from, SpeedUnit::Mph) * hours;
                Ok(PassageResult::Distance {
                    value: convert_distance(miles, DistanceUnit::Miles, distance_unit),
                    unit: distance_unit,
                })
            }
            Passage::Time {
                distance,
                distance_unit: d_unit,
                speed,
                speed_unit: s_unit,
            } => {
                let distance = positive("distance", distance)?;
                let speed = positive("speed", speed)?;
                let miles = convert_distance(distance, d_unit, DistanceUnit::Miles);
                let mph = convert_speed(speed, s_unit, SpeedUnit::Mph);
                Ok(PassageResult::Time {
                    value: PassageTime::from_hours(miles / mph),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_in_knots() {
        let passage = Passage::Speed {
            distance: 12.0,
            distance_unit: DistanceUnit::NauticalMiles,
            time: PassageTime::from_hms(2.0, 0.0, 0.0),
        };
        let result = passage
            .solve(SpeedUnit::Knots, DistanceUnit::NauticalMiles)
            .unwrap();
        match result {
            PassageResult::Speed { value, unit } => {
                assert!((value - 6.0).abs() < 1e-9);
                assert_eq!(unit, SpeedUnit::Knots);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(result.to_string(), "Speed: 6.00 KTS");
    }

    #[test]
    fn test_distance_across_units() {
        // 10 kts for 30 minutes = 5 nm ~ 9260 m
        let passage = Passage::Distance {
            speed: 10.0,
            speed_unit: SpeedUnit::Knots,
            time: PassageTime::from_hms(0.0, 30.0, 0.0),
        };
        let result = passage.solve(SpeedUnit::Knots, DistanceUnit::Meters).unwrap();
        match result {
            PassageResult::Distance { value, .. } => assert!((value - 9260.0).abs() < 1.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_time_formatting() {
        let passage = Passage::Time {
            distance: 15.0,
            distance_unit: DistanceUnit::NauticalMiles,
            speed: 6.0,
            speed_unit: SpeedUnit::Knots,
        };
        let result = passage
            .solve(SpeedUnit::Knots, DistanceUnit::NauticalMiles)
            .unwrap();
        assert_eq!(result.to_string(), "Time: 2h 30m 0s");
    }

    #[test]
    fn test_zero_inputs_rejected() {
        let passage = Passage::Time {
            distance: 15.0,
            distance_unit: DistanceUnit::NauticalMiles,
            speed: 0.0,
            speed_unit: SpeedUnit::Knots,
        };
        assert_eq!(
            passage.solve(SpeedUnit::Knots, DistanceUnit::NauticalMiles),
            Err(PassageError::NotPositive {
                name: "speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_parse_durations() {
        let t: PassageTime = "1:30".parse().unwrap();
        assert!((t.hours - 1.5).abs() < 1e-12);
        let t: PassageTime = "0:45:36".parse().unwrap();
        assert!((t.hours - 0.76).abs() < 1e-12);
        let t: PassageTime = "2.25".parse().unwrap();
        assert_eq!(t.to_string(), "2h 15m 0s");
        assert!("1:75".parse::<PassageTime>().is_err());
        assert!("a:b".parse::<PassageTime>().is_err());
        assert!("1::2".parse::<PassageTime>().is_err());
    }
}
