//! Degrees-Decimal-Minutes and Degrees-Minutes-Seconds formatting
//!
//! Both formats work on a single axis value in decimal degrees. The
//! fractional part of the DDM minutes is truncated to thousandths rather
//! than rounded, so `50.313611` shows as `50 18.816N` and not `18.817`.

use serde::Serialize;

use crate::point::{Axis, Hemisphere};

/// One axis of a position in Degrees-Decimal-Minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ddm {
    pub degrees: u32,
    /// Whole minutes, 0..=59
    pub minutes: u32,
    /// Thousandths of a minute, 0..=999
    pub thousandths: u32,
    pub hemisphere: Hemisphere,
}

impl Ddm {
    /// Minutes including the fractional part
    pub fn decimal_minutes(&self) -> f64 {
        self.minutes as f64 + self.thousandths as f64 / 1000.0
    }

    /// Signed decimal degrees represented by this value
    pub fn to_decimal_degrees(&self) -> f64 {
        self.hemisphere.sign() * (self.degrees as f64 + self.decimal_minutes() / 60.0)
    }
}

/// Formats as `D M.mmmH`, the same notation the coordinate parser accepts
impl std::fmt::Display for Ddm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}.{:03}{}",
            self.degrees, self.minutes, self.thousandths, self.hemisphere
        )
    }
}

/// Millionths of a minute in one degree
const MICRO_MINUTES_PER_DEGREE: u64 = 60_000_000;

/// Convert a decimal-degree value on the given axis to DDM.
///
/// The value is first rounded to millionths of a minute so binary noise
/// (`18.817` stored as `18.81699999..`) does not cost a thousandth, then
/// the thousandths are truncated. Always succeeds; non-finite input yields
/// zero components.
pub fn to_ddm(value: f64, axis: Axis) -> Ddm {
    let absolute = if value.is_finite() { value.abs() } else { 0.0 };
    let micro = (absolute * MICRO_MINUTES_PER_DEGREE as f64).round() as u64;
    let minutes = micro % MICRO_MINUTES_PER_DEGREE;

    Ddm {
        degrees: (micro / MICRO_MINUTES_PER_DEGREE) as u32,
        minutes: (minutes / 1_000_000) as u32,
        thousandths: ((minutes % 1_000_000) / 1_000) as u32,
        hemisphere: Hemisphere::of(value, axis),
    }
}

/// Convert a decimal-degree value on the given axis to `D° M' S.S" H`.
///
/// Seconds carry exactly one fractional digit. Rounding happens on the
/// whole value so `59.96"` carries into the minutes instead of printing
/// `60.0"`.
pub fn to_dms(value: f64, axis: Axis) -> String {
    let tenths = (value.abs() * 36_000.0).round() as u64;
    let degrees = tenths / 36_000;
    let minutes = (tenths % 36_000) / 600;
    let seconds = tenths % 600;

    format!(
        "{}° {}' {}.{}\" {}",
        degrees,
        minutes,
        seconds / 10,
        seconds % 10,
        Hemisphere::of(value, axis)
    )
}
