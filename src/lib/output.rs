//! Text and JSON rendering of command results

use serde::Serialize;

use gridfix_core::{
    format_ddm, format_dms, to_bng_string_with, units::convert_distance, Axis, Distance,
    DistanceUnit, GeoPoint, NationalGrid, Notation,
};

use crate::error::CliError;

/// One position in every notation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<Notation>,
    pub latitude: f64,
    pub longitude: f64,
    pub ddm: String,
    pub dms: String,
    pub grid_reference: String,
}

impl PositionReport {
    pub fn new(point: GeoPoint, grid: NationalGrid) -> Self {
        let (lat, lon) = (point.latitude(), point.longitude());
        PositionReport {
            input: None,
            notation: None,
            latitude: lat,
            longitude: lon,
            ddm: format!(
                "{}, {}",
                format_ddm(lat, Axis::Latitude),
                format_ddm(lon, Axis::Longitude)
            ),
            dms: format!(
                "{}, {}",
                format_dms(lat, Axis::Latitude),
                format_dms(lon, Axis::Longitude)
            ),
            grid_reference: to_bng_string_with(lat, lon, grid),
        }
    }

    pub fn with_input(mut self, input: &str, notation: Notation) -> Self {
        self.input = Some(input.to_string());
        self.notation = Some(notation);
        self
    }
}

impl std::fmt::Display for PositionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(notation) = self.notation {
            writeln!(f, "Detected: {}", notation)?;
        }
        writeln!(f, "Decimal Degrees: {:.6}, {:.6}", self.latitude, self.longitude)?;
        writeln!(f, "DDM: {}", self.ddm)?;
        writeln!(f, "DMS: {}", self.dms)?;
        write!(f, "Grid Reference: {}", self.grid_reference)
    }
}

/// Grid reference for raw latitude/longitude
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReport {
    pub latitude: f64,
    pub longitude: f64,
    pub grid_reference: String,
}

impl std::fmt::Display for GridReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid_reference)
    }
}

/// Distance between two positions, with a value in the preferred unit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceReport {
    pub from: PositionReport,
    pub to: PositionReport,
    pub distance: Distance,
    pub unit: DistanceUnit,
    pub value: f64,
}

impl DistanceReport {
    pub fn new(from: PositionReport, to: PositionReport, distance: Distance, unit: DistanceUnit) -> Self {
        DistanceReport {
            from,
            to,
            distance,
            unit,
            value: convert_distance(distance.meters, DistanceUnit::Meters, unit),
        }
    }
}

impl std::fmt::Display for DistanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "From: {}", self.from.grid_reference)?;
        writeln!(f, "To: {}", self.to.grid_reference)?;
        writeln!(f, "Distance: {}", self.distance)?;
        write!(f, "         = {:.2} {}", self.value, self.unit)
    }
}

/// Print a result as text, or as pretty JSON when `json` is set
pub fn emit<T>(value: &T, json: bool) -> Result<String, CliError>
where
    T: Serialize + std::fmt::Display,
{
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plymouth() -> GeoPoint {
        GeoPoint::new(50.313611, -4.223056).unwrap()
    }

    #[test]
    fn test_position_text() {
        let report = PositionReport::new(plymouth(), NationalGrid::default());
        let text = report.to_string();
        assert!(text.contains("Decimal Degrees: 50.313611, -4.223056"));
        assert!(text.contains("DDM: 50 18.816N, 4 13.383W"));
        assert!(text.contains("DMS: 50° 18' 49.0\" N, 4° 13' 23.0\" W"));
        assert!(text.contains("Grid Reference: SX "));
        assert!(!text.contains("Detected"));
    }

    #[test]
    fn test_position_json() {
        let report = PositionReport::new(plymouth(), NationalGrid::default())
            .with_input("50.313611, -4.223056", Notation::DecimalDegrees);
        let value: serde_json::Value =
            serde_json::from_str(&emit(&report, true).unwrap()).unwrap();
        assert_eq!(value["notation"], "DD");
        assert_eq!(value["latitude"], 50.313611);
        assert!(value["gridReference"].as_str().unwrap().starts_with("SX"));
    }

    #[test]
    fn test_outside_coverage_text() {
        let point = GeoPoint::new(55.0, -10.0).unwrap();
        let report = PositionReport::new(point, NationalGrid::default());
        assert_eq!(report.grid_reference, "Outside UK Coverage");
    }

    #[test]
    fn test_distance_report() {
        let from = PositionReport::new(plymouth(), NationalGrid::default());
        let to = PositionReport::new(plymouth(), NationalGrid::default());
        let report = DistanceReport::new(
            from,
            to,
            Distance { meters: 1852.0 },
            DistanceUnit::NauticalMiles,
        );
        assert!((report.value - 1.0).abs() < 1e-3);
        assert!(report.to_string().ends_with("= 1.00 nm"));

        let value: serde_json::Value =
            serde_json::from_str(&emit(&report, true).unwrap()).unwrap();
        assert_eq!(value["distance"]["meters"], 1852.0);
        assert_eq!(value["unit"], "nm");
    }
}
