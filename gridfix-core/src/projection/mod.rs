//! OSGB36 Transverse Mercator projection
//!
//! Forward and inverse transverse Mercator on the Airy 1830 ellipsoid with
//! the British National Grid parameters, using the series given in the
//! Ordnance Survey's "A guide to coordinate systems in Great Britain".
//!
//! [`project`] and [`unproject`] place WGS84 latitude/longitude directly on
//! the Airy ellipsoid. No datum shift is applied, so grid positions are off
//! by up to ~100 m against Ordnance Survey mapping. [`NationalGrid`] can add
//! a Helmert datum shift for a closer (few meter) match. OSTN grid shifts
//! are not modelled.

use serde::{Deserialize, Serialize};

use crate::point::{GeoPoint, ProjectedPoint};

pub mod helmert;

pub use helmert::Helmert;

/// Reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis in meters
    pub a: f64,
    /// Semi-minor axis in meters
    pub b: f64,
}

impl Ellipsoid {
    /// First eccentricity squared
    pub fn e2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.a * self.a)
    }

    /// Third flattening n = (a - b) / (a + b)
    pub fn n(&self) -> f64 {
        (self.a - self.b) / (self.a + self.b)
    }
}

pub const AIRY_1830: Ellipsoid = Ellipsoid {
    a: 6_377_563.396,
    b: 6_356_256.909,
};

pub const WGS84: Ellipsoid = Ellipsoid {
    a: 6_378_137.000,
    b: 6_356_752.314_245,
};

/// Transverse Mercator projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    /// Scale factor on the central meridian
    pub scale: f64,
    /// Latitude of true origin in degrees
    pub lat0: f64,
    /// Longitude of true origin (central meridian) in degrees
    pub lon0: f64,
    /// Easting of true origin in meters
    pub false_easting: f64,
    /// Northing of true origin in meters
    pub false_northing: f64,
}

/// British National Grid
pub const NATIONAL_GRID: TransverseMercator = TransverseMercator {
    ellipsoid: AIRY_1830,
    scale: 0.9996012717,
    lat0: 49.0,
    lon0: -2.0,
    false_easting: 400_000.0,
    false_northing: -100_000.0,
};

/// Convergence limit for the inverse latitude iteration, in meters
const INVERSE_TOLERANCE: f64 = 0.00001;
/// Upper bound on inverse iterations; near the grid a handful suffice
const MAX_INVERSE_ITERATIONS: usize = 32;

/// Radii of curvature at a latitude
struct Curvature {
    /// Transverse radius (scaled)
    nu: f64,
    /// Meridional radius (scaled)
    rho: f64,
    eta2: f64,
}

impl TransverseMercator {
    fn curvature(&self, phi: f64) -> Curvature {
        let af0 = self.ellipsoid.a * self.scale;
        let e2 = self.ellipsoid.e2();
        let s2 = 1.0 - e2 * phi.sin().powi(2);
        let nu = af0 / s2.sqrt();
        let rho = af0 * (1.0 - e2) / s2.powf(1.5);
        Curvature {
            nu,
            rho,
            eta2: nu / rho - 1.0,
        }
    }

    /// Meridional arc from the true origin to latitude `phi` (radians)
    fn meridional_arc(&self, phi: f64) -> f64 {
        let n = self.ellipsoid.n();
        let (n2, n3) = (n * n, n * n * n);
        let phi0 = self.lat0.to_radians();
        let dphi = phi - phi0;
        let sphi = phi + phi0;

        let ma = (1.0 + n + 1.25 * n2 + 1.25 * n3) * dphi;
        let mb = (3.0 * n + 3.0 * n2 + 2.625 * n3) * dphi.sin() * sphi.cos();
        let mc = (1.875 * n2 + 1.875 * n3) * (2.0 * dphi).sin() * (2.0 * sphi).cos();
        let md = (35.0 / 24.0) * n3 * (3.0 * dphi).sin() * (3.0 * sphi).cos();

        self.ellipsoid.b * self.scale * (ma - mb + mc - md)
    }

    /// Project latitude/longitude (degrees, on this projection's ellipsoid)
    pub fn forward(&self, latitude: f64, longitude: f64) -> ProjectedPoint {
        let phi = latitude.to_radians();
        let dl = (longitude - self.lon0).to_radians();
        let Curvature { nu, rho, eta2 } = self.curvature(phi);
        let m = self.meridional_arc(phi);

        let (sin, cos) = phi.sin_cos();
        let cos3 = cos.powi(3);
        let cos5 = cos.powi(5);
        let tan2 = phi.tan().powi(2);
        let tan4 = tan2 * tan2;

        let i = m + self.false_northing;
        let ii = nu / 2.0 * sin * cos;
        let iii = nu / 24.0 * sin * cos3 * (5.0 - tan2 + 9.0 * eta2);
        let iiia = nu / 720.0 * sin * cos5 * (61.0 - 58.0 * tan2 + tan4);
        let iv = nu * cos;
        let v = nu / 6.0 * cos3 * (nu / rho - tan2);
        let vi = nu / 120.0
            * cos5
            * (5.0 - 18.0 * tan2 + tan4 + 14.0 * eta2 - 58.0 * tan2 * eta2);

        let northing = i + ii * dl.powi(2) + iii * dl.powi(4) + iiia * dl.powi(6);
        let easting = self.false_easting + iv * dl + v * dl.powi(3) + vi * dl.powi(5);

        ProjectedPoint { easting, northing }
    }

    /// Unproject to latitude/longitude (degrees, on this projection's ellipsoid)
    pub fn inverse(&self, point: ProjectedPoint) -> (f64, f64) {
        let af0 = self.ellipsoid.a * self.scale;
        let target = point.northing - self.false_northing;

        let mut phi = target / af0 + self.lat0.to_radians();
        let mut m = self.meridional_arc(phi);
        for _ in 0..MAX_INVERSE_ITERATIONS {
            let residual = target - m;
            if !(residual.abs() >= INVERSE_TOLERANCE) {
                break;
            }
            phi += residual / af0;
            m = self.meridional_arc(phi);
        }

        let Curvature { nu, rho, eta2 } = self.curvature(phi);
        let tan = phi.tan();
        let (tan2, tan4) = (tan * tan, tan.powi(4));
        let tan6 = tan2 * tan4;
        let sec = 1.0 / phi.cos();
        let (nu3, nu5, nu7) = (nu.powi(3), nu.powi(5), nu.powi(7));

        let vii = tan / (2.0 * rho * nu);
        let viii = tan / (24.0 * rho * nu3) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
        let ix = tan / (720.0 * rho * nu5) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
        let x = sec / nu;
        let xi = sec / (6.0 * nu3) * (nu / rho + 2.0 * tan2);
        let xii = sec / (120.0 * nu5) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
        let xiia = sec / (5040.0 * nu7) * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

        let de = point.easting - self.false_easting;
        let lat = phi - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
        let lon = self.lon0.to_radians() + x * de - xi * de.powi(3) + xii * de.powi(5)
            - xiia * de.powi(7);

        (lat.to_degrees(), lon.to_degrees())
    }
}

/// Project a position onto the national grid plane (no datum shift)
pub fn project(point: GeoPoint) -> ProjectedPoint {
    NATIONAL_GRID.forward(point.latitude(), point.longitude())
}

/// Inverse of [`project`]
pub fn unproject(point: ProjectedPoint) -> GeoPoint {
    let (latitude, longitude) = NATIONAL_GRID.inverse(point);
    GeoPoint::from_computed(latitude, longitude)
}

/// Datum handling between WGS84 positions and the OSGB36 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatumShift {
    /// Treat WGS84 latitude/longitude as Airy coordinates
    #[default]
    None,
    /// Seven-parameter Helmert transform WGS84 <-> OSGB36
    Helmert,
}

impl DatumShift {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatumShift::None => "none",
            DatumShift::Helmert => "helmert",
        }
    }
}

impl std::fmt::Display for DatumShift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projector between WGS84 positions and the national grid plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NationalGrid {
    pub datum: DatumShift,
}

impl NationalGrid {
    pub fn new(datum: DatumShift) -> Self {
        NationalGrid { datum }
    }

    pub fn project(&self, point: GeoPoint) -> ProjectedPoint {
        match self.datum {
            DatumShift::None => project(point),
            DatumShift::Helmert => {
                let (lat, lon) = Helmert::WGS84_TO_OSGB36.apply_geodetic(
                    point.latitude(),
                    point.longitude(),
                    &WGS84,
                    &AIRY_1830,
                );
                NATIONAL_GRID.forward(lat, lon)
            }
        }
    }

    pub fn unproject(&self, point: ProjectedPoint) -> GeoPoint {
        match self.datum {
            DatumShift::None => unproject(point),
            DatumShift::Helmert => {
                let (lat, lon) = NATIONAL_GRID.inverse(point);
                let (lat, lon) =
                    Helmert::WGS84_TO_OSGB36.invert_geodetic(lat, lon, &AIRY_1830, &WGS84);
                GeoPoint::from_computed(lat, lon)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dms(d: f64, m: f64, s: f64) -> f64 {
        d + m / 60.0 + s / 3600.0
    }

    #[test]
    fn test_os_worked_example_forward() {
        // Ordnance Survey guide, annex C: 52°39'27.2531"N 1°43'4.5177"E
        let p = NATIONAL_GRID.forward(dms(52.0, 39.0, 27.2531), dms(1.0, 43.0, 4.5177));
        assert!((p.easting - 651409.903).abs() < 0.01, "E {}", p.easting);
        assert!((p.northing - 313177.270).abs() < 0.01, "N {}", p.northing);
    }

    #[test]
    fn test_os_worked_example_inverse() {
        let (lat, lon) = NATIONAL_GRID.inverse(ProjectedPoint::new(651409.903, 313177.270));
        assert!((lat - dms(52.0, 39.0, 27.2531)).abs() < 1e-7, "lat {}", lat);
        assert!((lon - dms(1.0, 43.0, 4.5177)).abs() < 1e-7, "lon {}", lon);
    }

    #[test]
    fn test_true_origin() {
        let p = NATIONAL_GRID.forward(49.0, -2.0);
        assert!((p.easting - 400000.0).abs() < 1e-6);
        assert!((p.northing + 100000.0).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_across_gb() {
        let points = [
            (50.066, -5.715), // Land's End
            (50.313611, -4.223056),
            (51.5007, -0.1246),
            (53.4808, -2.2426),
            (55.9533, -3.1883),
            (57.4778, -4.2247),
            (58.6373, -3.0689), // Dunnet Head
            (60.8, -0.8),       // Unst
            (52.6, 1.7),
        ];
        for (lat, lon) in points {
            let p = GeoPoint::new(lat, lon).unwrap();
            let back = unproject(project(p));
            // 1e-7 deg ~ 1 cm
            assert!((back.latitude() - lat).abs() < 1e-7, "{} {}", lat, lon);
            assert!((back.longitude() - lon).abs() < 1e-7, "{} {}", lat, lon);
        }
    }

    #[test]
    fn test_far_points_do_not_panic() {
        let p = project(GeoPoint::new(-45.0, 170.0).unwrap());
        assert!(p.easting.is_finite());
        let g = unproject(ProjectedPoint::new(5.0e7, -3.0e7));
        assert!(!(g.latitude().abs() > 90.0));
    }

    #[test]
    fn test_helmert_grid_differs_from_plain() {
        let p = GeoPoint::new(51.5007, -0.1246).unwrap();
        let plain = NationalGrid::new(DatumShift::None).project(p);
        let shifted = NationalGrid::new(DatumShift::Helmert).project(p);
        let d = ((plain.easting - shifted.easting).powi(2)
            + (plain.northing - shifted.northing).powi(2))
        .sqrt();
        // The two datums differ by roughly 100 m over southern England
        assert!(d > 50.0 && d < 200.0, "shift {}", d);
    }

    #[test]
    fn test_helmert_round_trip() {
        let grid = NationalGrid::new(DatumShift::Helmert);
        let points = [
            (50.313611, -4.223056),
            (55.9533, -3.1883),
            (52.6, 1.7),
            (51.5007, -0.1246),
            (60.1546, -1.1494),
            (50.066, -5.715),
        ];
        for (lat, lon) in points {
            let p = GeoPoint::new(lat, lon).unwrap();
            let back = grid.unproject(grid.project(p));
            let error = crate::distance::haversine(p, back).meters;
            assert!(error < 0.001, "{} {} off by {} m", lat, lon, error);
        }
    }

    #[test]
    fn test_datum_names() {
        assert_eq!(DatumShift::default(), DatumShift::None);
        assert_eq!(DatumShift::Helmert.to_string(), "helmert");
    }
}
