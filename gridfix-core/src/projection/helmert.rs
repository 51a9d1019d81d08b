//! Seven-parameter Helmert datum transformation
//!
//! Shifts positions between datums through earth-centred cartesian
//! coordinates. The WGS84 -> OSGB36 parameters are the Ordnance Survey's
//! published values; they are good to a few meters across Great Britain.

use nalgebra::{Matrix3, Vector3};

use super::Ellipsoid;

/// Convergence limit for the cartesian -> geodetic latitude iteration
const LATITUDE_TOLERANCE: f64 = 1e-12;
const MAX_LATITUDE_ITERATIONS: usize = 16;
/// Convergence limit for the geodetic inverse refinement, in degrees
const INVERSE_TOLERANCE: f64 = 1e-12;
const MAX_INVERSE_REFINEMENTS: usize = 8;

/// Helmert transformation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmert {
    /// Translation in meters
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    /// Rotation in arc-seconds
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    /// Scale change in parts per million
    pub s: f64,
}

impl Helmert {
    pub const WGS84_TO_OSGB36: Helmert = Helmert {
        tx: -446.448,
        ty: 125.157,
        tz: -542.060,
        rx: -0.1502,
        ry: -0.2470,
        rz: -0.8421,
        s: 20.4894,
    };

    fn translation(&self) -> Vector3<f64> {
        Vector3::new(self.tx, self.ty, self.tz)
    }

    /// Combined scale and small-angle rotation matrix
    fn matrix(&self) -> Matrix3<f64> {
        let rad = |arcsec: f64| (arcsec / 3600.0).to_radians();
        let (rx, ry, rz) = (rad(self.rx), rad(self.ry), rad(self.rz));
        let s1 = 1.0 + self.s * 1e-6;
        Matrix3::new(
            s1, -rz, ry, //
            rz, s1, -rx, //
            -ry, rx, s1,
        )
    }

    /// Parameters with every sign flipped, the first-order inverse
    pub fn negated(&self) -> Helmert {
        Helmert {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
            s: -self.s,
        }
    }

    /// Transform a cartesian position
    pub fn apply(&self, v: Vector3<f64>) -> Vector3<f64> {
        self.translation() + self.matrix() * v
    }

    /// Undo [`Helmert::apply`] exactly by inverting the matrix
    pub fn invert(&self, v: Vector3<f64>) -> Vector3<f64> {
        match self.matrix().try_inverse() {
            Some(inverse) => inverse * (v - self.translation()),
            None => self.negated().apply(v),
        }
    }

    /// Shift a latitude/longitude (degrees) from one datum to the other.
    ///
    /// Heights are taken as zero on input and discarded on output.
    pub fn apply_geodetic(
        &self,
        latitude: f64,
        longitude: f64,
        from: &Ellipsoid,
        to: &Ellipsoid,
    ) -> (f64, f64) {
        let v = to_cartesian(latitude, longitude, 0.0, from);
        let (lat, lon, _) = to_geodetic(self.apply(v), to);
        (lat, lon)
    }

    /// Reverse of [`Helmert::apply_geodetic`].
    ///
    /// The forward shift discards the height it introduces, so inverting the
    /// cartesian transform alone lands about a millimeter off. That estimate
    /// is refined until shifting it forward reproduces the input.
    pub fn invert_geodetic(
        &self,
        latitude: f64,
        longitude: f64,
        from: &Ellipsoid,
        to: &Ellipsoid,
    ) -> (f64, f64) {
        let v = to_cartesian(latitude, longitude, 0.0, from);
        let (mut lat, mut lon, _) = to_geodetic(self.invert(v), to);
        for _ in 0..MAX_INVERSE_REFINEMENTS {
            let (shifted_lat, shifted_lon) = self.apply_geodetic(lat, lon, to, from);
            let (dlat, dlon) = (latitude - shifted_lat, longitude - shifted_lon);
            lat += dlat;
            lon += dlon;
            if dlat.abs() < INVERSE_TOLERANCE && dlon.abs() < INVERSE_TOLERANCE {
                break;
            }
        }
        (lat, lon)
    }
}

/// Geodetic latitude/longitude (degrees) and height (meters) to cartesian
pub fn to_cartesian(latitude: f64, longitude: f64, height: f64, e: &Ellipsoid) -> Vector3<f64> {
    let (sin_phi, cos_phi) = latitude.to_radians().sin_cos();
    let (sin_lambda, cos_lambda) = longitude.to_radians().sin_cos();
    let e2 = e.e2();
    let nu = e.a / (1.0 - e2 * sin_phi * sin_phi).sqrt();

    Vector3::new(
        (nu + height) * cos_phi * cos_lambda,
        (nu + height) * cos_phi * sin_lambda,
        ((1.0 - e2) * nu + height) * sin_phi,
    )
}

/// Cartesian to geodetic latitude/longitude (degrees) and height (meters)
pub fn to_geodetic(v: Vector3<f64>, e: &Ellipsoid) -> (f64, f64, f64) {
    let e2 = e.e2();
    let p = (v.x * v.x + v.y * v.y).sqrt();
    let lambda = v.y.atan2(v.x);

    let mut phi = v.z.atan2(p * (1.0 - e2));
    let mut nu = e.a;
    for _ in 0..MAX_LATITUDE_ITERATIONS {
        nu = e.a / (1.0 - e2 * phi.sin().powi(2)).sqrt();
        let next = (v.z + e2 * nu * phi.sin()).atan2(p);
        let done = (next - phi).abs() < LATITUDE_TOLERANCE;
        phi = next;
        if done {
            break;
        }
    }
    let height = p / phi.cos() - nu;

    (phi.to_degrees(), lambda.to_degrees(), height)
}

#[cfg(test)]
mod tests {
    use super::super::{AIRY_1830, WGS84};
    use super::*;

    #[test]
    fn test_cartesian_equator() {
        let v = to_cartesian(0.0, 0.0, 0.0, &WGS84);
        assert!((v.x - WGS84.a).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
        assert!(v.z.abs() < 1e-6);
    }

    #[test]
    fn test_cartesian_round_trip() {
        for (lat, lon, h) in [(52.65757, 1.71792, 24.7), (-33.9, 151.2, 0.0), (60.8, -0.8, -50.0)] {
            let v = to_cartesian(lat, lon, h, &AIRY_1830);
            let (lat2, lon2, h2) = to_geodetic(v, &AIRY_1830);
            assert!((lat - lat2).abs() < 1e-9);
            assert!((lon - lon2).abs() < 1e-9);
            assert!((h - h2).abs() < 1e-3);
        }
    }

    #[test]
    fn test_invert_undoes_apply() {
        let h = Helmert::WGS84_TO_OSGB36;
        let v = to_cartesian(51.5, -0.12, 0.0, &WGS84);
        let back = h.invert(h.apply(v));
        assert!((back - v).norm() < 1e-6, "diff {}", (back - v).norm());
    }

    #[test]
    fn test_negated_is_close_to_invert() {
        let h = Helmert::WGS84_TO_OSGB36;
        let v = h.apply(to_cartesian(55.0, -3.0, 0.0, &WGS84));
        let exact = h.invert(v);
        let approx = h.negated().apply(v);
        assert!((exact - approx).norm() < 0.05);
    }

    #[test]
    fn test_geodetic_round_trip() {
        let h = Helmert::WGS84_TO_OSGB36;
        for (lat, lon) in [(50.313611, -4.223056), (51.5007, -0.1246), (52.6, 1.7), (60.1546, -1.1494)] {
            let (osgb_lat, osgb_lon) = h.apply_geodetic(lat, lon, &WGS84, &AIRY_1830);
            let (back_lat, back_lon) = h.invert_geodetic(osgb_lat, osgb_lon, &AIRY_1830, &WGS84);
            // 1e-10 deg is about 0.01 mm
            assert!((back_lat - lat).abs() < 1e-10, "lat {} -> {}", lat, back_lat);
            assert!((back_lon - lon).abs() < 1e-10, "lon {} -> {}", lon, back_lon);
        }
    }

    #[test]
    fn test_wgs84_to_osgb36_shift() {
        // OSGB36 lies roughly 50-120 m from WGS84 over Great Britain; in
        // London the OSGB36 latitude is smaller and longitude larger.
        let (lat, lon) =
            Helmert::WGS84_TO_OSGB36.apply_geodetic(51.5007, -0.1246, &WGS84, &AIRY_1830);
        assert!(lat < 51.5007 && lat > 51.4990, "lat {}", lat);
        assert!(lon > -0.1246 && lon < -0.1216, "lon {}", lon);
    }
}
