//! WGS84 <-> national grid transverse-Mercator transform.
//!
//! The projected system is a transverse Mercator on the GRS-1980 ellipsoid:
//! central meridian -73°, latitude of origin 4°, scale factor 0.9992, false
//! easting 5 000 000 m, false northing 2 000 000 m. The series expansions are
//! the standard Snyder forward/inverse formulas.

use thiserror::Error;

/// GRS-1980 semi-major axis in meters.
const A: f64 = 6_378_137.0;
/// GRS-1980 flattening.
const F: f64 = 1.0 / 298.257_222_101;

const CENTRAL_MERIDIAN_DEG: f64 = -73.0;
const LAT_OF_ORIGIN_DEG: f64 = 4.0;
const SCALE_FACTOR: f64 = 0.9992;
const FALSE_EASTING: f64 = 5_000_000.0;
const FALSE_NORTHING: f64 = 2_000_000.0;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Meridian arc length from the equator to latitude `phi` (radians).
fn meridian_arc(phi: f64) -> f64 {
    let e2 = 2.0 * F - F * F;
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    A * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
        - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Project WGS84 geographic coordinates onto the national grid.
///
/// The series consumes coordinates in (longitude, latitude) axis order
/// internally; swapping that order produces wrong-but-plausible output, which
/// is why the unit tests pin points due north and due east of the grid
/// origin.
///
/// # Errors
///
/// Returns [`GeoError`] when `lat` is outside [-90, 90] or `lon` is outside
/// [-180, 180]. Boundary values are accepted.
pub fn to_projected(lat: f64, lon: f64) -> Result<(f64, f64), GeoError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeoError::LongitudeOutOfRange(lon));
    }

    let phi = lat.to_radians();
    let lam = lon.to_radians();
    let lam0 = CENTRAL_MERIDIAN_DEG.to_radians();

    let e2 = 2.0 * F - F * F;
    let e_prime2 = e2 / (1.0 - e2);

    let n = A / (1.0 - e2 * phi.sin().powi(2)).sqrt();
    let t = phi.tan().powi(2);
    let c = e_prime2 * phi.cos().powi(2);
    // (lon - lon0) first: the expansion is a function of the longitude offset
    // scaled by cos(lat).
    let a_coef = (lam - lam0) * phi.cos();

    let m = meridian_arc(phi);
    let m0 = meridian_arc(LAT_OF_ORIGIN_DEG.to_radians());

    let easting = SCALE_FACTOR
        * n
        * (a_coef
            + (1.0 - t + c) * a_coef.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * e_prime2) * a_coef.powi(5) / 120.0)
        + FALSE_EASTING;

    let northing = SCALE_FACTOR
        * (m - m0
            + n * phi.tan()
                * (a_coef.powi(2) / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a_coef.powi(4) / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * e_prime2) * a_coef.powi(6)
                        / 720.0))
        + FALSE_NORTHING;

    Ok((easting, northing))
}

/// Inverse transform: national grid easting/northing back to WGS84.
///
/// The inverse series produces an (x, y)-ordered pair — longitude before
/// latitude — so the result is remapped before returning (lat, lon).
#[must_use]
pub fn to_geographic(easting: f64, northing: f64) -> (f64, f64) {
    let x = easting - FALSE_EASTING;
    let y = northing - FALSE_NORTHING;

    let e2 = 2.0 * F - F * F;
    let e_prime2 = e2 / (1.0 - e2);
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let m = meridian_arc(LAT_OF_ORIGIN_DEG.to_radians()) + y / SCALE_FACTOR;
    let mu = m / (A * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let n1 = A / (1.0 - e2 * phi1.sin().powi(2)).sqrt();
    let t1 = phi1.tan().powi(2);
    let c1 = e_prime2 * phi1.cos().powi(2);
    let r1 = A * (1.0 - e2) / (1.0 - e2 * phi1.sin().powi(2)).powf(1.5);
    let d = x / (n1 * SCALE_FACTOR);

    let lat_rad = phi1
        - (n1 * phi1.tan() / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * e_prime2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                    - 252.0 * e_prime2
                    - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);

    let lon_rad = CENTRAL_MERIDIAN_DEG.to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * e_prime2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / phi1.cos();

    // Inverse math yields (x, y) order; callers get (lat, lon).
    (lat_rad.to_degrees(), lon_rad.to_degrees())
}
