use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, as used by the Haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// One normalized street-light fixture from the inventory.
///
/// Descriptive attributes are free text straight from the source table.
/// Coordinates are WGS84 decimal degrees and are only present once
/// normalization succeeded; the inventory cache never retains a record
/// without them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRecord {
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub code: Option<String>,
    pub technology: Option<String>,
    pub power: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AssetRecord {
    /// Haversine great-circle distance in meters from this record to the
    /// given point.
    ///
    /// A record without coordinates is treated as infinitely far away
    /// (`f64::MAX`) so it can never win a nearest-neighbor comparison.
    #[must_use]
    pub fn distance_m(&self, lat: f64, lon: f64) -> f64 {
        let (Some(rec_lat), Some(rec_lon)) = (self.latitude, self.longitude) else {
            return f64::MAX;
        };

        let d_lat = (lat - rec_lat).to_radians();
        let d_lon = (lon - rec_lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + rec_lat.to_radians().cos() * lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c * 1000.0
    }

    /// Whether normalization produced both coordinates.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
