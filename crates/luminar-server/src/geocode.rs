//! Free-text address geocoding.
//!
//! Thin client over a Nominatim-style search endpoint. The core never sees
//! addresses — this is the boundary that turns them into WGS84 coordinates
//! before the inventory query runs.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error from geocoder: {0}")]
    Http(#[from] reqwest::Error),
}

/// One hit from the search endpoint. Nominatim serializes coordinates as
/// strings.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

#[derive(Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Resolve a free-text address to WGS84 coordinates.
    ///
    /// `Ok(None)` means the geocoder answered but found nothing (or returned
    /// an unparseable hit); transport and HTTP-status failures surface as
    /// [`GeocodeError`].
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] on transport failure or a non-success
    /// status.
    pub async fn search(&self, address: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        let url = format!(
            "{}/search?format=json&limit=1&q={}",
            self.base_url.trim_end_matches('/'),
            utf8_percent_encode(address, NON_ALPHANUMERIC),
        );

        let hits: Vec<GeocodeHit> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(hit) = hits.first() else {
            tracing::debug!(address, "geocoder found no match");
            return Ok(None);
        };

        match (hit.lat.parse::<f64>(), hit.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => Ok(Some((lat, lon))),
            _ => {
                tracing::warn!(address, lat = %hit.lat, lon = %hit.lon, "unparseable geocoder hit");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn geocoder(base_url: &str) -> Geocoder {
        Geocoder::new(reqwest::Client::new(), base_url)
    }

    #[tokio::test]
    async fn resolves_an_address_to_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Cra 54 #70-12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "10.9934", "lon": "-74.7898" }
            ])))
            .mount(&server)
            .await;

        let result = geocoder(&server.uri())
            .search("Cra 54 #70-12")
            .await
            .expect("geocoder reachable");
        let (lat, lon) = result.expect("hit");
        assert!((lat - 10.9934).abs() < 1e-9);
        assert!((lon + 74.7898).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_result_set_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let result = geocoder(&server.uri()).search("nowhere at all").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn unparseable_hit_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "north-ish", "lon": "-74.7898" }
            ])))
            .mount(&server)
            .await;

        let result = geocoder(&server.uri()).search("strange place").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn server_error_surfaces_as_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = geocoder(&server.uri()).search("anywhere").await;
        assert!(matches!(result, Err(GeocodeError::Http(_))));
    }
}
