//! Illustration images for resolved assets.
//!
//! Asks a configured image service to render a picture of the fixture; when
//! the service is absent or unreachable it synthesizes a small SVG locally so
//! the response shape never degrades.

use luminar_core::AssetRecord;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RenderResponse {
    url: String,
}

#[derive(Clone)]
pub struct ImageClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ImageClient {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: Option<String>) -> Self {
        Self { client, base_url }
    }

    /// URL of an illustrative image for the record.
    ///
    /// Never fails: a missing or failing image service falls back to a
    /// self-contained placeholder.
    pub async fn illustration_url(&self, record: &AssetRecord) -> String {
        let Some(base_url) = &self.base_url else {
            return placeholder_url(record);
        };

        match self.render(base_url, record).await {
            Ok(url) => url,
            Err(error) => {
                tracing::warn!(error = %error, "image service unavailable, using placeholder");
                placeholder_url(record)
            }
        }
    }

    async fn render(&self, base_url: &str, record: &AssetRecord) -> Result<String, reqwest::Error> {
        let url = format!(
            "{}/render?lat={}&lon={}",
            base_url.trim_end_matches('/'),
            record.latitude.unwrap_or_default(),
            record.longitude.unwrap_or_default(),
        );
        let rendered: RenderResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rendered.url)
    }
}

/// Deterministic inline-SVG data URI labelled with the asset code.
fn placeholder_url(record: &AssetRecord) -> String {
    let label = record.code.as_deref().unwrap_or("luminaria");
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='320' height='200'>\
         <rect width='320' height='200' fill='#1d2733'/>\
         <circle cx='160' cy='70' r='28' fill='#f5d76e'/>\
         <text x='160' y='160' text-anchor='middle' fill='#f5f5f5' \
         font-family='monospace' font-size='16'>{label}</text></svg>"
    );
    format!(
        "data:image/svg+xml,{}",
        utf8_percent_encode(&svg, NON_ALPHANUMERIC)
    )
}
