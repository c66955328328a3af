use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use luminar_core::AssetRecord;
use luminar_inventory::Inventory;

use crate::geocode::Geocoder;
use crate::image::ImageClient;

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
    pub geocoder: Geocoder,
    pub images: ImageClient,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::now(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearestParams {
    address: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NearestData {
    pub record: AssetRecord,
    pub distance_m: f64,
    pub query_lat: f64,
    pub query_lon: f64,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    records: usize,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/nearest", get(nearest))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            records: state.inventory.records().len(),
        },
        meta: ResponseMeta::now(),
    })
}

/// Resolve a free-text address to the nearest inventoried fixture.
async fn nearest(
    State(state): State<AppState>,
    Query(params): Query<NearestParams>,
) -> Result<Json<ApiResponse<NearestData>>, ApiError> {
    let address = params.address.trim();
    if address.is_empty() {
        return Err(ApiError::new("bad_request", "address must not be empty"));
    }

    let located = state.geocoder.search(address).await.map_err(|e| {
        tracing::error!(error = %e, "geocoder request failed");
        ApiError::new("internal_error", "geocoder unavailable")
    })?;
    let Some((lat, lon)) = located else {
        return Err(ApiError::new(
            "not_found",
            format!("address could not be geocoded: {address}"),
        ));
    };

    let nearest = state.inventory.find_nearest(lat, lon);
    let Some(record) = nearest.record else {
        return Err(ApiError::new(
            "not_found",
            "no fixture matched: inventory is empty",
        ));
    };

    let record = record.clone();
    let image_url = state.images.illustration_url(&record).await;

    Ok(Json(ApiResponse {
        data: NearestData {
            record,
            distance_m: nearest.distance_m,
            query_lat: lat,
            query_lon: lon,
            image_url,
        },
        meta: ResponseMeta::now(),
    }))
}
