use contracts::domain::a003_bundle::aggregate::{Bundle, BundleDto};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, parse_json, ApiError};

pub async fn fetch_bundles() -> Result<Vec<Bundle>, ApiError> {
    let response = Request::get(&api_url("/api/bundle"))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;
    parse_json(response).await
}

/// Create a bundle; the backend re-validates against the catalog
pub async fn create_bundle(dto: &BundleDto) -> Result<Bundle, ApiError> {
    let response = Request::post(&api_url("/api/bundle"))
        .json(dto)
        .map_err(|e| ApiError::transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;
    parse_json(response).await
}
