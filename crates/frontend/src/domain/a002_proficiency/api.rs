use contracts::domain::a002_proficiency::aggregate::ProficiencyCatalog;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, parse_json, post_empty, ApiError};

/// Fetch the full syllabus -> subject -> grades catalog
pub async fn fetch_catalog() -> Result<ProficiencyCatalog, ApiError> {
    let response = Request::get(&api_url("/api/proficiency"))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;
    parse_json(response).await
}

/// Seed the demo catalog on an empty backend
pub async fn insert_test_data() -> Result<(), ApiError> {
    post_empty("/api/proficiency/testdata").await
}
