use async_trait::async_trait;
use contracts::domain::a001_tutor::aggregate::Tutor;
use contracts::shared::selection::UpdateProficienciesRequest;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, error_from_response, parse_json, post_empty, ApiError};
use crate::shared::persistence::ProficiencyUpdater;

/// Fetch all tutors
pub async fn fetch_tutors() -> Result<Vec<Tutor>, ApiError> {
    let response = Request::get(&api_url("/api/tutor"))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;
    parse_json(response).await
}

/// Fetch one tutor by id
pub async fn fetch_tutor(id: &str) -> Result<Tutor, ApiError> {
    let response = Request::get(&api_url(&format!("/api/tutor/{}", id)))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;
    parse_json(response).await
}

pub async fn insert_test_data() -> Result<(), ApiError> {
    post_empty("/api/tutor/testdata").await
}

/// `PUT /api/tutor/:id/proficiencies`
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProficiencyUpdater;

#[async_trait(?Send)]
impl ProficiencyUpdater for HttpProficiencyUpdater {
    async fn update_proficiencies(
        &self,
        tutor_id: &str,
        request: &UpdateProficienciesRequest,
    ) -> Result<Option<Tutor>, ApiError> {
        let url = api_url(&format!("/api/tutor/{}/proficiencies", tutor_id));
        let response = Request::put(&url)
            .json(request)
            .map_err(|e| ApiError::transport(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(error_from_response(response).await);
        }

        // A 2xx with an empty or `null` body is reported as `None`
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response: {}", e)))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str::<Option<Tutor>>(&text)
            .map_err(|e| ApiError::transport(format!("Failed to parse response: {}", e)))
    }
}
