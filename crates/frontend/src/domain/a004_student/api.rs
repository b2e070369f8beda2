use contracts::domain::a004_student::aggregate::Student;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, parse_json, post_empty, ApiError};

/// Fetch all students
pub async fn fetch_students() -> Result<Vec<Student>, ApiError> {
    let response = Request::get(&api_url("/api/student"))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;
    parse_json(response).await
}

pub async fn insert_test_data() -> Result<(), ApiError> {
    post_empty("/api/student/testdata").await
}
