use axum::{http::StatusCode, Json};
use contracts::domain::a002_proficiency::aggregate::ProficiencyCatalog;

use crate::domain::a002_proficiency;
use crate::shared::error::ServiceResult;

/// GET /api/proficiency
pub async fn catalog() -> ServiceResult<Json<ProficiencyCatalog>> {
    Ok(Json(a002_proficiency::service::catalog().await?))
}

/// POST /api/proficiency/testdata
pub async fn insert_test_data() -> StatusCode {
    match a002_proficiency::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("a002_proficiency: test data failed: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
