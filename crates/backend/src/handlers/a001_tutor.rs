use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_tutor::aggregate::{Tutor, TutorDto};
use contracts::shared::selection::UpdateProficienciesRequest;

use crate::domain::a001_tutor;
use crate::shared::error::ServiceResult;

/// GET /api/tutor
pub async fn list_all() -> ServiceResult<Json<Vec<Tutor>>> {
    Ok(Json(a001_tutor::service::list_all().await?))
}

/// GET /api/tutor/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Tutor>> {
    Ok(Json(a001_tutor::service::get_by_id(&id).await?))
}

/// POST /api/tutor
pub async fn upsert(Json(dto): Json<TutorDto>) -> ServiceResult<Json<Tutor>> {
    Ok(Json(a001_tutor::service::upsert(dto).await?))
}

/// PUT /api/tutor/:id/proficiencies
pub async fn update_proficiencies(
    Path(id): Path<String>,
    Json(request): Json<UpdateProficienciesRequest>,
) -> ServiceResult<Json<Tutor>> {
    Ok(Json(
        a001_tutor::service::update_proficiencies(&id, request).await?,
    ))
}

/// POST /api/tutor/testdata
pub async fn insert_test_data() -> StatusCode {
    match a001_tutor::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("a001_tutor: test data failed: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
