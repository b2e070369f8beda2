use axum::{http::StatusCode, Json};
use contracts::domain::a004_student::aggregate::{Student, StudentDto};

use crate::domain::a004_student;
use crate::shared::error::ServiceResult;

/// GET /api/student
pub async fn list_all() -> ServiceResult<Json<Vec<Student>>> {
    Ok(Json(a004_student::service::list_all().await?))
}

/// POST /api/student
pub async fn upsert(Json(dto): Json<StudentDto>) -> ServiceResult<Json<Student>> {
    Ok(Json(a004_student::service::upsert(dto).await?))
}

/// POST /api/student/testdata
pub async fn insert_test_data() -> StatusCode {
    match a004_student::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("a004_student: test data failed: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
