use axum::Json;
use contracts::domain::a003_bundle::aggregate::{Bundle, BundleDto};

use crate::domain::a003_bundle;
use crate::shared::error::ServiceResult;

/// GET /api/bundle
pub async fn list_all() -> ServiceResult<Json<Vec<Bundle>>> {
    Ok(Json(a003_bundle::service::list_all().await?))
}

/// POST /api/bundle
pub async fn create(Json(dto): Json<BundleDto>) -> ServiceResult<Json<Bundle>> {
    Ok(Json(a003_bundle::service::create(dto).await?))
}
