use super::repository;
use crate::domain::{a001_tutor, a002_proficiency, a004_student};
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a003_bundle::aggregate::{Bundle, BundleDto};

pub async fn list_all() -> anyhow::Result<Vec<Bundle>> {
    repository::list_all().await
}

/// Validate against the catalog and check both people exist before inserting
pub async fn create(dto: BundleDto) -> ServiceResult<Bundle> {
    let catalog = a002_proficiency::service::catalog().await?;
    dto.validate(&catalog).map_err(ServiceError::Validation)?;

    let tutor = a001_tutor::service::get_by_id(&dto.tutor_id).await?;
    let student = a004_student::service::get_by_id(&dto.student_id).await?;

    let bundle = Bundle::new_for_insert(dto);
    repository::insert(&bundle).await?;
    tracing::info!(
        "a003_bundle: {} hours of {} lesson line(s) for {} with {}",
        bundle.hours,
        bundle.lessons.len(),
        student.name,
        tutor.name
    );
    Ok(bundle)
}
