use super::repository;
use crate::domain::a002_proficiency;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a001_tutor::aggregate::{Tutor, TutorDto};
use contracts::domain::a002_proficiency::aggregate::ProficiencyCatalog;
use contracts::shared::selection::UpdateProficienciesRequest;
use uuid::Uuid;

fn parse_id(id: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Invalid tutor id '{}'", id)))
}

pub async fn list_all() -> anyhow::Result<Vec<Tutor>> {
    repository::list_all().await
}

pub async fn get_by_id(id: &str) -> ServiceResult<Tutor> {
    repository::get_by_id(parse_id(id)?)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Tutor {}", id)))
}

/// Create when `dto.id` is empty, update otherwise
pub async fn upsert(dto: TutorDto) -> ServiceResult<Tutor> {
    match dto.id.as_deref().filter(|id| !id.trim().is_empty()) {
        None => {
            let tutor = Tutor::new_for_insert(dto.name, dto.email);
            tutor.validate().map_err(ServiceError::Validation)?;
            repository::insert(&tutor).await?;
            tracing::info!("a001_tutor: created {}", tutor.name);
            Ok(tutor)
        }
        Some(id) => {
            let mut tutor = get_by_id(id).await?;
            tutor.update(&dto);
            tutor.validate().map_err(ServiceError::Validation)?;
            tutor.metadata.touch();
            repository::update(&tutor).await?;
            Ok(tutor)
        }
    }
}

/// Validate the request against the catalog, then merge it into the tutor.
///
/// Nothing is applied when any entry is unknown.
pub fn merge_proficiencies(
    tutor: &mut Tutor,
    catalog: &ProficiencyCatalog,
    request: &UpdateProficienciesRequest,
) -> ServiceResult<()> {
    catalog
        .validate_selections(&request.syllabus_selections)
        .map_err(ServiceError::Validation)?;
    tutor.apply_proficiency_update(&request.syllabus_selections);
    tutor.metadata.touch();
    Ok(())
}

/// `PUT /api/tutor/:id/proficiencies`; returns the merged tutor
pub async fn update_proficiencies(
    id: &str,
    request: UpdateProficienciesRequest,
) -> ServiceResult<Tutor> {
    let mut tutor = get_by_id(id).await?;
    let catalog = a002_proficiency::service::catalog().await?;
    merge_proficiencies(&mut tutor, &catalog, &request)?;
    repository::update(&tutor).await?;
    tracing::info!(
        "a001_tutor: {} now has {} proficiencies",
        tutor.name,
        tutor.proficiency_count()
    );
    Ok(tutor)
}

pub async fn insert_test_data() -> anyhow::Result<()> {
    if !repository::list_all().await?.is_empty() {
        tracing::info!("a001_tutor: tutors already present, test data skipped");
        return Ok(());
    }
    let data = [
        ("Alice Moore", "alice.moore@example.com"),
        ("Bilal Khan", "bilal.khan@example.com"),
        ("Chen Wei", "chen.wei@example.com"),
    ];
    for (name, email) in data {
        let tutor = Tutor::new_for_insert(name.to_string(), Some(email.to_string()));
        repository::insert(&tutor).await?;
    }
    Ok(())
}
