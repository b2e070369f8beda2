use super::repository;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a004_student::aggregate::{Student, StudentDto};
use uuid::Uuid;

pub async fn list_all() -> anyhow::Result<Vec<Student>> {
    repository::list_all().await
}

pub async fn get_by_id(id: &str) -> ServiceResult<Student> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| ServiceError::Validation(format!("Invalid student id '{}'", id)))?;
    repository::get_by_id(uuid)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Student {}", id)))
}

/// Create when `dto.id` is empty, update otherwise
pub async fn upsert(dto: StudentDto) -> ServiceResult<Student> {
    match dto.id.as_deref().filter(|id| !id.trim().is_empty()) {
        None => {
            let student = Student::new_for_insert(&dto);
            student.validate().map_err(ServiceError::Validation)?;
            repository::insert(&student).await?;
            Ok(student)
        }
        Some(id) => {
            let mut student = get_by_id(id).await?;
            student.update(&dto);
            student.validate().map_err(ServiceError::Validation)?;
            student.metadata.touch();
            repository::update(&student).await?;
            Ok(student)
        }
    }
}

pub async fn insert_test_data() -> anyhow::Result<()> {
    if !repository::list_all().await?.is_empty() {
        tracing::info!("a004_student: students already present, test data skipped");
        return Ok(());
    }
    let data = [
        ("Dana Field", "Year 11"),
        ("Emil Novak", "Year 12"),
        ("Farah Idris", "Year 13"),
    ];
    for (name, grade) in data {
        let student = Student::new_for_insert(&StudentDto {
            id: None,
            name: name.to_string(),
            email: None,
            school_grade: Some(grade.to_string()),
        });
        repository::insert(&student).await?;
    }
    Ok(())
}
