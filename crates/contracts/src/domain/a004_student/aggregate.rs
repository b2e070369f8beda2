use serde::{Deserialize, Serialize};

use crate::domain::common::EntityMetadata;
use crate::uuid_aggregate_id;

uuid_aggregate_id!(
    /// Unique student identifier
    StudentId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// School year the student is in, free text ("11", "IB1")
    #[serde(default)]
    pub school_grade: Option<String>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Student {
    pub fn new_for_insert(dto: &StudentDto) -> Self {
        Self {
            id: StudentId::new_v4(),
            name: dto.name.clone(),
            email: dto.email.clone(),
            school_grade: dto.school_grade.clone(),
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &StudentDto) {
        self.name = dto.name.clone();
        self.email = dto.email.clone();
        self.school_grade = dto.school_grade.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Student name must not be empty".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub school_grade: Option<String>,
}
