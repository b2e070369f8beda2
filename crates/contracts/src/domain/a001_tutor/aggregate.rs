use serde::{Deserialize, Serialize};

use crate::domain::common::EntityMetadata;
use crate::shared::selection::SyllabusSelections;
use crate::uuid_aggregate_id;

uuid_aggregate_id!(
    /// Unique tutor identifier
    TutorId
);

/// Tutor with the proficiencies (syllabus -> subject -> grades) they can teach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: TutorId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub proficiencies: SyllabusSelections,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Tutor {
    pub fn new_for_insert(name: String, email: Option<String>) -> Self {
        Self {
            id: TutorId::new_v4(),
            name,
            email,
            proficiencies: SyllabusSelections::new(),
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &TutorDto) {
        self.name = dto.name.clone();
        self.email = dto.email.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Tutor name must not be empty".into());
        }
        if let Some(email) = &self.email {
            if !email.trim().is_empty() && !email.contains('@') {
                return Err(format!("'{}' is not a valid e-mail address", email));
            }
        }
        Ok(())
    }

    /// Merge a partial selection into the tutor's proficiencies.
    ///
    /// A subject's grade list replaces the current one; an empty list removes the
    /// subject. Syllabi left without subjects are dropped.
    pub fn apply_proficiency_update(&mut self, update: &SyllabusSelections) {
        for (syllabus, subjects) in update {
            let current = self.proficiencies.entry(syllabus.clone()).or_default();
            for (subject, grades) in subjects {
                if grades.is_empty() {
                    current.shift_remove(subject);
                } else {
                    current.insert(subject.clone(), grades.clone());
                }
            }
        }
        self.proficiencies.retain(|_, subjects| !subjects.is_empty());
    }

    /// Number of (subject, grade) pairs across all syllabi
    pub fn proficiency_count(&self) -> usize {
        self.proficiencies
            .values()
            .flat_map(|subjects| subjects.values())
            .map(Vec::len)
            .sum()
    }
}

/// Create / edit form of a tutor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TutorDto {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
}
