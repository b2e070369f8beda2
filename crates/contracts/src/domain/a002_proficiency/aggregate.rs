use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::shared::selection::SyllabusSelections;

/// A teachable subject of a syllabus together with the grade levels it is offered at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Assigned by the server once persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub grades: Vec<String>,
}

impl Subject {
    pub fn new(name: impl Into<String>, grades: Vec<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            grades,
        }
    }

    pub fn offers_grade(&self, grade: &str) -> bool {
        self.grades.iter().any(|g| g == grade)
    }
}

/// Top-level grouping of subjects (exam board / syllabus), e.g. "Cambridge"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proficiency {
    pub name: String,
    /// Subject name -> subject, in display order
    #[serde(default)]
    pub subjects: IndexMap<String, Subject>,
}

impl Proficiency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subjects: IndexMap::new(),
        }
    }

    /// Builder used by seed data and tests
    pub fn with_subject(mut self, name: &str, grades: &[&str]) -> Self {
        let subject = Subject::new(name, grades.iter().map(|g| g.to_string()).collect());
        self.subjects.insert(name.to_string(), subject);
        self
    }

    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.get(name)
    }
}

/// Full syllabus -> subject -> grades catalog as served by `GET /api/proficiency`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProficiencyCatalog {
    pub proficiencies: Vec<Proficiency>,
}

impl ProficiencyCatalog {
    pub fn new(proficiencies: Vec<Proficiency>) -> Self {
        Self { proficiencies }
    }

    pub fn proficiency(&self, name: &str) -> Option<&Proficiency> {
        self.proficiencies.iter().find(|p| p.name == name)
    }

    pub fn subject(&self, proficiency: &str, subject: &str) -> Option<&Subject> {
        self.proficiency(proficiency)?.subject(subject)
    }

    /// Grades offered for a subject; empty when the pair is unknown
    pub fn grades_for(&self, proficiency: &str, subject: &str) -> Vec<String> {
        self.subject(proficiency, subject)
            .map(|s| s.grades.clone())
            .unwrap_or_default()
    }

    /// Check that every syllabus, subject and grade of `selections` exists in the catalog
    pub fn validate_selections(&self, selections: &SyllabusSelections) -> Result<(), String> {
        for (syllabus, subjects) in selections {
            let proficiency = self
                .proficiency(syllabus)
                .ok_or_else(|| format!("Unknown syllabus '{}'", syllabus))?;
            for (subject_name, grades) in subjects {
                let subject = proficiency.subject(subject_name).ok_or_else(|| {
                    format!("Unknown subject '{}' in syllabus '{}'", subject_name, syllabus)
                })?;
                if let Some(grade) = grades.iter().find(|g| !subject.offers_grade(g)) {
                    return Err(format!(
                        "Grade '{}' is not offered for {} ({})",
                        grade, subject_name, syllabus
                    ));
                }
            }
        }
        Ok(())
    }
}
