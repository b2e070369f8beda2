//! Selection payloads: syllabus -> subject -> grades.
//!
//! Maps are insertion ordered; subject chips render in the order they were added.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Subject name -> selected grade labels
pub type SubjectSelections = IndexMap<String, Vec<String>>;

/// Syllabus (category) name -> subject selections
pub type SyllabusSelections = IndexMap<String, SubjectSelections>;

/// Body of `PUT /api/tutor/:id/proficiencies`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProficienciesRequest {
    #[serde(rename = "syllabusSelections")]
    pub syllabus_selections: SyllabusSelections,
}

impl UpdateProficienciesRequest {
    pub fn new(syllabus_selections: SyllabusSelections) -> Self {
        Self {
            syllabus_selections,
        }
    }

    /// True when no syllabus carries any subject
    pub fn is_empty(&self) -> bool {
        self.syllabus_selections
            .values()
            .all(|subjects| subjects.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_when_only_bare_syllabi() {
        let mut selections = SyllabusSelections::new();
        assert!(UpdateProficienciesRequest::new(selections.clone()).is_empty());

        selections.insert("Cambridge".into(), SubjectSelections::new());
        assert!(UpdateProficienciesRequest::new(selections.clone()).is_empty());

        selections
            .get_mut("Cambridge")
            .unwrap()
            .insert("Physics".into(), vec![]);
        assert!(!UpdateProficienciesRequest::new(selections).is_empty());
    }

    #[test]
    fn test_serializes_with_camel_case_key_and_order() {
        let mut subjects = SubjectSelections::new();
        subjects.insert("Physics".into(), vec!["12".into()]);
        subjects.insert("Chemistry".into(), vec!["11".into()]);
        let mut selections = SyllabusSelections::new();
        selections.insert("Cambridge".into(), subjects);

        let json = serde_json::to_string(&UpdateProficienciesRequest::new(selections)).unwrap();
        assert_eq!(
            json,
            r#"{"syllabusSelections":{"Cambridge":{"Physics":["12"],"Chemistry":["11"]}}}"#
        );
    }
}
