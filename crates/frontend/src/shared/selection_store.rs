//! Pending syllabus -> subject -> grades edits of the proficiency screen.
//!
//! Nothing here talks to the network; the store is handed to the save flow as
//! an [`UpdateProficienciesRequest`] snapshot. Only subjects whose grades were
//! committed go into that snapshot; a subject that was merely added is left out,
//! so saving never touches grades the tutor already has for it.

use contracts::domain::a002_proficiency::aggregate::ProficiencyCatalog;
use contracts::shared::selection::{SubjectSelections, SyllabusSelections, UpdateProficienciesRequest};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    catalog: ProficiencyCatalog,
    /// Proficiencies the tutor holds on the server
    recorded: SyllabusSelections,
    selections: SyllabusSelections,
    /// (category, subject) pairs whose grades were committed
    committed: HashSet<(String, String)>,
    active_category: Option<String>,
    editing_subject: Option<String>,
    grade_buffer: Vec<String>,
    chips: Vec<String>,
    available_grades: Vec<String>,
}

impl SelectionStore {
    pub fn new(catalog: ProficiencyCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Swap the candidate catalog; pending edits are kept
    pub fn set_catalog(&mut self, catalog: ProficiencyCatalog) {
        self.catalog = catalog;
        self.refresh_available_grades();
    }

    /// Swap the tutor's current proficiencies; pending edits are kept
    pub fn set_recorded(&mut self, recorded: SyllabusSelections) {
        self.recorded = recorded;
    }

    pub fn catalog(&self) -> &ProficiencyCatalog {
        &self.catalog
    }

    pub fn selections(&self) -> &SyllabusSelections {
        &self.selections
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn editing_subject(&self) -> Option<&str> {
        self.editing_subject.as_deref()
    }

    pub fn grade_buffer(&self) -> &[String] {
        &self.grade_buffer
    }

    /// Subject chips of the active category, in insertion order
    pub fn chips(&self) -> &[String] {
        &self.chips
    }

    /// Grades the editing subject is offered at
    pub fn available_grades(&self) -> &[String] {
        &self.available_grades
    }

    /// Subjects of the active category, if any
    pub fn active_subjects(&self) -> Option<&SubjectSelections> {
        self.selections.get(self.active_category.as_deref()?)
    }

    /// Make `name` the active category, creating its entry on first use.
    ///
    /// Unknown categories are ignored. Always closes the subject being edited.
    pub fn activate_category(&mut self, name: &str) {
        if self.catalog.proficiency(name).is_none() {
            log::debug!("selection: unknown category '{}' ignored", name);
            return;
        }
        self.selections.entry(name.to_string()).or_default();
        self.active_category = Some(name.to_string());
        self.close_editing();
        self.refresh_chips();
    }

    /// Add `name` under the active category (if missing) and open it for editing
    pub fn add_subject(&mut self, name: &str) {
        let Some(category) = self.active_category.clone() else {
            log::debug!("selection: add_subject without an active category");
            return;
        };
        if self.catalog.subject(&category, name).is_none() {
            log::debug!("selection: '{}' is not a subject of '{}'", name, category);
            return;
        }
        let subjects = self.selections.entry(category).or_default();
        if !subjects.contains_key(name) {
            subjects.insert(name.to_string(), Vec::new());
            self.refresh_chips();
        }
        self.open_editing(name);
    }

    /// Open an existing chip for editing
    pub fn select_subject(&mut self, name: &str) {
        let present = self
            .active_subjects()
            .is_some_and(|subjects| subjects.contains_key(name));
        if !present {
            log::debug!("selection: '{}' is not selected, nothing to edit", name);
            return;
        }
        self.open_editing(name);
    }

    /// Drop `name` from the active category.
    ///
    /// The editing pointer is cleared only when it pointed at `name`.
    pub fn remove_subject(&mut self, name: &str) {
        let Some(category) = self.active_category.clone() else {
            log::debug!("selection: remove_subject without an active category");
            return;
        };
        if let Some(subjects) = self.selections.get_mut(&category) {
            subjects.shift_remove(name);
        }
        self.committed.remove(&(category, name.to_string()));
        if self.editing_subject.as_deref() == Some(name) {
            self.close_editing();
        }
        self.refresh_chips();
    }

    /// Replace the editable grade buffer, keeping only grades the subject offers
    pub fn set_grade_buffer(&mut self, grades: Vec<String>) {
        if self.editing_subject.is_none() {
            return;
        }
        self.grade_buffer = grades
            .into_iter()
            .filter(|g| self.available_grades.contains(g))
            .collect();
    }

    pub fn toggle_grade(&mut self, grade: &str) {
        if self.editing_subject.is_none() || !self.available_grades.iter().any(|g| g == grade) {
            return;
        }
        if let Some(pos) = self.grade_buffer.iter().position(|g| g == grade) {
            self.grade_buffer.remove(pos);
        } else {
            self.grade_buffer.push(grade.to_string());
        }
    }

    /// Write a copy of the grade buffer under the editing subject and close the edit.
    ///
    /// Committing an empty buffer asks the server to drop the subject.
    pub fn commit_grades(&mut self) {
        let (Some(category), Some(subject)) =
            (self.active_category.clone(), self.editing_subject.clone())
        else {
            log::debug!("selection: commit without active category or editing subject");
            return;
        };
        if let Some(subjects) = self.selections.get_mut(&category) {
            subjects.insert(subject.clone(), self.grade_buffer.clone());
            self.committed.insert((category, subject));
        }
        self.close_editing();
    }

    /// True when at least one subject has committed grades
    pub fn has_changes(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Committed subjects only, grouped by category in insertion order
    pub fn to_request(&self) -> UpdateProficienciesRequest {
        let mut request = SyllabusSelections::new();
        for (category, subjects) in &self.selections {
            let committed: SubjectSelections = subjects
                .iter()
                .filter(|(subject, _)| {
                    self.committed
                        .contains(&(category.clone(), subject.to_string()))
                })
                .map(|(subject, grades)| (subject.clone(), grades.clone()))
                .collect();
            if !committed.is_empty() {
                request.insert(category.clone(), committed);
            }
        }
        UpdateProficienciesRequest::new(request)
    }

    /// Forget every pending edit; the catalog and recorded proficiencies stay
    pub fn reset(&mut self) {
        let catalog = std::mem::take(&mut self.catalog);
        let recorded = std::mem::take(&mut self.recorded);
        *self = Self::new(catalog);
        self.recorded = recorded;
    }

    /// Buffer starts from the committed grades, else from what the tutor holds
    fn open_editing(&mut self, name: &str) {
        self.editing_subject = Some(name.to_string());
        self.refresh_available_grades();
        let Some(category) = self.active_category.clone() else {
            return;
        };
        let source = if self.committed.contains(&(category.clone(), name.to_string())) {
            &self.selections
        } else {
            &self.recorded
        };
        let grades = source
            .get(&category)
            .and_then(|subjects| subjects.get(name))
            .cloned()
            .unwrap_or_default();
        self.grade_buffer = grades
            .into_iter()
            .filter(|g| self.available_grades.contains(g))
            .collect();
    }

    fn close_editing(&mut self) {
        self.editing_subject = None;
        self.grade_buffer.clear();
        self.available_grades.clear();
    }

    fn refresh_chips(&mut self) {
        self.chips = self
            .active_subjects()
            .map(|subjects| subjects.keys().cloned().collect())
            .unwrap_or_default();
    }

    fn refresh_available_grades(&mut self) {
        self.available_grades = match (&self.active_category, &self.editing_subject) {
            (Some(category), Some(subject)) => self.catalog.grades_for(category, subject),
            _ => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_tutor::aggregate::Tutor;
    use contracts::domain::a002_proficiency::aggregate::Proficiency;

    fn catalog() -> ProficiencyCatalog {
        ProficiencyCatalog::new(vec![
            Proficiency::new("Cambridge")
                .with_subject("Physics", &["11", "12"])
                .with_subject("Chemistry", &["10", "11"])
                .with_subject("Biology", &["12"]),
            Proficiency::new("IB").with_subject("Mathematics", &["HL", "SL"]),
        ])
    }

    fn grades(list: &[&str]) -> Vec<String> {
        list.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_commit_scenario() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        assert_eq!(store.available_grades(), grades(&["11", "12"]).as_slice());

        store.set_grade_buffer(grades(&["12"]));
        store.commit_grades();

        assert_eq!(store.selections()["Cambridge"]["Physics"], grades(&["12"]));
        assert_eq!(store.editing_subject(), None);
        assert!(store.grade_buffer().is_empty());
    }

    #[test]
    fn test_activate_category_is_idempotent() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        store.add_subject("Chemistry");
        let chips = store.chips().to_vec();

        store.activate_category("Cambridge");
        store.activate_category("Cambridge");
        assert_eq!(store.chips(), chips.as_slice());
        assert_eq!(store.selections().len(), 1);
        assert_eq!(store.selections()["Cambridge"].len(), 2);
        assert_eq!(store.editing_subject(), None);
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Edexcel");
        assert_eq!(store.active_category(), None);
        assert!(store.selections().is_empty());
    }

    #[test]
    fn test_subject_outside_active_category_is_ignored() {
        let mut store = SelectionStore::new(catalog());
        store.add_subject("Physics");
        assert!(store.selections().is_empty());

        store.activate_category("IB");
        store.add_subject("Physics");
        assert!(store.selections()["IB"].is_empty());
        assert_eq!(store.editing_subject(), None);
    }

    #[test]
    fn test_chips_follow_insertion_order() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Chemistry");
        store.add_subject("Physics");
        store.add_subject("Biology");
        store.add_subject("Chemistry");
        assert_eq!(store.chips(), ["Chemistry", "Physics", "Biology"]);
    }

    #[test]
    fn test_removing_other_subject_keeps_editing_pointer() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Chemistry");
        store.add_subject("Physics");
        store.set_grade_buffer(grades(&["12"]));
        store.commit_grades();

        store.add_subject("Biology");
        store.remove_subject("Chemistry");

        assert_eq!(store.selections()["Cambridge"]["Physics"], grades(&["12"]));
        assert_eq!(store.editing_subject(), Some("Biology"));
        assert_eq!(store.chips(), ["Physics", "Biology"]);
    }

    #[test]
    fn test_removing_edited_subject_clears_pointer() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        store.toggle_grade("11");
        store.remove_subject("Physics");
        assert_eq!(store.editing_subject(), None);
        assert!(store.grade_buffer().is_empty());
        assert!(store.chips().is_empty());
    }

    #[test]
    fn test_switching_editing_target_keeps_committed_grades() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        store.set_grade_buffer(grades(&["11", "12"]));
        store.commit_grades();

        store.add_subject("Physics");
        assert_eq!(store.grade_buffer(), grades(&["11", "12"]).as_slice());
        store.add_subject("Chemistry");

        assert_eq!(store.editing_subject(), Some("Chemistry"));
        assert!(store.grade_buffer().is_empty());
        assert_eq!(store.selections()["Cambridge"]["Physics"], grades(&["11", "12"]));
    }

    #[test]
    fn test_buffer_only_accepts_offered_grades() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Biology");
        store.set_grade_buffer(grades(&["9", "12", "11"]));
        assert_eq!(store.grade_buffer(), grades(&["12"]).as_slice());

        store.toggle_grade("10");
        store.toggle_grade("12");
        assert!(store.grade_buffer().is_empty());
    }

    #[test]
    fn test_commit_without_editing_subject_is_noop() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.commit_grades();
        assert!(store.selections()["Cambridge"].is_empty());
    }

    #[test]
    fn test_committed_grades_are_a_copy() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        store.set_grade_buffer(grades(&["11"]));
        store.commit_grades();

        store.select_subject("Physics");
        store.toggle_grade("12");
        assert_eq!(store.selections()["Cambridge"]["Physics"], grades(&["11"]));
    }

    #[test]
    fn test_switching_category_closes_edit_and_shows_its_chips() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        store.activate_category("IB");
        assert_eq!(store.editing_subject(), None);
        assert!(store.chips().is_empty());

        store.activate_category("Cambridge");
        assert_eq!(store.chips(), ["Physics"]);
    }

    #[test]
    fn test_has_changes_and_reset() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        assert!(!store.has_changes());
        assert!(store.to_request().is_empty());

        store.add_subject("Physics");
        assert!(!store.has_changes());

        store.toggle_grade("11");
        store.commit_grades();
        assert!(store.has_changes());

        store.reset();
        assert!(!store.has_changes());
        assert_eq!(store.active_category(), None);
        assert!(store.catalog().proficiency("Cambridge").is_some());
    }

    fn recorded_physics() -> SyllabusSelections {
        let mut subjects = SubjectSelections::new();
        subjects.insert("Physics".to_string(), grades(&["12"]));
        let mut recorded = SyllabusSelections::new();
        recorded.insert("Cambridge".to_string(), subjects);
        recorded
    }

    #[test]
    fn test_adding_recorded_subject_then_saving_keeps_its_grades() {
        let mut tutor = Tutor::new_for_insert("Ada".into(), None);
        tutor.proficiencies = recorded_physics();

        let mut store = SelectionStore::new(catalog());
        store.set_recorded(tutor.proficiencies.clone());
        store.activate_category("Cambridge");
        store.add_subject("Physics");

        assert_eq!(store.grade_buffer(), grades(&["12"]).as_slice());
        assert!(!store.has_changes());
        let request = store.to_request();
        assert!(request.is_empty());

        tutor.apply_proficiency_update(&request.syllabus_selections);
        assert_eq!(tutor.proficiencies, recorded_physics());
    }

    #[test]
    fn test_request_holds_only_committed_subjects() {
        let mut store = SelectionStore::new(catalog());
        store.set_recorded(recorded_physics());
        store.activate_category("Cambridge");
        store.add_subject("Chemistry");
        store.toggle_grade("10");
        store.commit_grades();
        store.add_subject("Physics");
        store.activate_category("IB");
        store.add_subject("Mathematics");

        let request = store.to_request();
        assert_eq!(request.syllabus_selections.len(), 1);
        let cambridge = &request.syllabus_selections["Cambridge"];
        assert_eq!(cambridge.len(), 1);
        assert_eq!(cambridge["Chemistry"], grades(&["10"]));
    }

    #[test]
    fn test_committing_no_grades_removes_recorded_subject() {
        let mut tutor = Tutor::new_for_insert("Ada".into(), None);
        tutor.proficiencies = recorded_physics();

        let mut store = SelectionStore::new(catalog());
        store.set_recorded(tutor.proficiencies.clone());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        store.toggle_grade("12");
        store.commit_grades();

        assert!(store.has_changes());
        tutor.apply_proficiency_update(&store.to_request().syllabus_selections);
        assert!(tutor.proficiencies.is_empty());
    }

    #[test]
    fn test_removing_committed_chip_drops_it_from_request() {
        let mut store = SelectionStore::new(catalog());
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        store.toggle_grade("11");
        store.commit_grades();
        store.remove_subject("Physics");

        assert!(!store.has_changes());
        assert!(store.to_request().is_empty());
    }

    #[test]
    fn test_reset_keeps_recorded_proficiencies() {
        let mut store = SelectionStore::new(catalog());
        store.set_recorded(recorded_physics());
        store.reset();
        store.activate_category("Cambridge");
        store.add_subject("Physics");
        assert_eq!(store.grade_buffer(), grades(&["12"]).as_slice());
    }
}
