use crate::domain::a001_tutor::api as tutor_api;
use crate::domain::a002_proficiency::service::CatalogService;
use crate::domain::a003_bundle::api;
use crate::domain::a004_student::api as student_api;
use crate::shared::cascade::{CascadeRow, SelectField};
use crate::shared::list_utils::{filter_candidates, Searchable};
use crate::shared::notifications::{Notifier, ToastService};
use contracts::domain::a001_tutor::aggregate::Tutor;
use contracts::domain::a002_proficiency::aggregate::{Proficiency, ProficiencyCatalog, Subject};
use contracts::domain::a003_bundle::aggregate::{Bundle, BundleDto, LessonLine};
use contracts::domain::a004_student::aggregate::Student;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use std::collections::HashSet;

/// syllabus -> subject -> grade
pub type LessonRow = CascadeRow<Proficiency, Subject, String>;

pub const DEFAULT_HOURS: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
struct RowSlot {
    key: u64,
    row: LessonRow,
    hours: u32,
}

/// Plain form state; every mutation goes through the cascade rules
#[derive(Debug, Clone, PartialEq)]
pub struct BundleForm {
    pub student: SelectField<Student>,
    pub tutor: SelectField<Tutor>,
    rows: Vec<RowSlot>,
    next_key: u64,
}

impl Default for BundleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleForm {
    /// Starts with one empty lesson row
    pub fn new() -> Self {
        let mut form = Self {
            student: SelectField::enabled(),
            tutor: SelectField::enabled(),
            rows: Vec::new(),
            next_key: 1,
        };
        form.add_row();
        form
    }

    pub fn row_keys(&self) -> Vec<u64> {
        self.rows.iter().map(|slot| slot.key).collect()
    }

    fn slot(&self, key: u64) -> Option<&RowSlot> {
        self.rows.iter().find(|slot| slot.key == key)
    }

    fn slot_mut(&mut self, key: u64) -> Option<&mut RowSlot> {
        self.rows.iter_mut().find(|slot| slot.key == key)
    }

    pub fn row(&self, key: u64) -> Option<&LessonRow> {
        self.slot(key).map(|slot| &slot.row)
    }

    pub fn row_mut(&mut self, key: u64) -> Option<&mut LessonRow> {
        self.slot_mut(key).map(|slot| &mut slot.row)
    }

    /// New rows start with [`DEFAULT_HOURS`]
    pub fn add_row(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.rows.push(RowSlot {
            key,
            row: LessonRow::new(),
            hours: DEFAULT_HOURS,
        });
        key
    }

    pub fn remove_row(&mut self, key: u64) {
        self.rows.retain(|slot| slot.key != key);
    }

    pub fn hours(&self, key: u64) -> Option<u32> {
        self.slot(key).map(|slot| slot.hours)
    }

    /// Hours field text of one row; anything unparsable counts as zero
    pub fn set_hours_text(&mut self, key: u64, text: &str) {
        if let Some(slot) = self.slot_mut(key) {
            slot.hours = text.trim().parse().unwrap_or(0);
        }
    }

    /// Syllabi matching the row's syllabus text
    pub fn syllabus_candidates(&self, catalog: &ProficiencyCatalog, key: u64) -> Vec<Proficiency> {
        let Some(row) = self.row(key) else {
            return Vec::new();
        };
        filter_candidates(&catalog.proficiencies, &row.parent().search_value(), &HashSet::new())
    }

    /// Subjects of the row's syllabus, minus the ones other rows already use
    /// under the same syllabus
    pub fn subject_candidates(&self, key: u64) -> Vec<Subject> {
        let Some(row) = self.row(key) else {
            return Vec::new();
        };
        let Some(syllabus) = row.parent().value() else {
            return Vec::new();
        };
        let taken: HashSet<String> = self
            .rows
            .iter()
            .filter(|slot| slot.key != key)
            .filter_map(|slot| {
                let other_syllabus = slot.row.parent().value()?;
                let subject = slot.row.child().value()?;
                (other_syllabus.name == syllabus.name).then(|| subject.search_key())
            })
            .collect();
        let subjects: Vec<Subject> = syllabus.subjects.values().cloned().collect();
        filter_candidates(&subjects, &row.child().search_value(), &taken)
    }

    /// Grades offered for the row's subject
    pub fn grade_candidates(&self, key: u64) -> Vec<String> {
        let Some(row) = self.row(key) else {
            return Vec::new();
        };
        let Some(subject) = row.child().value() else {
            return Vec::new();
        };
        filter_candidates(&subject.grades, &row.grandchild().search_value(), &HashSet::new())
    }

    /// Synchronous validation; nothing is sent when this fails
    pub fn build_request(&self) -> Result<BundleDto, String> {
        let student = self
            .student
            .value()
            .ok_or_else(|| "Choose a student.".to_string())?;
        let tutor = self
            .tutor
            .value()
            .ok_or_else(|| "Choose a tutor.".to_string())?;
        if self.rows.is_empty() {
            return Err("Add at least one subject.".to_string());
        }
        let mut lessons = Vec::with_capacity(self.rows.len());
        for (index, slot) in self.rows.iter().enumerate() {
            let (syllabus, subject, grade) = slot
                .row
                .completed()
                .ok_or_else(|| format!("Complete subject row {}.", index + 1))?;
            lessons.push(LessonLine {
                syllabus: syllabus.name.clone(),
                subject: subject.name.clone(),
                grade: grade.clone(),
                hours: slot.hours,
            });
        }
        if let Some(index) = self.rows.iter().position(|slot| slot.hours == 0) {
            return Err(format!(
                "Hours for subject row {} must be greater than zero.",
                index + 1
            ));
        }
        Ok(BundleDto {
            tutor_id: tutor.id.as_string(),
            student_id: student.id.as_string(),
            lessons,
        })
    }
}

#[derive(Clone, Copy)]
pub struct BundleCreateViewModel {
    pub form: RwSignal<BundleForm>,
    pub catalog: RwSignal<ProficiencyCatalog>,
    pub students: RwSignal<Vec<Student>>,
    pub tutors: RwSignal<Vec<Tutor>>,
    pub error: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
}

impl BundleCreateViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(BundleForm::new()),
            catalog: RwSignal::new(ProficiencyCatalog::default()),
            students: RwSignal::new(Vec::new()),
            tutors: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            submitting: RwSignal::new(false),
        }
    }

    /// Fetch the people for the selectors and bind the shared catalog
    pub fn load(&self, catalog: CatalogService) {
        catalog.bind(self.catalog);

        let students = self.students;
        let tutors = self.tutors;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match student_api::fetch_students().await {
                Ok(v) => students.set(v),
                Err(e) => error.set(Some(e.message_or("Could not load students."))),
            }
            match tutor_api::fetch_tutors().await {
                Ok(v) => tutors.set(v),
                Err(e) => error.set(Some(e.message_or("Could not load tutors."))),
            }
        });
    }

    pub fn update_row(&self, key: u64, f: impl FnOnce(&mut LessonRow)) {
        self.form.update(|form| {
            if let Some(row) = form.row_mut(key) {
                f(row);
            }
        });
    }

    pub fn submit_command(&self, toasts: ToastService, on_created: Callback<Bundle>) {
        if self.submitting.get_untracked() {
            log::debug!("bundle: submit already in flight");
            return;
        }
        let dto = match self.form.with_untracked(BundleForm::build_request) {
            Ok(dto) => dto,
            Err(message) => {
                self.error.set(Some(message));
                return;
            }
        };

        self.error.set(None);
        self.submitting.set(true);
        let error = self.error;
        let submitting = self.submitting;
        wasm_bindgen_futures::spawn_local(async move {
            match api::create_bundle(&dto).await {
                Ok(bundle) => {
                    toasts.success("Bundle created.");
                    on_created.run(bundle);
                }
                Err(e) => {
                    log::error!("bundle: create failed: {}", e);
                    error.set(Some(e.message_or("Failed to create the bundle.")));
                }
            }
            submitting.set(false);
        });
    }
}

impl Default for BundleCreateViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_student::aggregate::StudentDto;

    fn catalog() -> ProficiencyCatalog {
        ProficiencyCatalog::new(vec![
            Proficiency::new("Cambridge")
                .with_subject("Physics", &["A*", "A", "B"])
                .with_subject("Chemistry", &["A", "B"]),
            Proficiency::new("IB").with_subject("Physics HL", &["7", "6"]),
        ])
    }

    fn student() -> Student {
        Student::new_for_insert(&StudentDto {
            name: "Dana Field".into(),
            ..Default::default()
        })
    }

    fn tutor() -> Tutor {
        Tutor::new_for_insert("Alice Moore".into(), None)
    }

    fn fill_row(form: &mut BundleForm, key: u64, syllabus: &str, subject: &str, grade: &str) {
        let catalog = catalog();
        let p = catalog.proficiency(syllabus).unwrap().clone();
        let s = p.subject(subject).unwrap().clone();
        let row = form.row_mut(key).unwrap();
        row.select_parent(p);
        row.select_child(s);
        row.select_grandchild(grade.to_string());
    }

    fn filled_form() -> BundleForm {
        let mut form = BundleForm::new();
        form.student.select(student());
        form.tutor.select(tutor());
        let key = form.row_keys()[0];
        fill_row(&mut form, key, "Cambridge", "Physics", "A");
        form
    }

    #[test]
    fn test_new_form_has_one_empty_row() {
        let form = BundleForm::new();
        let keys = form.row_keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(form.hours(keys[0]), Some(DEFAULT_HOURS));
        assert!(!form.row(keys[0]).unwrap().child().is_enabled());
    }

    #[test]
    fn test_build_request_for_complete_form() {
        let form = filled_form();
        let dto = form.build_request().unwrap();
        assert_eq!(dto.total_hours(), DEFAULT_HOURS);
        assert_eq!(
            dto.lessons,
            vec![LessonLine {
                syllabus: "Cambridge".into(),
                subject: "Physics".into(),
                grade: "A".into(),
                hours: DEFAULT_HOURS,
            }]
        );
        assert_eq!(dto.tutor_id, form.tutor.value().unwrap().id.as_string());
        assert!(dto.validate(&catalog()).is_ok());
    }

    #[test]
    fn test_build_request_requires_people() {
        let mut form = filled_form();
        form.student.set_text(String::new());
        assert_eq!(form.build_request().unwrap_err(), "Choose a student.");

        let mut form = filled_form();
        form.tutor.set_text("  ".into());
        assert_eq!(form.build_request().unwrap_err(), "Choose a tutor.");
    }

    #[test]
    fn test_retyped_student_name_is_not_submitted() {
        let mut form = filled_form();
        form.student.set_text("Bob Someone".into());
        assert!(form.student.value().is_none());
        assert_eq!(form.build_request().unwrap_err(), "Choose a student.");
    }

    #[test]
    fn test_build_request_rejects_incomplete_row() {
        let mut form = filled_form();
        let key = form.add_row();
        let p = catalog().proficiency("IB").unwrap().clone();
        form.row_mut(key).unwrap().select_parent(p);
        assert_eq!(form.build_request().unwrap_err(), "Complete subject row 2.");

        form.remove_row(key);
        assert!(form.build_request().is_ok());
    }

    #[test]
    fn test_build_request_rejects_no_rows_and_zero_hours() {
        let mut form = filled_form();
        let first = form.row_keys()[0];
        let second = form.add_row();
        fill_row(&mut form, second, "Cambridge", "Chemistry", "B");
        form.set_hours_text(second, "abc");
        assert_eq!(
            form.build_request().unwrap_err(),
            "Hours for subject row 2 must be greater than zero."
        );

        form.set_hours_text(second, " 12 ");
        assert_eq!(form.hours(second), Some(12));
        let dto = form.build_request().unwrap();
        assert_eq!(dto.lessons[0].hours, DEFAULT_HOURS);
        assert_eq!(dto.lessons[1].hours, 12);
        assert_eq!(dto.total_hours(), DEFAULT_HOURS + 12);

        form.set_hours_text(first, "0");
        assert!(form.build_request().unwrap_err().contains("row 1"));

        for key in form.row_keys() {
            form.remove_row(key);
        }
        assert_eq!(form.build_request().unwrap_err(), "Add at least one subject.");
    }

    #[test]
    fn test_incomplete_row_reported_before_hours() {
        let mut form = filled_form();
        let key = form.add_row();
        form.set_hours_text(key, "0");
        assert_eq!(form.build_request().unwrap_err(), "Complete subject row 2.");
    }

    #[test]
    fn test_hours_of_unknown_row_are_ignored() {
        let mut form = BundleForm::new();
        form.set_hours_text(99, "5");
        assert_eq!(form.hours(99), None);
    }

    #[test]
    fn test_changing_syllabus_clears_row_below() {
        let mut form = filled_form();
        let key = form.row_keys()[0];
        let ib = catalog().proficiency("IB").unwrap().clone();
        form.row_mut(key).unwrap().select_parent(ib);

        let row = form.row(key).unwrap();
        assert!(row.child().value().is_none());
        assert!(row.child().is_enabled());
        assert!(row.grandchild().value().is_none());
        assert!(!row.grandchild().is_enabled());
        assert!(form.build_request().is_err());
    }

    #[test]
    fn test_candidates_per_level() {
        let mut form = BundleForm::new();
        let key = form.row_keys()[0];
        let cat = catalog();

        assert_eq!(form.syllabus_candidates(&cat, key).len(), 2);
        assert!(form.subject_candidates(key).is_empty());
        assert!(form.grade_candidates(key).is_empty());

        form.row_mut(key).unwrap().set_parent_text("camb".into());
        let names: Vec<_> = form
            .syllabus_candidates(&cat, key)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Cambridge"]);

        fill_row(&mut form, key, "Cambridge", "Chemistry", "B");
        form.row_mut(key).unwrap().set_grandchild_text(String::new());
        assert_eq!(form.grade_candidates(key), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_subject_used_in_another_row_is_excluded() {
        let mut form = filled_form();
        let second = form.add_row();
        let cambridge = catalog().proficiency("Cambridge").unwrap().clone();
        form.row_mut(second).unwrap().select_parent(cambridge);

        let names: Vec<_> = form
            .subject_candidates(second)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Chemistry"]);
    }
}
