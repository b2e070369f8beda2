use crate::domain::a001_tutor::api::{self, HttpProficiencyUpdater};
use crate::domain::a002_proficiency::service::CatalogService;
use crate::shared::confirm::ModalConfirm;
use crate::shared::list_utils::{filter_candidates, SearchValue};
use crate::shared::notifications::ToastService;
use crate::shared::persistence::{ProficiencySaver, SaveOutcome};
use crate::shared::selection_store::SelectionStore;
use contracts::domain::a001_tutor::aggregate::Tutor;
use contracts::domain::a002_proficiency::aggregate::Subject;
use leptos::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

type Saver = ProficiencySaver<HttpProficiencyUpdater, ModalConfirm, ToastService>;

/// Catalog subjects of the active category matching `query`, minus the ones
/// already selected there
pub fn subject_candidates(store: &SelectionStore, query: &str) -> Vec<Subject> {
    let Some(category) = store.active_category() else {
        return Vec::new();
    };
    let Some(proficiency) = store.catalog().proficiency(category) else {
        return Vec::new();
    };
    let all: Vec<Subject> = proficiency.subjects.values().cloned().collect();
    let excluded: HashSet<String> = store
        .active_subjects()
        .map(|subjects| subjects.keys().cloned().collect())
        .unwrap_or_default();
    let search = if query.trim().is_empty() {
        SearchValue::Empty
    } else {
        SearchValue::Text(query.to_string())
    };
    filter_candidates(&all, &search, &excluded)
}

#[derive(Clone)]
pub struct TutorProficienciesViewModel {
    /// Authoritative tutor as last returned by the server
    pub tutor: RwSignal<Option<Tutor>>,
    pub store: RwSignal<SelectionStore>,
    pub subject_query: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    saver: Arc<Saver>,
}

impl TutorProficienciesViewModel {
    pub fn new(modals: ModalConfirm, toasts: ToastService) -> Self {
        Self {
            tutor: RwSignal::new(None),
            store: RwSignal::new(SelectionStore::default()),
            subject_query: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            saver: Arc::new(ProficiencySaver::new(HttpProficiencyUpdater, modals, toasts)),
        }
    }

    pub fn from_context() -> Self {
        let toasts = use_context::<ToastService>().expect("ToastService not provided in context");
        Self::new(ModalConfirm::from_context(), toasts)
    }

    /// Feed every catalog refresh into the store
    pub fn bind_catalog(&self, catalog: CatalogService) {
        let store = self.store;
        if let Some(id) = catalog.subscribe(move |c| store.update(|s| s.set_catalog(c.clone()))) {
            on_cleanup(move || catalog.unsubscribe(id));
        }
        catalog.ensure_loaded();
    }

    pub fn load(&self, tutor_id: String) {
        let tutor = self.tutor;
        let store = self.store;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_tutor(&tutor_id).await {
                Ok(t) => {
                    store.update(|s| s.set_recorded(t.proficiencies.clone()));
                    tutor.set(Some(t));
                    error.set(None);
                }
                Err(e) => error.set(Some(e.message_or("Could not load the tutor."))),
            }
        });
    }

    pub fn candidates(&self) -> Vec<Subject> {
        let query = self.subject_query.get();
        self.store.with(|s| subject_candidates(s, &query))
    }

    pub fn activate_category(&self, name: &str) {
        self.subject_query.set(String::new());
        self.store.update(|s| s.activate_category(name));
    }

    pub fn add_subject(&self, subject: &Subject) {
        self.subject_query.set(String::new());
        self.store.update(|s| s.add_subject(&subject.name));
    }

    pub fn select_subject(&self, name: &str) {
        self.store.update(|s| s.select_subject(name));
    }

    pub fn remove_subject(&self, name: &str) {
        self.store.update(|s| s.remove_subject(name));
    }

    pub fn toggle_grade(&self, grade: &str) {
        self.store.update(|s| s.toggle_grade(grade));
    }

    pub fn commit_grades(&self) {
        self.store.update(|s| s.commit_grades());
    }

    pub fn discard(&self) {
        self.store.update(|s| s.reset());
    }

    pub fn save_command(&self) {
        let tutor = self.tutor;
        let store = self.store;
        let error = self.error;
        let saving = self.saving;
        let saver = self.saver.clone();
        let request = store.with_untracked(|s| s.to_request());
        let current = tutor.get_untracked();

        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = saver.save(current.as_ref(), request).await;
            match outcome {
                SaveOutcome::Saved(updated) => {
                    store.update(|s| {
                        s.reset();
                        s.set_recorded(updated.proficiencies.clone());
                    });
                    tutor.set(Some(updated));
                    error.set(None);
                }
                SaveOutcome::Failed(message) => error.set(Some(message)),
                SaveOutcome::NoActor => error.set(Some("No tutor loaded.".to_string())),
                SaveOutcome::NoChanges | SaveOutcome::InFlight | SaveOutcome::Cancelled => {}
            }
            saving.set(saver.is_saving());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_proficiency::aggregate::{Proficiency, ProficiencyCatalog};

    fn store() -> SelectionStore {
        SelectionStore::new(ProficiencyCatalog {
            proficiencies: vec![
                Proficiency::new("Cambridge")
                    .with_subject("Physics", &["A*", "A", "B"])
                    .with_subject("Chemistry", &["A", "B"])
                    .with_subject("Philosophy", &["A"]),
                Proficiency::new("IB").with_subject("Physics HL", &["7", "6"]),
            ],
        })
    }

    fn names(subjects: &[Subject]) -> Vec<&str> {
        subjects.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_no_candidates_without_active_category() {
        assert!(subject_candidates(&store(), "").is_empty());
    }

    #[test]
    fn test_candidates_follow_query() {
        let mut s = store();
        s.activate_category("Cambridge");
        assert_eq!(
            names(&subject_candidates(&s, "")),
            vec!["Physics", "Chemistry", "Philosophy"]
        );
        assert_eq!(names(&subject_candidates(&s, "ph")), vec!["Physics", "Philosophy"]);
    }

    #[test]
    fn test_candidates_exclude_selected_subjects() {
        let mut s = store();
        s.activate_category("Cambridge");
        s.add_subject("Physics");
        assert_eq!(names(&subject_candidates(&s, "ph")), vec!["Philosophy"]);

        s.remove_subject("Physics");
        assert_eq!(names(&subject_candidates(&s, "ph")), vec!["Physics", "Philosophy"]);
    }

    #[test]
    fn test_candidates_scoped_to_active_category() {
        let mut s = store();
        s.activate_category("Cambridge");
        s.add_subject("Physics");
        s.activate_category("IB");
        assert_eq!(names(&subject_candidates(&s, "phys")), vec!["Physics HL"]);
    }
}
