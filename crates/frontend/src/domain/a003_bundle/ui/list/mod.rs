use crate::domain::a001_tutor::api as tutor_api;
use crate::domain::a003_bundle::api;
use crate::domain::a003_bundle::ui::create::BundleCreate;
use crate::domain::a004_student::api as student_api;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use contracts::domain::a003_bundle::aggregate::Bundle;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct BundleRow {
    pub id: String,
    pub student: String,
    pub tutor: String,
    pub lessons: String,
    pub hours: String,
}

impl BundleRow {
    /// Unknown ids are shown as-is
    pub fn new(b: &Bundle, students: &HashMap<String, String>, tutors: &HashMap<String, String>) -> Self {
        let name = |names: &HashMap<String, String>, id: &str| {
            names.get(id).cloned().unwrap_or_else(|| id.to_string())
        };
        Self {
            id: b.id.as_string(),
            student: name(students, &b.student_id),
            tutor: name(tutors, &b.tutor_id),
            lessons: b
                .lessons
                .iter()
                .map(|l| format!("{} {} ({}, {}h)", l.syllabus, l.subject, l.grade, l.hours))
                .collect::<Vec<_>>()
                .join("; "),
            hours: format!("{} / {}", b.remaining_hours, b.hours),
        }
    }
}

#[component]
pub fn BundleList() -> impl IntoView {
    let bundles = RwSignal::new(Vec::<Bundle>::new());
    let students = RwSignal::new(HashMap::<String, String>::new());
    let tutors = RwSignal::new(HashMap::<String, String>::new());
    let error = RwSignal::new(None::<String>);
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let fetch = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_bundles().await {
                Ok(v) => {
                    bundles.set(v);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.message_or("Could not load bundles."))),
            }
            if let Ok(v) = student_api::fetch_students().await {
                students.set(v.into_iter().map(|s| (s.id.as_string(), s.name)).collect());
            }
            if let Ok(v) = tutor_api::fetch_tutors().await {
                tutors.set(v.into_iter().map(|t| (t.id.as_string(), t.name)).collect());
            }
        });
    };

    let open_create_modal = move || {
        modal_stack.push(move |handle| {
            let on_created = Callback::new(move |_: Bundle| {
                handle.close();
                fetch();
            });
            let on_cancel = Callback::new(move |_: ()| handle.close());
            view! { <BundleCreate on_created=on_created on_cancel=on_cancel /> }.into_any()
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <span class="header__icon">{icon("bundle")}</span>
                    <h1 class="header__title">"Bundles"</h1>
                </div>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_create_modal()>
                        {icon("plus")}
                        "New bundle"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        "Refresh"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Student"</th>
                            <th class="table__header-cell">"Tutor"</th>
                            <th class="table__header-cell">"Subjects"</th>
                            <th class="table__header-cell">"Hours left"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let students = students.get();
                            let tutors = tutors.get();
                            bundles.get().iter().map(|b| {
                                let row = BundleRow::new(b, &students, &tutors);
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{row.student}</td>
                                        <td class="table__cell">{row.tutor}</td>
                                        <td class="table__cell">{row.lessons}</td>
                                        <td class="table__cell">{row.hours}</td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_bundle::aggregate::{BundleDto, LessonLine};

    #[test]
    fn test_row_resolves_names_and_falls_back_to_ids() {
        let bundle = Bundle::new_for_insert(BundleDto {
            tutor_id: "t-1".into(),
            student_id: "s-9".into(),
            lessons: vec![LessonLine {
                syllabus: "IB".into(),
                subject: "Physics HL".into(),
                grade: "7".into(),
                hours: 8,
            }],
        });
        let tutors = HashMap::from([("t-1".to_string(), "Alice".to_string())]);
        let row = BundleRow::new(&bundle, &HashMap::new(), &tutors);
        assert_eq!(row.tutor, "Alice");
        assert_eq!(row.student, "s-9");
        assert_eq!(row.lessons, "IB Physics HL (7, 8h)");
        assert_eq!(row.hours, "8 / 8");
    }
}
