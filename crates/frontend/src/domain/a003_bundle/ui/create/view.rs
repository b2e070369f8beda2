use super::view_model::BundleCreateViewModel;
use crate::domain::a002_proficiency::service::use_catalog;
use crate::shared::autocomplete::Autocomplete;
use crate::shared::icons::icon;
use crate::shared::list_utils::filter_candidates;
use crate::shared::notifications::ToastService;
use contracts::domain::a001_tutor::aggregate::Tutor;
use contracts::domain::a002_proficiency::aggregate::{Proficiency, Subject};
use contracts::domain::a003_bundle::aggregate::Bundle;
use contracts::domain::a004_student::aggregate::Student;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

#[component]
pub fn BundleCreate(on_created: Callback<Bundle>, on_cancel: Callback<()>) -> impl IntoView {
    let vm = BundleCreateViewModel::new();
    vm.load(use_catalog());
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");
    let form = vm.form;

    let student_candidates = Signal::derive(move || {
        let search = form.with(|f| f.student.search_value());
        vm.students.with(|s| filter_candidates(s, &search, &HashSet::new()))
    });
    let tutor_candidates = Signal::derive(move || {
        let search = form.with(|f| f.tutor.search_value());
        vm.tutors.with(|t| filter_candidates(t, &search, &HashSet::new()))
    });

    view! {
        <div class="details-container bundle-create">
            <div class="details-header">
                <h3>{icon("bundle")}"New bundle"</h3>
            </div>

            {move || vm.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}

            <div class="details-form">
                <div class="form-group">
                    <label>"Student"</label>
                    <Autocomplete
                        text=Signal::derive(move || form.with(|f| f.student.text().to_string()))
                        candidates=student_candidates
                        on_input=Callback::new(move |v: String| form.update(|f| { f.student.set_text(v); }))
                        on_select=Callback::new(move |s: Student| form.update(|f| { f.student.select(s); }))
                        placeholder="Search students..."
                    />
                </div>

                <div class="form-group">
                    <label>"Tutor"</label>
                    <Autocomplete
                        text=Signal::derive(move || form.with(|f| f.tutor.text().to_string()))
                        candidates=tutor_candidates
                        on_input=Callback::new(move |v: String| form.update(|f| { f.tutor.set_text(v); }))
                        on_select=Callback::new(move |t: Tutor| form.update(|f| { f.tutor.select(t); }))
                        placeholder="Search tutors..."
                    />
                </div>

                <div class="lesson-rows">
                    <For
                        each=move || form.with(|f| f.row_keys())
                        key=|k| *k
                        children=move |k: u64| view! { <LessonRowEditor vm=vm row_key=k /> }
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| form.update(|f| { f.add_row(); })
                    >
                        {icon("plus")}
                        "Add subject"
                    </Button>
                </div>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit_command(toasts, on_created)
                    disabled=move || vm.submitting.get()
                >
                    {icon("save")}
                    {move || if vm.submitting.get() { "Creating..." } else { "Create" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn LessonRowEditor(vm: BundleCreateViewModel, row_key: u64) -> impl IntoView {
    let form = vm.form;
    let field_text = move |pick: fn(&super::LessonRow) -> String| {
        Signal::derive(move || form.with(|f| f.row(row_key).map(pick).unwrap_or_default()))
    };
    let field_disabled = move |pick: fn(&super::LessonRow) -> bool| {
        Signal::derive(move || form.with(|f| f.row(row_key).map(|r| !pick(r)).unwrap_or(true)))
    };

    let syllabus_candidates = Signal::derive(move || {
        vm.catalog.with(|c| form.with(|f| f.syllabus_candidates(c, row_key)))
    });
    let subject_candidates = Signal::derive(move || form.with(|f| f.subject_candidates(row_key)));
    let grade_candidates = Signal::derive(move || form.with(|f| f.grade_candidates(row_key)));

    view! {
        <div class="lesson-row">
            <Autocomplete
                text=field_text(|r| r.parent().text().to_string())
                candidates=syllabus_candidates
                disabled=field_disabled(|r| r.parent().is_enabled())
                on_input=Callback::new(move |v: String| vm.update_row(row_key, |r| r.set_parent_text(v)))
                on_select=Callback::new(move |p: Proficiency| vm.update_row(row_key, |r| r.select_parent(p)))
                placeholder="Syllabus"
            />
            <Autocomplete
                text=field_text(|r| r.child().text().to_string())
                candidates=subject_candidates
                disabled=field_disabled(|r| r.child().is_enabled())
                on_input=Callback::new(move |v: String| vm.update_row(row_key, |r| r.set_child_text(v)))
                on_select=Callback::new(move |s: Subject| vm.update_row(row_key, |r| r.select_child(s)))
                placeholder="Subject"
            />
            <Autocomplete
                text=field_text(|r| r.grandchild().text().to_string())
                candidates=grade_candidates
                disabled=field_disabled(|r| r.grandchild().is_enabled())
                on_input=Callback::new(move |v: String| vm.update_row(row_key, |r| r.set_grandchild_text(v)))
                on_select=Callback::new(move |g: String| vm.update_row(row_key, |r| r.select_grandchild(g)))
                placeholder="Grade"
            />
            <input
                class="lesson-row__hours"
                type="number"
                min="1"
                title="Hours"
                prop:value=move || form.with(|f| f.hours(row_key).unwrap_or_default().to_string())
                on:input=move |ev| form.update(|f| f.set_hours_text(row_key, &event_target_value(&ev)))
            />
            <button
                class="lesson-row__remove"
                title="Remove"
                on:click=move |_| form.update(|f| f.remove_row(row_key))
            >
                {icon("trash")}
            </button>
        </div>
    }
}
