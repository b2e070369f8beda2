use super::view_model::TutorProficienciesViewModel;
use crate::domain::a002_proficiency::service::use_catalog;
use crate::shared::autocomplete::Autocomplete;
use crate::shared::icons::icon;
use contracts::domain::a002_proficiency::aggregate::Subject;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TutorProficiencies(tutor_id: String, on_back: Callback<()>) -> impl IntoView {
    let vm = TutorProficienciesViewModel::from_context();
    let catalog = use_catalog();
    vm.bind_catalog(catalog);
    vm.load(tutor_id);

    let vm_clone = vm.clone();
    let saving = vm.saving;

    view! {
        <div class="page tutor-proficiencies">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">
                        {
                            let vm = vm_clone.clone();
                            move || vm.tutor.get().map(|t| t.name).unwrap_or_else(|| "Loading...".to_string())
                        }
                    </h1>
                </div>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_back.run(())>
                        "Back"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click={
                            let vm = vm_clone.clone();
                            move |_| vm.discard()
                        }
                        disabled={
                            let vm = vm_clone.clone();
                            move || !vm.store.with(|s| s.has_changes())
                        }
                    >
                        "Discard"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click={
                            let vm = vm_clone.clone();
                            move |_| vm.save_command()
                        }
                        disabled=move || saving.get()
                    >
                        {icon("save")}
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                </div>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })
            }
            {move || catalog.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Warning>{e}</MessageBar>
            })}

            <CurrentProficiencies vm=vm_clone.clone() />

            <div class="proficiency-editor">
                <div class="proficiency-editor__categories">
                    {
                        let vm = vm_clone.clone();
                        move || {
                            let active = vm.store.with(|s| s.active_category().map(str::to_string));
                            let names: Vec<String> = vm.store.with(|s| {
                                s.catalog().proficiencies.iter().map(|p| p.name.clone()).collect()
                            });
                            names.into_iter().map(|name| {
                                let is_active = active.as_deref() == Some(name.as_str());
                                let vm = vm.clone();
                                let label = name.clone();
                                view! {
                                    <Button
                                        appearance=if is_active { ButtonAppearance::Primary } else { ButtonAppearance::Secondary }
                                        on_click=move |_| vm.activate_category(&name)
                                    >
                                        {label}
                                    </Button>
                                }
                            }).collect_view()
                        }
                    }
                </div>

                <Show when={
                    let vm = vm_clone.clone();
                    move || vm.store.with(|s| s.active_category().is_some())
                }>
                    <SubjectPicker vm=vm_clone.clone() />
                    <SubjectChips vm=vm_clone.clone() />
                    <GradeEditor vm=vm_clone.clone() />
                </Show>
            </div>
        </div>
    }
}

#[component]
fn SubjectPicker(vm: TutorProficienciesViewModel) -> impl IntoView {
    let query = vm.subject_query;
    let candidates = Signal::derive({
        let vm = vm.clone();
        move || vm.candidates()
    });
    let on_select = Callback::new({
        let vm = vm.clone();
        move |subject: Subject| vm.add_subject(&subject)
    });

    view! {
        <div class="proficiency-editor__picker">
            <Autocomplete
                text=query
                candidates=candidates
                on_input=Callback::new(move |v: String| query.set(v))
                on_select=on_select
                placeholder="Add a subject..."
            />
        </div>
    }
}

#[component]
fn SubjectChips(vm: TutorProficienciesViewModel) -> impl IntoView {
    view! {
        <div class="proficiency-editor__chips">
            {move || {
                let editing = vm.store.with(|s| s.editing_subject().map(str::to_string));
                let chips: Vec<(String, usize)> = vm.store.with(|s| {
                    s.chips()
                        .iter()
                        .map(|name| {
                            let count = s
                                .active_subjects()
                                .and_then(|subjects| subjects.get(name))
                                .map(Vec::len)
                                .unwrap_or(0);
                            (name.clone(), count)
                        })
                        .collect()
                });
                chips.into_iter().map(|(name, count)| {
                    let is_editing = editing.as_deref() == Some(name.as_str());
                    let select = {
                        let vm = vm.clone();
                        let name = name.clone();
                        move |_| vm.select_subject(&name)
                    };
                    let remove = {
                        let vm = vm.clone();
                        let name = name.clone();
                        move |ev: leptos::ev::MouseEvent| {
                            ev.stop_propagation();
                            vm.remove_subject(&name);
                        }
                    };
                    view! {
                        <span class="chip" class:chip--active=is_editing on:click=select>
                            {name}
                            <Badge>{count}</Badge>
                            <button class="chip__remove" title="Remove" on:click=remove>
                                {icon("x")}
                            </button>
                        </span>
                    }
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn GradeEditor(vm: TutorProficienciesViewModel) -> impl IntoView {
    let vm_clone = vm.clone();
    view! {
        <Show when={
            let vm = vm_clone.clone();
            move || vm.store.with(|s| s.editing_subject().is_some())
        }>
            <div class="proficiency-editor__grades">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || vm.store.with(|s| s.editing_subject().unwrap_or_default().to_string())
                    }
                </h3>
                <div class="grade-options">
                    {
                        let vm = vm_clone.clone();
                        move || {
                            let (available, buffer) = vm.store.with(|s| {
                                (s.available_grades().to_vec(), s.grade_buffer().to_vec())
                            });
                            available.into_iter().map(|grade| {
                                let checked = buffer.contains(&grade);
                                let vm = vm.clone();
                                let label = grade.clone();
                                view! {
                                    <label class="grade-option">
                                        <input
                                            type="checkbox"
                                            prop:checked=checked
                                            on:change=move |_| vm.toggle_grade(&grade)
                                        />
                                        {label}
                                    </label>
                                }
                            }).collect_view()
                        }
                    }
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click={
                        let vm = vm_clone.clone();
                        move |_| vm.commit_grades()
                    }
                >
                    {icon("check")}
                    "Apply grades"
                </Button>
            </div>
        </Show>
    }
}

/// Proficiencies the server currently holds for the tutor
#[component]
fn CurrentProficiencies(vm: TutorProficienciesViewModel) -> impl IntoView {
    view! {
        <div class="current-proficiencies">
            <h2>"Current proficiencies"</h2>
            {move || {
                let Some(tutor) = vm.tutor.get() else {
                    return view! { <Spinner /> }.into_any();
                };
                if tutor.proficiencies.is_empty() {
                    return view! { <p class="muted">"None recorded yet."</p> }.into_any();
                }
                tutor.proficiencies.into_iter().map(|(syllabus, subjects)| {
                    view! {
                        <div class="current-proficiencies__syllabus">
                            <h4>{syllabus}</h4>
                            <ul>
                                {subjects.into_iter().map(|(subject, grades)| view! {
                                    <li>{subject}": "{grades.join(", ")}</li>
                                }).collect_view()}
                            </ul>
                        </div>
                    }
                }).collect_view().into_any()
            }}
        </div>
    }
}
