use crate::domain::a001_tutor::ui::list::TutorList;
use crate::domain::a001_tutor::ui::proficiencies::TutorProficiencies;
use crate::domain::a001_tutor::api as tutor_api;
use crate::domain::a002_proficiency::api as proficiency_api;
use crate::domain::a002_proficiency::service::CatalogService;
use crate::domain::a003_bundle::ui::list::BundleList;
use crate::domain::a004_student::api as student_api;
use crate::shared::api_utils::ApiError;
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::notifications::{Notifier, ToastHost, ToastService};
use leptos::prelude::*;
use thaw::*;

/// What the center area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Tutors,
    TutorProficiencies(String),
    Bundles,
}

#[component]
pub fn App() -> impl IntoView {
    let toasts = ToastService::new();
    let catalog = CatalogService::new();
    provide_context(toasts);
    provide_context(ModalStackService::new());
    provide_context(catalog);

    let page = RwSignal::new(Page::Tutors);

    let seed_demo_data = move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            let seeded = async {
                proficiency_api::insert_test_data().await?;
                tutor_api::insert_test_data().await?;
                student_api::insert_test_data().await?;
                Ok::<(), ApiError>(())
            };
            match seeded.await {
                Ok(()) => {
                    toasts.success("Demo data loaded.");
                    catalog.refresh();
                    // Remount the current page so lists refetch
                    page.update(|_| {});
                }
                Err(e) => toasts.error(&e.message_or("Could not load the demo data.")),
            }
        });
    };

    view! {
        <div class="app">
            <nav class="sidebar">
                <button
                    class="sidebar__item"
                    class:sidebar__item--active=move || matches!(page.get(), Page::Tutors | Page::TutorProficiencies(_))
                    on:click=move |_| page.set(Page::Tutors)
                >
                    {icon("tutors")}
                    "Tutors"
                </button>
                <button
                    class="sidebar__item"
                    class:sidebar__item--active=move || page.get() == Page::Bundles
                    on:click=move |_| page.set(Page::Bundles)
                >
                    {icon("bundle")}
                    "Bundles"
                </button>
                <div class="sidebar__footer">
                    <Button appearance=ButtonAppearance::Subtle on_click=seed_demo_data>
                        "Load demo data"
                    </Button>
                </div>
            </nav>

            <main class="content">
                {move || match page.get() {
                    Page::Tutors => view! {
                        <TutorList on_open=Callback::new(move |id: String| page.set(Page::TutorProficiencies(id))) />
                    }.into_any(),
                    Page::TutorProficiencies(id) => view! {
                        <TutorProficiencies tutor_id=id on_back=Callback::new(move |_: ()| page.set(Page::Tutors)) />
                    }.into_any(),
                    Page::Bundles => view! { <BundleList /> }.into_any(),
                }}
            </main>

            <ModalHost />
            <ToastHost />
        </div>
    }
}
