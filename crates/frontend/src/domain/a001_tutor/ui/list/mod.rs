use crate::domain::a001_tutor::api;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    create_sort_toggle, filter_candidates, get_sort_indicator, highlight_matches, sort_list,
    SearchInput, SearchValue,
};
use contracts::domain::a001_tutor::aggregate::Tutor;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct TutorRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub syllabi: String,
    pub subject_count: usize,
}

impl From<&Tutor> for TutorRow {
    fn from(t: &Tutor) -> Self {
        Self {
            id: t.id.as_string(),
            name: t.name.clone(),
            email: t.email.clone().unwrap_or_else(|| "-".to_string()),
            syllabi: t
                .proficiencies
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            subject_count: t.proficiency_count(),
        }
    }
}

/// Filtered and sorted rows for the table
pub fn visible_rows(tutors: &[Tutor], query: &str, sort_field: &str, ascending: bool) -> Vec<TutorRow> {
    let search = if query.trim().is_empty() {
        SearchValue::Empty
    } else {
        SearchValue::Text(query.to_string())
    };
    let mut matched = filter_candidates(tutors, &search, &HashSet::new());
    sort_list(&mut matched, sort_field, ascending);
    matched.iter().map(TutorRow::from).collect()
}

#[component]
pub fn TutorList(
    /// Open the proficiency screen of a tutor id
    on_open: Callback<String>,
) -> impl IntoView {
    let tutors = RwSignal::new(Vec::<Tutor>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let query = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);

    let fetch = move || {
        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_tutors().await {
                Ok(v) => {
                    tutors.set(v);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.message_or("Could not load tutors."))),
            }
            loading.set(false);
        });
    };

    fetch();

    let rows = Memo::new(move |_| {
        tutors.with(|t| visible_rows(t, &query.get(), &sort_field.get(), sort_ascending.get()))
    });

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <span class="header__icon">{icon("tutors")}</span>
                    <h1 class="header__title">"Tutors"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=query
                        on_change=Callback::new(move |v: String| query.set(v))
                        placeholder="Search tutors..."
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
                        disabled=move || loading.get()
                    >
                        "Refresh"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell table__header-cell--sortable"
                                on:click=create_sort_toggle("name", sort_field, sort_ascending)>
                                "Name"
                                {move || get_sort_indicator(&sort_field.get(), "name", sort_ascending.get())}
                            </th>
                            <th class="table__header-cell table__header-cell--sortable"
                                on:click=create_sort_toggle("email", sort_field, sort_ascending)>
                                "Email"
                                {move || get_sort_indicator(&sort_field.get(), "email", sort_ascending.get())}
                            </th>
                            <th class="table__header-cell">"Syllabi"</th>
                            <th class="table__header-cell table__header-cell--sortable"
                                on:click=create_sort_toggle("proficiencies", sort_field, sort_ascending)>
                                "Subjects"
                                {move || get_sort_indicator(&sort_field.get(), "proficiencies", sort_ascending.get())}
                            </th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let filter = query.get();
                            rows.get().into_iter().map(|row| {
                                let id = row.id.clone();
                                view! {
                                    <tr class="table__row" on:click=move |_| on_open.run(id.clone())>
                                        <td class="table__cell">{highlight_matches(&row.name, &filter)}</td>
                                        <td class="table__cell">{row.email}</td>
                                        <td class="table__cell">{row.syllabi}</td>
                                        <td class="table__cell">{row.subject_count}</td>
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
    use contracts::shared::selection::SubjectSelections;

    fn tutor(name: &str, email: &str, subjects: &[&str]) -> Tutor {
        let mut t = Tutor::new_for_insert(name.to_string(), Some(email.to_string()));
        let mut subs = SubjectSelections::new();
        for s in subjects {
            subs.insert(s.to_string(), vec!["A".to_string()]);
        }
        if !subs.is_empty() {
            t.proficiencies.insert("Cambridge".to_string(), subs);
        }
        t
    }

    #[test]
    fn test_visible_rows_filters_by_name() {
        let tutors = vec![
            tutor("Alice Moore", "alice@example.com", &["Physics"]),
            tutor("Bob Stone", "bob@example.com", &[]),
        ];
        let rows = visible_rows(&tutors, "ali", "name", true);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Alice Moore");
        assert_eq!(rows[0].syllabi, "Cambridge");
    }

    #[test]
    fn test_visible_rows_sorts_by_subject_count() {
        let tutors = vec![
            tutor("Alice", "a@example.com", &["Physics"]),
            tutor("Bob", "b@example.com", &["Physics", "Chemistry", "Biology"]),
            tutor("Cara", "c@example.com", &[]),
        ];
        let rows = visible_rows(&tutors, "", "proficiencies", false);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Cara"]);
    }
}
