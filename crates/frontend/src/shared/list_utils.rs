/// List helpers: candidate filtering for autocompletes, sorting, match highlighting
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Items that can be offered by an autocomplete or filtered in a list
pub trait Searchable {
    /// Text shown to the user and matched against the search string
    fn display_name(&self) -> String;

    /// Identity used for exclusion sets; defaults to the display name
    fn search_key(&self) -> String {
        self.display_name()
    }

    /// Case-insensitive substring match on the display name
    fn matches_filter(&self, filter: &str) -> bool {
        self.display_name()
            .to_lowercase()
            .contains(&filter.to_lowercase())
    }
}

impl Searchable for String {
    fn display_name(&self) -> String {
        self.clone()
    }
}

/// Current value of an autocomplete control.
///
/// While the user types the control holds raw text; after picking an option
/// it holds the structured item.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue<T> {
    Empty,
    Text(String),
    Selected(T),
}

impl<T> Default for SearchValue<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T: Searchable> SearchValue<T> {
    /// Effective filter text of this value
    pub fn filter_text(&self) -> String {
        match self {
            SearchValue::Empty => String::new(),
            SearchValue::Text(text) => text.clone(),
            SearchValue::Selected(item) => item.display_name(),
        }
    }
}

/// Display name of an optional value; empty string for `None`
pub fn display_name_of<T: Searchable>(value: Option<&SearchValue<T>>) -> String {
    value.map(SearchValue::filter_text).unwrap_or_default()
}

/// Candidates whose display name contains the search text, minus `excluded` keys.
///
/// Input order is kept. A blank search returns every non-excluded candidate.
pub fn filter_candidates<T: Searchable + Clone>(
    candidates: &[T],
    search: &SearchValue<T>,
    excluded: &HashSet<String>,
) -> Vec<T> {
    let filter = search.filter_text();
    let filter = filter.trim();
    candidates
        .iter()
        .filter(|item| !excluded.contains(&item.search_key()))
        .filter(|item| filter.is_empty() || item.matches_filter(filter))
        .cloned()
        .collect()
}

/// Types that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Highlight case-insensitive matches of `filter` inside `text`
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let parts: Vec<AnyView> = split_matches(text, filter)
        .into_iter()
        .map(|(part, is_match)| {
            if is_match {
                view! { <mark class="autocomplete__match">{part}</mark> }.into_any()
            } else {
                view! { <span>{part}</span> }.into_any()
            }
        })
        .collect();

    view! { <>{parts}</> }.into_any()
}

/// Lowercase of every char, or `None` when some char does not lowercase to
/// exactly one char (e.g. 'İ')
fn lower_chars(s: &str) -> Option<Vec<char>> {
    s.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => Some(l),
                _ => None,
            }
        })
        .collect()
}

/// Split `text` into (segment, is_match) pieces.
///
/// Matching runs on chars, and segments are cut at the original char
/// boundaries. Falls back to the plain text when lowercasing is not one char
/// to one char.
fn split_matches(text: &str, filter: &str) -> Vec<(String, bool)> {
    let plain = || vec![(text.to_string(), false)];
    let (Some(text_lower), Some(filter_lower)) = (lower_chars(text), lower_chars(filter)) else {
        return plain();
    };
    let width = filter_lower.len();
    if width == 0 || width > text_lower.len() {
        return plain();
    }

    // Byte offset of each char, plus the end of the text
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut parts = Vec::new();
    let mut last = 0;
    let mut i = 0;
    while i + width <= text_lower.len() {
        if text_lower[i..i + width] != filter_lower[..] {
            i += 1;
            continue;
        }
        if i > last {
            parts.push((text[offsets[last]..offsets[i]].to_string(), false));
        }
        parts.push((text[offsets[i]..offsets[i + width]].to_string(), true));
        last = i + width;
        i = last;
    }
    if last < text_lower.len() {
        parts.push((text[offsets[last]..].to_string(), false));
    }
    parts
}

/// Plain search box writing straight into a signal
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button
                    class="search-input__clear"
                    title="Clear"
                    on:click=move |_| on_change.run(String::new())
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Click handler toggling sort on `field`
pub fn create_sort_toggle(
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl Fn(MouseEvent) + 'static {
    move |_| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|v| *v = !*v);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: &'static str,
        name: &'static str,
    }

    impl Searchable for Person {
        fn display_name(&self) -> String {
            self.name.to_string()
        }

        fn search_key(&self) -> String {
            self.id.to_string()
        }
    }

    impl Sortable for Person {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.name.cmp(other.name),
                _ => self.id.cmp(other.id),
            }
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person { id: "1", name: "Ada Lovelace" },
            Person { id: "2", name: "Alan Turing" },
            Person { id: "3", name: "Grace Hopper" },
        ]
    }

    fn names(items: &[Person]) -> Vec<&'static str> {
        items.iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_case_insensitive_substring_keeps_order() {
        let result = filter_candidates(
            &people(),
            &SearchValue::Text("A".into()),
            &HashSet::new(),
        );
        assert_eq!(names(&result), vec!["Ada Lovelace", "Alan Turing", "Grace Hopper"]);

        let result = filter_candidates(
            &people(),
            &SearchValue::Text("tUr".into()),
            &HashSet::new(),
        );
        assert_eq!(names(&result), vec!["Alan Turing"]);
    }

    #[test]
    fn test_every_result_matches_filter() {
        for filter in ["a", "ace", "o", "per", "zzz"] {
            let result = filter_candidates(
                &people(),
                &SearchValue::Text(filter.into()),
                &HashSet::new(),
            );
            assert!(result
                .iter()
                .all(|p| p.name.to_lowercase().contains(filter)));
        }
    }

    #[test]
    fn test_blank_search_returns_all_minus_exclusions() {
        let excluded: HashSet<String> = ["2".to_string()].into_iter().collect();
        for search in [
            SearchValue::Empty,
            SearchValue::Text(String::new()),
            SearchValue::Text("   ".into()),
        ] {
            let result = filter_candidates(&people(), &search, &excluded);
            assert_eq!(names(&result), vec!["Ada Lovelace", "Grace Hopper"]);
        }
    }

    #[test]
    fn test_selected_value_filters_by_its_display_name() {
        let selected = SearchValue::Selected(people()[2].clone());
        let result = filter_candidates(&people(), &selected, &HashSet::new());
        assert_eq!(names(&result), vec!["Grace Hopper"]);
    }

    #[test]
    fn test_display_name_of_absent_value_is_empty() {
        assert_eq!(display_name_of::<Person>(None), "");
        assert_eq!(display_name_of::<Person>(Some(&SearchValue::Empty)), "");
        assert_eq!(
            display_name_of(Some(&SearchValue::Selected(people()[0].clone()))),
            "Ada Lovelace"
        );
    }

    #[test]
    fn test_empty_candidates() {
        let result: Vec<Person> =
            filter_candidates(&[], &SearchValue::Text("a".into()), &HashSet::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_split_matches() {
        assert_eq!(
            split_matches("Physics", "ys"),
            vec![
                ("Ph".to_string(), false),
                ("ys".to_string(), true),
                ("ics".to_string(), false)
            ]
        );
        assert_eq!(split_matches("abc", "x"), vec![("abc".to_string(), false)]);
    }

    #[test]
    fn test_split_matches_cuts_at_char_boundaries() {
        assert_eq!(
            split_matches("Ärzte", "ä"),
            vec![("Ä".to_string(), true), ("rzte".to_string(), false)]
        );
        assert_eq!(
            split_matches("ẞx", "X"),
            vec![("ẞ".to_string(), false), ("x".to_string(), true)]
        );
    }

    #[test]
    fn test_split_matches_falls_back_when_lowercase_grows() {
        // 'İ' lowercases to two chars; byte lengths of the whole string still agree
        assert_eq!(split_matches("ẞİx", "i"), vec![("ẞİx".to_string(), false)]);
        assert_eq!(split_matches("İstanbul", "stan"), vec![("İstanbul".to_string(), false)]);
    }

    #[test]
    fn test_sort_list() {
        let mut items = people();
        sort_list(&mut items, "name", false);
        assert_eq!(names(&items), vec!["Grace Hopper", "Alan Turing", "Ada Lovelace"]);
    }
}
