//! Text input with a dropdown of pre-filtered candidates.

use leptos::ev;
use leptos::prelude::*;

use crate::shared::list_utils::{highlight_matches, Searchable};

/// Candidates are computed by the caller (usually with `filter_candidates`);
/// this component only renders them and reports input and picks.
#[component]
pub fn Autocomplete<T>(
    #[prop(into)] text: Signal<String>,
    #[prop(into)] candidates: Signal<Vec<T>>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] on_select: Callback<T>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView
where
    T: Searchable + Clone + Send + Sync + 'static,
{
    let open = RwSignal::new(false);

    view! {
        <div class="autocomplete" class:autocomplete--disabled=move || disabled.get()>
            <input
                type="text"
                class="autocomplete__input"
                placeholder=placeholder
                disabled=move || disabled.get()
                prop:value=move || text.get()
                on:focus=move |_| open.set(true)
                on:blur=move |_| open.set(false)
                on:input=move |ev| {
                    open.set(true);
                    on_input.run(event_target_value(&ev));
                }
            />
            <Show when=move || open.get() && !disabled.get() && !candidates.get().is_empty()>
                <ul class="autocomplete__options">
                    {move || {
                        let filter = text.get();
                        candidates
                            .get()
                            .into_iter()
                            .map(|item| {
                                let label = highlight_matches(&item.display_name(), &filter);
                                view! {
                                    <li
                                        class="autocomplete__option"
                                        // mousedown fires before the input's blur
                                        on:mousedown=move |ev: ev::MouseEvent| {
                                            ev.prevent_default();
                                            open.set(false);
                                            on_select.run(item.clone());
                                        }
                                    >
                                        {label}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
