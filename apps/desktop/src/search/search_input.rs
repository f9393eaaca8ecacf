//! Species search input. Every keystroke goes to the form; the form decides
//! when the debounced search actually runs.

use dioxus::prelude::*;
use crate::state::*;

#[component]
pub fn SearchInput() -> Element {
    let form = FORM.read();
    let query = form.query.clone();
    let searching = form.searching || form.fetching_detail;

    rsx! {
        label {
            span { class: "search-label", "Search for a species" }
            input {
                class: "text",
                r#type: "text",
                placeholder: "Search for a species",
                autocomplete: "off",
                value: "{query}",
                autofocus: true,
                oninput: move |e: FormEvent| {
                    dispatch(nearme_core::Event::QueryChanged(e.value()));
                },
            }
        }
        if searching {
            span { class: "loading-dots", "\u{2022}\u{2022}\u{2022}" }
        }
    }
}
