//! Ranked autocomplete suggestions, in the order the API returned them.

use dioxus::prelude::*;
use nearme_core::types::preview_url;

use crate::state::*;

#[component]
pub fn SuggestionList() -> Element {
    let form = FORM.read();
    let suggestions = form.suggestions();
    if suggestions.is_empty() {
        return rsx! {};
    }
    let preview_base = CONFIG.read().preview_base.clone();

    rsx! {
        div {
            class: "search-suggest",
            for taxon in suggestions.iter() {
                div {
                    key: "{taxon.id}",
                    a {
                        href: preview_url(&preview_base, taxon.id),
                        onclick: {
                            let id = taxon.id;
                            move |e: MouseEvent| {
                                e.prevent_default();
                                dispatch(nearme_core::Event::Select(id));
                            }
                        },
                        {taxon.display_name()}
                    }
                    em { " - {taxon.name}" }
                }
            }
        }
    }
}
