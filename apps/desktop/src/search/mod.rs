//! Search panel - query input plus the suggestion list.

mod search_input;
mod suggestions;

use dioxus::prelude::*;
use search_input::SearchInput;
use suggestions::SuggestionList;

#[component]
pub fn SearchPanel() -> Element {
    rsx! {
        div {
            class: "search-form",
            SearchInput {}
            SuggestionList {}
        }
    }
}
