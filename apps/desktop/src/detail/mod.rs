//! Detail view for the selected taxon: ancestor chain and the publish form.

mod publish_form;

use dioxus::prelude::*;
use nearme_core::types::preview_url;
use publish_form::PublishForm;

use crate::state::*;

#[component]
pub fn DetailPanel() -> Element {
    let form = FORM.read();
    let Some(taxon) = form.taxon() else {
        return rsx! {};
    };
    let preview_base = CONFIG.read().preview_base.clone();

    rsx! {
        div {
            class: "detail",
            h2 { {taxon.display_name()} }
            p {
                class: "ancestors",
                for ancestor in taxon.ancestors.iter() {
                    span {
                        key: "{ancestor.id}",
                        "\u{00A0}\u{00B7}\u{00A0}"
                        a {
                            href: preview_url(&preview_base, ancestor.id),
                            onclick: {
                                let id = ancestor.id;
                                move |e: MouseEvent| {
                                    e.prevent_default();
                                    dispatch(nearme_core::Event::Select(id));
                                }
                            },
                            {ancestor.display_name()}
                        }
                    }
                }
            }
            PublishForm {}
        }
    }
}
