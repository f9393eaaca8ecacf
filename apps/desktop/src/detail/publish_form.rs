//! Plural and hostname fields with the publish button. The hostname field shows
//! the live suggestion until the user types into it.

use dioxus::prelude::*;

use crate::state::*;

#[component]
pub fn PublishForm() -> Element {
    let form = FORM.read();
    let plural = form.plural.clone();
    let hostname = form.effective_hostname().unwrap_or_default();
    let publishing = form.publishing;

    rsx! {
        div {
            class: "publish-form",
            label { r#for: "input-plural", class: "big-label", "Plural to use" }
            input {
                id: "input-plural",
                r#type: "text",
                value: "{plural}",
                oninput: move |e: FormEvent| {
                    dispatch(nearme_core::Event::PluralEdited(e.value()));
                },
            }
            label { r#for: "input-hostname", class: "big-label", "Site name (X.now.sh)" }
            input {
                id: "input-hostname",
                r#type: "text",
                value: "{hostname}",
                oninput: move |e: FormEvent| {
                    dispatch(nearme_core::Event::HostnameEdited(e.value()));
                },
            }
            button {
                class: "submit",
                r#type: "button",
                disabled: publishing,
                onclick: move |_| dispatch(nearme_core::Event::Submit),
                if publishing { "Publishing\u{2026}" } else { "Publish" }
            }
        }
    }
}
