//! Root application component.

use dioxus::prelude::*;

use crate::detail::DetailPanel;
use crate::search::SearchPanel;
use crate::state::*;
use nearme_core::NoticeLevel;

static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    use_hook(|| {
        if let Some((config, api)) = crate::INITIAL_STATE.lock().ok().and_then(|mut s| s.take()) {
            install(config, api);
        }
    });

    rsx! {
        document::Stylesheet { href: APP_CSS }

        section {
            class: "primary",
            div {
                class: "inner",
                h1 { "Make Near Me" }
                p { class: "intro-text", "Make a Near Me site for the species of your choice!" }

                NoticeBanner {}
                SearchPanel {}
                DetailPanel {}
                DeploymentLink {}
            }
        }
    }
}

/// Last notice, dismissed by clicking it.
#[component]
fn NoticeBanner() -> Element {
    let notice = NOTICE.read();
    let Some(notice) = notice.as_ref() else {
        return rsx! {};
    };
    let class = match notice.level {
        NoticeLevel::Error => "notice notice-error",
        NoticeLevel::Info => "notice",
    };

    rsx! {
        div {
            class,
            role: "alert",
            onclick: move |_| { *NOTICE.write() = None; },
            "{notice.text}"
        }
    }
}

#[component]
fn DeploymentLink() -> Element {
    let form = FORM.read();
    let Some(deployment) = form.deployment.as_ref() else {
        return rsx! {};
    };

    rsx! {
        p {
            class: "deployment",
            a { href: "{deployment.url}", "{deployment.url}" }
            if let Some(message) = deployment.message.as_ref() {
                span { class: "deployment-message", " {message}" }
            }
        }
    }
}
