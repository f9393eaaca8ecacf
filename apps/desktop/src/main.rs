//! Near Me Desktop - Dioxus front end for the search-and-publish form.

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;

mod app;
mod detail;
mod search;
mod state;

use app::App;
use nearme_core::{load_nearme_config, NearMeConfig};
use nearme_http::HttpApi;

/// Pre-runtime storage - built before Dioxus launches, consumed on first render.
pub static INITIAL_STATE: Mutex<Option<(NearMeConfig, Arc<HttpApi>)>> = Mutex::new(None);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nearme=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let config = std::env::current_dir()
        .map(|cwd| load_nearme_config(&cwd))
        .unwrap_or_default();
    let api = match HttpApi::new(&config) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    *INITIAL_STATE.lock().unwrap() = Some((config, api));

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_disable_context_menu(true)
                    .with_window(
                        WindowBuilder::new()
                            .with_title("Make Near Me")
                            .with_inner_size(LogicalSize::new(900.0, 760.0))
                            .with_min_inner_size(LogicalSize::new(480.0, 400.0))
                            .with_resizable(true),
                    ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
