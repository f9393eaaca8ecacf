//! Near Me - pick a species, derive a site configuration, and publish it.
//!
//! This crate holds everything that is not transport or presentation: the taxa
//! and publish types, the hostname slug, the form state machine, and an async
//! controller that drives it against any [`NearMeApi`] implementation.
//!
//! # Modules
//!
//! - [`types`] - Taxa and publish wire types
//! - [`slug`] - Hostname suggestion and validation
//! - [`state`] - Pure form state: events in, effects out
//! - [`debounce`] - Single-slot cancellable timer
//! - [`controller`] - Runs effects on tokio and feeds completions back
//! - [`api`] - The collaborator trait (autocomplete, detail, publish)
//! - [`config`] - `.nearme.toml` loading
//! - [`error`] - Shared error type

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod slug;
pub mod state;
pub mod types;

pub use api::NearMeApi;
pub use config::{load_config_file, load_nearme_config, NearMeConfig};
pub use controller::Controller;
pub use error::{Error, Result};
pub use slug::{is_valid_hostname, suggest_hostname};
pub use state::{Browse, Effect, Event, FormState, Notice, NoticeLevel};
