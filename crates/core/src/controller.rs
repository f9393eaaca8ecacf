//! Async driver for [`FormState`].
//!
//! The controller applies events to the state and runs the resulting effects:
//! the debounce timer and the three kinds of request are spawned as tasks that
//! post their completion back onto an internal channel. Callers feed user input
//! through [`Controller::dispatch`] (or the typed helpers) and pull completions
//! with [`Controller::pump`]. The state is only ever touched from the caller's
//! task, so there is no locking.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::NearMeApi;
use crate::config::NearMeConfig;
use crate::debounce::Debouncer;
use crate::error::{Error, Result};
use crate::state::{Effect, Event, FormState, Notice};

pub struct Controller<A: NearMeApi> {
    api: Arc<A>,
    state: FormState,
    debounce: Debouncer,
    quiet_period: Duration,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    in_flight: usize,
}

impl<A: NearMeApi> Controller<A> {
    pub fn new(api: Arc<A>, config: &NearMeConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: FormState::new(config.deploy_scheme.clone()),
            debounce: Debouncer::new(),
            quiet_period: config.debounce(),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    /// True when no timer is armed and no request is outstanding.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && !self.debounce.is_armed() && self.rx.is_empty()
    }

    pub fn dispatch(&mut self, event: Event) {
        if is_completion(&event) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        for effect in self.state.apply(event) {
            self.run(effect);
        }
    }

    pub fn type_query(&mut self, query: impl Into<String>) {
        self.dispatch(Event::QueryChanged(query.into()));
    }

    pub fn select(&mut self, taxon_id: u64) {
        self.dispatch(Event::Select(taxon_id));
    }

    pub fn edit_plural(&mut self, plural: impl Into<String>) {
        self.dispatch(Event::PluralEdited(plural.into()));
    }

    pub fn edit_hostname(&mut self, hostname: impl Into<String>) {
        self.dispatch(Event::HostnameEdited(hostname.into()));
    }

    pub fn submit(&mut self) {
        self.dispatch(Event::Submit);
    }

    /// Wait for the next timer or request completion without applying it.
    pub async fn next_event(&mut self) -> Option<Event> {
        if self.is_idle() {
            return None;
        }
        // `self.tx` keeps the channel open, so this only yields `Some`.
        self.rx.recv().await
    }

    /// Wait for the next completion and apply it. Returns false when idle.
    pub async fn pump(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Pump until nothing is armed or in flight.
    pub async fn run_until_idle(&mut self) {
        while self.pump().await {}
    }

    fn run(&mut self, effect: Effect) {
        let tx = self.tx.clone();
        match effect {
            Effect::ScheduleSearch { generation, query } => {
                debug!(generation, query = %query, "Arming search timer");
                self.debounce.arm(self.quiet_period, async move {
                    let _ = tx.send(Event::SearchDue { generation });
                });
            }
            Effect::Search { generation, query } => {
                let api = self.api.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let result = guarded(async move { api.autocomplete(&query).await }).await;
                    let _ = tx.send(Event::SearchCompleted { generation, result });
                });
            }
            Effect::FetchDetail { generation, taxon_id } => {
                let api = self.api.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let result = guarded(async move { api.taxon(taxon_id).await }).await;
                    let _ = tx.send(Event::DetailCompleted { generation, result });
                });
            }
            Effect::Publish { generation, request } => {
                let api = self.api.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let result = guarded(async move { api.publish(&request).await }).await;
                    let _ = tx.send(Event::PublishCompleted { generation, result });
                });
            }
        }
    }
}

/// Run a collaborator call on its own task so a panic still yields a completion.
async fn guarded<T, F>(call: F) -> Result<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    tokio::spawn(call)
        .await
        .unwrap_or_else(|e| Err(Error::Transport(format!("request task failed: {e}"))))
}

fn is_completion(event: &Event) -> bool {
    matches!(
        event,
        Event::SearchCompleted { .. } | Event::DetailCompleted { .. } | Event::PublishCompleted { .. }
    )
}
