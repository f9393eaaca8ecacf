//! Global form state and the effect runner.
//!
//! The form itself is `nearme_core::FormState`; this module only stores it in a
//! signal and turns its effects into spawned tasks, mirroring what
//! `nearme_core::Controller` does for the CLI. The debounce timer lives in a
//! single slot; arming it cancels whatever timer was pending.

use std::sync::Arc;

use dioxus::prelude::*;
use nearme_core::{Effect, Event, FormState, NearMeApi, NearMeConfig, Notice};
use nearme_http::HttpApi;

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// Collaborators - set once at startup
pub static API: GlobalSignal<Option<Arc<HttpApi>>> = Signal::global(|| None);

pub static CONFIG: GlobalSignal<NearMeConfig> = Signal::global(NearMeConfig::default);

/// The whole search-and-publish form
pub static FORM: GlobalSignal<FormState> = Signal::global(FormState::default);

/// Message shown in the notice banner until dismissed
pub static NOTICE: GlobalSignal<Option<Notice>> = Signal::global(|| None);

/// The pending debounce timer, if any
static SEARCH_TIMER: GlobalSignal<TimerSlot<Task>> = Signal::global(TimerSlot::default);

// ---------------------------------------------------------------------------
// Debounce slot
// ---------------------------------------------------------------------------

pub trait Cancel {
    fn cancel(self);
}

impl Cancel for Task {
    fn cancel(self) {
        Task::cancel(self);
    }
}

/// Holds at most one pending timer handle.
pub struct TimerSlot<H: Cancel> {
    pending: Option<H>,
}

impl<H: Cancel> Default for TimerSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Cancel> TimerSlot<H> {
    /// Store `handle`, cancelling the one it replaces.
    pub fn arm(&mut self, handle: H) {
        if let Some(previous) = self.pending.replace(handle) {
            previous.cancel();
        }
    }
}

/// Move the pre-runtime config and client into signals.
pub fn install(config: NearMeConfig, api: Arc<HttpApi>) {
    *FORM.write() = FormState::new(config.deploy_scheme.clone());
    *CONFIG.write() = config;
    *API.write() = Some(api);
}

/// Apply one event and start whatever it asks for.
pub fn dispatch(event: Event) {
    let (effects, notices) = {
        let mut form = FORM.write();
        let effects = form.apply(event);
        (effects, form.take_notices())
    };
    if let Some(notice) = notices.into_iter().last() {
        *NOTICE.write() = Some(notice);
    }
    for effect in effects {
        run_effect(effect);
    }
}

fn run_effect(effect: Effect) {
    let Some(api) = API.read().clone() else {
        tracing::warn!("No API client installed, dropping {effect:?}");
        return;
    };
    match effect {
        Effect::ScheduleSearch { generation, .. } => {
            let delay = CONFIG.read().debounce();
            let timer = spawn(async move {
                tokio::time::sleep(delay).await;
                dispatch(Event::SearchDue { generation });
            });
            SEARCH_TIMER.write().arm(timer);
        }
        Effect::Search { generation, query } => {
            spawn(async move {
                let result = api.autocomplete(&query).await;
                dispatch(Event::SearchCompleted { generation, result });
            });
        }
        Effect::FetchDetail { generation, taxon_id } => {
            spawn(async move {
                let result = api.taxon(taxon_id).await;
                dispatch(Event::DetailCompleted { generation, result });
            });
        }
        Effect::Publish { generation, request } => {
            spawn(async move {
                let result = api.publish(&request).await;
                dispatch(Event::PublishCompleted { generation, result });
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeTimer {
        id: u32,
        cancelled: Rc<RefCell<Vec<u32>>>,
    }

    impl Cancel for FakeTimer {
        fn cancel(self) {
            self.cancelled.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn arming_cancels_the_pending_timer() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let timer = |id| FakeTimer { id, cancelled: cancelled.clone() };
        let mut slot = TimerSlot::default();

        slot.arm(timer(1));
        assert!(cancelled.borrow().is_empty());
        slot.arm(timer(2));
        slot.arm(timer(3));

        assert_eq!(*cancelled.borrow(), vec![1, 2]);
        assert_eq!(slot.pending.as_ref().map(|t| t.id), Some(3));
    }
}
