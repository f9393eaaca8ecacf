//! Test harness for controller integration tests.
//!
//! `FakeApi` answers from in-memory fixtures and records every call, so tests
//! can assert how many requests the controller actually sent.

pub mod fixtures;

use async_trait::async_trait;
use nearme_core::types::{PublishRequest, PublishResponse, Taxon, TaxonSummary};
use nearme_core::{Controller, Error, NearMeApi, NearMeConfig, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct FakeApi {
    pub suggestions: HashMap<String, Vec<TaxonSummary>>,
    pub taxa: HashMap<u64, Taxon>,
    pub publish_reply: Option<Result<PublishResponse>>,
    /// Artificial latency per autocomplete query.
    pub search_delay: HashMap<String, Duration>,
    /// Taxon ids whose detail lookup panics.
    pub crash_on: Vec<u64>,
    pub search_calls: Mutex<Vec<String>>,
    pub detail_calls: Mutex<Vec<u64>>,
    pub publish_calls: Mutex<Vec<PublishRequest>>,
}

#[async_trait]
impl NearMeApi for FakeApi {
    async fn autocomplete(&self, query: &str) -> Result<Vec<TaxonSummary>> {
        self.search_calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.search_delay.get(query) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.suggestions.get(query).cloned().unwrap_or_default())
    }

    async fn taxon(&self, id: u64) -> Result<Taxon> {
        self.detail_calls.lock().unwrap().push(id);
        if self.crash_on.contains(&id) {
            panic!("detail lookup for {id} blew up");
        }
        self.taxa
            .get(&id)
            .cloned()
            .ok_or(Error::Status { status: 404, body: "not found".into() })
    }

    async fn publish(&self, request: &PublishRequest) -> Result<PublishResponse> {
        self.publish_calls.lock().unwrap().push(request.clone());
        self.publish_reply
            .clone()
            .unwrap_or_else(|| Err(Error::Transport("publisher unreachable".into())))
    }
}

pub struct TestHarness {
    pub api: Arc<FakeApi>,
    pub controller: Controller<FakeApi>,
}

impl TestHarness {
    pub fn new(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let controller = Controller::new(api.clone(), &NearMeConfig::default());
        Self { api, controller }
    }

    /// The owl fixtures with a publisher that accepts everything.
    pub fn owls() -> Self {
        let mut api = fixtures::owl_api();
        api.publish_reply = Some(Ok(PublishResponse {
            ok: true,
            deploy_url: Some("eastern-screech-owl-near-me.now.sh".into()),
            deploy_message: Some(String::new()),
            ..Default::default()
        }));
        Self::new(api)
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.api.search_calls.lock().unwrap().clone()
    }

    pub fn publish_calls(&self) -> Vec<PublishRequest> {
        self.api.publish_calls.lock().unwrap().clone()
    }
}
