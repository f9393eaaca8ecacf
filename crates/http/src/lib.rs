//! HTTP implementation of [`NearMeApi`]: the taxa API for autocomplete and
//! detail, and the publisher for provisioning.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use nearme_core::types::{PublishRequest, PublishResponse, ResultsPage, Taxon, TaxonSummary};
use nearme_core::{Error, NearMeApi, NearMeConfig, Result};

/// Name of the publisher's signed session cookie.
const SESSION_COOKIE: &str = "user";

#[derive(Clone)]
pub struct HttpApi {
    http: Client,
    api_base: String,
    publish_base: String,
    session_cookie: Option<String>,
}

impl HttpApi {
    pub fn new(config: &NearMeConfig) -> Result<Self> {
        Self::with_timeout(config, config.timeout())
    }

    pub fn with_timeout(config: &NearMeConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            publish_base: config.publish_base.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "{what} failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| Error::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| Error::Malformed(format!("{what}: {e}")))
    }
}

#[async_trait]
impl NearMeApi for HttpApi {
    async fn autocomplete(&self, query: &str) -> Result<Vec<TaxonSummary>> {
        let url = format!("{}/taxa/autocomplete", self.api_base);
        debug!(%url, query, "GET autocomplete");
        let page: ResultsPage<TaxonSummary> =
            self.send_json(self.http.get(&url).query(&[("q", query)]), "autocomplete").await?;
        Ok(page.results)
    }

    async fn taxon(&self, id: u64) -> Result<Taxon> {
        let url = format!("{}/taxa/{}", self.api_base, id);
        debug!(%url, "GET taxon");
        let page: ResultsPage<Taxon> = self.send_json(self.http.get(&url), "taxon detail").await?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| Error::Malformed(format!("no taxon with id {id}")))
    }

    async fn publish(&self, request: &PublishRequest) -> Result<PublishResponse> {
        let url = format!("{}/publish", self.publish_base);
        debug!(%url, taxon_id = request.taxon_id, hostname = %request.hostname, "POST publish");
        let mut builder = self.http.post(&url).json(request);
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={cookie}"));
        }
        self.send_json(builder, "publish").await
    }
}
