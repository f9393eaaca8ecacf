//! The three remote collaborators the form talks to.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PublishRequest, PublishResponse, Taxon, TaxonSummary};

#[async_trait]
pub trait NearMeApi: Send + Sync + 'static {
    /// Ranked candidates for free text. Order is the API's rank order.
    async fn autocomplete(&self, query: &str) -> Result<Vec<TaxonSummary>>;

    /// Full detail for one taxon, ancestors root first.
    async fn taxon(&self, id: u64) -> Result<Taxon>;

    /// Ask the publisher to provision a site. `ok: false` replies are returned as `Ok`.
    async fn publish(&self, request: &PublishRequest) -> Result<PublishResponse>;
}
