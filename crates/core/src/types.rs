//! Wire and domain types: taxa as returned by the taxa API, and the publisher's
//! request/response contract.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Taxa
// ---------------------------------------------------------------------------

/// One row of the autocomplete list, and one link of an ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub preferred_common_name: Option<String>,
}

impl TaxonSummary {
    pub fn display_name(&self) -> &str {
        display_name(self.preferred_common_name.as_deref(), &self.name)
    }
}

/// Full taxon detail. `ancestors` is ordered root first, ending at the immediate parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub preferred_common_name: Option<String>,
    #[serde(default)]
    pub ancestors: Vec<TaxonSummary>,
}

impl Taxon {
    /// Preferred common name, or the scientific name when that is missing or blank.
    pub fn display_name(&self) -> &str {
        display_name(self.preferred_common_name.as_deref(), &self.name)
    }

    pub fn summary(&self) -> TaxonSummary {
        TaxonSummary {
            id: self.id,
            name: self.name.clone(),
            preferred_common_name: self.preferred_common_name.clone(),
        }
    }
}

fn display_name<'a>(common: Option<&'a str>, name: &'a str) -> &'a str {
    match common {
        Some(c) if !c.trim().is_empty() => c,
        _ => name,
    }
}

/// `{ "results": [...] }` envelope used by both the autocomplete and detail endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Link to the published app's page for a taxon, as shown next to each suggestion.
pub fn preview_url(base: &str, taxon_id: u64) -> String {
    format!("{}/?taxon_id={}", base.trim_end_matches('/'), taxon_id)
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub taxon_id: u64,
    pub taxon_plural: String,
    pub hostname: String,
}

/// Raw publisher reply. On success `deploy_url` is a bare host (no scheme).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResponse {
    pub ok: bool,
    #[serde(default)]
    pub deploy_url: Option<String>,
    #[serde(default)]
    pub deploy_message: Option<String>,
    #[serde(default)]
    pub deploy_id: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// A successful publish as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    /// Deploy host prefixed with the site scheme, e.g. `https://x.example.com`.
    pub url: String,
    pub message: Option<String>,
}
