//! The search-and-publish form as an explicit state record.
//!
//! Every user input and every network completion is an [`Event`]. Applying an
//! event mutates [`FormState`] and returns the [`Effect`]s the driver must run
//! (arm the debounce timer, issue a request). Nothing in here performs I/O, so
//! whole interaction sequences can be replayed in plain unit tests.
//!
//! Each search, detail fetch, and publish is tagged with a generation. A
//! completion whose generation is no longer current is dropped, and selecting a
//! taxon invalidates any search still in flight.

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::slug::{is_valid_hostname, suggest_hostname};
use crate::types::{Deployment, PublishRequest, PublishResponse, Taxon, TaxonSummary};

/// What the browse region currently shows. Exactly one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Browse {
    #[default]
    Empty,
    Suggestions(Vec<TaxonSummary>),
    Detail(Taxon),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible message. Every failure path produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }

    fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keystroke replaced the query text.
    QueryChanged(String),
    /// The debounce timer armed for `generation` elapsed.
    SearchDue { generation: u64 },
    SearchCompleted { generation: u64, result: Result<Vec<TaxonSummary>, Error> },
    /// A suggestion or an ancestor link was chosen.
    Select(u64),
    DetailCompleted { generation: u64, result: Result<Taxon, Error> },
    PluralEdited(String),
    HostnameEdited(String),
    Submit,
    PublishCompleted { generation: u64, result: Result<PublishResponse, Error> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)arm the single debounce slot; when it fires, feed back `SearchDue { generation }`.
    ScheduleSearch { generation: u64, query: String },
    Search { generation: u64, query: String },
    FetchDetail { generation: u64, taxon_id: u64 },
    Publish { generation: u64, request: PublishRequest },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub query: String,
    pub browse: Browse,
    /// Label used for the published site. Reset to the taxon's display name on every selection.
    pub plural: String,
    /// Manual hostname override. `None` means the suggestion is shown and submitted.
    pub hostname: Option<String>,
    pub deployment: Option<Deployment>,
    pub searching: bool,
    pub fetching_detail: bool,
    pub publishing: bool,
    /// Scheme prefixed to the publisher's bare deploy host.
    pub deploy_scheme: String,

    search_gen: u64,
    search_dispatched: u64,
    detail_gen: u64,
    publish_gen: u64,
    notices: Vec<Notice>,
}

impl FormState {
    pub fn new(deploy_scheme: impl Into<String>) -> Self {
        Self { deploy_scheme: deploy_scheme.into(), ..Self::default() }
    }

    pub fn taxon(&self) -> Option<&Taxon> {
        match &self.browse {
            Browse::Detail(t) => Some(t),
            _ => None,
        }
    }

    /// Defined exactly while a fetched taxon is displayed.
    pub fn taxon_id(&self) -> Option<u64> {
        self.taxon().map(|t| t.id)
    }

    pub fn suggestions(&self) -> &[TaxonSummary] {
        match &self.browse {
            Browse::Suggestions(list) => list,
            _ => &[],
        }
    }

    /// Hostname derived from the current plural, or from the taxon's name when the plural is blank.
    /// Recomputed on every call.
    pub fn suggested_hostname(&self) -> Option<String> {
        let taxon = self.taxon()?;
        let label = if self.plural.is_empty() { taxon.display_name() } else { self.plural.as_str() };
        Some(suggest_hostname(label))
    }

    /// The hostname that a submit would send right now.
    pub fn effective_hostname(&self) -> Option<String> {
        match &self.hostname {
            Some(h) if self.taxon().is_some() => Some(h.clone()),
            _ => self.suggested_hostname(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::QueryChanged(query) => self.on_query_changed(query),
            Event::SearchDue { generation } => self.on_search_due(generation),
            Event::SearchCompleted { generation, result } => {
                self.on_search_completed(generation, result);
                vec![]
            }
            Event::Select(taxon_id) => self.on_select(taxon_id),
            Event::DetailCompleted { generation, result } => {
                self.on_detail_completed(generation, result);
                vec![]
            }
            Event::PluralEdited(plural) => {
                if self.taxon().is_some() {
                    self.plural = plural;
                }
                vec![]
            }
            Event::HostnameEdited(hostname) => {
                if self.taxon().is_some() {
                    self.hostname = if hostname.is_empty() { None } else { Some(hostname) };
                }
                vec![]
            }
            Event::Submit => self.on_submit(),
            Event::PublishCompleted { generation, result } => {
                self.on_publish_completed(generation, result);
                vec![]
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    fn on_query_changed(&mut self, query: String) -> Vec<Effect> {
        self.search_gen += 1;
        if query.is_empty() && matches!(self.browse, Browse::Suggestions(_)) {
            self.browse = Browse::Empty;
        }
        self.query = query.clone();
        // An empty query is still searched once it settles.
        vec![Effect::ScheduleSearch { generation: self.search_gen, query }]
    }

    fn on_search_due(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.search_gen {
            debug!(generation, current = self.search_gen, "Dropping superseded search timer");
            return vec![];
        }
        self.searching = true;
        self.search_dispatched = generation;
        info!(query = %self.query, generation, "Searching taxa");
        vec![Effect::Search { generation, query: self.query.clone() }]
    }

    fn on_search_completed(&mut self, generation: u64, result: Result<Vec<TaxonSummary>, Error>) {
        if generation == self.search_dispatched {
            self.searching = false;
        }
        if generation != self.search_gen {
            match &result {
                Err(e) => warn!(generation, current = self.search_gen, "Stale search failed: {e}"),
                Ok(_) => debug!(generation, current = self.search_gen, "Dropping stale search response"),
            }
            return;
        }
        match result {
            // Results for an empty box are never shown.
            Ok(list) if list.is_empty() || self.query.is_empty() => {
                if !list.is_empty() {
                    debug!(results = list.len(), "Ignoring results for an empty query");
                }
                if matches!(self.browse, Browse::Suggestions(_)) {
                    self.browse = Browse::Empty;
                }
            }
            Ok(list) => self.browse = Browse::Suggestions(list),
            Err(e) => {
                debug!("Search failed: {e}");
                self.notices.push(Notice::error(e.user_message()));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    fn on_select(&mut self, taxon_id: u64) -> Vec<Effect> {
        // Any search issued before the selection must not repopulate the list.
        self.search_gen += 1;
        self.detail_gen += 1;
        self.fetching_detail = true;
        info!(taxon_id, generation = self.detail_gen, "Fetching taxon detail");
        vec![Effect::FetchDetail { generation: self.detail_gen, taxon_id }]
    }

    fn on_detail_completed(&mut self, generation: u64, result: Result<Taxon, Error>) {
        if generation != self.detail_gen {
            debug!(generation, current = self.detail_gen, "Dropping stale detail response");
            return;
        }
        self.fetching_detail = false;
        match result {
            Ok(taxon) => {
                self.plural = taxon.display_name().to_string();
                self.hostname = None;
                self.browse = Browse::Detail(taxon);
            }
            Err(e) => {
                debug!("Taxon detail failed: {e}");
                self.notices.push(Notice::error(e.user_message()));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Publish
    // -----------------------------------------------------------------------

    fn on_submit(&mut self) -> Vec<Effect> {
        if self.publishing {
            debug!("Publish already in flight, ignoring submit");
            return vec![];
        }
        let (Some(taxon_id), Some(hostname)) = (self.taxon_id(), self.effective_hostname()) else {
            self.notices.push(Notice::error("Select a species before publishing"));
            return vec![];
        };
        if !is_valid_hostname(&hostname) {
            let err = Error::InvalidHostname(hostname);
            debug!("{err}");
            self.notices.push(Notice::error(err.user_message()));
            return vec![];
        }
        self.publish_gen += 1;
        self.publishing = true;
        let request = PublishRequest { taxon_id, taxon_plural: self.plural.clone(), hostname };
        info!(taxon_id, hostname = %request.hostname, "Publishing");
        vec![Effect::Publish { generation: self.publish_gen, request }]
    }

    fn on_publish_completed(&mut self, generation: u64, result: Result<PublishResponse, Error>) {
        if generation != self.publish_gen {
            debug!(generation, current = self.publish_gen, "Dropping stale publish response");
            return;
        }
        self.publishing = false;
        let outcome = result.and_then(|reply| {
            if !reply.ok {
                return Err(Error::Rejected(
                    reply.msg.unwrap_or_else(|| "Publish failed".to_string()),
                ));
            }
            match reply.deploy_url {
                Some(host) if !host.is_empty() => Ok(Deployment {
                    url: format!("{}://{}", self.deploy_scheme, host),
                    message: reply.deploy_message.filter(|m| !m.is_empty()),
                }),
                _ => Err(Error::Malformed("publish reply is missing deploy_url".into())),
            }
        });
        match outcome {
            Ok(deployment) => {
                info!(url = %deployment.url, "Published");
                self.notices.push(Notice::info(format!("Published to {}", deployment.url)));
                self.deployment = Some(deployment);
            }
            Err(e) => {
                debug!("Publish failed: {e}");
                self.notices.push(Notice::error(e.user_message()));
            }
        }
    }
}
