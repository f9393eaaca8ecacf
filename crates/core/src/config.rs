//! `.nearme.toml` loading.
//!
//! Every key is optional. Unknown keys and badly typed values are reported with
//! `warn!` and otherwise ignored, so a broken file degrades to the defaults.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".nearme.toml";

pub const DEFAULT_API_BASE: &str = "https://api.inaturalist.org/v1";
pub const DEFAULT_PUBLISH_BASE: &str = "http://localhost:8011";
pub const DEFAULT_PREVIEW_BASE: &str = "https://www.owlsnearme.com";
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Known keys in `.nearme.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &[
    "api_base",
    "publish_base",
    "preview_base",
    "debounce_ms",
    "deploy_scheme",
    "timeout_secs",
    "user_agent",
    "session_cookie",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearMeConfig {
    /// Taxa API root; `/taxa/autocomplete` and `/taxa/{id}` are appended.
    pub api_base: String,
    /// Publisher root; `/publish` is appended.
    pub publish_base: String,
    /// Root of the published app, used for per-taxon preview links.
    pub preview_base: String,
    /// Quiet period before a typed query is sent.
    pub debounce_ms: u64,
    /// Scheme prefixed to the publisher's bare deploy host.
    pub deploy_scheme: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Value of the publisher's signed `user` cookie, if the publisher requires login.
    pub session_cookie: Option<String>,
}

impl Default for NearMeConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            publish_base: DEFAULT_PUBLISH_BASE.to_string(),
            preview_base: DEFAULT_PREVIEW_BASE.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            deploy_scheme: "https".to_string(),
            timeout_secs: 30,
            user_agent: concat!("near-me/", env!("CARGO_PKG_VERSION")).to_string(),
            session_cookie: None,
        }
    }
}

impl NearMeConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Load `.nearme.toml` from `dir`, falling back to defaults when it is absent.
pub fn load_nearme_config(dir: &Path) -> NearMeConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return NearMeConfig::default();
    }
    match load_config_file(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), "{e}; using defaults");
            NearMeConfig::default()
        }
    }
}

/// Load an explicit config file. Fails only if the file cannot be read or is not TOML.
pub fn load_config_file(path: &Path) -> crate::Result<NearMeConfig> {
    debug!(path = %path.display(), "Loading config");
    let content = std::fs::read_to_string(path)
        .map_err(|e| crate::Error::Config(format!("cannot read {}: {e}", path.display())))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> crate::Result<NearMeConfig> {
    let table = content
        .parse::<toml::Table>()
        .map_err(|e| crate::Error::Config(e.to_string()))?;
    let mut config = NearMeConfig::default();

    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS
            .iter()
            .min_by_key(|k| edit_distance(key, k))
            .copied()
            .unwrap_or_default();
        if edit_distance(key, suggestion) <= 3 {
            warn!(
                key = key.as_str(),
                suggestion,
                "Unknown key in {CONFIG_FILE_NAME} - did you mean '{suggestion}'?"
            );
        } else {
            warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            );
        }
    }

    let string_key = |key: &str, slot: &mut String| match table.get(key) {
        Some(v) => match v.as_str() {
            Some(s) if !s.trim().is_empty() => *slot = s.trim().to_string(),
            _ => warn!(key, "Expected a non-empty string, keeping default"),
        },
        None => {}
    };
    string_key("api_base", &mut config.api_base);
    string_key("publish_base", &mut config.publish_base);
    string_key("preview_base", &mut config.preview_base);
    string_key("deploy_scheme", &mut config.deploy_scheme);
    string_key("user_agent", &mut config.user_agent);

    let integer_key = |key: &str, slot: &mut u64| match table.get(key) {
        Some(v) => match v.as_integer() {
            Some(n) if n >= 0 => *slot = n as u64,
            _ => warn!(key, "Expected a non-negative integer, keeping default"),
        },
        None => {}
    };
    integer_key("debounce_ms", &mut config.debounce_ms);
    integer_key("timeout_secs", &mut config.timeout_secs);

    if let Some(v) = table.get("session_cookie") {
        match v.as_str() {
            Some(s) => config.session_cookie = Some(s.to_string()),
            None => warn!(key = "session_cookie", "Expected a string, ignoring"),
        }
    }

    Ok(config)
}
