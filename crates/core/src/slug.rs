//! Hostname suggestion for a published site, plus the publisher's acceptance rule.

use regex::Regex;
use std::sync::LazyLock;

const HOSTNAME_SUFFIX: &str = "-near-me";

static LEADING_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s-]").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static VALID_HOSTNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]+$").unwrap());

/// Derive a hostname slug from a display label.
///
/// Lowercases, strips a leading run of hyphens, drops everything that is not
/// `a-z`, whitespace or `-`, turns each whitespace run into one hyphen, then
/// appends `-near-me`. The steps run in that order, so a hyphen exposed by a
/// later step is kept (`"!-owl"` gives `"-owl-near-me"`). Not idempotent.
pub fn suggest_hostname(label: &str) -> String {
    let lower = label.to_lowercase();
    let trimmed = LEADING_HYPHENS.replace(&lower, "");
    let kept = DISALLOWED.replace_all(&trimmed, "");
    let mut slug = WHITESPACE_RUN.replace_all(&kept, "-").into_owned();
    slug.push_str(HOSTNAME_SUFFIX);
    slug
}

/// Whether the publisher will accept `name` as a deployment name.
pub fn is_valid_hostname(name: &str) -> bool {
    VALID_HOSTNAME.is_match(name)
}
