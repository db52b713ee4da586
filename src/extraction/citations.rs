use std::{collections::HashSet, sync::OnceLock};

use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::core::types::{Citation, ResolvedUrl};

pub const UNKNOWN_SOURCE: &str = "Unknown Source";

const REDIRECT_HOST_PREFIX: &str = "translate.google.";
const REDIRECT_HOSTS: &[&str] = &["translate.googleusercontent.com"];
const REDIRECT_PARAMS: &[&str] = &["u", "url"];
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ')'];

/// Unwraps translation-service redirects and derives the display domain.
///
/// Never fails. A URL that does not parse keeps its text and gets the
/// [`UNKNOWN_SOURCE`] domain. Nested wrappers are unwrapped together so a
/// second pass over the result is a no-op.
pub fn resolve_url(raw: &str) -> ResolvedUrl {
    let mut url = raw.to_string();
    // Each unwrap yields a strictly shorter string, so this terminates.
    while let Some(target) = unwrap_redirect(&url) {
        tracing::debug!(from = %url, to = %target, "unwrapped redirect url");
        url = target;
    }
    let domain = domain_of(&url);
    ResolvedUrl { url, domain }
}

/// Hostname with a leading `www.` removed, or [`UNKNOWN_SOURCE`].
pub fn domain_of(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
        .map(|host| host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

fn unwrap_redirect(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    if !is_redirect_host(&host) {
        return None;
    }

    REDIRECT_PARAMS.iter().find_map(|param| {
        parsed
            .query_pairs()
            .find(|(key, value)| key == param && !value.trim().is_empty())
            .map(|(_, value)| value.trim().to_string())
    })
}

/// Google Translate wrappers on any regional domain, plus the
/// usercontent proxy.
fn is_redirect_host(host: &str) -> bool {
    host.starts_with(REDIRECT_HOST_PREFIX) || REDIRECT_HOSTS.contains(&host)
}

/// Flat response-level source list, independent of per-claim attribution.
///
/// Lookup order: citations on the first choice of the envelope, then the
/// envelope's root `citations`, then every `http(s)://` token in the content.
pub fn collect_citations(content: &str, envelope: Option<&Value>) -> Vec<Citation> {
    let provided = envelope.and_then(|body| {
        body.get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| non_empty_list(choice.get("citations")))
            .or_else(|| non_empty_list(body.get("citations")))
    });

    let urls = match provided {
        Some(items) => items.iter().filter_map(citation_url).collect::<Vec<_>>(),
        None => scan_urls(content),
    };

    urls.iter()
        .enumerate()
        .map(|(idx, url)| {
            let resolved = resolve_url(url);
            Citation {
                index: idx + 1,
                url: resolved.url,
                domain: resolved.domain,
            }
        })
        .collect()
}

fn non_empty_list(value: Option<&Value>) -> Option<&Vec<Value>> {
    value.and_then(Value::as_array).filter(|items| !items.is_empty())
}

fn citation_url(item: &Value) -> Option<String> {
    let url = match item {
        Value::String(text) => text.as_str(),
        Value::Object(_) => item.get("url").and_then(Value::as_str)?,
        _ => return None,
    };
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"https?://[^\s"'<>\]]+"#).expect("static url pattern compiles")
    })
}

fn scan_urls(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    url_pattern()
        .find_iter(content)
        .map(|found| found.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
