//! Wildcard URL matching for portal URL patterns.
//!
//! A pattern is a plain `host/path` string. The only special character is
//! `*`, which stands for one or more characters other than `/`. Everything
//! else is literal. Hosts compare case-insensitively, paths do not.
//!
//! - `example.com`          matches `example.com`, `example.com/`, `example.com/foo`
//! - `example.com/en`       matches `example.com/en/about`, `example.com/en.json`
//! - `*.example.com`        matches `api.example.com`, `a.b.example.com`
//! - `example.com/en`       does NOT match `example.com/english`

use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};
use tracing::warn;

pub const WILDCARD: char = '*';

/// A portal URL pattern compiled to an anchored regex.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    pattern: String,
    regex: Regex,
}

impl UrlPattern {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let trimmed = pattern.trim_end_matches('/');
        let (host, path) = split_host(trimmed);

        let mut re = String::with_capacity(trimmed.len() * 2 + 16);
        re.push('^');
        push_segment(&mut re, &host.to_ascii_lowercase());
        push_segment(&mut re, path);
        // After the pattern: end, a path continuation, or a format suffix.
        re.push_str(r"(?:/.*|\..*)?$");

        Ok(Self {
            pattern: trimmed.to_string(),
            regex: Regex::new(&re)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(&normalize_url(url))
    }

    /// Pattern with every `*` replaced by the text it matched in `url`.
    pub fn resolve(&self, url: &str) -> Option<String> {
        let normalized = normalize_url(url);
        let caps = self.regex.captures(&normalized)?;

        let mut out = String::with_capacity(self.pattern.len());
        let mut group = 1;
        for ch in self.pattern.chars() {
            if ch == WILDCARD {
                out.push_str(caps.get(group).map(|m| m.as_str()).unwrap_or_default());
                group += 1;
            } else {
                out.push(ch);
            }
        }
        Some(out)
    }
}

/// Does `url` match the portal `pattern`?
pub fn matches(url: &str, pattern: &str) -> bool {
    match compiled(pattern) {
        Some(p) => p.is_match(url),
        None => false,
    }
}

/// Replace the wildcards of `pattern` with the corresponding parts of `url`.
///
/// Returns `None` when the url does not match the pattern.
pub fn resolve(url: &str, pattern: &str) -> Option<String> {
    compiled(pattern)?.resolve(url)
}

pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARD)
}

// ─────────────────────────────────────────────────────────────────────────────
// Internals
// ─────────────────────────────────────────────────────────────────────────────

static COMPILED: LazyLock<Mutex<HashMap<String, Arc<UrlPattern>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &str) -> Option<Arc<UrlPattern>> {
    let mut guard = COMPILED.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(p) = guard.get(pattern) {
        return Some(p.clone());
    }

    match UrlPattern::compile(pattern) {
        Ok(p) => {
            let p = Arc::new(p);
            guard.insert(pattern.to_string(), p.clone());
            Some(p)
        }
        Err(err) => {
            warn!("invalid url pattern {pattern:?}: {err}");
            None
        }
    }
}

fn push_segment(re: &mut String, literal: &str) {
    let mut parts = literal.split(WILDCARD);
    if let Some(first) = parts.next() {
        re.push_str(&regex::escape(first));
    }
    for part in parts {
        re.push_str("([^/]+)");
        re.push_str(&regex::escape(part));
    }
}

/// Split at the first `/`; the path keeps its leading slash.
fn split_host(url: &str) -> (&str, &str) {
    match url.find('/') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    }
}

/// Drop any `scheme://` prefix and lowercase the host.
fn normalize_url(url: &str) -> String {
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let (host, path) = split_host(without_scheme);
    format!("{}{}", host.to_ascii_lowercase(), path)
}
