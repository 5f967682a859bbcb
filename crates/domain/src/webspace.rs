// crates/domain/src/webspace.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─────────────────────────────────────────────────────────────────────────────
// Localization
// ─────────────────────────────────────────────────────────────────────────────

/// A language (optionally narrowed to a country) a webspace is published in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub default: bool,
}

impl Localization {
    pub fn new(language: impl Into<String>, country: Option<&str>) -> Self {
        Self {
            language: language.into(),
            country: country.map(str::to_owned),
            default: false,
        }
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// Locale in underscore form: `de` or `de_at`.
    pub fn locale(&self) -> String {
        self.locale_with("_")
    }

    /// Locale rendered with an arbitrary delimiter (`-` is used inside URLs).
    pub fn locale_with(&self, delimiter: &str) -> String {
        match &self.country {
            Some(country) => format!("{}{}{}", self.language, delimiter, country),
            None => self.language.clone(),
        }
    }
}

/// Named navigation slot with per-locale titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    pub key: String,
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
}

impl NavigationContext {
    pub fn title(&self, locale: &str) -> Option<&str> {
        self.titles.get(locale).map(String::as_str)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Url / Environment / Portal / Webspace
// ─────────────────────────────────────────────────────────────────────────────

/// A configured URL entry of a portal environment.
///
/// `url` is the raw expression as written in configuration and may still
/// contain placeholders such as `{localization}` or a `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default)]
    pub main: bool,
}

impl Url {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            language: None,
            country: None,
            redirect: None,
            main: false,
        }
    }

    pub fn main(mut self) -> Self {
        self.main = true;
        self
    }

    pub fn with_language(mut self, language: &str, country: Option<&str>) -> Self {
        self.language = Some(language.to_owned());
        self.country = country.map(str::to_owned);
        self
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    /// Locale pinned by this URL, if it names one explicitly.
    pub fn locale(&self) -> Option<String> {
        self.language.as_ref().map(|language| match &self.country {
            Some(country) => format!("{language}_{country}"),
            None => language.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment type, e.g. `dev`, `stage` or `prod`.
    pub kind: String,
    pub urls: Vec<Url>,
    /// Custom url patterns; each carries at least one `*` wildcard.
    #[serde(default)]
    pub custom_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    pub key: String,
    pub name: String,
    pub webspace_key: String,
    pub environments: Vec<Environment>,
    pub localizations: Vec<Localization>,
}

impl Portal {
    pub fn environment(&self, kind: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.kind == kind)
    }

    pub fn localization(&self, locale: &str) -> Option<&Localization> {
        self.localizations.iter().find(|l| l.locale() == locale)
    }

    /// The localization flagged `default`, falling back to the first one.
    pub fn default_localization(&self) -> Option<&Localization> {
        self.localizations
            .iter()
            .find(|l| l.default)
            .or_else(|| self.localizations.first())
    }
}

/// A configured site. Built once from configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webspace {
    pub key: String,
    pub name: String,
    pub localizations: Vec<Localization>,
    pub portals: Vec<Portal>,
    #[serde(default)]
    pub navigation: Vec<NavigationContext>,
}

impl Webspace {
    pub fn portal(&self, key: &str) -> Option<&Portal> {
        self.portals.iter().find(|p| p.key == key)
    }

    pub fn localization(&self, locale: &str) -> Option<&Localization> {
        self.localizations.iter().find(|l| l.locale() == locale)
    }

    pub fn default_localization(&self) -> Option<&Localization> {
        self.localizations
            .iter()
            .find(|l| l.default)
            .or_else(|| self.localizations.first())
    }

    pub fn navigation_context(&self, key: &str) -> Option<&NavigationContext> {
        self.navigation.iter().find(|n| n.key == key)
    }
}
