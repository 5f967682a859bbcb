// crates/domain/src/portal.rs

use crate::webspace::Localization;
use serde::{Deserialize, Serialize};

/// How a portal information record relates to the URL it was generated from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Exact domain/path match for one localization.
    Full,

    /// Prefix match without a localization segment; used as default-locale fallback.
    Partial,

    /// Points to a canonical URL elsewhere.
    Redirect,
}

/// Flattened, resolved view of one portal URL in one environment.
///
/// One webspace produces many of these (portals × environments × locales).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalInformation {
    pub match_type: MatchType,
    pub webspace_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localization: Option<Localization>,
    /// Concrete URL pattern (placeholders already replaced, wildcards kept).
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default)]
    pub main: bool,
    /// The URL expression as written in configuration.
    pub url_expression: String,
}

impl PortalInformation {
    pub fn new(
        match_type: MatchType,
        webspace_key: impl Into<String>,
        portal_key: Option<&str>,
        localization: Option<Localization>,
        url: impl Into<String>,
    ) -> Self {
        let url = url.into();
        Self {
            match_type,
            webspace_key: webspace_key.into(),
            portal_key: portal_key.map(str::to_owned),
            localization,
            url_expression: url.clone(),
            url,
            redirect: None,
            main: false,
        }
    }

    pub fn with_main(mut self, main: bool) -> Self {
        self.main = main;
        self
    }

    pub fn with_redirect(mut self, redirect: Option<String>) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn with_url_expression(mut self, expr: impl Into<String>) -> Self {
        self.url_expression = expr.into();
        self
    }

    pub fn locale(&self) -> Option<String> {
        self.localization.as_ref().map(Localization::locale)
    }
}
