// crates/edge/src/config/loader.rs

//! Parses one webspace file into a `domain::Webspace`.
//!
//! ```toml
//! key = "sulu_io"
//! name = "Sulu CMS"
//!
//! [[localizations]]
//! language = "en"
//! default = true
//!
//! [[navigation]]
//! key = "main"
//! titles = { en = "Main Navigation" }
//!
//! [[portals]]
//! key = "sulu_io_portal"
//!
//! [[portals.environments]]
//! type = "prod"
//!
//! [[portals.environments.urls]]
//! url = "sulu.io/{localization}"
//! main = true
//! ```

use crate::Error;
use domain::{Environment, Localization, NavigationContext, Portal, Url, Webspace};
use serde::Deserialize;
use serve::matcher;
use std::fs;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// File structs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WebspaceFile {
    key: String,
    name: Option<String>,
    #[serde(default)]
    localizations: Vec<Localization>,
    #[serde(default)]
    navigation: Vec<NavigationContext>,
    #[serde(default)]
    portals: Vec<PortalFile>,
}

#[derive(Debug, Deserialize)]
struct PortalFile {
    key: String,
    name: Option<String>,
    /// Locales of the webspace this portal serves; all of them when empty.
    #[serde(default)]
    localizations: Vec<String>,
    #[serde(default)]
    environments: Vec<EnvironmentFile>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentFile {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    urls: Vec<Url>,
    #[serde(default)]
    custom_urls: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_webspace_file(path: &Path) -> Result<Webspace, Error> {
    let text = fs::read_to_string(path).map_err(|err| {
        Error::Config(format!("Failed reading {}: {}", path.display(), err))
    })?;
    parse_webspace(&text, path)
}

/// Parse and validate the text of a webspace file; `path` is only used in errors.
pub fn parse_webspace(text: &str, path: &Path) -> Result<Webspace, Error> {
    let invalid = |message: String| Error::InvalidWebspace {
        path: path.to_path_buf(),
        message,
    };

    let file: WebspaceFile = toml::from_str(text).map_err(|err| invalid(err.to_string()))?;

    if file.key.trim().is_empty() {
        return Err(invalid("webspace key is empty".into()));
    }
    if file.localizations.is_empty() {
        return Err(invalid(format!(
            "webspace {:?} has no localizations",
            file.key
        )));
    }
    if file.localizations.iter().filter(|l| l.default).count() > 1 {
        return Err(invalid(format!(
            "webspace {:?} has more than one default localization",
            file.key
        )));
    }

    let mut portals = Vec::with_capacity(file.portals.len());
    for portal in file.portals {
        let localizations = if portal.localizations.is_empty() {
            file.localizations.clone()
        } else {
            portal
                .localizations
                .iter()
                .map(|locale| {
                    file.localizations
                        .iter()
                        .find(|l| &l.locale() == locale)
                        .cloned()
                        .ok_or_else(|| {
                            invalid(format!(
                                "portal {:?} uses locale {locale:?} which webspace {:?} does not define",
                                portal.key, file.key
                            ))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut environments = Vec::with_capacity(portal.environments.len());
        for env in portal.environments {
            if env.urls.is_empty() {
                return Err(invalid(format!(
                    "portal {:?} environment {:?} has no urls",
                    portal.key, env.kind
                )));
            }
            if let Some(url) = env.urls.iter().find(|u| u.url.trim().is_empty()) {
                return Err(invalid(format!(
                    "portal {:?} environment {:?} has an empty url (redirect: {:?})",
                    portal.key, env.kind, url.redirect
                )));
            }
            if let Some(custom) = env.custom_urls.iter().find(|c| !matcher::has_wildcard(c)) {
                return Err(invalid(format!(
                    "custom url {custom:?} of portal {:?} environment {:?} has no `*` wildcard",
                    portal.key, env.kind
                )));
            }
            environments.push(Environment {
                kind: env.kind,
                urls: env.urls,
                custom_urls: env.custom_urls,
            });
        }

        portals.push(Portal {
            name: portal.name.unwrap_or_else(|| portal.key.clone()),
            key: portal.key,
            webspace_key: file.key.clone(),
            environments,
            localizations,
        });
    }

    Ok(Webspace {
        name: file.name.unwrap_or_else(|| file.key.clone()),
        key: file.key,
        localizations: file.localizations,
        portals,
        navigation: file.navigation,
    })
}
