// crates/serve/src/manager.rs

//! Bidirectional resolution between request URLs and
//! (webspace, locale, resource locator) tuples.
//!
//! The collection is loaded lazily from the injected `CollectionSource` and
//! kept for the lifetime of the manager. All lookups are linear scans over
//! the portal informations of one environment; "no match" is `None` or an
//! empty list, never an error.

use crate::matcher;
use crate::source::{CollectionSource, SourceError, StaticSource};
use domain::{Localization, MatchType, Portal, PortalInformation, Webspace, WebspaceCollection};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("webspace {0:?} not found")]
    WebspaceNotFound(String),

    #[error("failed to load webspace collection: {0}")]
    Source(#[from] SourceError),
}

pub type Result<T> = std::result::Result<T, ManagerError>;

const RESOLVABLE: [MatchType; 3] = [MatchType::Full, MatchType::Partial, MatchType::Redirect];
const FULL_ONLY: [MatchType; 1] = [MatchType::Full];

pub const DEFAULT_SCHEME: &str = "http";

// ─────────────────────────────────────────────────────────────────────────────
// Query
// ─────────────────────────────────────────────────────────────────────────────

/// Inputs for resource-locator → URL resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlQuery<'a> {
    pub resource_locator: &'a str,
    pub environment: &'a str,
    pub locale: &'a str,
    pub webspace_key: Option<&'a str>,
    pub domain: Option<&'a str>,
    pub scheme: &'a str,
}

impl<'a> UrlQuery<'a> {
    pub fn new(resource_locator: &'a str, environment: &'a str, locale: &'a str) -> Self {
        Self {
            resource_locator,
            environment,
            locale,
            webspace_key: None,
            domain: None,
            scheme: DEFAULT_SCHEME,
        }
    }

    pub fn webspace(mut self, key: &'a str) -> Self {
        self.webspace_key = Some(key);
        self
    }

    pub fn domain(mut self, domain: &'a str) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn scheme(mut self, scheme: &'a str) -> Self {
        self.scheme = scheme;
        self
    }
}

/// A portal custom url pattern matched by a request url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomUrlMatch<'a> {
    pub portal: &'a Portal,
    pub pattern: &'a str,
    /// The pattern with each `*` filled in from the request url.
    pub url: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Manager
// ─────────────────────────────────────────────────────────────────────────────

pub struct WebspaceManager<S> {
    source: S,
    collection: OnceLock<WebspaceCollection>,
}

impl WebspaceManager<StaticSource> {
    /// Manager over an already-built collection; nothing is loaded lazily.
    pub fn with_collection(collection: WebspaceCollection) -> Self {
        let manager = Self::new(StaticSource::default());
        let _ = manager.collection.set(collection);
        manager
    }
}

impl<S: CollectionSource> WebspaceManager<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            collection: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The collection, loading it from the source on first use.
    ///
    /// Two threads racing on a cold manager may both call the source; only
    /// the first result is kept.
    #[tracing::instrument(skip_all)]
    pub fn webspace_collection(&self) -> Result<&WebspaceCollection> {
        if let Some(c) = self.collection.get() {
            return Ok(c);
        }

        let loaded = self.source.load()?;
        debug!(
            "webspace collection loaded: {} webspaces, {} resources",
            loaded.len(),
            loaded.resources().len()
        );
        Ok(self.collection.get_or_init(|| loaded))
    }

    #[tracing::instrument(skip_all, fields(key = %key))]
    pub fn find_webspace_by_key(&self, key: &str) -> Result<&Webspace> {
        self.webspace_collection()?
            .webspace(key)
            .ok_or_else(|| ManagerError::WebspaceNotFound(key.to_string()))
    }

    #[tracing::instrument(skip_all, fields(key = %key))]
    pub fn find_portal_by_key(&self, key: &str) -> Result<Option<&Portal>> {
        Ok(self.webspace_collection()?.portal(key))
    }

    /// First portal information of `environment` whose pattern matches `url`.
    ///
    /// Registration order decides between overlapping patterns.
    #[tracing::instrument(skip_all, fields(url = %url, env = %environment))]
    pub fn find_portal_information_by_url(
        &self,
        url: &str,
        environment: &str,
    ) -> Result<Option<&PortalInformation>> {
        let found = self
            .webspace_collection()?
            .portal_informations(environment)
            .iter()
            .find(|info| matcher::matches(url, &info.url));

        debug!("matched portal: {:?}", found.map(|i| &i.url));
        Ok(found)
    }

    /// Every portal information of `environment` whose pattern matches `url`.
    #[tracing::instrument(skip_all, fields(url = %url, env = %environment))]
    pub fn find_portal_informations_by_url(
        &self,
        url: &str,
        environment: &str,
    ) -> Result<Vec<&PortalInformation>> {
        Ok(self
            .webspace_collection()?
            .portal_informations(environment)
            .iter()
            .filter(|info| matcher::matches(url, &info.url))
            .collect())
    }

    /// First custom url pattern, across portals in registration order, that
    /// matches `url` in `environment`.
    #[tracing::instrument(skip_all, fields(url = %url, env = %environment))]
    pub fn find_custom_url_by_url(
        &self,
        url: &str,
        environment: &str,
    ) -> Result<Option<CustomUrlMatch<'_>>> {
        let found = self
            .webspace_collection()?
            .portals()
            .filter_map(|portal| portal.environment(environment).map(|env| (portal, env)))
            .flat_map(|(portal, env)| env.custom_urls.iter().map(move |p| (portal, p)))
            .find_map(|(portal, pattern)| {
                matcher::resolve(url, pattern).map(|resolved| CustomUrlMatch {
                    portal,
                    pattern: pattern.as_str(),
                    url: resolved,
                })
            });

        debug!("matched custom url: {:?}", found.as_ref().map(|m| &m.url));
        Ok(found)
    }

    #[tracing::instrument(skip_all)]
    pub fn find_portal_informations_by_webspace_key_and_locale(
        &self,
        webspace_key: &str,
        locale: &str,
        environment: &str,
    ) -> Result<Vec<&PortalInformation>> {
        Ok(self
            .webspace_collection()?
            .portal_informations(environment)
            .iter()
            .filter(|info| info.webspace_key == webspace_key && has_locale(info, locale))
            .collect())
    }

    #[tracing::instrument(skip_all)]
    pub fn find_portal_informations_by_portal_key_and_locale(
        &self,
        portal_key: &str,
        locale: &str,
        environment: &str,
    ) -> Result<Vec<&PortalInformation>> {
        Ok(self
            .webspace_collection()?
            .portal_informations(environment)
            .iter()
            .filter(|info| {
                info.portal_key.as_deref() == Some(portal_key) && has_locale(info, locale)
            })
            .collect())
    }

    /// Every FULL-match URL for the resource locator that passes the locale,
    /// webspace and domain filters, in registration order.
    #[tracing::instrument(skip_all, fields(rl = %query.resource_locator, env = %query.environment))]
    pub fn find_urls_by_resource_locator(&self, query: &UrlQuery<'_>) -> Result<Vec<String>> {
        let collection = self.webspace_collection()?;

        let urls = collection
            .portal_informations_of(query.environment, &FULL_ONLY)
            .filter(|info| has_locale(info, query.locale))
            .filter(|info| is_same_webspace(info, query.webspace_key))
            .map(|info| resource_locator_url(query.scheme, &info.url, query.resource_locator))
            .filter(|url| is_from_domain(url, query.domain))
            .collect();

        Ok(urls)
    }

    /// The best URL for the resource locator.
    ///
    /// Candidates are ranked in three buckets: FULL matches on the requested
    /// domain, other FULL matches, then PARTIAL/REDIRECT matches. Inside the
    /// first two buckets `main` portals come first; bucket order always wins
    /// over the `main` flag.
    #[tracing::instrument(skip_all, fields(rl = %query.resource_locator, env = %query.environment))]
    pub fn find_url_by_resource_locator(&self, query: &UrlQuery<'_>) -> Result<Option<String>> {
        let collection = self.webspace_collection()?;

        let mut same_domain: Vec<(bool, String)> = Vec::new();
        let mut full: Vec<(bool, String)> = Vec::new();
        let mut partial: Vec<String> = Vec::new();

        for info in collection.portal_informations_of(query.environment, &RESOLVABLE) {
            if !is_same_localization(info, query.locale)
                || !is_same_webspace(info, query.webspace_key)
            {
                continue;
            }

            let url = resource_locator_url(query.scheme, &info.url, query.resource_locator);
            match info.match_type {
                MatchType::Full if is_from_domain(&url, query.domain) => {
                    same_domain.push((info.main, url))
                }
                MatchType::Full => full.push((info.main, url)),
                MatchType::Partial | MatchType::Redirect => partial.push(url),
            }
        }

        // stable: main first, otherwise registration order
        same_domain.sort_by_key(|(main, _)| !*main);
        full.sort_by_key(|(main, _)| !*main);

        let best = same_domain
            .into_iter()
            .chain(full)
            .map(|(_, url)| url)
            .chain(partial)
            .next();

        debug!("resolved url: {best:?}");
        Ok(best)
    }

    pub fn portals(&self) -> Result<Vec<&Portal>> {
        Ok(self.webspace_collection()?.portals().collect())
    }

    /// Url patterns of every portal information in `environment`.
    pub fn urls(&self, environment: &str) -> Result<Vec<&str>> {
        Ok(self
            .webspace_collection()?
            .portal_informations(environment)
            .iter()
            .map(|info| info.url.as_str())
            .collect())
    }

    pub fn portal_informations(&self, environment: &str) -> Result<&[PortalInformation]> {
        Ok(self.webspace_collection()?.portal_informations(environment))
    }

    pub fn portal_informations_by_webspace_key(
        &self,
        environment: &str,
        webspace_key: &str,
    ) -> Result<Vec<&PortalInformation>> {
        Ok(self
            .webspace_collection()?
            .portal_informations(environment)
            .iter()
            .filter(|info| info.webspace_key == webspace_key)
            .collect())
    }

    /// Every localization of every webspace, keyed by locale.
    pub fn all_localizations(&self) -> Result<BTreeMap<String, &Localization>> {
        let mut out = BTreeMap::new();
        for webspace in self.webspace_collection()? {
            for localization in &webspace.localizations {
                out.insert(localization.locale(), localization);
            }
        }
        Ok(out)
    }

    /// Localizations per webspace key: the default first, then the rest in
    /// configured order.
    pub fn all_locales_by_webspaces(&self) -> Result<BTreeMap<String, Vec<&Localization>>> {
        let mut out = BTreeMap::new();
        for webspace in self.webspace_collection()? {
            let mut locales: Vec<&Localization> = Vec::new();
            if let Some(default) = webspace.default_localization() {
                locales.push(default);
            }
            for localization in &webspace.localizations {
                if !locales.iter().any(|l| l.locale() == localization.locale()) {
                    locales.push(localization);
                }
            }
            out.insert(webspace.key.clone(), locales);
        }
        Ok(out)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn has_locale(info: &PortalInformation, locale: &str) -> bool {
    info.locale().as_deref() == Some(locale)
}

/// Portal informations without a localization serve every locale.
fn is_same_localization(info: &PortalInformation, locale: &str) -> bool {
    info.localization.is_none() || has_locale(info, locale)
}

fn is_same_webspace(info: &PortalInformation, webspace_key: Option<&str>) -> bool {
    webspace_key.map_or(true, |key| info.webspace_key == key)
}

/// `scheme://portal_url` + resource locator.
///
/// The locator keeps its trailing slash only when the portal url is a bare
/// domain, so the domain root stays `http://example.com/`.
pub fn resource_locator_url(scheme: &str, portal_url: &str, resource_locator: &str) -> String {
    let resource_locator = if portal_url.contains('/') {
        resource_locator.trim_end_matches('/')
    } else {
        resource_locator
    };

    let base = format!("{scheme}://{portal_url}");
    format!("{}{}", base.trim_end_matches('/'), resource_locator)
}

/// Is the url's host `domain` or one of its subdomains?
///
/// No domain means no preference, which counts as a match. The domain is
/// normalized like a url host (lowercase, punycode for IDNs).
pub fn is_from_domain(url: &str, domain: Option<&str>) -> bool {
    let domain = match domain {
        Some(d) if !d.is_empty() => match url::Host::parse(d) {
            Ok(host) => host.to_string(),
            Err(_) => return false,
        },
        _ => return true,
    };

    let parsed = match url::Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };

    match parsed.host_str() {
        Some(host) => host == domain || host.ends_with(&format!(".{domain}")),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockCollectionSource;
    use std::collections::BTreeMap;

    // ---------- fixtures ----------

    fn en() -> Option<Localization> {
        Some(Localization::new("en", None))
    }

    fn de() -> Option<Localization> {
        Some(Localization::new("de", None))
    }

    fn full(webspace: &str, url: &str, loc: Option<Localization>, main: bool) -> PortalInformation {
        PortalInformation::new(MatchType::Full, webspace, Some("portal"), loc, url).with_main(main)
    }

    fn partial(webspace: &str, url: &str, loc: Option<Localization>) -> PortalInformation {
        PortalInformation::new(MatchType::Partial, webspace, Some("portal"), loc, url)
    }

    fn redirect(webspace: &str, url: &str, target: &str) -> PortalInformation {
        PortalInformation::new(MatchType::Redirect, webspace, Some("portal"), None, url)
            .with_redirect(Some(target.to_string()))
    }

    fn webspace(key: &str, locales: &[(&str, bool)]) -> Webspace {
        let localizations: Vec<Localization> = locales
            .iter()
            .map(|(l, d)| Localization::new(*l, None).with_default(*d))
            .collect();
        Webspace {
            key: key.into(),
            name: key.into(),
            localizations: localizations.clone(),
            portals: vec![Portal {
                key: format!("{key}_portal"),
                name: key.into(),
                webspace_key: key.into(),
                environments: vec![],
                localizations,
            }],
            navigation: vec![],
        }
    }

    fn manager(infos: Vec<PortalInformation>) -> WebspaceManager<StaticSource> {
        WebspaceManager::with_collection(WebspaceCollection::new(
            vec![
                webspace("sulu_io", &[("en", false), ("de", true)]),
                webspace("blog", &[("en", true), ("fr", false)]),
            ],
            BTreeMap::from([("prod".to_string(), infos)]),
            vec![],
        ))
    }

    // ---------- collection loading ----------

    #[test]
    fn collection_is_loaded_once_and_identity_is_stable() {
        let mut source = MockCollectionSource::new();
        source.expect_load().times(1).returning(|| {
            Ok(WebspaceCollection::new(
                vec![webspace("sulu_io", &[("en", true)])],
                BTreeMap::new(),
                vec![],
            ))
        });

        let m = WebspaceManager::new(source);
        let first = m.find_webspace_by_key("sulu_io").unwrap();
        let second = m.find_webspace_by_key("sulu_io").unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(m.portals().unwrap().len() == 1);
    }

    #[test]
    fn source_failure_surfaces_as_error() {
        let mut source = MockCollectionSource::new();
        source.expect_load().returning(|| {
            Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "gone",
            )))
        });

        let m = WebspaceManager::new(source);
        assert!(matches!(
            m.find_webspace_by_key("sulu_io"),
            Err(ManagerError::Source(_))
        ));
    }

    #[test]
    fn unknown_webspace_is_not_found() {
        let m = manager(vec![]);
        match m.find_webspace_by_key("nope") {
            Err(ManagerError::WebspaceNotFound(key)) => assert_eq!(key, "nope"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(m.find_portal_by_key("nope").unwrap().is_none());
        assert!(m.find_portal_by_key("blog_portal").unwrap().is_some());
    }

    // ---------- url → portal information ----------

    #[test]
    fn first_registered_match_wins() {
        let m = manager(vec![
            full("sulu_io", "sulu.io/en", en(), false),
            partial("sulu_io", "sulu.io", de()),
            full("blog", "sulu.io/en", en(), false),
        ]);

        let found = m
            .find_portal_information_by_url("sulu.io/en/about", "prod")
            .unwrap()
            .unwrap();
        assert_eq!(found.webspace_key, "sulu_io");
        assert_eq!(found.match_type, MatchType::Full);

        let fallback = m
            .find_portal_information_by_url("https://sulu.io/about", "prod")
            .unwrap()
            .unwrap();
        assert_eq!(fallback.match_type, MatchType::Partial);

        assert!(m
            .find_portal_information_by_url("sulu.io/en", "dev")
            .unwrap()
            .is_none());
        assert!(m
            .find_portal_information_by_url("example.org", "prod")
            .unwrap()
            .is_none());
    }

    #[test]
    fn all_matches_are_returned_in_order() {
        let m = manager(vec![
            full("sulu_io", "sulu.io/en", en(), false),
            partial("sulu_io", "sulu.io", de()),
            full("blog", "blog.io", en(), false),
            full("blog", "sulu.io/en", en(), false),
        ]);

        let found: Vec<_> = m
            .find_portal_informations_by_url("sulu.io/en/x", "prod")
            .unwrap()
            .into_iter()
            .map(|i| (i.webspace_key.as_str(), i.url.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("sulu_io", "sulu.io/en"),
                ("sulu_io", "sulu.io"),
                ("blog", "sulu.io/en")
            ]
        );
    }

    #[test]
    fn filters_by_webspace_and_portal_with_locale() {
        let m = manager(vec![
            full("sulu_io", "sulu.io/en", en(), false),
            full("sulu_io", "sulu.io/de", de(), false),
            full("blog", "blog.io", en(), false),
        ]);

        let by_ws = m
            .find_portal_informations_by_webspace_key_and_locale("sulu_io", "de", "prod")
            .unwrap();
        assert_eq!(by_ws.len(), 1);
        assert_eq!(by_ws[0].url, "sulu.io/de");

        let by_portal = m
            .find_portal_informations_by_portal_key_and_locale("portal", "en", "prod")
            .unwrap();
        assert_eq!(by_portal.len(), 2);

        assert_eq!(
            m.portal_informations_by_webspace_key("prod", "blog").unwrap().len(),
            1
        );
        assert_eq!(
            m.urls("prod").unwrap(),
            vec!["sulu.io/en", "sulu.io/de", "blog.io"]
        );
        assert_eq!(m.portal_informations("prod").unwrap().len(), 3);
    }

    // ---------- resource locator → url ----------

    #[test]
    fn resolved_url_matches_its_own_pattern() {
        let m = manager(vec![full("sulu_io", "example.com", en(), false)]);
        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en"))
            .unwrap()
            .unwrap();
        assert_eq!(url, "http://example.com/foo");
        assert!(matcher::matches(&url, "example.com"));
    }

    #[test]
    fn domain_bucket_beats_main_flag_of_other_domains() {
        let m = manager(vec![
            full("sulu_io", "example.com", en(), false),
            full("sulu_io", "example.org", en(), true),
        ]);

        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").domain("example.com"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://example.com/foo"));

        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").domain("example.org"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://example.org/foo"));
    }

    #[test]
    fn subdomain_of_filter_shares_the_domain_bucket() {
        let m = manager(vec![
            full("sulu_io", "example.com", en(), false),
            full("sulu_io", "sub.example.com", en(), true),
            full("sulu_io", "example.net", en(), true),
        ]);

        // both example.com hosts are "same domain"; main decides inside the bucket
        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").domain("example.com"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://sub.example.com/foo"));

        let url = m
            .find_url_by_resource_locator(
                &UrlQuery::new("/foo", "prod", "en").domain("sub.example.com"),
            )
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://sub.example.com/foo"));
    }

    #[test]
    fn main_flag_wins_within_a_bucket() {
        let m = manager(vec![
            full("sulu_io", "example.com/a", en(), false),
            full("sulu_io", "example.com/b", en(), true),
        ]);

        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").domain("example.com"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://example.com/b/foo"));

        // without a domain filter everything is "same domain"
        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://example.com/b/foo"));
    }

    #[test]
    fn full_matches_elsewhere_beat_partial_and_redirect() {
        let m = manager(vec![
            partial("sulu_io", "example.com", en()),
            redirect("sulu_io", "www.example.com", "example.com"),
            full("sulu_io", "other.org/en", en(), false),
        ]);

        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").domain("example.com"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://other.org/en/foo"));
    }

    #[test]
    fn partial_and_redirect_are_the_last_resort() {
        let m = manager(vec![
            full("sulu_io", "example.com/de", de(), true),
            redirect("sulu_io", "www.example.com", "example.com"),
            partial("sulu_io", "example.com", en()),
        ]);

        // redirect has no localization, so it serves every locale and comes first
        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").scheme("https"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("https://www.example.com/foo"));
    }

    #[test]
    fn webspace_filter_restricts_candidates() {
        let m = manager(vec![
            full("blog", "blog.io", en(), true),
            full("sulu_io", "sulu.io", en(), false),
        ]);

        let url = m
            .find_url_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").webspace("sulu_io"))
            .unwrap();
        assert_eq!(url.as_deref(), Some("http://sulu.io/foo"));

        let urls = m
            .find_urls_by_resource_locator(&UrlQuery::new("/foo", "prod", "en"))
            .unwrap();
        assert_eq!(urls, vec!["http://blog.io/foo", "http://sulu.io/foo"]);
    }

    #[test]
    fn find_urls_returns_only_full_matches_in_order() {
        let m = manager(vec![
            partial("sulu_io", "example.com", en()),
            full("sulu_io", "example.com/en", en(), false),
            full("sulu_io", "example.com/de", de(), true),
            redirect("sulu_io", "www.example.com", "example.com"),
            full("sulu_io", "shop.example.com", en(), true),
            full("sulu_io", "example.org/en", en(), false),
        ]);

        let urls = m
            .find_urls_by_resource_locator(&UrlQuery::new("/foo/", "prod", "en"))
            .unwrap();
        assert_eq!(
            urls,
            vec![
                "http://example.com/en/foo",
                "http://shop.example.com/foo/",
                "http://example.org/en/foo"
            ]
        );

        let urls = m
            .find_urls_by_resource_locator(&UrlQuery::new("/foo", "prod", "en").domain("example.com"))
            .unwrap();
        assert_eq!(
            urls,
            vec!["http://example.com/en/foo", "http://shop.example.com/foo"]
        );
    }

    #[test]
    fn no_match_is_none_and_empty() {
        let m = manager(vec![full("sulu_io", "example.com", en(), false)]);

        for query in [
            UrlQuery::new("/foo", "prod", "fr"),
            UrlQuery::new("/foo", "prod", "en").webspace("blog"),
            UrlQuery::new("/foo", "stage", "en"),
        ] {
            assert_eq!(m.find_url_by_resource_locator(&query).unwrap(), None);
            assert!(m.find_urls_by_resource_locator(&query).unwrap().is_empty());
        }
    }

    // ---------- helpers ----------

    #[test]
    fn resource_locator_url_trailing_slash_rules() {
        assert_eq!(
            resource_locator_url("http", "example.com", "/"),
            "http://example.com/"
        );
        assert_eq!(
            resource_locator_url("http", "example.com/en", "/"),
            "http://example.com/en"
        );
        assert_eq!(
            resource_locator_url("https", "example.com/en/", "/about/"),
            "https://example.com/en/about"
        );
    }

    #[test]
    fn from_domain_accepts_exact_and_subdomains() {
        assert!(is_from_domain("http://example.com/x", None));
        assert!(is_from_domain("http://example.com/x", Some("")));
        assert!(is_from_domain("http://example.com/x", Some("example.com")));
        assert!(is_from_domain("http://a.b.example.com", Some("example.com")));
        assert!(!is_from_domain("http://notexample.com", Some("example.com")));
        assert!(!is_from_domain("http://example.org", Some("example.com")));
        assert!(!is_from_domain("not a url", Some("example.com")));
    }

    #[test]
    fn from_domain_normalizes_the_filter_like_a_host() {
        assert!(is_from_domain("http://münchen.de/x", Some("münchen.de")));
        assert!(is_from_domain("http://shop.münchen.de", Some("MÜNCHEN.de")));
        assert!(is_from_domain("http://example.com", Some("Example.COM")));
        assert!(!is_from_domain("http://example.com", Some("exa mple.com")));
    }

    // ---------- custom urls ----------

    #[test]
    fn custom_url_patterns_resolve_against_request_urls() {
        let mut sulu = webspace("sulu_io", &[("en", true)]);
        sulu.portals[0].environments = vec![domain::Environment {
            kind: "prod".into(),
            urls: vec![domain::Url::new("sulu.io")],
            custom_urls: vec!["sulu.io/*".into(), "*.sulu.io/*".into()],
        }];
        let m = WebspaceManager::with_collection(WebspaceCollection::new(
            vec![sulu],
            BTreeMap::new(),
            vec![],
        ));

        let found = m
            .find_custom_url_by_url("https://sulu.io/summer/deals", "prod")
            .unwrap()
            .unwrap();
        assert_eq!(found.portal.key, "sulu_io_portal");
        assert_eq!(found.pattern, "sulu.io/*");
        assert_eq!(found.url, "sulu.io/summer");

        let found = m
            .find_custom_url_by_url("promo.sulu.io/winter", "prod")
            .unwrap()
            .unwrap();
        assert_eq!(found.pattern, "*.sulu.io/*");
        assert_eq!(found.url, "promo.sulu.io/winter");

        assert!(m.find_custom_url_by_url("sulu.io", "prod").unwrap().is_none());
        assert!(m.find_custom_url_by_url("sulu.io/summer", "dev").unwrap().is_none());
    }

    // ---------- localizations ----------

    #[test]
    fn localizations_across_webspaces() {
        let m = manager(vec![]);

        let all: Vec<_> = m.all_localizations().unwrap().into_keys().collect();
        assert_eq!(all, vec!["de", "en", "fr"]);

        let by_ws = m.all_locales_by_webspaces().unwrap();
        let sulu: Vec<_> = by_ws["sulu_io"].iter().map(|l| l.locale()).collect();
        assert_eq!(sulu, vec!["de", "en"]);
        let blog: Vec<_> = by_ws["blog"].iter().map(|l| l.locale()).collect();
        assert_eq!(blog, vec!["en", "fr"]);
    }
}
