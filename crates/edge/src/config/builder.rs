// crates/edge/src/config/builder.rs

//! Builds the `WebspaceCollection` from a directory of webspace files.

use crate::config::loader::load_webspace_file;
use crate::fs::scan::config_files;
use crate::Error;
use domain::{
    Environment, Localization, MatchType, Portal, PortalInformation, Url, Webspace,
    WebspaceCollection,
};
use serve::replacer;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct WebspaceCollectionBuilder {
    config_dir: PathBuf,
}

impl WebspaceCollectionBuilder {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    #[tracing::instrument(skip_all, fields(dir = %self.config_dir.display()))]
    pub fn build(&self) -> Result<WebspaceCollection, Error> {
        let files = config_files(&self.config_dir)?;

        let mut webspaces = Vec::with_capacity(files.len());
        for file in &files {
            webspaces.push(load_webspace_file(file)?);
        }

        let collection = build_collection(webspaces, files)?;
        info!(
            "built webspace collection: {} webspaces, environments {:?}",
            collection.len(),
            collection.environments().collect::<Vec<_>>()
        );
        Ok(collection)
    }
}

/// Validate the webspaces and derive their portal informations.
///
/// Webspaces are registered in the given order; within a webspace portals,
/// environments and urls keep their configured order.
pub fn build_collection(
    webspaces: Vec<Webspace>,
    resources: Vec<PathBuf>,
) -> Result<WebspaceCollection, Error> {
    let mut webspace_keys = HashSet::new();
    let mut portal_keys = HashSet::new();
    for webspace in &webspaces {
        if !webspace_keys.insert(webspace.key.as_str()) {
            return Err(Error::Config(format!(
                "duplicate webspace key {:?}",
                webspace.key
            )));
        }
        for portal in &webspace.portals {
            if !portal_keys.insert(portal.key.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate portal key {:?}",
                    portal.key
                )));
            }
        }
    }

    let mut by_env: BTreeMap<String, Vec<PortalInformation>> = BTreeMap::new();
    let mut registered: HashSet<(String, String)> = HashSet::new();

    for webspace in &webspaces {
        for portal in &webspace.portals {
            for env in &portal.environments {
                let infos = by_env.entry(env.kind.clone()).or_default();
                for url in &env.urls {
                    for info in portal_informations_for(portal, env, url)? {
                        if !registered.insert((env.kind.clone(), info.url.clone())) {
                            warn!(
                                "url {:?} already registered in environment {:?}, skipping portal {:?}",
                                info.url, env.kind, portal.key
                            );
                            continue;
                        }
                        infos.push(info);
                    }
                }
            }
        }
    }

    for (environment, infos) in &by_env {
        check_single_main(environment, infos)?;
        debug!("environment {environment:?}: {} portal informations", infos.len());
    }

    Ok(WebspaceCollection::new(webspaces, by_env, resources))
}

/// Portal informations generated by one configured url.
fn portal_informations_for(
    portal: &Portal,
    env: &Environment,
    url: &Url,
) -> Result<Vec<PortalInformation>, Error> {
    let record = |match_type, localization: Option<Localization>, concrete: String| {
        PortalInformation::new(
            match_type,
            &portal.webspace_key,
            Some(portal.key.as_str()),
            localization,
            concrete,
        )
        .with_url_expression(&url.url)
    };

    if replacer::has_host(&url.url) {
        return Err(Error::Config(format!(
            "url {:?} of portal {:?} ({}) uses the unsupported {} placeholder",
            url.url,
            portal.key,
            env.kind,
            replacer::HOST
        )));
    }

    if let Some(target) = &url.redirect {
        let info = record(MatchType::Redirect, None, replacer::cleanup(&url.url))
            .with_redirect(Some(target.clone()));
        return Ok(vec![info]);
    }

    if let Some(locale) = url.locale() {
        let localization = portal.localization(&locale).ok_or_else(|| {
            Error::Config(format!(
                "url {:?} of portal {:?} ({}) names locale {locale:?} the portal does not serve",
                url.url, portal.key, env.kind
            ))
        })?;
        let concrete = replacer::replace_localization(&url.url, localization);
        return Ok(vec![
            record(MatchType::Full, Some(localization.clone()), concrete).with_main(url.main),
        ]);
    }

    let default = portal.default_localization().cloned();

    if replacer::is_localized(&url.url) {
        let mut out: Vec<PortalInformation> = portal
            .localizations
            .iter()
            .map(|l| {
                record(
                    MatchType::Full,
                    Some(l.clone()),
                    replacer::replace_localization(&url.url, l),
                )
                .with_main(url.main)
            })
            .collect();
        out.push(record(MatchType::Partial, default, replacer::cleanup(&url.url)));
        return Ok(out);
    }

    Ok(vec![
        record(MatchType::Full, default, url.url.clone()).with_main(url.main),
    ])
}

fn check_single_main(environment: &str, infos: &[PortalInformation]) -> Result<(), Error> {
    let mut seen: HashSet<(&str, String)> = HashSet::new();
    for info in infos.iter().filter(|i| i.main) {
        let locale = info.locale().unwrap_or_default();
        if !seen.insert((info.webspace_key.as_str(), locale.clone())) {
            return Err(Error::DuplicateMain {
                webspace: info.webspace_key.clone(),
                locale,
                environment: environment.to_string(),
            });
        }
    }
    Ok(())
}
