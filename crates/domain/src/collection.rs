// crates/domain/src/collection.rs

use crate::portal::{MatchType, PortalInformation};
use crate::webspace::{Portal, Webspace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Every configured webspace plus the flattened portal informations per environment.
///
/// Portal information lists keep the order they were registered in; lookups
/// that return "the first match" depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebspaceCollection {
    webspaces: Vec<Webspace>,
    portal_informations: BTreeMap<String, Vec<PortalInformation>>,
    #[serde(default)]
    resources: Vec<PathBuf>,
}

impl WebspaceCollection {
    pub fn new(
        webspaces: Vec<Webspace>,
        portal_informations: BTreeMap<String, Vec<PortalInformation>>,
        resources: Vec<PathBuf>,
    ) -> Self {
        Self {
            webspaces,
            portal_informations,
            resources,
        }
    }

    pub fn webspaces(&self) -> &[Webspace] {
        &self.webspaces
    }

    pub fn webspace(&self, key: &str) -> Option<&Webspace> {
        self.webspaces.iter().find(|w| w.key == key)
    }

    pub fn portals(&self) -> impl Iterator<Item = &Portal> {
        self.webspaces.iter().flat_map(|w| w.portals.iter())
    }

    pub fn portal(&self, key: &str) -> Option<&Portal> {
        self.portals().find(|p| p.key == key)
    }

    /// Environment names that have at least one portal information.
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.portal_informations.keys().map(String::as_str)
    }

    /// All portal informations of an environment, in registration order.
    pub fn portal_informations(&self, environment: &str) -> &[PortalInformation] {
        self.portal_informations
            .get(environment)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Portal informations of an environment restricted to the given match types.
    pub fn portal_informations_of<'a>(
        &'a self,
        environment: &str,
        types: &'a [MatchType],
    ) -> impl Iterator<Item = &'a PortalInformation> + 'a {
        self.portal_informations(environment)
            .iter()
            .filter(move |info| types.contains(&info.match_type))
    }

    /// Configuration files the collection was built from.
    pub fn resources(&self) -> &[PathBuf] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.webspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.webspaces.is_empty()
    }
}

impl<'a> IntoIterator for &'a WebspaceCollection {
    type Item = &'a Webspace;
    type IntoIter = std::slice::Iter<'a, Webspace>;

    fn into_iter(self) -> Self::IntoIter {
        self.webspaces.iter()
    }
}
