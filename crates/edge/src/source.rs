// crates/edge/src/source.rs

use crate::cache::{stamp_resources, CollectionCache};
use crate::config::builder::WebspaceCollectionBuilder;
use crate::fs::scan::config_files;
use crate::Error;
use domain::setting::WebspaceSettings;
use domain::WebspaceCollection;
use serve::{CollectionSource, SourceError};
use tracing::{info, warn};

/// File-backed collection: webspace files under `config_dir`, cached as a
/// JSON artifact under `cache_dir`.
#[derive(Debug, Clone)]
pub struct FileCollectionSource {
    builder: WebspaceCollectionBuilder,
    cache: CollectionCache,
}

impl FileCollectionSource {
    /// `settings` directories must already be resolved against the site root.
    pub fn new(settings: &WebspaceSettings) -> Self {
        Self {
            builder: WebspaceCollectionBuilder::new(&settings.config_dir),
            cache: CollectionCache::new(settings.cache_file(), settings.debug),
        }
    }

    pub fn cache(&self) -> &CollectionCache {
        &self.cache
    }

    pub fn builder(&self) -> &WebspaceCollectionBuilder {
        &self.builder
    }

    /// Serve the cached artifact when it is fresh, otherwise rebuild it.
    #[tracing::instrument(skip_all)]
    pub fn load_or_build(&self) -> Result<WebspaceCollection, Error> {
        match self.cache.read() {
            Ok(Some(artifact)) => {
                let fresh = !self.cache.debug()
                    || self
                        .cache
                        .is_fresh(&artifact, &config_files(self.builder.config_dir())?);
                if fresh {
                    info!("using cached webspace collection from {}", artifact.generated_at);
                    return Ok(artifact.collection);
                }
                info!("webspace cache is stale, rebuilding");
            }
            Ok(None) => info!("no webspace cache yet, building"),
            Err(err) => warn!("unreadable webspace cache, rebuilding: {err}"),
        }

        self.rebuild()
    }

    /// Build from the config files and replace the artifact.
    #[tracing::instrument(skip_all)]
    pub fn rebuild(&self) -> Result<WebspaceCollection, Error> {
        let stamps = stamp_resources(&config_files(self.builder.config_dir())?)?;
        let collection = self.builder.build()?;
        self.cache.write(&collection, stamps)?;
        Ok(collection)
    }
}

impl CollectionSource for FileCollectionSource {
    fn load(&self) -> Result<WebspaceCollection, SourceError> {
        self.load_or_build().map_err(SourceError::backend)
    }
}
