// crates/serve/src/source.rs

//! Where the webspace collection comes from.
//!
//! The manager never reads configuration itself; the edge crate injects a
//! file-backed implementation, tests and embedders can use `StaticSource`.

use domain::WebspaceCollection;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SourceError::Backend(Box::new(err))
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CollectionSource {
    /// Produce the full collection. Called at most once per manager.
    fn load(&self) -> Result<WebspaceCollection, SourceError>;
}

/// Serves an already-built collection.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    collection: WebspaceCollection,
}

impl StaticSource {
    pub fn new(collection: WebspaceCollection) -> Self {
        Self { collection }
    }
}

impl CollectionSource for StaticSource {
    fn load(&self) -> Result<WebspaceCollection, SourceError> {
        Ok(self.collection.clone())
    }
}

impl<T: CollectionSource + ?Sized> CollectionSource for Box<T> {
    fn load(&self) -> Result<WebspaceCollection, SourceError> {
        (**self).load()
    }
}
