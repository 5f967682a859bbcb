//! Storage-agnostic webspace resolution.
//!
//! Everything here works on an in-memory `WebspaceCollection`; reading and
//! caching configuration is injected by the edge crate through
//! `CollectionSource`.

pub mod manager;
pub mod matcher;
pub mod replacer;
pub mod source;

pub use manager::{CustomUrlMatch, ManagerError, UrlQuery, WebspaceManager};
pub use source::{CollectionSource, SourceError, StaticSource};
