// crates/edge/src/cache.rs

//! On-disk artifact of a built `WebspaceCollection`.
//!
//! The artifact stores the collection together with a stamp (path and
//! modification time) of every file it was built from. Outside debug mode an
//! existing artifact is trusted as-is; in debug mode it is compared against
//! the current config files on every load.

use crate::Error;
use chrono::{DateTime, Utc};
use domain::WebspaceCollection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStamp {
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

impl ResourceStamp {
    pub fn of(path: &Path) -> io::Result<Self> {
        let modified = fs::metadata(path)?.modified().ok().map(DateTime::<Utc>::from);
        Ok(Self {
            path: path.to_path_buf(),
            modified,
        })
    }

    /// Does the file still exist with the same modification time?
    pub fn is_current(&self) -> bool {
        match ResourceStamp::of(&self.path) {
            Ok(now) => now.modified == self.modified,
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheArtifact {
    pub generated_at: DateTime<Utc>,
    pub resources: Vec<ResourceStamp>,
    pub collection: WebspaceCollection,
}

#[derive(Debug, Clone)]
pub struct CollectionCache {
    path: PathBuf,
    debug: bool,
}

impl CollectionCache {
    pub fn new(path: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            path: path.into(),
            debug,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// The stored artifact, `Ok(None)` when there is none yet.
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Option<CacheArtifact>, Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Can `artifact` be served given the config files currently on disk?
    pub fn is_fresh(&self, artifact: &CacheArtifact, config_files: &[PathBuf]) -> bool {
        if !self.debug {
            return true;
        }

        let stamped: BTreeSet<&Path> = artifact.resources.iter().map(|r| r.path.as_path()).collect();
        let current: BTreeSet<&Path> = config_files.iter().map(PathBuf::as_path).collect();
        if stamped != current {
            debug!("config file set changed since {}", artifact.generated_at);
            return false;
        }

        let fresh = artifact.resources.iter().all(ResourceStamp::is_current);
        if !fresh {
            debug!("config file modified since {}", artifact.generated_at);
        }
        fresh
    }

    /// Write the artifact atomically.
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    pub fn write(
        &self,
        collection: &WebspaceCollection,
        resources: Vec<ResourceStamp>,
    ) -> Result<CacheArtifact, Error> {
        let artifact = CacheArtifact {
            generated_at: Utc::now(),
            resources,
            collection: collection.clone(),
        };

        write_atomic(&self.path, serde_json::to_string_pretty(&artifact)?.as_bytes())?;
        debug!("wrote webspace cache with {} resources", artifact.resources.len());
        Ok(artifact)
    }
}

/// Stamp every file in `paths` as it is on disk right now.
///
/// Take the stamps before building the collection: an edit that lands
/// during the build then leaves the artifact stale instead of fresh.
pub fn stamp_resources(paths: &[PathBuf]) -> Result<Vec<ResourceStamp>, Error> {
    Ok(paths
        .iter()
        .map(|p| ResourceStamp::of(p))
        .collect::<io::Result<Vec<_>>>()?)
}

/// Atomic write: write to a fresh temp file next to `path`, fsync, rename.
///
/// Every call gets its own temp file, so readers only ever see the old or
/// the new artifact even when several threads or processes rebuild at once.
#[tracing::instrument(skip_all)]
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), Error> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
