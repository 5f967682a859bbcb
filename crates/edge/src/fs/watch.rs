//! notify-based watcher for the webspace config directory.
//
//! ✦ Watches only the top level of the config dir (webspace files live there).
//! ✦ Ignores everything that is not a webspace file (editor swap files, dotfiles).
//! ✦ Coalesces bursts: after the first relevant event, keeps draining until the
//!   directory has been quiet for `QUIET_PERIOD`, then reports the changed set.
//!
//!   let watcher = ConfigWatcher::new(&config_dir)?;
//!   while let Some(changed) = watcher.wait_for_change(None) {
//!       source.rebuild()?;
//!   }

use crate::fs::filter::is_config_file;
use crate::source::FileCollectionSource;
use crate::Error;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub const QUIET_PERIOD: Duration = Duration::from_millis(150);

pub struct ConfigWatcher {
    root: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();
        let (tx, rx) = channel();

        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(&root, RecursiveMode::NonRecursive)?;
        debug!("watching {}", root.display());

        Ok(Self {
            root,
            rx,
            _watcher: watcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Block until at least one webspace file changed, then return every
    /// changed file seen until the directory goes quiet.
    ///
    /// `None` when `timeout` passes first or the watcher shut down.
    pub fn wait_for_change(&self, timeout: Option<Duration>) -> Option<BTreeSet<PathBuf>> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut changed = BTreeSet::new();

        // wait for the first relevant event
        while changed.is_empty() {
            let event = match deadline {
                Some(d) => {
                    let left = d.saturating_duration_since(Instant::now());
                    match self.rx.recv_timeout(left) {
                        Ok(ev) => ev,
                        Err(RecvTimeoutError::Timeout) => return None,
                        Err(RecvTimeoutError::Disconnected) => return None,
                    }
                }
                None => self.rx.recv().ok()?,
            };
            collect_relevant(event, &mut changed);
        }

        // drain the burst
        loop {
            match self.rx.recv_timeout(QUIET_PERIOD) {
                Ok(event) => collect_relevant(event, &mut changed),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Some(changed)
    }
}

/// Rebuild the cache artifact every time a webspace file changes.
///
/// A broken config is logged and the previous artifact stays in place.
#[tracing::instrument(skip_all)]
pub fn watch_and_rebuild(source: &FileCollectionSource) -> Result<(), Error> {
    let watcher = ConfigWatcher::new(source.builder().config_dir())?;
    info!("watching {} for webspace changes", watcher.root().display());

    while let Some(changed) = watcher.wait_for_change(None) {
        info!("webspace files changed: {:?}", changed);
        match source.rebuild() {
            Ok(collection) => info!(
                "webspace cache rebuilt: {} webspaces",
                collection.len()
            ),
            Err(err) => error!("rebuild failed, keeping previous cache: {err}"),
        }
    }

    Ok(())
}

fn collect_relevant(event: notify::Result<Event>, out: &mut BTreeSet<PathBuf>) {
    let event = match event {
        Ok(ev) => ev,
        Err(err) => {
            warn!("watch error: {err}");
            return;
        }
    };

    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return;
    }

    out.extend(event.paths.into_iter().filter(|p| is_config_file(p)));
}
