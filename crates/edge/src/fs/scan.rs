//! Discovery of webspace configuration files.

use crate::fs::filter::config_filename_regex;
use crate::Error;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every webspace file directly inside `config_dir`, sorted by file name.
///
/// File-name order is registration order: portal informations of earlier
/// files are matched first.
#[tracing::instrument(skip_all)]
pub fn config_files(config_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !config_dir.is_dir() {
        return Err(Error::Config(format!(
            "webspace config directory does not exist: {}",
            config_dir.display()
        )));
    }

    let re = config_filename_regex()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(config_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if re.is_match(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
