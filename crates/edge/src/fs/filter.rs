//! File-name filters for webspace configuration files.
//!
//! - `build_filename_regex`: one case-insensitive regex for a set of extensions
//! - `config_filename_regex`: the set used for webspace files (`.toml`)
//! - `is_config_file`: convenience check on a path

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions a webspace configuration file may carry.
pub const CONFIG_EXTS: &[&str] = &["toml"];

/// Build a single case-insensitive regex that matches **filenames only**
/// with any of the provided extensions (leading dot optional).
pub fn build_filename_regex<I, S>(extensions: I) -> Result<Regex, regex::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    use std::collections::BTreeSet;

    let mut set: BTreeSet<String> = BTreeSet::new();
    for ext in extensions {
        let raw = ext.as_ref().trim();
        let trimmed = raw.strip_prefix('.').unwrap_or(raw);
        if trimmed.is_empty() {
            continue;
        }
        set.insert(trimmed.to_ascii_lowercase());
    }

    if set.is_empty() {
        return Err(regex::Error::Syntax("Empty extension set".to_string()));
    }

    let alts = set
        .into_iter()
        .map(|e| regex::escape(&e))
        .collect::<Vec<_>>()
        .join("|");

    // Basename only; hidden files (leading dot) are editor/VCS leftovers.
    let pattern = format!(r"(?i)^[^./\\][^/\\]*\.({})$", alts);
    Regex::new(&pattern)
}

pub fn config_filename_regex() -> Result<Regex, regex::Error> {
    build_filename_regex(CONFIG_EXTS)
}

/// Is `path` (by file name alone) a webspace configuration file?
pub fn is_config_file(path: impl AsRef<Path>) -> bool {
    static CONFIG_RE: LazyLock<Option<Regex>> = LazyLock::new(|| config_filename_regex().ok());

    let Some(re) = CONFIG_RE.as_ref() else {
        return false;
    };

    path.as_ref()
        .file_name()
        .map(|name| re.is_match(&name.to_string_lossy()))
        .unwrap_or(false)
}
