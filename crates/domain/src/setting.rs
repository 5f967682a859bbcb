use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = "webspaces";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_CACHE_NAME: &str = "webspace_collection";

#[derive(Debug, Clone, Deserialize)]
pub struct WebspaceSettings {
    /// Directory holding one `*.toml` file per webspace (relative to the site dir)
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Directory the generated collection artifact is written to
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// When true, the artifact is checked against the config files on every load
    #[serde(default)]
    pub debug: bool,

    /// Artifact file stem; the artifact is `<cache_dir>/<cache_name>.json`
    #[serde(default = "default_cache_name")]
    pub cache_name: String,
}

impl Default for WebspaceSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            cache_dir: default_cache_dir(),
            debug: false,
            cache_name: default_cache_name(),
        }
    }
}

impl WebspaceSettings {
    /// Resolve relative directories against the site root.
    pub fn rooted(&self, root: &Path) -> Self {
        Self {
            config_dir: root.join(&self.config_dir),
            cache_dir: root.join(&self.cache_dir),
            debug: self.debug,
            cache_name: self.cache_name.clone(),
        }
    }

    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.json", self.cache_name))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub webspaces: WebspaceSettings,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_DIR)
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_cache_name() -> String {
    DEFAULT_CACHE_NAME.to_string()
}
