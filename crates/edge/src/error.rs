use serve::ManagerError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid webspace file {path:?}: {message}")]
    InvalidWebspace { path: PathBuf, message: String },

    #[error(
        "more than one main url for webspace {webspace:?}, locale {locale:?} in environment {environment:?}"
    )]
    DuplicateMain {
        webspace: String,
        locale: String,
        environment: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("resolution error: {0}")]
    Manager(#[from] ManagerError),
}
