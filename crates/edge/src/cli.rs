// crates/edge/src/cli.rs

use crate::fs::watch::watch_and_rebuild;
use crate::source::FileCollectionSource;
use crate::Error;
use chrono::Utc;
use clap::{builder::ValueHint, Args, Parser, Subcommand};
use domain::setting::{Settings, WebspaceSettings};
use serde::Serialize;
use serve::manager::DEFAULT_SCHEME;
use serve::{UrlQuery, WebspaceManager};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};

pub type Result<T> = std::result::Result<T, Error>;

/// Webspace CLI entry point; results are printed to stdout as JSON.
#[tracing::instrument(skip_all)]
pub fn start() -> ExitCode {
    let cli = Cli::parse();
    let stdout = io::stdout();

    run(cli, &mut stdout.lock()).map_or_else(
        |e| {
            error!("webspaces command failed: {}", e);
            ExitCode::FAILURE
        },
        |_| ExitCode::SUCCESS,
    )
}

#[tracing::instrument(skip_all)]
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let then = Utc::now();
    let process = Process::<CommandIssued>::parse_settings_file(cli)?;
    info!(
        "Settings parsed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    let then = Utc::now();
    let process = process.prepare_manager();
    info!(
        "Manager prepared in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    let then = Utc::now();
    process.execute(out)?;
    info!(
        "Command executed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "webspaces", version, about = "Webspace and portal URL resolution")]
pub struct Cli {
    /// Site directory holding `settings.toml` (or set WEBSPACES_DIR)
    #[arg(
        long,
        value_name = "DIR",
        env = "WEBSPACES_DIR",
        required = true,
        value_hint = ValueHint::DirPath,
        value_parser = dir_must_exist
    )]
    pub dir: PathBuf,

    /// Check the cached collection against the config files on every load
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the webspace collection and write the cache artifact
    Warm,
    /// Find the portal information serving a request URL
    Match(MatchCmd),
    /// Generate the URL of a resource locator
    Url(UrlCmd),
    /// Print one webspace
    Webspace(WebspaceCmd),
    /// Print the locales of every webspace
    Locales,
    /// Rebuild the cache artifact whenever a webspace file changes
    Watch,
}

#[derive(Args, Debug)]
pub struct MatchCmd {
    /// Request URL, with or without scheme
    pub url: String,

    #[arg(long, short)]
    pub env: String,

    /// Print every matching portal information instead of the first
    #[arg(long, conflicts_with = "custom")]
    pub all: bool,

    /// Match against the portals' custom url patterns instead
    #[arg(long)]
    pub custom: bool,
}

#[derive(Args, Debug)]
pub struct UrlCmd {
    /// Resource locator, e.g. `/about`
    pub resource_locator: String,

    #[arg(long, short)]
    pub env: String,

    #[arg(long, short)]
    pub locale: String,

    #[arg(long, short)]
    pub webspace: Option<String>,

    /// Prefer URLs on this domain
    #[arg(long)]
    pub domain: Option<String>,

    #[arg(long, default_value = DEFAULT_SCHEME)]
    pub scheme: String,

    /// Print every candidate URL instead of the best one
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct WebspaceCmd {
    pub key: String,
}

fn dir_must_exist(s: &str) -> std::result::Result<PathBuf, String> {
    let p = PathBuf::from(s);
    if !p.exists() {
        return Err(format!("Not found: {}", p.display()));
    }
    if !p.is_dir() {
        return Err(format!("Not a directory: {}", p.display()));
    }
    Ok(p)
}

// ─────────────────────────────────────────────────────────────────────────────
// Command process state machine
// ─────────────────────────────────────────────────────────────────────────────

trait ProcessState {}

struct CommandIssued;

struct SettingsLoaded {
    command: Commands,
    settings: WebspaceSettings,
}

struct ManagerReady {
    command: Commands,
    manager: WebspaceManager<FileCollectionSource>,
}

impl ProcessState for CommandIssued {}
impl ProcessState for SettingsLoaded {}
impl ProcessState for ManagerReady {}

struct Process<S: ProcessState> {
    state: S,
}

impl Process<CommandIssued> {
    /// Load `<dir>/settings.toml`; every setting has a default, so the file
    /// may be absent.
    #[tracing::instrument(skip_all)]
    fn parse_settings_file(cli: Cli) -> Result<Process<SettingsLoaded>> {
        let path = cli.dir.join("settings.toml");

        let settings = if path.exists() {
            let text = std::fs::read_to_string(&path).map_err(|err| {
                Error::Config(format!("Failed reading {}: {}", path.display(), err))
            })?;

            toml::from_str::<Settings>(&text).map_err(|err| {
                Error::Config(format!(
                    "Invalid settings.toml at {}: {}",
                    path.display(),
                    err
                ))
            })?
        } else {
            info!("no settings.toml in {}, using defaults", cli.dir.display());
            Settings::default()
        };

        let mut webspaces = settings.webspaces.rooted(&cli.dir);
        webspaces.debug |= cli.debug;

        Ok(Process {
            state: SettingsLoaded {
                command: cli.command,
                settings: webspaces,
            },
        })
    }
}

impl Process<SettingsLoaded> {
    #[tracing::instrument(skip_all)]
    fn prepare_manager(self) -> Process<ManagerReady> {
        let source = FileCollectionSource::new(&self.state.settings);
        Process {
            state: ManagerReady {
                command: self.state.command,
                manager: WebspaceManager::new(source),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct CustomUrlReport<'a> {
    webspace: &'a str,
    portal: &'a str,
    pattern: &'a str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct WarmReport<'a> {
    cache: &'a std::path::Path,
    webspaces: usize,
    environments: Vec<&'a str>,
}

impl Process<ManagerReady> {
    #[tracing::instrument(skip_all)]
    fn execute(self, out: &mut dyn Write) -> Result<()> {
        let manager = &self.state.manager;

        match &self.state.command {
            Commands::Warm => {
                let collection = manager.source().rebuild()?;
                print_json(
                    out,
                    &WarmReport {
                        cache: manager.source().cache().path(),
                        webspaces: collection.len(),
                        environments: collection.environments().collect(),
                    },
                )
            }
            Commands::Match(cmd) if cmd.custom => {
                let found = manager.find_custom_url_by_url(&cmd.url, &cmd.env)?;
                let report = found.as_ref().map(|m| CustomUrlReport {
                    webspace: &m.portal.webspace_key,
                    portal: &m.portal.key,
                    pattern: m.pattern,
                    url: &m.url,
                });
                print_json(out, &report)
            }
            Commands::Match(cmd) if cmd.all => print_json(
                out,
                &manager.find_portal_informations_by_url(&cmd.url, &cmd.env)?,
            ),
            Commands::Match(cmd) => print_json(
                out,
                &manager.find_portal_information_by_url(&cmd.url, &cmd.env)?,
            ),
            Commands::Url(cmd) => {
                let mut query = UrlQuery::new(&cmd.resource_locator, &cmd.env, &cmd.locale)
                    .scheme(&cmd.scheme);
                if let Some(key) = &cmd.webspace {
                    query = query.webspace(key);
                }
                if let Some(domain) = &cmd.domain {
                    query = query.domain(domain);
                }

                if cmd.all {
                    print_json(out, &manager.find_urls_by_resource_locator(&query)?)
                } else {
                    print_json(out, &manager.find_url_by_resource_locator(&query)?)
                }
            }
            Commands::Webspace(cmd) => print_json(out, manager.find_webspace_by_key(&cmd.key)?),
            Commands::Locales => {
                let locales: BTreeMap<String, Vec<String>> = manager
                    .all_locales_by_webspaces()?
                    .into_iter()
                    .map(|(key, ls)| (key, ls.iter().map(|l| l.locale()).collect()))
                    .collect();
                print_json(out, &locales)
            }
            Commands::Watch => {
                manager.source().rebuild()?;
                watch_and_rebuild(manager.source())
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
