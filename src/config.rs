use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "comparator.toml";
pub const SERVER_URL_ENV: &str = "COMPARATOR_SERVER_URL";

#[derive(Debug, Parser, Default)]
#[command(name = "file_comparator", about = "Compare two documents with a correlation service")]
pub struct Cli {
    /// Base URL of the comparison service
    #[arg(long)]
    pub server_url: Option<String>,
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub compare_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            compare_path: "/compare".into(),
        }
    }
}

impl Settings {
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("invalid comparator config")
    }

    pub fn compare_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            self.compare_path.trim_start_matches('/')
        )
    }

    fn apply_overrides(mut self, env_url: Option<String>, cli_url: Option<String>) -> Self {
        if let Some(url) = env_url.filter(|v| !v.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(url) = cli_url {
            self.server_url = url;
        }
        self
    }
}

/// Defaults, then the config file, then the environment, then the command line.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => read_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => read_file(Path::new(DEFAULT_CONFIG_FILE))?,
        None => Settings::default(),
    };

    Ok(settings.apply_overrides(std::env::var(SERVER_URL_ENV).ok(), cli.server_url.clone()))
}

fn read_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    Settings::from_toml(&raw).with_context(|| format!("in {}", path.display()))
}
