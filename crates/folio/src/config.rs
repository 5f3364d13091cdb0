//! Configuration file (folio.toml).

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use folio_github::ClientConfig;
use folio_site::RenderConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub github: GitHubSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize)]
pub struct GitHubSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// No timeout when unset
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_archive")]
    pub archive: String,
    /// Also write the unpacked site here
    pub dir: Option<String>,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: None,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            archive: default_archive(),
            dir: None,
            minify: default_minify(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_api_base() -> String {
    folio_github::client::DEFAULT_API_BASE.to_string()
}
fn default_archive() -> String {
    folio_site::ARCHIVE_NAME.to_string()
}
fn default_minify() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    7777
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// GitHub client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.github.api_base.trim_end_matches('/').to_string(),
            timeout: self.github.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Rendering settings, with `minify` overriding the file when given.
    pub fn render_config(&self, minify: Option<bool>) -> RenderConfig {
        RenderConfig {
            minify: minify.unwrap_or(self.output.minify),
            api_base: self.github.api_base.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }
}
