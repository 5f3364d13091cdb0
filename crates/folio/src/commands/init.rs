//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio generate <username>' or 'folio dev' to get started.");

    Ok(())
}

pub(crate) const DEFAULT_CONFIG: &str = r#"# folio Configuration

[github]
# GitHub REST API base URL
api_base = "https://api.github.com"

# Request timeout in seconds (no timeout when omitted)
# request_timeout_secs = 30

[output]
# Archive written by 'folio generate'
archive = "portfolio.zip"

# Also write the unpacked site to this directory
# dir = "site"

# Minify styles.css
minify = true

[server]
# Address the generator web UI listens on
host = "127.0.0.1"
port = 7777
"#;
