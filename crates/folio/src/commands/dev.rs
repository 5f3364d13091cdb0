//! Generator web UI command.

use std::path::Path;

use anyhow::Result;
use folio_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the generator web UI.
pub async fn run(config_path: &Path, port: Option<u16>, open: bool) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;
    let port = port.unwrap_or(file_config.server.port);

    tracing::info!("Starting generator web UI on port {}", port);

    let config = DevServerConfig {
        port,
        host: file_config.server.host.clone(),
        open,
        github: file_config.client_config(),
        render: file_config.render_config(None),
    };

    DevServer::new(config).start().await?;

    Ok(())
}
