//! Portfolio generation command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_github::{GitHubApi, GitHubClient};
use folio_site::{Generator, SubmitError};

use crate::config::ConfigFile;

/// Options for one generation run.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub username: String,
    pub linkedin: Option<String>,

    /// Archive path; falls back to the config file
    pub output: Option<PathBuf>,

    /// Directory for the unpacked site; falls back to the config file
    pub out_dir: Option<PathBuf>,

    /// File for the self-contained preview document
    pub preview: Option<PathBuf>,

    pub minify: Option<bool>,
}

/// What a generation run wrote.
#[derive(Debug)]
pub struct GenerateReport {
    pub archive: PathBuf,
    pub archive_bytes: usize,
    pub out_dir: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub repo_name: String,
    pub site_url: String,
}

/// Run the generate command.
pub async fn run(config_path: &Path, options: GenerateOptions) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;

    let client = GitHubClient::new(file_config.client_config())
        .context("Failed to create GitHub client")?;
    let generator = Generator::new(client, file_config.render_config(options.minify));

    let report = generate(generator, &file_config, options).await?;

    tracing::info!(
        "Wrote {} ({} bytes)",
        report.archive.display(),
        report.archive_bytes
    );
    if let Some(dir) = &report.out_dir {
        tracing::info!("Site: {}", dir.display());
    }
    if let Some(preview) = &report.preview {
        tracing::info!("Preview: {}", preview.display());
    }
    tracing::info!(
        "Publish by pushing the files to a repository named {}; it will be live at {}",
        report.repo_name,
        report.site_url
    );

    Ok(())
}

/// Submit, package and write the outputs.
pub async fn generate<A: GitHubApi>(
    mut generator: Generator<A>,
    file_config: &ConfigFile,
    options: GenerateOptions,
) -> Result<GenerateReport> {
    tracing::info!("Generating portfolio for {}...", options.username);

    let linkedin = options.linkedin.as_deref().unwrap_or_default();
    let rendered = match generator.submit(&options.username, linkedin).await {
        Ok(rendered) => rendered,
        Err(SubmitError::Validation(errors)) => {
            for error in &errors.0 {
                tracing::error!("{}", error.message);
            }
            anyhow::bail!("Invalid input: {}", errors);
        }
        Err(e) => return Err(e.into()),
    };

    let repo_name = rendered.repo_name();
    let site_url = rendered.site_url();

    let preview = match options.preview {
        Some(path) => {
            fs::write(&path, &rendered.preview_html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    let site = generator.download()?;

    let archive = options
        .output
        .unwrap_or_else(|| PathBuf::from(&file_config.output.archive));
    fs::write(&archive, &site.archive)
        .with_context(|| format!("Failed to write {}", archive.display()))?;

    let out_dir = options
        .out_dir
        .or_else(|| file_config.output.dir.as_ref().map(PathBuf::from));
    if let Some(dir) = &out_dir {
        site.bundle.write_to(dir)?;
    }

    Ok(GenerateReport {
        archive,
        archive_bytes: site.archive.len(),
        out_dir,
        preview,
        repo_name,
        site_url,
    })
}
