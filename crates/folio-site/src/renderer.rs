//! Portfolio rendering.

use std::fs;
use std::path::Path;

use folio_github::{Profile, Repository};

use crate::archive::{self, PackagingError};
use crate::assets::AssetPipeline;
use crate::cards::render_project_cards;
use crate::templates::{
    InlineAssets, PageContext, ProjectSource, ReadmeContext, ScriptContext, TemplateEngine,
};
use crate::theme::Theme;

/// Configuration for rendering a portfolio.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Minify the standalone stylesheet
    pub minify: bool,

    /// GitHub API base the downloaded site fetches from
    pub api_base: String,

    /// Generating tool named in the README
    pub generator: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            minify: false,
            api_base: folio_github::client::DEFAULT_API_BASE.to_string(),
            generator: "folio".to_string(),
        }
    }
}

/// Errors that can occur during rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template {template}: {message}")]
    Template { template: String, message: String },
}

impl RenderError {
    fn template(template: &str, err: minijinja::Error) -> Self {
        RenderError::Template {
            template: template.to_string(),
            message: err.to_string(),
        }
    }
}

/// The files of a downloadable portfolio site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadBundle {
    pub index_html: String,
    pub styles_css: String,
    pub scripts_js: String,
    pub readme_md: String,
}

impl DownloadBundle {
    /// Site files as `(file name, contents)`, in archive order.
    pub fn files(&self) -> [(&'static str, &str); 4] {
        [
            ("index.html", self.index_html.as_str()),
            ("styles.css", self.styles_css.as_str()),
            ("scripts.js", self.scripts_js.as_str()),
            ("README.md", self.readme_md.as_str()),
        ]
    }

    /// Pack the site into `portfolio.zip` bytes.
    pub fn to_archive(&self) -> Result<Vec<u8>, PackagingError> {
        archive::pack(self.files())
    }

    /// Write the unpacked site into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<(), PackagingError> {
        fs::create_dir_all(dir).map_err(|e| PackagingError::Write(e.to_string()))?;

        for (name, contents) in self.files() {
            fs::write(dir.join(name), contents)
                .map_err(|e| PackagingError::Write(format!("{}: {}", name, e)))?;
        }

        Ok(())
    }
}

/// Renders preview documents and download bundles.
///
/// Rendering is pure: identical inputs give identical output.
pub struct SiteRenderer {
    config: RenderConfig,
    templates: TemplateEngine,
}

impl SiteRenderer {
    /// Create a new renderer.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Render a self-contained preview document with inlined styling and
    /// behaviour, for display in a sandboxed frame.
    ///
    /// `repos` is expected ranked by popularity, as returned by the fetcher.
    pub fn render_preview_document(
        &self,
        profile: &Profile,
        repos: &[Repository],
        linkedin: Option<&str>,
    ) -> Result<String, RenderError> {
        let scripts = self.render_script(profile, ProjectSource::Embedded)?;
        let inline = InlineAssets {
            styles: AssetPipeline::stylesheet(false),
            scripts,
        };

        self.render_page(profile, repos, linkedin, Some(inline))
    }

    /// Render the standalone site: HTML linking external CSS and JS, the
    /// stylesheet, a script that re-fetches repositories live, and a README.
    pub fn render_download_bundle(
        &self,
        profile: &Profile,
        repos: &[Repository],
        linkedin: Option<&str>,
    ) -> Result<DownloadBundle, RenderError> {
        let readme = self
            .templates
            .render_readme(&ReadmeContext {
                username: &profile.login,
                generator: &self.config.generator,
                has_linkedin: linkedin.is_some(),
            })
            .map_err(|e| RenderError::template("README.md", e))?;

        Ok(DownloadBundle {
            index_html: self.render_page(profile, repos, linkedin, None)?,
            styles_css: AssetPipeline::stylesheet(self.config.minify),
            scripts_js: self.render_script(profile, ProjectSource::Live)?,
            readme_md: readme,
        })
    }

    fn render_page(
        &self,
        profile: &Profile,
        repos: &[Repository],
        linkedin: Option<&str>,
        inline: Option<InlineAssets>,
    ) -> Result<String, RenderError> {
        let projects = render_project_cards(repos, &profile.login);

        self.templates
            .render_page(&PageContext {
                display_name: profile.display_name(),
                profile,
                linkedin,
                projects: &projects,
                theme: Theme::default(),
                inline,
            })
            .map_err(|e| RenderError::template("portfolio.html", e))
    }

    fn render_script(&self, profile: &Profile, source: ProjectSource) -> Result<String, RenderError> {
        self.templates
            .render_script(&ScriptContext {
                username: &profile.login,
                source,
                shared_store: source == ProjectSource::Embedded,
                api_base: &self.config.api_base,
            })
            .map_err(|e| RenderError::template("scripts.js", e))
    }
}

impl Default for SiteRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
