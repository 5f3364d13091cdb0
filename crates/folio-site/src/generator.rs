//! One generation session, from form input to archive.

use folio_github::{DataFetcher, FetchError, GitHubApi, Profile, Repository};

use crate::archive::PackagingError;
use crate::renderer::{DownloadBundle, RenderConfig, RenderError, SiteRenderer};
use crate::request::{GenerationRequest, ValidationErrors};
use crate::session::{GenerationSession, Phase, TransitionError};

/// Message shown for any packaging failure; details go to the log.
pub const PACKAGING_FAILED: &str = "Failed to generate portfolio files";

/// Errors surfaced by a generation action.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Remote(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{}", PACKAGING_FAILED)]
    Packaging(#[from] PackagingError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// A rendered preview and the data it was rendered from.
#[derive(Debug, Clone)]
pub struct RenderedPortfolio {
    pub request: GenerationRequest,
    pub profile: Profile,

    /// Ranked repositories, before the self-repository filter
    pub repos: Vec<Repository>,

    /// Self-contained preview document
    pub preview_html: String,
}

impl RenderedPortfolio {
    /// Suggested repository name for publishing, `<username>.github.io`.
    pub fn repo_name(&self) -> String {
        folio_github::portfolio_repo_name(&self.request.username)
    }

    /// Address the published site will be served from.
    pub fn site_url(&self) -> String {
        format!("https://{}", self.repo_name())
    }
}

/// A packaged download.
#[derive(Debug, Clone)]
pub struct PackagedSite {
    pub bundle: DownloadBundle,

    /// `portfolio.zip` bytes
    pub archive: Vec<u8>,
}

/// Drives submissions and downloads for one session.
///
/// Owns the fetcher (and so the session cache), the renderer and the
/// lifecycle state.
pub struct Generator<A> {
    fetcher: DataFetcher<A>,
    renderer: SiteRenderer,
    session: GenerationSession,
    rendered: Option<RenderedPortfolio>,
}

impl<A: GitHubApi> Generator<A> {
    /// Create a generator with an empty cache.
    pub fn new(api: A, config: RenderConfig) -> Self {
        Self {
            fetcher: DataFetcher::new(api),
            renderer: SiteRenderer::new(config),
            session: GenerationSession::new(),
            rendered: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// The last successful preview, if it is still showing.
    pub fn rendered(&self) -> Option<&RenderedPortfolio> {
        self.rendered.as_ref()
    }

    /// Validate input, fetch the profile and repositories, and render the
    /// preview.
    ///
    /// Any failure returns the session to idle and clears the previous
    /// preview. So does dropping the returned future before it completes.
    pub async fn submit(
        &mut self,
        username: &str,
        linkedin: &str,
    ) -> Result<&RenderedPortfolio, SubmitError> {
        self.session.begin_submission()?;
        self.rendered = None;

        let mut guard = SubmissionGuard::new(&mut self.session);
        let rendered = run_submission(
            &mut self.fetcher,
            &self.renderer,
            guard.session(),
            username,
            linkedin,
        )
        .await
        .inspect_err(|err| tracing::warn!("Submission failed: {}", err))?;

        guard.session().rendered()?;
        guard.disarm();

        tracing::info!("Preview ready for {}", rendered.request.username);
        Ok(self.rendered.insert(rendered))
    }

    /// Render and package the standalone site for the current preview.
    ///
    /// Failures are logged; the preview stays available.
    pub fn download(&mut self) -> Result<PackagedSite, SubmitError> {
        self.session.begin_packaging()?;

        match self.package() {
            Ok(site) => {
                self.session.packaged()?;
                tracing::info!("Packaged portfolio ({} bytes)", site.archive.len());
                Ok(site)
            }
            Err(err) => {
                self.session.packaging_failed()?;
                tracing::error!("Error generating files: {}", err);
                Err(SubmitError::Packaging(err))
            }
        }
    }

    fn package(&self) -> Result<PackagedSite, PackagingError> {
        let rendered = self.rendered.as_ref().ok_or(PackagingError::MissingPreview)?;

        let bundle = self
            .renderer
            .render_download_bundle(
                &rendered.profile,
                &rendered.repos,
                rendered.request.linkedin.as_deref(),
            )?;
        let archive = bundle.to_archive()?;

        Ok(PackagedSite { bundle, archive })
    }

    /// The fetcher backing this generator.
    pub fn fetcher(&self) -> &DataFetcher<A> {
        &self.fetcher
    }
}

/// Returns the session to idle when a submission ends without a preview,
/// whether by error or by its future being dropped mid-flight.
struct SubmissionGuard<'a> {
    session: &'a mut GenerationSession,
    armed: bool,
}

impl<'a> SubmissionGuard<'a> {
    fn new(session: &'a mut GenerationSession) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn session(&mut self) -> &mut GenerationSession {
        self.session
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        tracing::debug!("Submission ended while {}", self.session.phase());
        if let Err(e) = self.session.submission_failed() {
            tracing::warn!("Failed to reset session: {}", e);
        }
    }
}

async fn run_submission<A: GitHubApi>(
    fetcher: &mut DataFetcher<A>,
    renderer: &SiteRenderer,
    session: &mut GenerationSession,
    username: &str,
    linkedin: &str,
) -> Result<RenderedPortfolio, SubmitError> {
    let request = GenerationRequest::parse(username, linkedin)?;
    session.validated()?;

    let profile = fetcher.fetch_profile(&request.username).await?;
    let repos = fetcher.fetch_repositories(&request.username).await?;
    session.fetched()?;

    let preview_html =
        renderer.render_preview_document(&profile, &repos, request.linkedin.as_deref())?;

    Ok(RenderedPortfolio {
        request,
        profile,
        repos,
        preview_html,
    })
}
