//! Generator web server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tokio::sync::Mutex;

use folio_github::{ClientConfig, GitHubApi, GitHubClient};
use folio_site::{Generator, RenderConfig, SubmitError, ARCHIVE_NAME, PACKAGING_FAILED};

use crate::pages::{AppPage, PageView};

/// Shown when a request arrives while another is still being handled.
const BUSY: &str = "A portfolio is already being generated. Please wait.";

/// Configuration for the generator web server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// GitHub client settings
    pub github: ClientConfig,

    /// Rendering settings
    pub render: RenderConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            github: ClientConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Failed to create GitHub client: {0}")]
    ClientError(String),
}

/// Shared server state: one generation session per server.
pub struct AppState<A> {
    pub generator: Mutex<Generator<A>>,
    page: AppPage,
}

impl<A: GitHubApi> AppState<A> {
    pub fn new(generator: Generator<A>) -> Self {
        Self {
            generator: Mutex::new(generator),
            page: AppPage::new(),
        }
    }

    fn page(&self, status: StatusCode, view: &PageView) -> Response {
        match self.page.render(view) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

/// Build the web UI router around a shared state.
pub fn router<A: GitHubApi + 'static>(state: Arc<AppState<A>>) -> Router {
    Router::new()
        .route("/", get(index_handler::<A>))
        .route("/generate", post(generate_handler::<A>))
        .route("/preview", get(preview_handler::<A>))
        .route("/download", get(download_handler::<A>))
        .route("/{username}", get(username_handler::<A>))
        .with_state(state)
}

/// Generator web server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start serving until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        let address = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = address
            .parse()
            .map_err(|_| ServerError::InvalidAddress(address.clone()))?;

        let client = GitHubClient::new(self.config.github.clone())
            .map_err(|e| ServerError::ClientError(e.to_string()))?;
        let state = Arc::new(AppState::new(Generator::new(
            client,
            self.config.render.clone(),
        )));

        let app = router(state);

        tracing::info!("Starting generator at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Form fields posted by the generator page.
#[derive(Debug, Deserialize)]
struct GenerateForm {
    #[serde(default)]
    github: String,
    #[serde(default)]
    linkedin: String,
}

/// Handler for the generator page; shows the current preview, if any.
async fn index_handler<A: GitHubApi + 'static>(State(state): State<Arc<AppState<A>>>) -> Response {
    let view = match state.generator.try_lock() {
        Ok(generator) => match generator.rendered() {
            Some(rendered) => PageView::with_input(
                &rendered.request.username,
                rendered.request.linkedin.as_deref().unwrap_or_default(),
            )
            .preview(rendered),
            None => PageView::default(),
        },
        Err(_) => PageView::default().alert(BUSY),
    };

    state.page(StatusCode::OK, &view)
}

/// Handler for form submissions.
async fn generate_handler<A: GitHubApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Form(form): Form<GenerateForm>,
) -> Response {
    submit(&state, &form.github, &form.linkedin).await
}

/// Handler for `/{username}`, which submits the username from the path.
async fn username_handler<A: GitHubApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Path(username): Path<String>,
) -> Response {
    // GitHub logins never contain dots; this keeps favicon.ico and friends out.
    if username.contains('.') {
        return StatusCode::NOT_FOUND.into_response();
    }

    submit(&state, &username, "").await
}

async fn submit<A: GitHubApi + 'static>(
    state: &AppState<A>,
    github: &str,
    linkedin: &str,
) -> Response {
    let input = PageView::with_input(github, linkedin);

    let Ok(mut generator) = state.generator.try_lock() else {
        tracing::warn!("Rejected submission while busy");
        return state.page(StatusCode::CONFLICT, &input.alert(BUSY));
    };

    match generator.submit(github, linkedin).await {
        Ok(rendered) => state.page(StatusCode::OK, &input.preview(rendered)),
        Err(SubmitError::Validation(errors)) => {
            state.page(StatusCode::UNPROCESSABLE_ENTITY, &input.field_errors(&errors))
        }
        Err(SubmitError::Remote(e)) => state.page(StatusCode::BAD_GATEWAY, &input.alert(e.to_string())),
        Err(e) => state.page(StatusCode::INTERNAL_SERVER_ERROR, &input.alert(e.to_string())),
    }
}

/// Handler for the bare preview document.
async fn preview_handler<A: GitHubApi + 'static>(State(state): State<Arc<AppState<A>>>) -> Response {
    let Ok(generator) = state.generator.try_lock() else {
        return (StatusCode::CONFLICT, BUSY).into_response();
    };

    match generator.rendered() {
        Some(rendered) => Html(rendered.preview_html.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "No preview has been generated yet").into_response(),
    }
}

/// Handler for the `portfolio.zip` download.
async fn download_handler<A: GitHubApi + 'static>(State(state): State<Arc<AppState<A>>>) -> Response {
    let Ok(mut generator) = state.generator.try_lock() else {
        return (StatusCode::CONFLICT, BUSY).into_response();
    };

    match generator.download() {
        Ok(site) => (
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", ARCHIVE_NAME),
                ),
            ],
            site.archive,
        )
            .into_response(),
        Err(SubmitError::Transition(e)) => (StatusCode::CONFLICT, e.to_string()).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, PACKAGING_FAILED).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use folio_github::{FetchError, Profile, Repository};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct FakeApi {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl GitHubApi for FakeApi {
        async fn user(&self, username: &str) -> Result<Profile, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if username == "slow" {
                std::future::pending::<()>().await;
            }
            if username == "ghost" {
                return Err(FetchError::Remote {
                    status: 404,
                    message: "Not Found".to_string(),
                });
            }
            Ok(Profile {
                login: username.to_string(),
                name: Some("Ada Lovelace".to_string()),
                avatar_url: String::new(),
                html_url: format!("https://github.com/{}", username),
            })
        }

        async fn repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
            Ok(vec![Repository {
                name: "calc".to_string(),
                description: Some("Difference engine".to_string()),
                stars: 5,
                html_url: format!("https://github.com/{}/calc", username),
                homepage: None,
            }])
        }
    }

    struct TestServer {
        base: String,
        state: Arc<AppState<FakeApi>>,
        calls: Arc<AtomicUsize>,
    }

    async fn spawn() -> TestServer {
        let api = FakeApi::default();
        let calls = Arc::clone(&api.calls);
        let state = Arc::new(AppState::new(Generator::new(api, RenderConfig::default())));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::clone(&state));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base: format!("http://{}", addr),
            state,
            calls,
        }
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
        assert!(server.config.github.timeout.is_none());
    }

    #[tokio::test]
    async fn serves_empty_form() {
        let server = spawn().await;

        let response = reqwest::get(&server.base).await.unwrap();

        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains(r#"name="github""#));
        assert!(!body.contains("<iframe"));
    }

    #[tokio::test]
    async fn generates_preview_from_form() {
        let server = spawn().await;

        let response = reqwest::Client::new()
            .post(format!("{}/generate", server.base))
            .form(&[("github", "ada"), ("linkedin", "")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains("<code>ada.github.io</code>"));
        assert!(body.contains("srcdoc="));

        let preview = reqwest::get(format!("{}/preview", server.base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(preview.contains("Hi, I'm Ada Lovelace"));
        assert!(preview.contains("<h3>calc</h3>"));
    }

    #[tokio::test]
    async fn reports_invalid_linkedin_inline() {
        let server = spawn().await;

        let response = reqwest::Client::new()
            .post(format!("{}/generate", server.base))
            .form(&[("github", "ada"), ("linkedin", "https://example.com/ada")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 422);
        let body = response.text().await.unwrap();
        assert!(body.contains("Please enter a valid LinkedIn URL"));
        assert_eq!(server.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn surfaces_github_error_message() {
        let server = spawn().await;

        let response = reqwest::get(format!("{}/ghost", server.base)).await.unwrap();

        assert_eq!(response.status(), 502);
        assert!(response.text().await.unwrap().contains("Not Found"));
    }

    #[tokio::test]
    async fn path_username_auto_submits() {
        let server = spawn().await;

        let response = reqwest::get(format!("{}/ada", server.base)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.text().await.unwrap().contains(r#"value="ada""#));
        assert_eq!(server.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ignores_dotted_paths() {
        let server = spawn().await;

        let response = reqwest::get(format!("{}/favicon.ico", server.base))
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        assert_eq!(server.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn downloads_archive_after_preview() {
        let server = spawn().await;
        reqwest::get(format!("{}/ada", server.base)).await.unwrap();

        let response = reqwest::get(format!("{}/download", server.base))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/zip");
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"portfolio.zip\""
        );
        let bytes = response.bytes().await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn refuses_download_without_preview() {
        let server = spawn().await;

        let response = reqwest::get(format!("{}/download", server.base))
            .await
            .unwrap();

        assert_eq!(response.status(), 409);
    }

    #[tokio::test]
    async fn rejects_submission_while_busy() {
        let server = spawn().await;
        let _held = server.state.generator.lock().await;

        let response = reqwest::get(format!("{}/ada", server.base)).await.unwrap();

        assert_eq!(response.status(), 409);
        assert!(response.text().await.unwrap().contains("already being generated"));
        assert_eq!(server.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn abandoned_request_frees_the_session() {
        let server = spawn().await;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();

        let abandoned = client.get(format!("{}/slow", server.base)).send().await;
        assert!(abandoned.unwrap_err().is_timeout());

        let mut status = reqwest::StatusCode::CONFLICT;
        for _ in 0..50 {
            status = reqwest::get(format!("{}/ada", server.base))
                .await
                .unwrap()
                .status();
            if status != reqwest::StatusCode::CONFLICT {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert_eq!(status, 200);
        let phase = server.state.generator.lock().await.phase();
        assert_eq!(phase, folio_site::Phase::PreviewReady);
    }
}
