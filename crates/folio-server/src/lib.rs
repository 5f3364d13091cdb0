//! Web UI for generating folio portfolios.
//!
//! Serves the generator form, a sandboxed live preview of the rendered
//! portfolio and the `portfolio.zip` download.

pub mod pages;
pub mod server;

pub use pages::{AppPage, PageView, PreviewView};
pub use server::{router, AppState, DevServer, DevServerConfig, ServerError};
