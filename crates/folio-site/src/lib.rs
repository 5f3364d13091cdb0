//! Portfolio site rendering and packaging.
//!
//! Turns a GitHub profile and its top repositories into a self-contained
//! preview document and a downloadable static site, and drives one
//! generation session from form input to archive.

pub mod archive;
pub mod assets;
pub mod cards;
pub mod generator;
pub mod renderer;
pub mod request;
pub mod session;
pub mod templates;
pub mod theme;

pub use archive::{PackagingError, ARCHIVE_NAME};
pub use cards::{render_project_cards, ProjectCard, ProjectSection};
pub use generator::{Generator, PackagedSite, RenderedPortfolio, SubmitError, PACKAGING_FAILED};
pub use renderer::{DownloadBundle, RenderConfig, RenderError, SiteRenderer};
pub use request::{Field, FieldError, GenerationRequest, ValidationErrors};
pub use session::{GenerationSession, Phase, TransitionError};
pub use theme::{MemoryThemeStore, Theme, ThemeStore};
