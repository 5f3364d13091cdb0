//! GitHub data fetching for folio.
//!
//! Looks up a user profile and their public repositories through the GitHub
//! REST API, caches both responses for the lifetime of a generation session,
//! and ranks repositories by star count.

pub mod cache;
pub mod client;
pub mod fetcher;
pub mod models;
pub mod ranking;

pub use cache::SessionCache;
pub use client::{ClientConfig, FetchError, GitHubApi, GitHubClient};
pub use fetcher::DataFetcher;
pub use models::{Profile, Repository};
pub use ranking::{is_portfolio_repo, portfolio_repo_name, rank_by_popularity, MAX_PROJECTS};
