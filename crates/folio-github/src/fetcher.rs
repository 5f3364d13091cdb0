//! Cache-then-fetch access to GitHub data.

use crate::cache::SessionCache;
use crate::client::{FetchError, GitHubApi};
use crate::models::{Profile, Repository};
use crate::ranking::rank_by_popularity;

/// Fetches profiles and repositories, serving repeat lookups from a
/// [`SessionCache`] it owns.
///
/// Failed lookups are not cached and are never retried.
pub struct DataFetcher<A> {
    api: A,
    cache: SessionCache,
}

impl<A: GitHubApi> DataFetcher<A> {
    /// Create a fetcher with an empty cache.
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: SessionCache::new(),
        }
    }

    /// Profile for `username`, from the cache when present.
    pub async fn fetch_profile(&mut self, username: &str) -> Result<Profile, FetchError> {
        if let Some(profile) = self.cache.profile(username) {
            tracing::debug!("Profile cache hit for {}", username);
            return Ok(profile.clone());
        }

        tracing::info!("Fetching GitHub profile for {}", username);
        let profile = self.api.user(username).await?;
        self.cache.store_profile(username, profile.clone());

        Ok(profile)
    }

    /// The top repositories for `username` by star count.
    ///
    /// The cache keeps the full list the API returned; ranking is applied on
    /// every call.
    pub async fn fetch_repositories(
        &mut self,
        username: &str,
    ) -> Result<Vec<Repository>, FetchError> {
        if let Some(repos) = self.cache.repositories(username) {
            tracing::debug!("Repository cache hit for {}", username);
            return Ok(rank_by_popularity(repos.to_vec()));
        }

        tracing::info!("Fetching GitHub repositories for {}", username);
        let repos = self.api.repositories(username).await?;
        tracing::debug!("GitHub returned {} repositories", repos.len());
        self.cache.store_repositories(username, repos.clone());

        Ok(rank_by_popularity(repos))
    }

    /// The cache backing this fetcher.
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}
