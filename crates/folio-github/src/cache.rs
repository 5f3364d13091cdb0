//! Session-scoped cache of GitHub responses.

use std::collections::{HashMap, HashSet};

use crate::models::{Profile, Repository};

/// Cached API responses, keyed by the username they were requested for.
///
/// Owned by a single generation session; dropping the session drops the
/// cache. Repository lists are stored unranked, exactly as the API returned
/// them.
#[derive(Debug, Default)]
pub struct SessionCache {
    profiles: HashMap<String, Profile>,
    repositories: HashMap<String, Vec<Repository>>,
}

impl SessionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached profile for `username`.
    pub fn profile(&self, username: &str) -> Option<&Profile> {
        self.profiles.get(username)
    }

    /// Cached full repository list for `username`.
    pub fn repositories(&self, username: &str) -> Option<&[Repository]> {
        self.repositories.get(username).map(Vec::as_slice)
    }

    /// Store a profile, replacing any previous entry.
    pub fn store_profile(&mut self, username: &str, profile: Profile) {
        self.profiles.insert(username.to_string(), profile);
    }

    /// Store a full repository list, replacing any previous entry.
    pub fn store_repositories(&mut self, username: &str, repos: Vec<Repository>) {
        self.repositories.insert(username.to_string(), repos);
    }

    /// Number of usernames with at least one cached response.
    pub fn len(&self) -> usize {
        self.profiles
            .keys()
            .chain(self.repositories.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty() && self.repositories.is_empty()
    }
}
