//! Repository ranking.

use crate::models::Repository;

/// Maximum number of repositories shown on a portfolio.
pub const MAX_PROJECTS: usize = 6;

/// Sort repositories by star count, most stars first, and keep the top
/// [`MAX_PROJECTS`].
///
/// The sort is stable, so repositories with equal star counts keep the order
/// the API returned them in.
pub fn rank_by_popularity(mut repos: Vec<Repository>) -> Vec<Repository> {
    repos.sort_by(|a, b| b.stars.cmp(&a.stars));
    repos.truncate(MAX_PROJECTS);
    repos
}

/// Name of the repository that hosts a user's GitHub Pages site.
pub fn portfolio_repo_name(username: &str) -> String {
    format!("{}.github.io", username)
}

/// Whether `name` is the user's own `<username>.github.io` repository.
///
/// GitHub names are case-insensitive, so the comparison is too.
pub fn is_portfolio_repo(name: &str, username: &str) -> bool {
    name.eq_ignore_ascii_case(&portfolio_repo_name(username))
}
