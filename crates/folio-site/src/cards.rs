//! Project card selection.

use serde::Serialize;

use folio_github::{is_portfolio_repo, Repository, MAX_PROJECTS};

/// Description shown for repositories without one.
pub const NO_DESCRIPTION: &str = "No description available";

/// Placeholder shown when there is nothing to display.
pub const NO_PROJECTS: &str = "No projects to display.";

/// Label of the trailing link to the full repository list.
pub const SEE_ALL_LABEL: &str = "See all repositories →";

/// Seconds between the entrance animations of consecutive cards.
pub const STAGGER_SECONDS: f64 = 0.1;

/// One project card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    /// Repository name
    pub title: String,

    /// Description, or [`NO_DESCRIPTION`]
    pub description: String,

    /// Repository page
    pub repo_url: String,

    /// Live demo, when the repository has a homepage
    pub demo_url: Option<String>,

    /// Position in the grid, starting at 0
    pub order: usize,

    /// CSS `animation-delay` for the staggered entrance
    pub animation_delay: String,
}

/// The projects area of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectSection {
    /// Cards followed by a link to the full repository list
    Cards {
        cards: Vec<ProjectCard>,
        see_all_url: String,
    },

    /// The single [`NO_PROJECTS`] placeholder
    Empty,
}

impl ProjectSection {
    /// Cards in display order; empty for the placeholder.
    pub fn cards(&self) -> &[ProjectCard] {
        match self {
            ProjectSection::Cards { cards, .. } => cards,
            ProjectSection::Empty => &[],
        }
    }
}

/// Map ranked repositories to project cards.
///
/// Only the first [`MAX_PROJECTS`] entries are considered, and the user's own
/// `<username>.github.io` repository is dropped after that cut, so a portfolio
/// repository ranked in the top six leaves five cards. Input order is kept.
pub fn render_project_cards(repos: &[Repository], username: &str) -> ProjectSection {
    let cards: Vec<ProjectCard> = repos
        .iter()
        .take(MAX_PROJECTS)
        .filter(|repo| !is_portfolio_repo(&repo.name, username))
        .enumerate()
        .map(|(order, repo)| ProjectCard {
            title: repo.name.clone(),
            description: repo.description().unwrap_or(NO_DESCRIPTION).to_string(),
            repo_url: repo.html_url.clone(),
            demo_url: repo.homepage().filter(|url| is_web_url(url)).map(str::to_string),
            order,
            animation_delay: animation_delay(order),
        })
        .collect();

    if cards.is_empty() {
        return ProjectSection::Empty;
    }

    ProjectSection::Cards {
        cards,
        see_all_url: see_all_url(username),
    }
}

/// URL of the profile's repository listing.
pub fn see_all_url(username: &str) -> String {
    format!("https://github.com/{}?tab=repositories", username)
}

/// Only `http` and `https` homepages become links.
fn is_web_url(url: &str) -> bool {
    let url = url.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Formatted to one decimal so the value is byte-stable; the generated
/// script uses `toFixed(1)` to match.
fn animation_delay(order: usize) -> String {
    format!("{:.1}s", order as f64 * STAGGER_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo(name: &str, stars: u64) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            stars,
            html_url: format!("https://github.com/ada/{}", name),
            homepage: None,
        }
    }

    fn titles(section: &ProjectSection) -> Vec<&str> {
        section.cards().iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn drops_portfolio_repo() {
        let repos = vec![repo("ada.github.io", 10), repo("calc", 5)];

        let section = render_project_cards(&repos, "ada");

        assert_eq!(titles(&section), vec!["calc"]);
        assert_eq!(section.cards()[0].description, NO_DESCRIPTION);
        match section {
            ProjectSection::Cards { see_all_url, .. } => {
                assert_eq!(see_all_url, "https://github.com/ada?tab=repositories");
            }
            ProjectSection::Empty => panic!("expected cards"),
        }
    }

    #[test]
    fn filters_after_taking_top_six() {
        let mut repos = vec![repo("ada.github.io", 100)];
        repos.extend((0..7).map(|i| repo(&format!("r{}", i), 50 - i)));

        let section = render_project_cards(&repos, "ada");

        assert_eq!(titles(&section), vec!["r0", "r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn never_more_than_six() {
        let repos: Vec<_> = (0..9).map(|i| repo(&format!("r{}", i), 9 - i)).collect();

        let section = render_project_cards(&repos, "ada");

        assert_eq!(section.cards().len(), MAX_PROJECTS);
    }

    #[test]
    fn empty_list_yields_placeholder_only() {
        assert_eq!(render_project_cards(&[], "ada"), ProjectSection::Empty);
    }

    #[test]
    fn only_portfolio_repo_yields_placeholder() {
        let repos = vec![repo("ada.github.io", 1)];

        assert_eq!(render_project_cards(&repos, "ada"), ProjectSection::Empty);
    }

    #[test]
    fn staggers_animation_delays() {
        let repos: Vec<_> = (0..4).map(|i| repo(&format!("r{}", i), 4 - i)).collect();

        let section = render_project_cards(&repos, "ada");
        let delays: Vec<_> = section
            .cards()
            .iter()
            .map(|c| (c.order, c.animation_delay.as_str()))
            .collect();

        assert_eq!(
            delays,
            vec![(0, "0.0s"), (1, "0.1s"), (2, "0.2s"), (3, "0.3s")]
        );
    }

    #[test]
    fn keeps_homepage_as_demo_link() {
        let mut with_demo = repo("web", 3);
        with_demo.homepage = Some("https://ada.dev".to_string());
        with_demo.description = Some("My site".to_string());
        let mut blank_demo = repo("cli", 2);
        blank_demo.homepage = Some(String::new());

        let section = render_project_cards(&[with_demo, blank_demo], "ada");
        let cards = section.cards();

        assert_eq!(cards[0].demo_url.as_deref(), Some("https://ada.dev"));
        assert_eq!(cards[0].description, "My site");
        assert_eq!(cards[1].demo_url, None);
    }

    #[test]
    fn drops_non_web_homepages() {
        let homepages = [
            "javascript:alert(1)",
            " JavaScript:alert(1)",
            "data:text/html,hi",
            "ada.dev",
            "HTTPS://ADA.DEV",
            "http://ada.dev",
        ];
        let repos: Vec<Repository> = homepages
            .iter()
            .map(|homepage| {
                let mut r = repo("web", 1);
                r.homepage = Some(homepage.to_string());
                r
            })
            .collect();

        let section = render_project_cards(&repos, "ada");
        let demos: Vec<Option<&str>> = section
            .cards()
            .iter()
            .map(|c| c.demo_url.as_deref())
            .collect();

        assert_eq!(
            demos,
            vec![
                None,
                None,
                None,
                None,
                Some("HTTPS://ADA.DEV"),
                Some("http://ada.dev")
            ]
        );
    }

    #[test]
    fn is_deterministic() {
        let repos = vec![repo("a", 3), repo("b", 2)];

        assert_eq!(
            render_project_cards(&repos, "ada"),
            render_project_cards(&repos, "ada")
        );
    }
}
