//! GitHub API payloads used by the portfolio.

use serde::{Deserialize, Serialize};

/// A GitHub account, as returned by `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Login handle
    pub login: String,

    /// Display name, if the user set one
    #[serde(default)]
    pub name: Option<String>,

    /// Avatar image URL
    pub avatar_url: String,

    /// Profile page URL
    pub html_url: String,
}

impl Profile {
    /// Name shown in the portfolio heading: the display name, or the login
    /// when no display name is set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }
}

/// A repository summary, as returned by `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Star count
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,

    /// Repository page URL
    pub html_url: String,

    /// Project homepage (live demo)
    #[serde(default)]
    pub homepage: Option<String>,
}

impl Repository {
    /// Description, treating an empty string as absent.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Homepage, treating an empty string as absent.
    pub fn homepage(&self) -> Option<&str> {
        non_empty(self.homepage.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Error body GitHub sends with non-success responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_user_payload() {
        let json = r#"{
            "login": "ada",
            "id": 1,
            "name": null,
            "avatar_url": "https://avatars.example/ada.png",
            "html_url": "https://github.com/ada",
            "public_repos": 3
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.login, "ada");
        assert_eq!(profile.name, None);
        assert_eq!(profile.display_name(), "ada");
    }

    #[test]
    fn display_name_prefers_name() {
        let profile = Profile {
            login: "ada".to_string(),
            name: Some("Ada Lovelace".to_string()),
            avatar_url: String::new(),
            html_url: String::new(),
        };

        assert_eq!(profile.display_name(), "Ada Lovelace");
    }

    #[test]
    fn blank_name_falls_back_to_login() {
        let profile = Profile {
            login: "ada".to_string(),
            name: Some("  ".to_string()),
            avatar_url: String::new(),
            html_url: String::new(),
        };

        assert_eq!(profile.display_name(), "ada");
    }

    #[test]
    fn deserializes_repository_payload() {
        let json = r#"{
            "name": "calc",
            "description": "",
            "stargazers_count": 5,
            "html_url": "https://github.com/ada/calc",
            "homepage": "https://ada.dev/calc",
            "fork": false
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();

        assert_eq!(repo.stars, 5);
        assert_eq!(repo.description(), None);
        assert_eq!(repo.homepage(), Some("https://ada.dev/calc"));
    }
}
