//! Form input validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[w]{0,3}\.?linkedin\.com/.*$").expect("Invalid LinkedIn regex")
});

static LOGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{1,39}$").expect("Invalid login regex"));

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// GitHub username, trimmed and non-empty
    pub username: String,

    /// LinkedIn profile URL, if one was given
    pub linkedin: Option<String>,
}

impl GenerationRequest {
    /// Validate raw form input.
    ///
    /// Both fields are trimmed. An empty LinkedIn field means "omitted".
    /// Every failing field is reported, not just the first.
    pub fn parse(username: &str, linkedin: &str) -> Result<Self, ValidationErrors> {
        let username = username.trim();
        let linkedin = linkedin.trim();
        let mut errors = Vec::new();

        if username.is_empty() {
            errors.push(FieldError {
                field: Field::Github,
                message: "GitHub username is required".to_string(),
            });
        } else if !is_github_login(username) {
            errors.push(FieldError {
                field: Field::Github,
                message: "Please enter a valid GitHub username".to_string(),
            });
        }

        if !linkedin.is_empty() && !is_linkedin_url(linkedin) {
            errors.push(FieldError {
                field: Field::Linkedin,
                message: "Please enter a valid LinkedIn URL".to_string(),
            });
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(Self {
            username: username.to_string(),
            linkedin: (!linkedin.is_empty()).then(|| linkedin.to_string()),
        })
    }
}

/// Whether `login` fits GitHub's username syntax: letters, digits and
/// hyphens, at most 39 characters.
pub fn is_github_login(login: &str) -> bool {
    LOGIN_RE.is_match(login)
}

/// Whether `url` looks like a LinkedIn profile URL.
pub fn is_linkedin_url(url: &str) -> bool {
    LINKEDIN_RE.is_match(url)
}

/// Form field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Github,
    Linkedin,
}

/// A validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All validation failures for one submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Message for `field`, if it failed.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
