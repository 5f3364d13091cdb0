//! Generator web UI page.

use minijinja::{context, Environment};
use serde::Serialize;

use folio_site::{Field, RenderedPortfolio, ValidationErrors, ARCHIVE_NAME};

/// A rendered preview as shown under the form.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewView {
    pub username: String,

    /// Suggested repository name, `<username>.github.io`
    pub repo_name: String,

    /// Address the published site is served from
    pub site_url: String,

    /// Self-contained preview document, loaded via `srcdoc`
    pub document: String,
}

impl From<&RenderedPortfolio> for PreviewView {
    fn from(rendered: &RenderedPortfolio) -> Self {
        Self {
            username: rendered.request.username.clone(),
            repo_name: rendered.repo_name(),
            site_url: rendered.site_url(),
            document: rendered.preview_html.clone(),
        }
    }
}

/// Everything the generator page shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageView {
    /// Submitted GitHub username, echoed back into the form
    pub github: String,

    /// Submitted LinkedIn URL, echoed back into the form
    pub linkedin: String,

    pub github_error: Option<String>,
    pub linkedin_error: Option<String>,

    /// Failure not tied to a field
    pub alert: Option<String>,

    pub preview: Option<PreviewView>,
}

impl PageView {
    /// A page with the form pre-filled.
    pub fn with_input(github: &str, linkedin: &str) -> Self {
        Self {
            github: github.to_string(),
            linkedin: linkedin.to_string(),
            ..Default::default()
        }
    }

    /// Attach inline field errors.
    pub fn field_errors(mut self, errors: &ValidationErrors) -> Self {
        self.github_error = errors.message_for(Field::Github).map(str::to_string);
        self.linkedin_error = errors.message_for(Field::Linkedin).map(str::to_string);
        self
    }

    /// Attach a general error message.
    pub fn alert(mut self, message: impl Into<String>) -> Self {
        self.alert = Some(message.into());
        self
    }

    /// Attach a rendered preview.
    pub fn preview(mut self, rendered: &RenderedPortfolio) -> Self {
        self.preview = Some(PreviewView::from(rendered));
        self
    }
}

/// Renders the generator page.
pub struct AppPage {
    env: Environment<'static>,
}

impl AppPage {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("app.html", APP_TEMPLATE)
            .expect("Failed to add app template");
        Self { env }
    }

    /// Render the page for `view`.
    pub fn render(&self, view: &PageView) -> Result<String, minijinja::Error> {
        let template = self.env.get_template("app.html")?;
        template.render(context! {
            view => view,
            archive_name => ARCHIVE_NAME,
        })
    }
}

impl Default for AppPage {
    fn default() -> Self {
        Self::new()
    }
}

const APP_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>folio - Portfolio Generator</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1f2937; }
    h1 { font-size: 2rem; margin-bottom: 0.25rem; }
    form { display: grid; gap: 1rem; margin: 1.5rem 0; }
    label { display: grid; gap: 0.35rem; font-weight: 600; }
    input { padding: 0.6rem 0.75rem; border: 1px solid #d1d5db; border-radius: 0.5rem; font: inherit; }
    input[aria-invalid="true"] { border-color: #dc2626; }
    .field-error, .alert { color: #dc2626; font-weight: 400; font-size: 0.9rem; }
    .alert { padding: 0.75rem 1rem; border: 1px solid #fecaca; border-radius: 0.5rem; background: #fef2f2; }
    button, .download { justify-self: start; padding: 0.6rem 1.25rem; border: 0; border-radius: 0.5rem; background: #111827; color: #fff; font: inherit; cursor: pointer; text-decoration: none; }
    button:disabled { opacity: 0.6; cursor: progress; }
    .publish { margin: 1rem 0; padding: 1rem; border-radius: 0.5rem; background: #f3f4f6; }
    .publish code { font-weight: 600; }
    iframe { width: 100%; min-height: 480px; border: 1px solid #e5e7eb; border-radius: 0.75rem; }
  </style>
</head>
<body>
  <h1>Portfolio Generator</h1>
  <p>Generate a minimalist developer portfolio from your GitHub profile.</p>

  {% if view.alert %}<div class="alert" role="alert">{{ view.alert }}</div>{% endif %}

  <form id="generator" method="post" action="/generate" novalidate>
    <label>GitHub username
      <input name="github" value="{{ view.github }}" autocomplete="off"{% if view.github_error %} aria-invalid="true"{% endif %}>
      {% if view.github_error %}<span class="field-error">{{ view.github_error }}</span>{% endif %}
    </label>
    <label>LinkedIn URL (optional)
      <input name="linkedin" type="url" value="{{ view.linkedin }}" placeholder="https://www.linkedin.com/in/you"{% if view.linkedin_error %} aria-invalid="true"{% endif %}>
      {% if view.linkedin_error %}<span class="field-error">{{ view.linkedin_error }}</span>{% endif %}
    </label>
    <button type="submit">Generate</button>
  </form>

  {% if view.preview %}
  <section id="result">
    <div class="publish">
      <p>Create a repository named <code>{{ view.preview.repo_name }}</code> and upload the files from <code>{{ archive_name }}</code>.</p>
      <p>Your portfolio will be live at <a href="{{ view.preview.site_url }}" target="_blank" rel="noopener noreferrer">{{ view.preview.site_url }}</a></p>
    </div>
    <a class="download" href="/download" download="{{ archive_name }}">Download {{ archive_name }}</a>
    <h2>Preview</h2>
    <iframe id="preview" title="Portfolio preview" sandbox="allow-scripts allow-same-origin" srcdoc="{{ view.preview.document }}"></iframe>
  </section>
  {% endif %}

  <script>
    document.getElementById('generator').addEventListener('submit', (event) => {
      const button = event.target.querySelector('button');
      button.disabled = true;
      button.textContent = 'Generating...';
    });

    window.addEventListener('message', (event) => {
      const frame = document.getElementById('preview');
      if (!frame || event.source !== frame.contentWindow) return;
      if (event.data && event.data.type === 'resize') {
        frame.style.height = `${event.data.height}px`;
      }
    });
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use folio_site::FieldError;

    #[test]
    fn renders_empty_form() {
        let html = AppPage::new().render(&PageView::default()).unwrap();

        assert!(html.contains(r#"action="/generate""#));
        assert!(!html.contains("<iframe"));
        assert!(!html.contains(r#"role="alert""#));
    }

    #[test]
    fn shows_field_errors_inline() {
        let errors = ValidationErrors(vec![FieldError {
            field: Field::Linkedin,
            message: "Please enter a valid LinkedIn URL".to_string(),
        }]);
        let view = PageView::with_input("ada", "ftp://x").field_errors(&errors);

        let html = AppPage::new().render(&view).unwrap();

        assert!(html.contains(r#"<span class="field-error">Please enter a valid LinkedIn URL</span>"#));
        assert!(html.contains(r#"value="ada""#));
        assert!(view.github_error.is_none());
    }

    #[test]
    fn escapes_preview_into_srcdoc() {
        let view = PageView {
            preview: Some(PreviewView {
                username: "ada".to_string(),
                repo_name: "ada.github.io".to_string(),
                site_url: "https://ada.github.io".to_string(),
                document: r#"<p class="x">hi"#.to_string(),
            }),
            ..Default::default()
        };

        let html = AppPage::new().render(&view).unwrap();

        assert!(html.contains("srcdoc=\"&lt;p class=&quot;x&quot;&gt;hi\""));
        assert!(html.contains("<code>ada.github.io</code>"));
        assert!(html.contains("ada.github.io</a>"));
        assert!(html.contains(r#"sandbox="allow-scripts allow-same-origin""#));
    }
}
