//! Template engine for rendering portfolio pages, scripts and READMEs.

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

use folio_github::Profile;

use crate::cards::{ProjectSection, NO_DESCRIPTION, NO_PROJECTS, SEE_ALL_LABEL, STAGGER_SECONDS};
use crate::theme::{Theme, THEME_STORAGE_KEY};

/// Stylesheet and script inlined into a self-contained document.
#[derive(Debug, Clone, Serialize)]
pub struct InlineAssets {
    pub styles: String,
    pub scripts: String,
}

/// Context for rendering `portfolio.html`.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    /// Heading and title name
    pub display_name: &'a str,
    /// Fetched profile
    pub profile: &'a Profile,
    /// LinkedIn URL, if given
    pub linkedin: Option<&'a str>,
    /// Pre-rendered projects area
    pub projects: &'a ProjectSection,
    /// Theme the page opens with before the script runs
    pub theme: Theme,
    /// Inlined assets; `None` links `styles.css` and `scripts.js` instead
    pub inline: Option<InlineAssets>,
}

/// Where the generated script gets its project list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSource {
    /// Cards are already in the markup
    Embedded,
    /// Re-fetch repositories from the GitHub API on load
    Live,
}

/// Context for rendering `scripts.js`.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptContext<'a> {
    pub username: &'a str,
    pub source: ProjectSource,
    /// Read the theme from the embedding window's store when framed
    pub shared_store: bool,
    /// GitHub API base used by the live fetch
    pub api_base: &'a str,
}

/// Context for rendering `README.md`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadmeContext<'a> {
    pub username: &'a str,
    pub generator: &'a str,
    pub has_linkedin: bool,
}

/// Template engine using minijinja.
///
/// `.html` templates are HTML-escaped; scripts embed values through `tojson`.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        env.add_template("portfolio.html", PORTFOLIO_TEMPLATE)
            .expect("Failed to add portfolio template");

        env.add_template("cards.html", CARDS_TEMPLATE)
            .expect("Failed to add cards template");

        env.add_template("scripts.js", SCRIPTS_TEMPLATE)
            .expect("Failed to add scripts template");

        env.add_template("README.md", README_TEMPLATE)
            .expect("Failed to add README template");

        Self { env }
    }

    /// Render the portfolio page.
    pub fn render_page(&self, page: &PageContext<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("portfolio.html")?;

        tmpl.render(context! {
            display_name => page.display_name,
            profile => page.profile,
            linkedin => page.linkedin,
            projects => page.projects,
            theme => page.theme,
            inline => &page.inline,
            labels => labels(),
        })
    }

    /// Render the page script.
    pub fn render_script(&self, script: &ScriptContext<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("scripts.js")?;

        tmpl.render(context! {
            username => script.username,
            live => script.source == ProjectSource::Live,
            shared_store => script.shared_store,
            api_base => script.api_base,
            per_page => folio_github::client::REPOS_PER_PAGE,
            max_projects => folio_github::MAX_PROJECTS,
            stagger_seconds => STAGGER_SECONDS,
            theme_key => THEME_STORAGE_KEY,
            default_theme => Theme::default(),
            labels => labels(),
        })
    }

    /// Render the site README.
    pub fn render_readme(&self, readme: &ReadmeContext<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("README.md")?;

        tmpl.render(context! {
            username => readme.username,
            generator => readme.generator,
            has_linkedin => readme.has_linkedin,
            repo_name => folio_github::portfolio_repo_name(readme.username),
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed card texts, shared by the markup and the live script.
fn labels() -> minijinja::Value {
    context! {
        no_description => NO_DESCRIPTION,
        no_projects => NO_PROJECTS,
        see_all => SEE_ALL_LABEL,
        view_repository => "View Repository",
        live_demo => "Live Demo",
        load_failed => "Failed to load projects. Please try again later.",
    }
}

const PORTFOLIO_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en" data-theme="{{ theme }}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="description" content="Developer Portfolio - {{ display_name }}">
  <title>{{ display_name }} - Developer Portfolio</title>
  <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 24 24' fill='none' stroke='currentColor' stroke-width='2'><circle cx='12' cy='12' r='10'/><line x1='2' y1='12' x2='22' y2='12'/><path d='M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10z'/></svg>">
{%- if inline %}
  <style>
{{ inline.styles | safe }}
  </style>
  <script>
    window.addEventListener('load', function () {
      const observer = new ResizeObserver(function () {
        const height = document.documentElement.scrollHeight;
        window.parent.postMessage({ type: 'resize', height: height }, '*');
      });
      observer.observe(document.body);
    });
  </script>
{%- else %}
  <link rel="stylesheet" href="styles.css">
{%- endif %}
</head>
<body>
  <button class="theme-switch" aria-label="Toggle theme">
    <svg class="sun-icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
      <circle cx="12" cy="12" r="5"/><line x1="12" y1="1" x2="12" y2="3"/>
      <line x1="12" y1="21" x2="12" y2="23"/><line x1="4.22" y1="4.22" x2="5.64" y2="5.64"/>
      <line x1="18.36" y1="18.36" x2="19.78" y2="19.78"/><line x1="1" y1="12" x2="3" y2="12"/>
      <line x1="21" y1="12" x2="23" y2="12"/><line x1="4.22" y1="19.78" x2="5.64" y2="18.36"/>
      <line x1="18.36" y1="5.64" x2="19.78" y2="4.22"/>
    </svg>
    <svg class="moon-icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
      <path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"/>
    </svg>
  </button>

  <div class="container">
    <header>
      <img src="{{ profile.avatar_url }}" alt="Profile" class="profile-img">
      <h1>Hi, I'm {{ display_name }} 👋</h1>
      <div class="social-links">
        {%- if linkedin %}
        <a href="{{ linkedin }}" target="_blank" rel="noopener noreferrer">
          <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
            <path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"/>
            <rect x="2" y="9" width="4" height="12"/><circle cx="4" cy="4" r="2"/>
          </svg>
          LinkedIn
        </a>
        {%- endif %}
        <a href="{{ profile.html_url }}" target="_blank" rel="noopener noreferrer">
          <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
            <path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22"/>
          </svg>
          GitHub
        </a>
      </div>
    </header>

    <div id="projects" class="projects">
{% include "cards.html" %}
    </div>
    {%- if projects.kind == "cards" %}
    <div class="see-all-repos">
      <a href="{{ projects.see_all_url }}" target="_blank" rel="noopener noreferrer">{{ labels.see_all }}</a>
    </div>
    {%- endif %}
  </div>
{% if inline %}
  <script>
{{ inline.scripts | safe }}
  </script>
{%- else %}
  <script src="scripts.js"></script>
{%- endif %}
</body>
</html>
"##;

const CARDS_TEMPLATE: &str = r##"{%- if projects.kind == "cards" -%}
{%- for card in projects.cards %}
      <div class="project-card" style="animation-delay: {{ card.animation_delay }}">
        <h3>{{ card.title }}</h3>
        <p>{{ card.description }}</p>
        <div class="project-links">
          <a href="{{ card.repo_url }}" target="_blank" rel="noopener noreferrer">{{ labels.view_repository }}</a>
          {%- if card.demo_url %}
          <a href="{{ card.demo_url }}" target="_blank" rel="noopener noreferrer">{{ labels.live_demo }}</a>
          {%- endif %}
        </div>
      </div>
{%- endfor %}
{%- else %}
      <div class="loading">{{ labels.no_projects }}</div>
{%- endif %}"##;

const SCRIPTS_TEMPLATE: &str = r##"// Theme switcher{% if live %} and live GitHub projects{% endif %}
(function () {
  'use strict';

  const THEME_KEY = {{ theme_key | tojson }};
  const DEFAULT_THEME = {{ default_theme | tojson }};

  function themeStore() {
{%- if shared_store %}
    // Inside the preview frame, share the embedding page's store.
    try {
      if (window.parent && window.parent !== window) {
        return window.parent.localStorage;
      }
    } catch (error) {
      console.warn('Falling back to frame storage:', error);
    }
{%- endif %}
    return window.localStorage;
  }
{% if live %}
  const USERNAME = {{ username | tojson }};
  const API_BASE = {{ api_base | tojson }};
  const PER_PAGE = {{ per_page }};
  const MAX_PROJECTS = {{ max_projects }};
  const STAGGER_SECONDS = {{ stagger_seconds }};
  const LABELS = {{ labels | tojson }};

  function escapeHtml(value) {
    return String(value)
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;')
      .replace(/'/g, '&#x27;');
  }

  const WEB_URL = /^https?:\/\//i;

  function present(value) {
    return typeof value === 'string' && value.trim() !== '' ? value : null;
  }

  function cardMarkup(repo, order) {
    const description = present(repo.description) || LABELS.no_description;
    const homepage = present(repo.homepage);
    const demo = homepage && WEB_URL.test(homepage.trim())
      ? `<a href="${escapeHtml(homepage)}" target="_blank" rel="noopener noreferrer">${LABELS.live_demo}</a>`
      : '';

    return `<div class="project-card" style="animation-delay: ${(order * STAGGER_SECONDS).toFixed(1)}s">
        <h3>${escapeHtml(repo.name)}</h3>
        <p>${escapeHtml(description)}</p>
        <div class="project-links">
          <a href="${escapeHtml(repo.html_url)}" target="_blank" rel="noopener noreferrer">${LABELS.view_repository}</a>
          ${demo}
        </div>
      </div>`;
  }

  function renderProjects(container, repos) {
    const previous = container.parentNode.querySelector('.see-all-repos');
    if (previous) {
      previous.remove();
    }

    const selfRepo = `${USERNAME}.github.io`.toLowerCase();
    const projects = repos
      .slice()
      .sort((a, b) => b.stargazers_count - a.stargazers_count)
      .slice(0, MAX_PROJECTS)
      .filter((repo) => repo.name.toLowerCase() !== selfRepo);

    if (projects.length === 0) {
      container.innerHTML = `<div class="loading">${LABELS.no_projects}</div>`;
      return;
    }

    container.innerHTML = projects.map(cardMarkup).join('\n');

    const seeAll = document.createElement('div');
    seeAll.className = 'see-all-repos';
    seeAll.innerHTML = `<a href="https://github.com/${encodeURIComponent(USERNAME)}?tab=repositories" target="_blank" rel="noopener noreferrer">${LABELS.see_all}</a>`;
    container.parentNode.insertBefore(seeAll, container.nextSibling);
  }

  async function fetchGitHubProjects() {
    const container = document.getElementById('projects');

    try {
      const response = await fetch(`${API_BASE}/users/${encodeURIComponent(USERNAME)}/repos?per_page=${PER_PAGE}`);
      if (!response.ok) {
        throw new Error('Failed to fetch projects');
      }
      renderProjects(container, await response.json());
    } catch (error) {
      // Keep the cards baked in at generation time if there are any.
      if (!container.querySelector('.project-card')) {
        container.innerHTML = `<div class="loading">${LABELS.load_failed}</div>`;
      }
      console.error('Error fetching GitHub projects:', error);
    }
  }
{% endif %}
  document.addEventListener('DOMContentLoaded', function () {
    const root = document.documentElement;
    const store = themeStore();

    root.setAttribute('data-theme', store.getItem(THEME_KEY) || DEFAULT_THEME);

    document.querySelector('.theme-switch').addEventListener('click', function () {
      const next = root.getAttribute('data-theme') === 'light' ? 'dark' : 'light';
      root.setAttribute('data-theme', next);
      store.setItem(THEME_KEY, next);
    });
{%- if live %}

    fetchGitHubProjects();
{%- endif %}
  });
})();
"##;

const README_TEMPLATE: &str = r##"A minimalist developer portfolio built using {{ generator }}

## Features

- 🌓 Dark/Light mode with smooth transitions
- 📱 Fully responsive design
- 🚀 Dynamic GitHub projects integration
- 🔗 Professional links (GitHub{% if has_linkedin %}, LinkedIn{% endif %})
- ⚡ Fast and lightweight

## Publishing

Push these files to a repository named `{{ repo_name }}` and enable GitHub
Pages. The site will be served at https://{{ username }}.github.io
"##;
