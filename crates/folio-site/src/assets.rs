//! Stylesheet for generated portfolios.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The portfolio stylesheet, minified when `minify` is set.
    ///
    /// Falls back to the unminified source if lightningcss rejects it.
    pub fn stylesheet(minify: bool) -> String {
        if !minify {
            return PORTFOLIO_CSS.to_string();
        }

        match Self::minify_css(PORTFOLIO_CSS) {
            Ok(css) => css,
            Err(e) => {
                tracing::warn!("Skipping CSS minification: {}", e);
                PORTFOLIO_CSS.to_string()
            }
        }
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

// Light palette on :root, dark palette under [data-theme="dark"].
const PORTFOLIO_CSS: &str = r#"/* Modern CSS Reset */
*, *::before, *::after {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

/* Custom Properties */
:root {
  --primary-color: #2563eb;
  --secondary-color: #1e293b;
  --background-color: #f8fafc;
  --card-background: #ffffff;
  --text-color: #1e293b;
  --text-muted: #64748b;
  --border-radius: 1rem;
  --transition: all 0.3s ease;
}

/* Dark mode */
:root[data-theme="dark"] {
  --background-color: #0f172a;
  --card-background: #1e293b;
  --text-color: #f1f5f9;
  --text-muted: #94a3b8;
}

/* Base Styles */
body {
  background-color: var(--background-color);
  color: var(--text-color);
  line-height: 1.6;
  font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  -webkit-font-smoothing: antialiased;
  transition: var(--transition);
  min-height: 100vh;
  display: flex;
  flex-direction: column;
}

/* Container */
.container {
  width: min(1200px, 90%);
  margin: 0 auto;
  padding: clamp(1rem, 5vw, 3rem);
  flex: 1;
}

/* Theme Switcher */
.theme-switch {
  position: fixed;
  top: 1rem;
  left: 1rem;
  background: var(--card-background);
  border: none;
  color: var(--text-color);
  padding: 0.75rem;
  border-radius: 50%;
  cursor: pointer;
  display: flex;
  align-items: center;
  justify-content: center;
  transition: var(--transition);
  z-index: 1000;
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
}

.theme-switch:hover {
  transform: rotate(15deg);
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
}

.theme-switch svg {
  width: 1.5rem;
  height: 1.5rem;
  transition: transform 0.5s cubic-bezier(0.4, 0, 0.2, 1);
}

.theme-switch .sun-icon {
  opacity: 1;
  transform: scale(1) rotate(0);
}

.theme-switch .moon-icon {
  position: absolute;
  opacity: 0;
  transform: scale(0) rotate(-90deg);
}

[data-theme="dark"] .theme-switch .sun-icon {
  opacity: 0;
  transform: scale(0) rotate(90deg);
}

[data-theme="dark"] .theme-switch .moon-icon {
  opacity: 1;
  transform: scale(1) rotate(0);
}

/* Header Section */
header {
  text-align: center;
  margin-bottom: clamp(2rem, 8vw, 5rem);
  animation: fadeIn 1s ease;
}

.profile-img {
  width: 180px;
  height: 180px;
  border-radius: 50%;
  margin-bottom: 1.5rem;
  border: 4px solid var(--card-background);
  box-shadow: 0 10px 20px rgba(0, 0, 0, 0.1);
  transition: var(--transition);
}

.profile-img:hover {
  transform: scale(1.05);
}

h1 {
  font-size: clamp(2rem, 5vw, 3rem);
  margin-bottom: 1rem;
  line-height: 1.2;
}

/* Social Links */
.social-links {
  display: flex;
  justify-content: center;
  gap: 1rem;
  margin-bottom: 2rem;
  flex-wrap: wrap;
}

.social-links a {
  color: var(--text-color);
  text-decoration: none;
  padding: 0.75rem 1.5rem;
  border-radius: var(--border-radius);
  background-color: var(--card-background);
  transition: var(--transition);
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.05);
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.social-links a:hover {
  transform: translateY(-2px);
  box-shadow: 0 8px 12px rgba(0, 0, 0, 0.1);
}

.social-links a svg {
  width: 1.25rem;
  height: 1.25rem;
}

/* Projects Grid */
.projects {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(min(100%, 300px), 1fr));
  gap: clamp(1rem, 3vw, 2rem);
  margin-top: 2rem;
}

.project-card {
  background-color: var(--card-background);
  border-radius: var(--border-radius);
  padding: 1.5rem;
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.05);
  transition: var(--transition);
  animation: slideUp 0.5s ease;
  animation-fill-mode: both;
}

.project-card:hover {
  transform: translateY(-5px);
  box-shadow: 0 8px 12px rgba(0, 0, 0, 0.1);
}

.project-card h3 {
  margin-bottom: 0.75rem;
  color: var(--primary-color);
}

.project-card p {
  color: var(--text-muted);
  margin-bottom: 1.25rem;
}

.project-links {
  display: flex;
  gap: 1rem;
  flex-wrap: wrap;
}

.project-links a {
  color: var(--primary-color);
  text-decoration: none;
  font-weight: 500;
  transition: var(--transition);
}

.project-links a:hover {
  text-decoration: underline;
  opacity: 0.9;
}

/* Loading State */
.loading {
  text-align: center;
  padding: 2rem;
  color: var(--text-muted);
}

/* Animations */
@keyframes fadeIn {
  from { opacity: 0; }
  to { opacity: 1; }
}

@keyframes slideUp {
  from {
    opacity: 0;
    transform: translateY(20px);
  }
  to {
    opacity: 1;
    transform: translateY(0);
  }
}

/* See All Repositories Link */
.see-all-repos {
  text-align: center;
  margin-top: 2rem;
  animation: fadeIn 0.5s ease;
}

.see-all-repos a {
  color: var(--primary-color);
  text-decoration: none;
  font-weight: 500;
  padding: 0.75rem 1.5rem;
  border-radius: var(--border-radius);
  background-color: var(--card-background);
  transition: var(--transition);
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.05);
  display: inline-block;
}

.see-all-repos a:hover {
  transform: translateY(-2px);
  box-shadow: 0 8px 12px rgba(0, 0, 0, 0.1);
}

/* Responsive Design */
@media (max-width: 768px) {
  .container {
    width: 95%;
    padding: 1rem;
  }
  
  .profile-img {
    width: 140px;
    height: 140px;
  }
  
  .social-links {
    flex-direction: column;
    align-items: stretch;
  }
  
  .social-links a {
    text-align: center;
    justify-content: center;
  }
}
"#;
