//! Template rendering for project files.

use anyhow::{Context as _, Result};
use minijinja::{AutoEscape, Environment};

use crate::core::types::Context;

/// Template engine wrapper around minijinja.
///
/// Output is written to disk as-is: no HTML escaping, trailing newlines kept.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Render `source` (named `name` in error messages) against the full context.
    pub fn render(&self, name: &str, source: &str, context: &Context) -> Result<String> {
        self.env
            .render_named_str(name, source, context)
            .with_context(|| format!("render template {name}"))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context {
            app_name: "my-cool-app".to_string(),
            human_app_name: "My Cool App".to_string(),
            use_react: true,
            use_angular: false,
            use_backbone: false,
            use_gwc: false,
            use_analytics: true,
            use_firebase: false,
            include_wct: false,
            include_recipes: false,
        }
    }

    #[test]
    fn renders_context_fields() {
        let out = Renderer::new()
            .render(
                "_README.md",
                "# {{ humanAppName }}\n{% if useReact %}react{% endif %}{% if useAngular %}angular{% endif %}\n",
                &context(),
            )
            .expect("render");
        assert_eq!(out, "# My Cool App\nreact\n");
    }

    #[test]
    fn html_is_not_escaped() {
        let out = Renderer::new()
            .render("index.html", "<title>{{ humanAppName }} & co</title>", &context())
            .expect("render");
        assert_eq!(out, "<title>My Cool App & co</title>");
    }

    #[test]
    fn template_errors_name_the_file() {
        let err = Renderer::new()
            .render("_package.json", "{% if %}", &context())
            .unwrap_err();
        assert!(err.to_string().contains("_package.json"));
    }
}
