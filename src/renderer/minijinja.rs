use super::filters::datetimeformat;
use crate::{error::Result, ext::PathExt, renderer::interface::TemplateRenderer};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::path::Path;

/// MiniJinja-based template rendering engine.
///
/// Undefined variables are errors, nothing is auto-escaped and trailing
/// newlines of templates are kept.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_filter("datetimeformat", datetimeformat);

        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        let name = template_name.unwrap_or("temp");
        Ok(self.env.render_named_str(name, template, context)?)
    }

    fn render_path(&self, template_path: &Path, context: &serde_json::Value) -> Result<String> {
        let path_str = template_path.to_str_checked()?;
        self.render(path_str, context, Some(path_str))
    }
}
