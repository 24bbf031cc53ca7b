use globset::GlobSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::TEMPLATE_SUFFIXES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::renderer::TemplateRenderer;

use super::operation::TemplateOperation;

pub struct TemplateProcessor<'a, P: AsRef<Path>> {
    /// Dependencies
    engine: &'a dyn TemplateRenderer,
    ignored: &'a GlobSet,

    /// Other
    template_root: P,
    output_root: P,
    context: &'a serde_json::Value,
}

impl<'a, P: AsRef<Path>> TemplateProcessor<'a, P> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: P,
        output_root: P,
        context: &'a serde_json::Value,
        ignored: &'a GlobSet,
    ) -> Self {
        Self { engine, template_root, output_root, context, ignored }
    }

    /// Validates whether the `rendered_path` is properly rendered by comparing its components
    /// with those of the original `template_path`. The validation ensures no parts of the path
    /// are empty after rendering.
    ///
    /// # Examples
    ///
    /// Valid case:
    /// - Template path: `{{ package.name }}/lib`
    /// - Rendered path: `heat_model/lib`
    ///
    /// Invalid case:
    /// - Template path: `{{ package.prefix }}/lib`
    /// - Rendered path (when the prefix is empty): `/lib` (contains empty part)
    fn has_valid_rendered_path_parts(&self, template_path: &str, rendered_path: &str) -> bool {
        let template_parts: Vec<&str> = template_path.split(std::path::MAIN_SEPARATOR).collect();
        let rendered_parts: Vec<&str> = rendered_path.split(std::path::MAIN_SEPARATOR).collect();

        template_parts.len() == rendered_parts.len()
            && template_parts
                .iter()
                .zip(rendered_parts.iter())
                .all(|(template_part, rendered_part)| {
                    template_part.is_empty() || !rendered_part.trim().is_empty()
                })
    }

    /// Renders a template entry path, relative to the template root.
    fn render_template_entry(&self, relative_entry: &Path) -> Result<PathBuf> {
        let rendered_entry = self.engine.render_path(relative_entry, self.context)?;

        if !self.has_valid_rendered_path_parts(relative_entry.to_str_checked()?, &rendered_entry) {
            return Err(Error::ProcessError {
                source_path: relative_entry.display().to_string(),
                e: format!("The rendered path '{rendered_entry}' is not valid"),
            });
        }

        Ok(PathBuf::from(rendered_entry))
    }

    /// Removes a template marker suffix (`.jinja`, `.jinja2`, `.j2`) from a file path.
    fn remove_template_suffix(&self, target_path: &Path) -> Result<PathBuf> {
        let target_path_str = target_path.to_str_checked()?;
        let target = TEMPLATE_SUFFIXES
            .iter()
            .find_map(|suffix| target_path_str.strip_suffix(suffix))
            .unwrap_or(target_path_str);

        Ok(PathBuf::from(target))
    }

    /// Processes a template entry and determines the appropriate operation.
    ///
    /// Every file is treated as a template. Files that are not UTF-8 text are copied as is.
    ///
    /// # Arguments
    /// * `template_entry` - The template entry to process, below the template root
    ///
    /// # Returns
    /// * `Result<TemplateOperation>` - The operation to perform
    pub fn process(&self, template_entry: P) -> Result<TemplateOperation> {
        let template_entry = template_entry.as_ref().to_path_buf();
        let template_root = self.template_root.as_ref();

        let relative_entry = template_entry
            .strip_prefix(template_root)
            .map_err(|e| Error::ProcessError {
                source_path: template_entry.display().to_string(),
                e: e.to_string(),
            })?
            .to_path_buf();

        if self.ignored.is_match(template_entry.to_slash_relative(template_root)?) {
            return Ok(TemplateOperation::Ignore { source: template_entry });
        }

        let rendered_entry = self.render_template_entry(&relative_entry)?;
        let target_path = self.output_root.as_ref().join(rendered_entry);

        if !template_entry.is_file() {
            let target_exists = target_path.exists();
            return Ok(TemplateOperation::CreateDirectory { target: target_path, target_exists });
        }

        let target_path = self.remove_template_suffix(&target_path)?;
        let target_exists = target_path.exists();
        match String::from_utf8(fs::read(&template_entry)?) {
            Ok(template_content) => {
                let name = relative_entry.to_str_checked()?;
                let content = self.engine.render(&template_content, self.context, Some(name))?;
                Ok(TemplateOperation::Write { target: target_path, content, target_exists })
            }
            Err(_) => Ok(TemplateOperation::Copy {
                source: template_entry,
                target: target_path,
                target_exists,
            }),
        }
    }
}
