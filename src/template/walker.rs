use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ignore::template_ignore;
use crate::ioutils::{copy_file, create_dir_all, write_file};
use crate::renderer::TemplateRenderer;

use super::operation::TemplateOperation;
use super::processor::TemplateProcessor;

/// Expands a template tree into `output_root`.
///
/// Directory names, file names and file contents are all rendered against
/// `context`. Output directories are created as needed and existing files are
/// overwritten. The first failure aborts the walk.
///
/// # Returns
/// * `Result<usize>` - Number of files written
pub fn render_tree(
    renderer: &dyn TemplateRenderer,
    template_root: &Path,
    context: &serde_json::Value,
    output_root: &Path,
) -> Result<usize> {
    if !template_root.is_dir() {
        return Err(Error::RenderError(format!(
            "template directory '{}' does not exist",
            template_root.display()
        )));
    }

    let ignored = template_ignore()?;
    let processor = TemplateProcessor::new(
        renderer,
        template_root.to_path_buf(),
        output_root.to_path_buf(),
        context,
        &ignored,
    );

    create_dir_all(output_root)?;
    let mut written = 0;
    let mut entries = WalkDir::new(template_root).min_depth(1).sort_by_file_name().into_iter();
    while let Some(dir_entry) = entries.next() {
        let dir_entry = dir_entry?;
        let operation = processor.process(dir_entry.path().to_path_buf())?;
        if let TemplateOperation::Ignore { .. } = operation {
            debug!("{}", operation.get_message());
            if dir_entry.file_type().is_dir() {
                entries.skip_current_dir();
            }
            continue;
        }

        apply(&operation).map_err(|e| Error::ProcessError {
            source_path: dir_entry.path().display().to_string(),
            e: format!("failed to {}: {e}", operation.error_context()),
        })?;
        info!("{}", operation.get_message());
        if matches!(operation, TemplateOperation::Write { .. } | TemplateOperation::Copy { .. }) {
            written += 1;
        }
    }
    Ok(written)
}

/// Performs a single operation on the filesystem.
fn apply(operation: &TemplateOperation) -> Result<()> {
    debug!("Handling file operation: {operation:?}");
    match operation {
        TemplateOperation::Write { target, content, .. } => write_file(content, target),
        TemplateOperation::Copy { source, target, .. } => copy_file(source, target),
        TemplateOperation::CreateDirectory { target, .. } => create_dir_all(target),
        TemplateOperation::Ignore { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MiniJinjaRenderer;
    use serde_json::json;
    use tempfile::TempDir;

    fn template_tree() -> TempDir {
        let root = TempDir::new().unwrap();
        let package = root.path().join("{{ package.name }}");
        std::fs::create_dir_all(package.join("lib")).unwrap();
        std::fs::create_dir_all(root.path().join("__pycache__")).unwrap();
        std::fs::write(root.path().join("__pycache__").join("x.pyc"), "{{ nope }}").unwrap();
        std::fs::write(root.path().join("README.rst.jinja"), "{{ package.name }}\n").unwrap();
        std::fs::write(package.join("__init__.py"), "{{ files['__init__.py'] }}").unwrap();
        std::fs::write(package.join("lib").join("{{ package.name }}.pyx.j2"), "# lib\n").unwrap();
        root
    }

    #[test]
    fn renders_names_and_contents() {
        let templates = template_tree();
        let output = TempDir::new().unwrap();
        let context = json!({
            "package": {"name": "heat_model"},
            "files": {"__init__.py": "__all__ = []\n"}
        });

        let renderer = MiniJinjaRenderer::new();
        let written = render_tree(&renderer, templates.path(), &context, output.path()).unwrap();

        assert_eq!(written, 3);
        let read = |path: &str| std::fs::read_to_string(output.path().join(path)).unwrap();
        assert_eq!(read("README.rst"), "heat_model\n");
        assert_eq!(read("heat_model/__init__.py"), "__all__ = []\n");
        assert_eq!(read("heat_model/lib/heat_model.pyx"), "# lib\n");
        assert!(!output.path().join("__pycache__").exists());
    }

    #[test]
    fn rerender_overwrites_and_keeps_other_files() {
        let templates = template_tree();
        let output = TempDir::new().unwrap();
        std::fs::write(output.path().join("notes.txt"), "mine").unwrap();
        std::fs::write(output.path().join("README.rst"), "stale").unwrap();
        let context = json!({"package": {"name": "heat_model"}, "files": {"__init__.py": ""}});

        let renderer = MiniJinjaRenderer::new();
        render_tree(&renderer, templates.path(), &context, output.path()).unwrap();

        let readme = std::fs::read_to_string(output.path().join("README.rst")).unwrap();
        assert_eq!(readme, "heat_model\n");
        assert!(output.path().join("notes.txt").exists());
    }

    #[test]
    fn undefined_variable_fails_the_render() {
        let templates = template_tree();
        let output = TempDir::new().unwrap();

        let renderer = MiniJinjaRenderer::new();
        let result =
            render_tree(&renderer, templates.path(), &json!({"package": {}}), output.path());
        assert!(matches!(result, Err(Error::MinijinjaError(_))));
    }

    #[test]
    fn missing_template_root_is_a_render_error() {
        let output = TempDir::new().unwrap();
        let renderer = MiniJinjaRenderer::new();
        let result =
            render_tree(&renderer, &output.path().join("nope"), &json!({}), output.path());
        assert!(matches!(result, Err(Error::RenderError(_))));
    }
}
