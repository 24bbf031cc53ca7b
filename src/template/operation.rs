use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum TemplateOperation {
    /// A file whose content is not text, copied as is.
    Copy { source: PathBuf, target: PathBuf, target_exists: bool },
    Write { target: PathBuf, content: String, target_exists: bool },
    CreateDirectory { target: PathBuf, target_exists: bool },
    Ignore { source: PathBuf },
}

impl TemplateOperation {
    /// Returns the target path for this operation, used for error context.
    ///
    /// # Returns
    /// * `Option<&PathBuf>` - The target path, or None for ignored entries
    pub fn target_path(&self) -> Option<&PathBuf> {
        match self {
            TemplateOperation::Copy { target, .. } => Some(target),
            TemplateOperation::Write { target, .. } => Some(target),
            TemplateOperation::CreateDirectory { target, .. } => Some(target),
            TemplateOperation::Ignore { .. } => None,
        }
    }

    /// Returns a brief description of this operation for error messages.
    pub fn error_context(&self) -> String {
        match self {
            TemplateOperation::Copy { source, target, .. } => {
                format!("copy '{}' -> '{}'", source.display(), target.display())
            }
            TemplateOperation::Write { target, .. } => {
                format!("write '{}'", target.display())
            }
            TemplateOperation::CreateDirectory { target, .. } => {
                format!("create directory '{}'", target.display())
            }
            TemplateOperation::Ignore { source } => {
                format!("ignore '{}'", source.display())
            }
        }
    }

    /// Gets a message describing the operation and its status.
    pub fn get_message(&self) -> String {
        match self {
            TemplateOperation::Copy { source, target, target_exists } => {
                let suffix = if *target_exists { " (overwriting existing file)" } else { "" };
                format!("Copying '{}' to '{}'{suffix}", source.display(), target.display())
            }
            TemplateOperation::CreateDirectory { target, target_exists } => {
                if *target_exists {
                    format!("Skipping directory creation '{}' (already exists)", target.display())
                } else {
                    format!("Creating directory '{}'", target.display())
                }
            }
            TemplateOperation::Write { target, target_exists, .. } => {
                let suffix = if *target_exists { " (overwriting existing file)" } else { "" };
                format!("Writing to '{}'{suffix}", target.display())
            }
            TemplateOperation::Ignore { source } => {
                format!("Ignoring '{}' (matches ignore pattern)", source.display())
            }
        }
    }
}
