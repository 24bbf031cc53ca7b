//! Default template tree compiled into the binary

use include_dir::{include_dir, Dir, DirEntry};
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::Result;
use crate::ioutils::{create_dir_all, write_file};

/// How the built-in tree is named in status messages
pub const BUILTIN_NAME: &str = "built-in templates";

static DEFAULT_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// A template tree on disk, ready for [`render_tree`](super::render_tree).
///
/// The built-in tree is unpacked into a temporary directory that lives as long
/// as this value.
#[derive(Debug)]
pub enum TemplateTree {
    Builtin(TempDir),
    Local(PathBuf),
}

impl TemplateTree {
    /// Uses `template` when given, the built-in tree otherwise.
    pub fn resolve(template: Option<&Path>) -> Result<Self> {
        match template {
            Some(template) => Ok(Self::Local(template.to_path_buf())),
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Self> {
        let scratch = tempfile::tempdir()?;
        extract(&DEFAULT_TEMPLATES, scratch.path())?;
        debug!("Unpacked built-in templates into '{}'", scratch.path().display());
        Ok(Self::Builtin(scratch))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Builtin(scratch) => scratch.path(),
            Self::Local(path) => path,
        }
    }

    /// Text for status messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Builtin(_) => BUILTIN_NAME.to_string(),
            Self::Local(path) => path.display().to_string(),
        }
    }
}

/// Text of a single file of the built-in tree, by its relative path.
pub fn builtin_file(path: &str) -> Option<&'static str> {
    DEFAULT_TEMPLATES.get_file(path).and_then(|file| file.contents_utf8())
}

fn extract(dir: &Dir, dest: &Path) -> Result<()> {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => write_file(file.contents(), dest.join(file.path()))?,
            DirEntry::Dir(subdir) => {
                create_dir_all(dest.join(subdir.path()))?;
                extract(subdir, dest)?;
            }
        }
    }
    Ok(())
}
