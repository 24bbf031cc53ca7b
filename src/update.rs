//! Re-generation of an existing project
//!
//! An update runs through these stages, the first failure aborting the rest:
//! locate the metadata file, load it, pick a version, re-render the project
//! while keeping the hand-written files, and report files the templates do not
//! account for. Nothing is ever deleted.

use log::info;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::BabelConfig;
use crate::constants::{
    DEFAULT_UPDATE_EXCLUDES, FALLBACK_VERSION, METADATA_FILENAMES, PRESERVED_FILES,
};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::ignore::build_globset;
use crate::ioutils::SavedFiles;
use crate::render::render;
use crate::template::TemplateTree;
use crate::{vcs, version};

#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub project_path: PathBuf,
    /// Template tree to render, the built-in one when `None`
    pub template: Option<PathBuf>,
    /// Version to use instead of the one reported by the project
    pub set_version: Option<String>,
    /// Globs of paths never reported as extra files
    pub exclude: Vec<String>,
}

impl UpdateOptions {
    pub fn new<P: Into<PathBuf>>(project_path: P) -> Self {
        Self {
            project_path: project_path.into(),
            template: None,
            set_version: None,
            exclude: DEFAULT_UPDATE_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub project_path: PathBuf,
    pub version: String,
    /// Files of the project, relative and `/` separated, that a fresh render would not produce
    pub extra_files: BTreeSet<String>,
}

/// Finds the metadata file of a generated project, newest name first.
pub fn locate_metadata(project_path: &Path) -> Result<PathBuf> {
    METADATA_FILENAMES
        .iter()
        .map(|name| project_path.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::MetadataNotFoundError {
            project_dir: project_path.display().to_string(),
            metadata_files: METADATA_FILENAMES.join(", "),
        })
}

/// Re-renders an existing project and reports the files it does not account for.
pub fn update(options: &UpdateOptions) -> Result<UpdateReport> {
    let metadata_path = locate_metadata(&options.project_path)?;
    let project_path = options.project_path.canonicalize()?;
    info!("Reading metadata from '{}'", metadata_path.display());

    let config = BabelConfig::from_path(&metadata_path)?;

    let version = match &options.set_version {
        Some(version) => version.clone(),
        None => version::introspect(&project_path)?
            .unwrap_or_else(|| FALLBACK_VERSION.to_string()),
    };
    info!("Re-rendering '{}' at version {version}", project_path.display());

    let templates = TemplateTree::resolve(options.template.as_deref())?;
    let saved = SavedFiles::snapshot(&project_path, PRESERVED_FILES)?;
    for name in saved.names() {
        info!("Keeping '{name}'");
    }
    render(&config, &project_path, templates.path(), true, &version)?;
    saved.restore()?;

    let excluded = build_globset(&options.exclude)?;
    let generated = generated_files(&config, templates.path(), &version)?;
    let extra_files = vcs::list_files(&project_path)?
        .into_iter()
        .filter(|name| !generated.contains(name) && !excluded.is_match(name))
        .collect();

    Ok(UpdateReport { project_path, version, extra_files })
}

/// Files produced by rendering the configuration into a scratch directory.
fn generated_files(
    config: &BabelConfig,
    template_root: &Path,
    version: &str,
) -> Result<BTreeSet<String>> {
    let scratch = tempfile::tempdir()?;
    let output = scratch.path().join(config.package_name());
    let output = render(config, &output, template_root, false, version)?;

    let mut files = BTreeSet::new();
    let entries = WalkDir::new(&output).min_depth(1).into_iter();
    for entry in entries.filter_entry(|e| e.file_name() != ".git") {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            files.insert(entry.path().to_slash_relative(&output)?);
        }
    }
    Ok(files)
}
