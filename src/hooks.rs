use indexmap::IndexMap;
use log::{debug, info};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::{BabelConfig, Language};
use crate::error::{Error, Result};

/// Line that opens a new section of a combined cython source.
const SPLIT_START_PATTERN: &str = r"^\s*#\s*start:\s*(?P<fname>\S+)";

/// Name of the directory holding per-component metadata.
pub const META_DIR: &str = "meta";

/// Content of `meta/<Component>/api.yaml`.
#[derive(Serialize)]
struct ApiYaml<'a> {
    name: &'a str,
    language: &'a str,
    package: &'a str,
    class: &'a str,
}

/// Finishes a freshly rendered project.
///
/// # Arguments
/// * `project_dir` - Root of the rendered project
/// * `config` - Configuration the project was rendered from
///
/// # Notes
/// - The combined cython source of the package language is split into one file per component
/// - Files in `lib/` that the language does not need are removed
/// - `meson.build` is removed from pure python packages
/// - `meta/<Component>/api.yaml` is written unless it already exists
/// - `<package>/data` is linked to `../meta` (unix only)
pub fn run_post_generation(project_dir: &Path, config: &BabelConfig) -> Result<()> {
    let language = config.language();
    let package_dir = project_dir.join(config.package_name());
    let lib_dir = package_dir.join("lib");

    let mut keep: BTreeSet<String> =
        language.support_files().iter().map(|name| name.to_string()).collect();
    if let Some(source) = language.cython_source() {
        let source = lib_dir.join(source);
        if !source.is_file() {
            return Err(Error::RenderError(format!(
                "the template did not produce '{}'",
                source.display()
            )));
        }
        keep.extend(split_file(&source, true)?);
    }
    clean_folder(&lib_dir, &keep)?;

    if language == Language::Python {
        let meson_build = project_dir.join("meson.build");
        if meson_build.exists() {
            debug!("Removing '{}'", meson_build.display());
            std::fs::remove_file(meson_build)?;
        }
    }

    link_data_dir(&package_dir)?;

    for (name, component) in config.library() {
        write_api_yaml(
            &project_dir.join(META_DIR).join(name),
            config.package_name(),
            component.language,
            name,
        )?;
    }
    Ok(())
}

/// Splits a file on `# start: <name>` marker lines, writing each section next to it.
///
/// Lines before the first marker form the preamble, which is prepended to every
/// section when `include_preamble` is set. Sections are written with surrounding
/// whitespace trimmed and a single trailing newline.
///
/// # Returns
/// * `Result<BTreeSet<String>>` - Names of the files written
pub fn split_file(filepath: &Path, include_preamble: bool) -> Result<BTreeSet<String>> {
    let split_start = Regex::new(SPLIT_START_PATTERN)?;
    let text = std::fs::read_to_string(filepath)?;

    let mut preamble = String::new();
    let mut sections: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<String> = None;
    for line in text.split_inclusive('\n') {
        if let Some(captures) = split_start.captures(line) {
            current = Some(captures["fname"].to_string());
        }
        match &current {
            Some(name) => sections.entry(name.clone()).or_default().push_str(line),
            None => preamble.push_str(line),
        }
    }

    let folderpath = filepath.parent().unwrap_or_else(|| Path::new("."));
    for (name, contents) in &sections {
        let target = folderpath.join(name);
        debug!("Writing section '{}'", target.display());
        let mut out = if include_preamble { preamble.clone() } else { String::new() };
        out.push_str(contents.trim());
        out.push('\n');
        std::fs::write(target, out)?;
    }
    Ok(sections.into_keys().collect())
}

/// Removes the files of a directory that are not listed in `keep`, then removes the
/// directory itself if nothing is left. Subdirectories are left alone.
pub fn clean_folder(folderpath: &Path, keep: &BTreeSet<String>) -> Result<()> {
    if !folderpath.is_dir() {
        return Ok(());
    }

    for entry in std::fs::read_dir(folderpath)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !keep.contains(&name) {
            debug!("Removing '{}'", entry.path().display());
            std::fs::remove_file(entry.path())?;
        }
    }

    if std::fs::read_dir(folderpath)?.next().is_none() {
        std::fs::remove_dir(folderpath)?;
    }
    Ok(())
}

/// Writes `api.yaml` into `folderpath` unless one is already there.
///
/// # Returns
/// * `Result<PathBuf>` - Path of the metadata file
pub fn write_api_yaml(
    folderpath: &Path,
    package_name: &str,
    language: Language,
    class: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(folderpath)?;

    let api_yaml = folderpath.join("api.yaml");
    if api_yaml.exists() {
        debug!("Keeping existing '{}'", api_yaml.display());
        return Ok(api_yaml);
    }

    let contents = serde_yaml::to_string(&ApiYaml {
        name: package_name,
        language: language.as_str(),
        package: package_name,
        class,
    })?;
    std::fs::write(&api_yaml, contents)?;
    info!("Wrote '{}'", api_yaml.display());
    Ok(api_yaml)
}

#[cfg(unix)]
fn link_data_dir(package_dir: &Path) -> Result<()> {
    let data_dir = package_dir.join("data");
    if data_dir.symlink_metadata().is_err() {
        debug!("Linking '{}' to ../{META_DIR}", data_dir.display());
        std::os::unix::fs::symlink(Path::new("..").join(META_DIR), data_dir)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn link_data_dir(package_dir: &Path) -> Result<()> {
    debug!("Not linking '{}' to ../{META_DIR} on this platform", package_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COMBINED: &str = "# cython: language_level=3\nimport numpy as np\n\n\
                            # start: heat.pyx\ncdef class Heat:\n    pass\n\n\n\
                            # start: cool.pyx\ncdef class Cool:\n    pass\n";

    #[test]
    fn split_file_writes_one_file_per_section() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("_c.pyx");
        std::fs::write(&source, COMBINED).unwrap();

        let names = split_file(&source, true).unwrap();

        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["cool.pyx", "heat.pyx"]);
        let heat = std::fs::read_to_string(dir.path().join("heat.pyx")).unwrap();
        assert_eq!(
            heat,
            "# cython: language_level=3\nimport numpy as np\n\n# start: heat.pyx\ncdef class Heat:\n    pass\n"
        );
        let cool = std::fs::read_to_string(dir.path().join("cool.pyx")).unwrap();
        assert!(cool.ends_with("# start: cool.pyx\ncdef class Cool:\n    pass\n"));
    }

    #[test]
    fn split_file_without_preamble() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("_c.pyx");
        std::fs::write(&source, COMBINED).unwrap();

        split_file(&source, false).unwrap();
        let heat = std::fs::read_to_string(dir.path().join("heat.pyx")).unwrap();
        assert!(heat.starts_with("# start: heat.pyx"));
    }

    #[test]
    fn clean_folder_keeps_listed_files_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("lib");
        std::fs::create_dir_all(lib.join("sub")).unwrap();
        for name in ["__init__.py", "heat.pyx", "_c.pyx", "bmi.hxx"] {
            std::fs::write(lib.join(name), "").unwrap();
        }
        let keep = ["__init__.py", "heat.pyx"].iter().map(|s| s.to_string()).collect();

        clean_folder(&lib, &keep).unwrap();

        assert!(lib.join("__init__.py").exists());
        assert!(lib.join("heat.pyx").exists());
        assert!(!lib.join("_c.pyx").exists());
        assert!(!lib.join("bmi.hxx").exists());
        assert!(lib.join("sub").exists());
    }

    #[test]
    fn clean_folder_removes_emptied_directory() {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("lib");
        std::fs::create_dir_all(&lib).unwrap();
        std::fs::write(lib.join("_c.pyx"), "").unwrap();

        clean_folder(&lib, &BTreeSet::new()).unwrap();
        assert!(!lib.exists());
    }

    #[test]
    fn api_yaml_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let meta = dir.path().join("meta").join("Heat");

        let path = write_api_yaml(&meta, "heat_model", Language::C, "Heat").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "name: heat_model\nlanguage: c\npackage: heat_model\nclass: Heat\n");

        std::fs::write(&path, "edited\n").unwrap();
        write_api_yaml(&meta, "heat_model", Language::C, "Heat").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "edited\n");
    }

    #[test]
    fn api_yaml_records_the_component_language() {
        let config = crate::files::test_support::config_with(&[("Heat", "python")]);
        let project = TempDir::new().unwrap();
        std::fs::create_dir_all(project.path().join("pymt_heat")).unwrap();

        run_post_generation(project.path(), &config).unwrap();

        let api = std::fs::read_to_string(project.path().join("meta/Heat/api.yaml")).unwrap();
        assert_eq!(api, "name: pymt_heat\nlanguage: python\npackage: pymt_heat\nclass: Heat\n");
    }
}
