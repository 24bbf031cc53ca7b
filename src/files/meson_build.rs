//! Stand-alone `meson.build` for a set of cython extensions

use std::collections::BTreeMap;

use crate::error::{Error, Result};

const PREAMBLE: &str = "project(
    'package_name',
    'c',
    'cython',
    version: '0.1.0',
)

py_mod = import('python')
py = py_mod.find_installation(pure: false)
py_dep = py.dependency()

numpy_inc = run_command(
    py,
    ['-c', 'import numpy; print(numpy.get_include())'],
    check: true,
).stdout().strip()";

const DATA_FILES: &str = "# Install data files.
# install_subdir(
#     'data/',
#     install_dir: py.get_install_dir() / 'package_name/data',
# )

# This is a temporary fix for editable installs.
# run_command('cp', '-r', 'data/', 'build')";

/// Renders a `meson.build` that builds each `.pyx` of `extensions` and installs
/// the files of `install`, grouped by directory.
///
/// Paths are `/` separated.
///
/// # Errors
/// * `Error::ValidationError` - an extension is not a `.pyx` file
pub fn render<S: AsRef<str>>(extensions: &[S], install: &[S]) -> Result<String> {
    let mut blocks = vec![PREAMBLE.to_string()];

    let install = install_block(install);
    if !install.is_empty() {
        blocks.push(install);
    }

    let modules = extensions
        .iter()
        .map(|path| extension_module(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    if !modules.is_empty() {
        blocks.push(modules.join("\n"));
    }

    blocks.push(DATA_FILES.to_string());
    Ok(blocks.join("\n\n"))
}

fn split(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

fn install_block<S: AsRef<str>>(install: &[S]) -> String {
    let mut by_dir: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for path in install {
        let path = path.as_ref();
        by_dir.entry(split(path).0).or_default().push(format!("        '{path}',"));
    }

    by_dir
        .into_iter()
        .map(|(subdir, mut lines)| {
            lines.sort();
            format!(
                "py.install_sources(\n    [\n{}\n    ],\n    subdir: '{subdir}',\n)",
                lines.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn extension_module(path: &str) -> Result<String> {
    let root = path.strip_suffix(".pyx").ok_or_else(|| {
        Error::ValidationError(format!("{path} does not appear to be a cython file"))
    })?;
    let module = root.replace('/', ".");
    let dir = split(path).0;

    Ok(format!(
        "py.extension_module(
    '{module}',
    ['{path}'],
    include_directories: [
        '{dir}',
        numpy_inc,
    ],
    dependencies: [
        py.dependency(),
        # Dependencies required to build the extension.
        # dependency('another_package', method : 'pkg-config'),
    ],
    install: true,
    subdir: '{dir}',
)"
    ))
}
