//! Generated files whose layout is too irregular for a plain template
//!
//! Each renderer is a pure function of the canonical configuration. The results
//! are handed to the template tree through the `files` context variable, keyed
//! by their path below the project or package directory. `meson_build` only
//! backs the `sample-meson-build` command.

pub mod bmi_py;
pub mod gitignore;
pub mod init_py;
pub mod lib_init_py;
pub mod license;
pub mod meson_build;

use crate::config::BabelConfig;
use indexmap::IndexMap;

/// Renders every pre-rendered file.
pub fn render_all(config: &BabelConfig, year: i32) -> IndexMap<&'static str, String> {
    let mut files = IndexMap::new();
    files.insert("_bmi.py", bmi_py::render(config));
    files.insert("__init__.py", init_py::render(config));
    files.insert("lib/__init__.py", lib_init_py::render(config));
    files.insert(".gitignore", gitignore::render(config));
    files.insert("LICENSE.rst", license::render(config, year));
    files
}

/// Formats the `__all__` list of a module, entries sorted.
pub(crate) fn all_list<'a, I>(leading: &[&str], names: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let mut entries: Vec<String> =
        names.into_iter().map(|name| format!("    \"{name}\",")).collect();
    entries.sort();
    let leading = leading.iter().map(|name| format!("    \"{name}\",\n")).collect::<String>();
    format!("__all__ = [\n{leading}{}\n]", entries.join("\n"))
}

/// Joins lines after sorting them.
pub(crate) fn sorted_lines(mut lines: Vec<String>) -> String {
    lines.sort();
    lines.join("\n")
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{BabelConfig, Format};

    /// Builds a configuration with one component per `(name, language)`.
    pub fn config_with(components: &[(&str, &str)]) -> BabelConfig {
        let library: String = components
            .iter()
            .map(|(name, language)| {
                let header = if *language == "python" { "__UNUSED__" } else { "bmi_heat.h" };
                format!(
                    "[library.{name}]\nlanguage = \"{language}\"\nlibrary = \"bmi_{lower}\"\n\
                     header = \"{header}\"\nentry_point = \"Bmi{name}\"\n",
                    lower = name.to_lowercase()
                )
            })
            .collect();
        let text = format!(
            r#"{library}
[package]
name = "pymt_heat"
requirements = []

[info]
package_author = "csdms"
package_author_email = "csdms@colorado.edu"
github_username = "pymt-lab"
package_license = "MIT License"
summary = "PyMT plugin for heat"

[ci]
python_version = ["3.12"]
os = ["linux"]
"#
        );
        BabelConfig::from_text(&text, Format::Toml).unwrap()
    }
}
