//! Canonical configuration types

use crate::constants::UNUSED_HEADER;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

/// Language a wrapped library is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c++")]
    Cxx,
    #[serde(rename = "fortran")]
    Fortran,
    #[serde(rename = "python")]
    Python,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "c++",
            Language::Fortran => "fortran",
            Language::Python => "python",
        }
    }

    /// Extension appended to a module name to guess its header (old-style configs only).
    pub fn header_extension(&self) -> &'static str {
        match self {
            Language::C => ".h",
            Language::Cxx => ".hxx",
            Language::Fortran | Language::Python => "",
        }
    }

    /// Header recorded for a module when the config does not name one.
    pub fn default_header(&self, module: &str) -> String {
        match self {
            Language::Python => UNUSED_HEADER.to_string(),
            _ => format!("{module}{}", self.header_extension()),
        }
    }

    /// Whether the generated package contains compiled extension modules.
    pub fn is_compiled(&self) -> bool {
        !matches!(self, Language::Python)
    }

    /// Name of the cython source in `lib/` holding one section per component.
    pub fn cython_source(&self) -> Option<&'static str> {
        match self {
            Language::C => Some("_c.pyx"),
            Language::Cxx => Some("_cxx.pyx"),
            Language::Fortran => Some("_fortran.pyx"),
            Language::Python => None,
        }
    }

    /// Files in `lib/` that the wrapper for this language needs besides the split sources.
    pub fn support_files(&self) -> &'static [&'static str] {
        match self {
            Language::C => &["__init__.py", "bmi.c", "bmi.h"],
            Language::Cxx => &["__init__.py", "bmi.hxx"],
            Language::Fortran => &[
                "__init__.py",
                "bmi.f90",
                "bmi_interoperability.f90",
                "bmi_interoperability.h",
            ],
            Language::Python => &[],
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "c" => Ok(Language::C),
            "c++" => Ok(Language::Cxx),
            "fortran" => Ok(Language::Fortran),
            "python" => Ok(Language::Python),
            other => Err(Error::ValidationError(format!(
                "unknown language ({other}), expected one of c, c++, fortran, python"
            ))),
        }
    }
}

/// A single wrapped component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Library {
    pub language: Language,
    /// Linker name of the library (module name for python)
    pub library: String,
    pub header: String,
    /// Registration function or class implementing the BMI
    pub entry_point: String,
}

/// User-specified compiler flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Build {
    #[serde(default)]
    pub undef_macros: Vec<String>,
    #[serde(default)]
    pub define_macros: Vec<String>,
    #[serde(default)]
    pub libraries: Vec<String>,
    #[serde(default)]
    pub library_dirs: Vec<String>,
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub extra_compile_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Package {
    pub name: String,
    pub requirements: BTreeSet<String>,
}

/// Descriptive information about the generated package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Info {
    pub package_author: String,
    pub package_author_email: String,
    pub github_username: String,
    pub package_license: String,
    pub summary: String,
}

/// Continuous integration matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ci {
    pub python_version: BTreeSet<String>,
    pub os: BTreeSet<String>,
}

impl Ci {
    pub const ALL_PLATFORMS: &'static [&'static str] = &["linux", "mac", "windows"];

    /// Builds the matrix, expanding the `all` platform shorthand.
    pub fn new<V, O>(python_version: V, os: O) -> Self
    where
        V: IntoIterator<Item = String>,
        O: IntoIterator<Item = String>,
    {
        let os = os
            .into_iter()
            .flat_map(|name| {
                if name == "all" {
                    Self::ALL_PLATFORMS.iter().map(|s| s.to_string()).collect()
                } else {
                    vec![name]
                }
            })
            .collect();
        Self { python_version: python_version.into_iter().collect(), os }
    }

    /// GitHub Actions runner names for the configured platforms.
    pub fn runners(&self) -> Vec<String> {
        self.os.iter().map(|name| runner_name(name)).collect()
    }
}

fn runner_name(name: &str) -> String {
    let name = match name {
        "linux" => "ubuntu",
        "mac" => "macos",
        other => other,
    };
    if name.ends_with("-latest") {
        name.to_string()
    } else {
        format!("{name}-latest")
    }
}

/// The canonical, validated configuration of a wrap request.
///
/// Instances only come out of [`BabelConfig::new`], which enforces the invariants
/// every renderer relies on. There are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BabelConfig {
    library: IndexMap<String, Library>,
    build: Build,
    package: Package,
    info: Info,
    ci: Ci,
}

impl BabelConfig {
    pub fn new(
        library: IndexMap<String, Library>,
        build: Build,
        package: Package,
        info: Info,
        ci: Ci,
    ) -> Result<Self> {
        let mut violations = Vec::new();
        if library.is_empty() {
            violations.push("library: at least one component is required".to_string());
        }
        violations.extend(
            check_component_names(library.keys()).into_iter().map(|p| format!("library: {p}")),
        );
        if let Some(problem) = check_package_name(&package.name) {
            violations.push(format!("package: {problem}"));
        }
        violations.extend(
            build
                .define_macros
                .iter()
                .filter_map(|m| check_define_macro(m))
                .map(|problem| format!("build: {problem}")),
        );
        if !violations.is_empty() {
            return Err(Error::ValidationError(violations.join("; ")));
        }
        Ok(Self { library, build, package, info, ci })
    }

    /// Components in the order they appear in the configuration.
    pub fn library(&self) -> &IndexMap<String, Library> {
        &self.library
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn package_name(&self) -> &str {
        &self.package.name
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn ci(&self) -> &Ci {
        &self.ci
    }

    /// The single language of the package: the language of the first component.
    pub fn language(&self) -> Language {
        self.library
            .values()
            .next()
            .map(|component| component.language)
            .unwrap_or(Language::C)
    }

    pub fn has_language(&self, language: Language) -> bool {
        self.library.values().any(|c| c.language == language)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns a description of what is wrong with a package name, if anything.
pub fn check_package_name(name: &str) -> Option<String> {
    if is_identifier(name) {
        None
    } else {
        Some(format!("package name ({name}) is not a valid module name"))
    }
}

/// Returns what is wrong with a set of component names.
///
/// Each name becomes a python class and, lowercased, the name of its extension
/// module, so names must be identifiers that stay distinct when lowercased.
pub fn check_component_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut problems = Vec::new();
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for name in names {
        if !is_identifier(name) {
            problems.push(format!("component name ({name}) is not a valid class name"));
        }
        match seen.entry(name.to_lowercase()) {
            Entry::Occupied(first) => problems.push(format!(
                "component names ({}, {name}) differ only by case",
                first.get()
            )),
            Entry::Vacant(slot) => {
                slot.insert(name);
            }
        }
    }
    problems
}

/// Returns a description of what is wrong with a `define_macros` entry, if anything.
pub fn check_define_macro(definition: &str) -> Option<String> {
    match definition.split_once('=') {
        Some((key, _)) if !key.trim().is_empty() => None,
        _ => Some(format!(
            "poorly-formed macro definition ({definition}). definition must be of the form key=value"
        )),
    }
}
