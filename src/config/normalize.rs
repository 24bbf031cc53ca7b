//! Conversion of validated raw mappings into the canonical [`BabelConfig`]
//!
//! Old-style inputs are expanded by dedicated functions before the typed
//! conversion, so both shapes converge on [`BabelConfig::new`].

use crate::config::types::{BabelConfig, Build, Ci, Info, Language, Library, Package};
use crate::config::validation::{is_legacy_info_block, is_legacy_library_block, parse_entry_point};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// `entry_point` of an old-style library block: one specifier or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntryPoints {
    One(String),
    Many(Vec<String>),
}

impl EntryPoints {
    fn into_vec(self) -> Vec<String> {
        match self {
            EntryPoints::One(one) => vec![one],
            EntryPoints::Many(many) => many,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LegacyLibrary {
    language: Language,
    entry_point: EntryPoints,
}

#[derive(Debug, Deserialize)]
struct LegacyInfo {
    plugin_author: String,
    plugin_author_email: String,
    github_username: String,
    plugin_license: String,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawCi {
    python_version: Vec<String>,
    os: Vec<String>,
}

/// Builds the canonical configuration from a raw mapping that passed [`validate`].
///
/// [`validate`]: crate::config::validate
pub fn normalize(raw: &Value) -> Result<BabelConfig> {
    let empty = Value::Object(Map::new());

    let library = raw.get("library").unwrap_or(&empty);
    let library = if is_legacy_library_block(library) {
        normalize_legacy_library(library)?
    } else {
        normalize_library(library)?
    };

    let build: Build = match raw.get("build") {
        Some(build) => typed("build", build)?,
        None => Build::default(),
    };

    let package = match (raw.get("package"), raw.get("plugin")) {
        (Some(package), _) => package,
        (None, Some(plugin)) => {
            warn!("the 'plugin' section is deprecated, use 'package' instead");
            plugin
        }
        (None, None) => {
            return Err(Error::ValidationError("package: section is required".to_string()))
        }
    };
    let package: Package = typed("package", package)?;

    let info = raw.get("info").unwrap_or(&empty);
    let info = if is_legacy_info_block(info) {
        normalize_legacy_info(info)?
    } else {
        typed("info", info)?
    };

    let ci: RawCi = typed("ci", raw.get("ci").unwrap_or(&empty))?;
    let ci = Ci::new(ci.python_version, ci.os);

    BabelConfig::new(library, build, package, info, ci)
}

/// Converts a mapping of named components.
pub fn normalize_library(library: &Value) -> Result<IndexMap<String, Library>> {
    typed("library", library)
}

/// Expands an old-style block (`language` plus `Name=module:Class` specifiers)
/// into one component per specifier.
///
/// The module becomes the library name and, with the language's header extension,
/// the header name.
pub fn normalize_legacy_library(library: &Value) -> Result<IndexMap<String, Library>> {
    let legacy: LegacyLibrary = typed("library", library)?;

    legacy
        .entry_point
        .into_vec()
        .iter()
        .map(|specifier| {
            let (name, module, class) = parse_entry_point(specifier).map_err(|_| {
                Error::ValidationError(format!("library: poorly-formed entry point ({specifier})"))
            })?;
            let component = Library {
                language: legacy.language,
                header: legacy.language.default_header(&module),
                library: module,
                entry_point: class,
            };
            Ok((name, component))
        })
        .collect()
}

/// Remaps the deprecated `plugin_*` keys of the `info` section.
pub fn normalize_legacy_info(info: &Value) -> Result<Info> {
    warn!("the 'plugin_*' keys of the 'info' section are deprecated, use 'package_*' instead");

    let legacy: LegacyInfo = typed("info", info)?;
    Ok(Info {
        package_author: legacy.plugin_author,
        package_author_email: legacy.plugin_author_email,
        github_username: legacy.github_username,
        package_license: legacy.plugin_license,
        summary: legacy.summary,
    })
}

fn typed<T: DeserializeOwned>(section: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| Error::ValidationError(format!("{section}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_library_expands_per_specifier() {
        let library = normalize_legacy_library(&json!({
            "language": "c++",
            "entry_point": ["Heat=bmi_heat:BmiHeat", "Cool=bmi_cool:BmiCool"]
        }))
        .unwrap();

        let names: Vec<_> = library.keys().cloned().collect();
        assert_eq!(names, vec!["Heat", "Cool"]);
        assert_eq!(
            library["Heat"],
            Library {
                language: Language::Cxx,
                library: "bmi_heat".to_string(),
                header: "bmi_heat.hxx".to_string(),
                entry_point: "BmiHeat".to_string(),
            }
        );
    }

    #[test]
    fn legacy_library_accepts_a_single_specifier() {
        let library = normalize_legacy_library(&json!({
            "language": "fortran",
            "entry_point": "Heat=bmiheatf:bmi_heat"
        }))
        .unwrap();
        assert_eq!(library["Heat"].header, "bmiheatf");
    }

    #[test]
    fn legacy_python_header_is_unused() {
        let library = normalize_legacy_library(&json!({
            "language": "python",
            "entry_point": "Heat=heat:BmiHeat"
        }))
        .unwrap();
        assert_eq!(library["Heat"].header, crate::constants::UNUSED_HEADER);
    }

    #[test]
    fn legacy_info_is_remapped() {
        let info = normalize_legacy_info(&json!({
            "plugin_author": "csdms",
            "plugin_author_email": "csdms@colorado.edu",
            "github_username": "pymt-lab",
            "plugin_license": "MIT License",
            "summary": "Heat"
        }))
        .unwrap();
        assert_eq!(info.package_author, "csdms");
        assert_eq!(info.package_license, "MIT License");
    }

    #[test]
    fn unknown_language_is_a_validation_error() {
        let err = normalize_library(&json!({
            "Heat": {"language": "java", "library": "h", "header": "h", "entry_point": "e"}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::ValidationError(message) if message.starts_with("library:")));
    }

    #[test]
    fn wrong_value_type_is_a_validation_error() {
        let err = typed::<Package>("package", &json!({"name": 42, "requirements": []}))
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
