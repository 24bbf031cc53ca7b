//! Key-set validation of raw configuration mappings

use crate::config::types::{check_component_names, check_define_macro, check_package_name};
use crate::constants::keys;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Compares the keys of a mapping against the required and optional key sets.
///
/// Returns one message per kind of violation (missing keys, unknown keys), each
/// listing every offending key. An empty result means the mapping is valid.
///
/// When `optional` is `None` the mapping must hold exactly the required keys.
pub fn check_keys(
    section: &str,
    map: &Map<String, Value>,
    required: &[&str],
    optional: Option<&[&str]>,
) -> Vec<String> {
    let actual: BTreeSet<&str> = map.keys().map(String::as_str).collect();
    let required: BTreeSet<&str> = required.iter().copied().collect();
    let valid: BTreeSet<&str> = required
        .iter()
        .copied()
        .chain(optional.unwrap_or_default().iter().copied())
        .collect();

    let mut violations = Vec::new();
    let missing: Vec<&str> = required.difference(&actual).copied().collect();
    if !missing.is_empty() {
        violations.push(describe(section, "missing required", &missing));
    }
    let unknown: Vec<&str> = actual.difference(&valid).copied().collect();
    if !unknown.is_empty() {
        violations.push(describe(section, "unknown", &unknown));
    }
    violations
}

fn describe(section: &str, kind: &str, keys: &[&str]) -> String {
    let plural = if keys.len() > 1 { "s" } else { "" };
    format!("{section}: {kind} key{plural}: {}", keys.join(", "))
}

/// Like [`check_keys`], but raises the violations as a single error.
pub fn validate_keys(
    section: &str,
    map: &Map<String, Value>,
    required: &[&str],
    optional: Option<&[&str]>,
) -> Result<()> {
    let violations = check_keys(section, map, required, optional);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError(violations.join("; ")))
    }
}

/// Parses an entry point specifier of the form `name=module:class`.
///
/// # Examples
/// ```
/// use babelizer::config::parse_entry_point;
///
/// let (name, module, class) = parse_entry_point("Foo=bar:Baz").unwrap();
/// assert_eq!((name.as_str(), module.as_str(), class.as_str()), ("Foo", "bar", "Baz"));
/// assert!(parse_entry_point("bar:Baz").is_err());
/// assert!(parse_entry_point("Foo=bar").is_err());
/// ```
pub fn parse_entry_point(specifier: &str) -> Result<(String, String, String)> {
    let bad_specifier = || {
        Error::ValidationError(format!(
            "bad entry point specifier ({specifier}). specifier must be of the form name=module:class"
        ))
    };

    let (name, value) = split_exactly_once(specifier, '=').ok_or_else(bad_specifier)?;
    let (module, class) = split_exactly_once(value, ':').ok_or_else(bad_specifier)?;
    if [name, module, class].iter().any(|part| part.is_empty()) {
        return Err(bad_specifier());
    }
    Ok((name.to_string(), module.to_string(), class.to_string()))
}

fn split_exactly_once(text: &str, separator: char) -> Option<(&str, &str)> {
    let mut parts = text.split(separator);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Some((first.trim(), second.trim())),
        _ => None,
    }
}

/// Whether a `library` block uses the single-entry-point layout that predates
/// named components.
pub fn is_legacy_library_block(library: &Value) -> bool {
    library.as_object().is_some_and(|map| map.contains_key("entry_point"))
}

/// Whether an `info` block uses the deprecated `plugin_*` keys.
pub fn is_legacy_info_block(info: &Value) -> bool {
    info.as_object().is_some_and(|map| map.contains_key("plugin_author"))
}

/// Validates a raw configuration mapping.
///
/// Every violation found is reported in one `Error::ValidationError`, separated by `; `.
pub fn validate(raw: &Value) -> Result<()> {
    let top = raw.as_object().ok_or_else(|| {
        Error::ValidationError("config file does not contain a mapping object".to_string())
    })?;

    let empty = Map::new();
    let mut violations = Vec::new();

    violations.extend(check_keys("config", top, &[], Some(keys::TOP_LEVEL)));

    let library = section(top, "library", &empty, &mut violations);
    if is_legacy_library_block(&Value::Object(library.clone())) {
        validate_legacy_library(library, &mut violations);
    } else {
        if library.is_empty() {
            violations.push("library: at least one component is required".to_string());
        }
        violations.extend(
            check_component_names(library.keys()).into_iter().map(|p| format!("library: {p}")),
        );
        for (name, component) in library {
            match component.as_object() {
                Some(component) => violations.extend(check_keys(
                    &format!("library.{name}"),
                    component,
                    keys::LIBRARY,
                    None,
                )),
                None => violations.push(format!("library.{name}: must be a mapping")),
            }
        }
    }

    let build = section(top, "build", &empty, &mut violations);
    violations.extend(check_keys("build", build, &[], Some(keys::BUILD)));
    if let Some(macros) = build.get("define_macros").and_then(Value::as_array) {
        violations.extend(
            macros
                .iter()
                .filter_map(Value::as_str)
                .filter_map(check_define_macro)
                .map(|problem| format!("build: {problem}")),
        );
    }

    let package_key = match (top.contains_key("package"), top.contains_key("plugin")) {
        (true, true) => {
            violations.push("specify one of 'package' or 'plugin', not both".to_string());
            "package"
        }
        (false, true) => "plugin",
        _ => "package",
    };
    let package = section(top, package_key, &empty, &mut violations);
    violations.extend(check_keys(package_key, package, keys::PACKAGE, None));
    if let Some(problem) = package.get("name").and_then(Value::as_str).and_then(check_package_name)
    {
        violations.push(format!("{package_key}: {problem}"));
    }

    let ci = section(top, "ci", &empty, &mut violations);
    violations.extend(check_keys("ci", ci, keys::CI, None));

    let info = section(top, "info", &empty, &mut violations);
    let current = check_keys("info", info, keys::INFO, None);
    if !current.is_empty() && !check_keys("info", info, keys::LEGACY_INFO, None).is_empty() {
        violations.extend(current);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError(violations.join("; ")))
    }
}

fn section<'a>(
    top: &'a Map<String, Value>,
    name: &str,
    empty: &'a Map<String, Value>,
    violations: &mut Vec<String>,
) -> &'a Map<String, Value> {
    match top.get(name) {
        None => empty,
        Some(Value::Object(map)) => map,
        Some(_) => {
            violations.push(format!("{name}: must be a mapping"));
            empty
        }
    }
}

fn validate_legacy_library(library: &Map<String, Value>, violations: &mut Vec<String>) {
    violations.extend(check_keys("library", library, keys::LEGACY_LIBRARY, None));

    let entry_points = match library.get("entry_point") {
        Some(Value::String(one)) => vec![Some(one.as_str())],
        Some(Value::Array(many)) => many.iter().map(Value::as_str).collect(),
        _ => vec![None],
    };
    if entry_points.is_empty() {
        violations.push("library: at least one entry point is required".to_string());
    }
    for entry_point in entry_points {
        match entry_point {
            Some(specifier) if parse_entry_point(specifier).is_ok() => {}
            Some(specifier) => {
                violations.push(format!("library: poorly-formed entry point ({specifier})"))
            }
            None => violations.push("library: entry points must be strings".to_string()),
        }
    }
}
