//! Generation of a wrapped package from a configuration

use chrono::{DateTime, Datelike, FixedOffset, Local};
use log::info;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use crate::config::{BabelConfig, Format};
use crate::constants::METADATA_FILENAME;
use crate::error::{Error, Result};
use crate::files;
use crate::hooks::run_post_generation;
use crate::ioutils::{get_output_dir, write_file};
use crate::renderer::MiniJinjaRenderer;
use crate::template::render_tree;
use crate::vcs;

/// Builds the variables available to the template tree.
///
/// Every configuration section is available under its own name, next to:
/// - `components`: the `library` section again
/// - `language`: language of the package
/// - `platforms`: CI runner names
/// - `package_requirements`: requirements joined with `, `
/// - `files`: the pre-rendered files, see [`files::render_all`]
/// - `package_version`: version of the generated package
/// - `now`: RFC 3339 timestamp, meant for the `datetimeformat` filter
pub fn build_context(
    config: &BabelConfig,
    version: &str,
    now: &DateTime<FixedOffset>,
) -> Result<Value> {
    let mut context =
        serde_json::to_value(config).map_err(|e| Error::SerializeError(e.to_string()))?;
    let requirements: Vec<&str> =
        config.package().requirements.iter().map(String::as_str).collect();

    if let Value::Object(map) = &mut context {
        let components = map.get("library").cloned().unwrap_or(Value::Null);
        map.insert("components".to_string(), components);
        map.insert("language".to_string(), json!(config.language().as_str()));
        map.insert("platforms".to_string(), json!(config.ci().runners()));
        map.insert("package_requirements".to_string(), json!(requirements.join(", ")));
        map.insert("files".to_string(), json!(files::render_all(config, now.year())));
        map.insert("package_version".to_string(), json!(version));
        map.insert("now".to_string(), json!(now.to_rfc3339()));
    }
    Ok(context)
}

/// Generates a wrapped package.
///
/// # Arguments
/// * `config` - Canonical configuration of the package
/// * `output` - Directory of the new project
/// * `template_root` - Template tree to expand
/// * `clobber` - Render into `output` even if it already exists
/// * `version` - Version of the generated package
///
/// # Returns
/// * `Result<PathBuf>` - Absolute path of the project
///
/// # Errors
/// * `Error::OutputDirExistsError` - `output` exists and `clobber` is not set; nothing is written
/// * `Error::RenderError` - the template tree did not produce the package directory
pub fn render(
    config: &BabelConfig,
    output: &Path,
    template_root: &Path,
    clobber: bool,
    version: &str,
) -> Result<PathBuf> {
    let output = get_output_dir(output, clobber)?;
    let now = Local::now().fixed_offset();
    let context = build_context(config, version, &now)?;

    info!("Reading templates from '{}'", template_root.display());
    let renderer = MiniJinjaRenderer::new();
    let written = render_tree(&renderer, template_root, &context, &output)?;
    info!("Rendered {written} files into '{}'", output.display());

    let package_dir = output.join(config.package_name());
    if !package_dir.is_dir() {
        return Err(Error::RenderError(format!(
            "the template tree did not produce the package directory '{}'",
            package_dir.display()
        )));
    }

    run_post_generation(&output, config)?;

    write_file(&config.format(Format::Toml)?, output.join(METADATA_FILENAME))?;
    vcs::init(&output)?;

    Ok(output.canonicalize()?)
}
