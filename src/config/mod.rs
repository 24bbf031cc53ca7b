//! Configuration of a wrap request
//!
//! This module contains the configuration system components:
//! - `types`: The canonical configuration and its sections
//! - `format`: TOML / YAML parsing and serialization
//! - `validation`: Key-set checks on raw mappings
//! - `normalize`: Old-style to canonical conversion

pub mod format;
pub mod normalize;
pub mod types;
pub mod validation;


pub use format::{Format, SerializerOptions};
pub use normalize::normalize;
pub use types::{BabelConfig, Build, Ci, Info, Language, Library, Package};
pub use validation::{is_legacy_library_block, parse_entry_point, validate};

use crate::error::{Error, Result};
use std::path::Path;

impl BabelConfig {
    /// Parses, validates and normalizes configuration text.
    ///
    /// # Errors
    /// Only `Error::ScanError` and `Error::ValidationError` are returned.
    pub fn from_text(text: &str, format: Format) -> Result<Self> {
        let raw = format.parse(text)?;
        validate(&raw)?;
        normalize(&raw)
    }

    /// Reads a configuration file, choosing the format from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from '{}'", path.display());

        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::ValidationError(format!("unable to read config file ({}): {e}", path.display()))
        })?;
        Self::from_text(&text, Format::from_path(path))
    }

    /// Serializes the configuration in its canonical shape.
    pub fn format(&self, format: Format) -> Result<String> {
        SerializerOptions::new(format).serialize(self)
    }
}
