//! Textual serializations of the configuration

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// The two interchangeable serializations of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Toml,
    Yaml,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Yaml => "yaml",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Picks the format from a file extension, falling back to TOML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    /// Deserializes text into a raw mapping.
    ///
    /// # Errors
    /// * `Error::ScanError` - the text is not valid for this format
    /// * `Error::ValidationError` - the text parses but is not a mapping
    pub fn parse(&self, text: &str) -> Result<serde_json::Value> {
        let value: serde_json::Value = match self {
            Format::Toml => toml::from_str(text).map_err(|e| Error::ScanError {
                format: self.name().to_string(),
                message: e.to_string(),
            })?,
            Format::Yaml => serde_yaml::from_str(text).map_err(|e| Error::ScanError {
                format: self.name().to_string(),
                message: e.to_string(),
            })?,
        };

        if !value.is_object() {
            return Err(Error::ValidationError(
                "config file does not contain a mapping object".to_string(),
            ));
        }
        Ok(value)
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
            .ok_or_else(|| Error::ValidationError(format!("unrecognized format ({s})")))
    }
}

/// Serializer settings, built for each call instead of living in global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerOptions {
    pub format: Format,
}

impl SerializerOptions {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// Serializes a value. Keys keep the declaration order of the serialized types and
    /// strings that span several lines are written as multi-line strings / block scalars.
    /// TOML arrays are spread over several lines.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        match self.format {
            Format::Toml => {
                let mut out = String::new();
                value.serialize(toml::Serializer::pretty(&mut out))?;
                Ok(out)
            }
            Format::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}
