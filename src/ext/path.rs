use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid
    /// Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use babelizer::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("{{ package.name }}");
    /// assert_eq!(path.to_str_checked().unwrap(), "{{ package.name }}");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Converts a path relative to `base` into a forward-slash separated string.
    ///
    /// Used wherever paths are compared as plain text (drift report, glob matching),
    /// so that the result does not depend on the platform separator.
    fn to_slash_relative(&self, base: &Path) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| Error::ProcessError {
            source_path: self.display().to_string(),
            e: "path contains invalid Unicode characters".to_string(),
        })
    }

    fn to_slash_relative(&self, base: &Path) -> Result<String> {
        let relative = self.strip_prefix(base).map_err(|e| Error::ProcessError {
            source_path: self.display().to_string(),
            e: e.to_string(),
        })?;
        let parts = relative
            .components()
            .map(|part| {
                part.as_os_str().to_str().map(str::to_string).ok_or_else(|| {
                    Error::ProcessError {
                        source_path: self.display().to_string(),
                        e: "path contains invalid Unicode characters".to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join("/"))
    }
}
