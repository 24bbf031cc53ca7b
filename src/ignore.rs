use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Default patterns to always ignore while walking a template tree
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/.DS_Store",
    "**/__pycache__",
    "**/__pycache__/**",
    "**/*.swp",
    "**/*.swo",
    "**/*~",
];

/// Builds a glob set matching forward-slash separated paths relative to a root.
///
/// `*` also matches `/`, so `docs*` covers everything below `docs/`.
pub fn build_globset<I, S>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        debug!("Adding ignore pattern: {pattern} to globset");
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Glob set of the entries of a template tree that are never rendered.
pub fn template_ignore() -> Result<GlobSet> {
    build_globset(DEFAULT_IGNORE_PATTERNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_UPDATE_EXCLUDES;

    #[test]
    fn template_ignore_skips_editor_and_os_droppings() {
        let ignored = template_ignore().unwrap();
        assert!(ignored.is_match(".DS_Store"));
        assert!(ignored.is_match("{{ package.name }}/.DS_Store"));
        assert!(ignored.is_match("docs/__pycache__"));
        assert!(ignored.is_match("docs/__pycache__/conf.cpython-311.pyc"));
        assert!(ignored.is_match("README.rst.swp"));
        assert!(!ignored.is_match("README.rst"));
        assert!(!ignored.is_match("{{ package.name }}/lib/_c.pyx"));
    }

    #[test]
    fn update_excludes_cover_user_owned_directories() {
        let excluded = build_globset(DEFAULT_UPDATE_EXCLUDES).unwrap();
        assert!(excluded.is_match("meta/Heat/api.yaml"));
        assert!(excluded.is_match("notebooks/demo.ipynb"));
        assert!(excluded.is_match("docs/conf.py"));
        assert!(excluded.is_match("heat_model/data"));
        assert!(excluded.is_match("heat_model/data/Heat/api.yaml"));
        assert!(excluded.is_match("data"));
        assert!(!excluded.is_match("notes.txt"));
        assert!(!excluded.is_match("heat_model/_bmi.py"));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(build_globset(["a[b"]).is_err());
    }
}
