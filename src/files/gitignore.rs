//! `.gitignore` of the generated project

use crate::config::{BabelConfig, Language};
use std::collections::BTreeSet;

const ALWAYS_IGNORED: &[&str] =
    &["*.egg-info/", "*.py[cod]", ".coverage", ".nox/", "__pycache__/", "build/", "dist/"];

pub fn render(config: &BabelConfig) -> String {
    let package = config.package_name();
    let mut ignore: BTreeSet<String> = ALWAYS_IGNORED.iter().map(|s| s.to_string()).collect();

    if !config.has_language(Language::Python) {
        ignore.insert("*.o".to_string());
        ignore.insert("*.so".to_string());
        ignore.extend(
            config
                .library()
                .keys()
                .map(|cls| format!("{package}/lib/{}.c", cls.to_lowercase())),
        );
    }

    if config.has_language(Language::Fortran) {
        ignore.insert("*.mod".to_string());
        ignore.insert("*.smod".to_string());
    }

    ignore.into_iter().collect::<Vec<_>>().join("\n")
}
