//! `<package>/__init__.py`

use super::{all_list, sorted_lines};
use crate::config::BabelConfig;

pub fn render(config: &BabelConfig) -> String {
    let package = config.package_name();
    let mut imports = vec![format!("from {package}._version import __version__")];
    imports.extend(config.library().keys().map(|cls| format!("from {package}._bmi import {cls}")));

    format!("{}\n\n{}", sorted_lines(imports), all_list(&["__version__"], config.library().keys()))
}
