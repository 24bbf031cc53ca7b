//! `<package>/lib/__init__.py`: one compiled module per component

use super::{all_list, sorted_lines};
use crate::config::BabelConfig;

pub fn render(config: &BabelConfig) -> String {
    let package = config.package_name();
    let imports = config
        .library()
        .keys()
        .map(|cls| format!("from {package}.lib.{} import {cls}", cls.to_lowercase()))
        .collect();

    format!("{}\n\n{}", sorted_lines(imports), all_list(&[], config.library().keys()))
}
