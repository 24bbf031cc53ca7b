//! `<package>/_bmi.py`: re-exports the wrapped classes

use super::{all_list, sorted_lines};
use crate::config::{BabelConfig, Language};

const PYTHON_HEADER: &str = "import sys

if sys.version_info >= (3, 12):  # pragma: no cover (PY12+)
    import importlib.resources as importlib_resources
else:  # pragma: no cover (<PY312)
    import importlib_resources
";

pub fn render(config: &BabelConfig) -> String {
    match config.language() {
        Language::Python => render_python(config),
        _ => render_compiled(config),
    }
}

/// Classes come straight from the compiled `lib` extension.
fn render_compiled(config: &BabelConfig) -> String {
    let package = config.package_name();
    let imports = config
        .library()
        .keys()
        .map(|cls| format!("from {package}.lib import {cls}"))
        .collect();

    format!("{}\n\n{}", sorted_lines(imports), all_list(&[], config.library().keys()))
}

/// Classes are imported from their modules under the component name, then renamed
/// and pointed at their bundled metadata.
fn render_python(config: &BabelConfig) -> String {
    let imports = config
        .library()
        .iter()
        .map(|(cls, component)| {
            format!("from {} import {} as {cls}", component.library, component.entry_point)
        })
        .collect();
    let renames = config
        .library()
        .keys()
        .map(|cls| {
            format!(
                "{cls}.__name__ = \"{cls}\"\n{cls}.METADATA = str(importlib_resources.files(__name__) / \"data/{cls}\")\n"
            )
        })
        .collect();

    format!(
        "{PYTHON_HEADER}\n{}\n\n{}\n\n{}",
        sorted_lines(imports),
        sorted_lines(renames),
        all_list(&[], config.library().keys())
    )
}
