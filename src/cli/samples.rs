//! Sample files printed by the `sample-*` subcommands

use chrono::{Datelike, Local};

use crate::config::{BabelConfig, Format};
use crate::constants::DEFAULT_PACKAGE_VERSION;
use crate::error::{Error, Result};
use crate::files::{gitignore, license, meson_build};
use crate::render::build_context;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::template::builtin_file;

pub const SAMPLE_CONFIG: &str = r#"# See https://babelizer.readthedocs.io/ for more information

# Describe the library being wrapped.
[library.Monorail]
language = "c"
library = "bmimonorail"
header = "monorail.h"
entry_point = "register_monorail"

# Describe compiler options need to build the library being
# wrapped.
[build]
undef_macros = []
define_macros = []
libraries = []
library_dirs = []
include_dirs = []
extra_compile_args = []

# Describe the newly wrapped package.
[package]
name = "springfield_monorail"
requirements = ["three_million_dollars"]

[info]
github_username = "lyle-lanley"
package_author = "Lyle Lanley"
package_author_email = "lyle@monorail.com"
package_license = "MIT License"
summary = '''
Well, sir, there's nothing on Earth like a genuine,
bona fide, electrified, six-car monorail. What'd I say?
Monorail! What's it called? Monorail! That's right! Monorail!
'''

[ci]
python_version = [
    "3.10",
    "3.11",
    "3.12",
]
os = [
    "linux",
    "mac",
    "windows",
]
"#;

fn sample() -> Result<BabelConfig> {
    BabelConfig::from_text(SAMPLE_CONFIG, Format::Toml)
}

pub fn sample_gitignore() -> Result<String> {
    Ok(gitignore::render(&sample()?))
}

pub fn sample_license() -> Result<String> {
    Ok(license::render(&sample()?, Local::now().year()))
}

/// A `meson.build` for `extensions`, or for two example extensions with their
/// installed sources when none are given.
pub fn sample_meson_build(extensions: &[String]) -> Result<String> {
    if !extensions.is_empty() {
        return meson_build::render(extensions, &[]);
    }

    let extensions =
        ["springfield_monorail/lib/monorail.pyx", "springfield_monorail/lib/rail.pyx"];
    let install = [
        "springfield_monorail/__init__.py",
        "springfield_monorail/_bmi.py",
        "springfield_monorail/_version.py",
        "springfield_monorail/lib/__init__.py",
        "springfield_monorail/lib/monorail.pyx",
        "springfield_monorail/lib/rail.pyx",
    ];
    meson_build::render(&extensions, &install)
}

/// The built-in `README.rst` rendered for the sample configuration.
pub fn sample_readme() -> Result<String> {
    let template = builtin_file("README.rst")
        .ok_or_else(|| Error::RenderError("no built-in README.rst template".to_string()))?;
    let now = Local::now().fixed_offset();
    let context = build_context(&sample()?, DEFAULT_PACKAGE_VERSION, &now)?;
    MiniJinjaRenderer::new().render(template, &context, Some("README.rst"))
}
