#![allow(dead_code)]

use babelizer::cli::{InitArgs, Runner};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const HEAT_TOML: &str = r#"[library.Heat]
language = "c"
library = "bmiheatc"
header = "bmi_heat.h"
entry_point = "register_bmi_heat"

[build]
undef_macros = []
define_macros = []
libraries = []
library_dirs = []
include_dirs = []
extra_compile_args = []

[package]
name = "heat_model"
requirements = ["numpy"]

[info]
github_username = "csdms"
package_author = "csdms"
package_author_email = "csdms@colorado.edu"
package_license = "MIT License"
summary = "PyMT plugin for the heat model"

[ci]
python_version = ["3.10", "3.11"]
os = ["all"]
"#;

/// Returns `HEAT_TOML` with the language of its single component replaced.
pub fn heat_toml_in(language: &str) -> String {
    let header = if language == "python" { "__UNUSED__" } else { "bmi_heat.h" };
    HEAT_TOML
        .replace("language = \"c\"", &format!("language = \"{language}\""))
        .replace("header = \"bmi_heat.h\"", &format!("header = \"{header}\""))
}

/// Writes `config` to `<base_dir>/babel.toml` and runs `init` on it.
pub fn init_project(base_dir: &Path, config: &str) -> PathBuf {
    fs::write(base_dir.join("babel.toml"), config).unwrap();
    let args = InitArgs {
        meta: PathBuf::from("babel.toml"),
        template: None,
        package_version: "0.1".to_string(),
        output: None,
        clobber: false,
    };
    Runner::new(base_dir, true).init(&args).unwrap()
}

/// Relative, `/` separated paths of the files below `dir`, `.git` excluded.
pub fn list_tree(dir: &Path) -> BTreeSet<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

/// Removes the parts of a generated project that are not plain files: the git
/// repository and the data link of the package.
pub fn strip_project(dir: &Path, package: &str) {
    let _ = fs::remove_dir_all(dir.join(".git"));
    let _ = fs::remove_file(dir.join(package).join("data"));
}

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files1 = list_tree(dir1);
    let files2 = list_tree(dir2);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);
    println!();

    for file in files1.difference(&files2) {
        println!("  + {file}");
    }
    for file in files2.difference(&files1) {
        println!("  - {file}");
    }

    for file in files1.intersection(&files2) {
        let content1 = fs::read(dir1.join(file)).unwrap_or_default();
        let content2 = fs::read(dir2.join(file)).unwrap_or_default();
        if content1 != content2 {
            println!("\n  File: {file}");
            println!("  --- Actual content:");
            println!("{}", String::from_utf8_lossy(&content1));
            println!("  --- Expected content:");
            println!("{}", String::from_utf8_lossy(&content2));
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directories hold the same files with the same contents.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    if dir_diff::is_different(actual, expected).unwrap() {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}
