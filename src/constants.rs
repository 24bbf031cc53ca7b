//! Constants used throughout the babelizer

/// Name of the canonical metadata file written at the root of every generated project
pub const METADATA_FILENAME: &str = "babel.toml";

/// Metadata file names in order of preference, newest first
pub const METADATA_FILENAMES: &[&str] = &["babel.toml", "babel.yaml", "plugin.yaml"];

/// Rendered file names with one of these suffixes lose the suffix
pub const TEMPLATE_SUFFIXES: &[&str] = &[".jinja", ".jinja2", ".j2"];

/// Files whose content survives `update` untouched
pub const PRESERVED_FILES: &[&str] = &["CHANGES.rst", "CREDITS.rst"];

/// Paths of an existing project that never show up in the drift report
pub const DEFAULT_UPDATE_EXCLUDES: &[&str] =
    &["meta*", "notebooks*", "docs*", "**/data", "**/data/**"];

/// Version used when neither the user nor the project provide one
pub const FALLBACK_VERSION: &str = "0.1.0";

/// Version of a freshly initialized package
pub const DEFAULT_PACKAGE_VERSION: &str = "0.1";

/// Placeholder header name for components that have no C header
pub const UNUSED_HEADER: &str = "__UNUSED__";

/// Configuration sections and their keys
pub mod keys {
    pub const LIBRARY: &[&str] = &["language", "library", "header", "entry_point"];
    pub const LEGACY_LIBRARY: &[&str] = &["language", "entry_point"];
    pub const BUILD: &[&str] = &[
        "undef_macros",
        "define_macros",
        "libraries",
        "library_dirs",
        "include_dirs",
        "extra_compile_args",
    ];
    pub const PACKAGE: &[&str] = &["name", "requirements"];
    pub const INFO: &[&str] = &[
        "package_author",
        "package_author_email",
        "github_username",
        "package_license",
        "summary",
    ];
    pub const LEGACY_INFO: &[&str] = &[
        "plugin_author",
        "plugin_author_email",
        "github_username",
        "plugin_license",
        "summary",
    ];
    pub const CI: &[&str] = &["python_version", "os"];
    pub const TOP_LEVEL: &[&str] = &["library", "build", "package", "plugin", "info", "ci"];
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
    pub const DEFECT: i32 = 2;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
