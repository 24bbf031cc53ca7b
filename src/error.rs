use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The configuration text is not valid for the format it claims to be.
    #[error("unable to scan {format}-formatted config file:\n{message}")]
    ScanError { format: String, message: String },

    /// The configuration is well formed but does not describe a valid wrap request.
    #[error("{0}")]
    ValidationError(String),

    #[error("Cannot proceed: output directory '{output_dir}' already exists. Use --clobber to overwrite it.")]
    OutputDirExistsError { output_dir: String },

    /// Template walk finished but the expected artifact is missing.
    #[error("Render error: {0}")]
    RenderError(String),

    /// The build tooling of an existing project failed while reporting its version.
    #[error("the build configuration of this package has an error:\n{0}\nunable to get the package's version. Try using the '--set-version' option.")]
    BuildIntrospectionError(String),

    #[error("'{project_dir}' does not appear to be a babelized folder (missing {metadata_files})")]
    MetadataNotFoundError { project_dir: String, metadata_files: String },

    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Version control error. Original error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("Failed to parse glob pattern. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to walk the template tree. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Invalid regular expression. Original error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Failed to serialize config. Original error: {0}")]
    SerializeError(String),

    #[error("Cannot process the source path: '{source_path}'. Original error: {e}")]
    ProcessError { source_path: String, e: String },
}

impl Error {
    /// Whether the error describes a condition the user can fix, as opposed to a defect.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::ScanError { .. }
                | Error::ValidationError(_)
                | Error::OutputDirExistsError { .. }
                | Error::RenderError(_)
                | Error::BuildIntrospectionError(_)
                | Error::MetadataNotFoundError { .. }
        )
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::SerializeError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializeError(err.to_string())
    }
}

/// Convenience type alias for Results with the babelizer error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// User-facing errors exit with status 1. Anything else is an internal defect:
/// it is printed with its debug representation and exits with status 2.
pub fn default_error_handler(err: Error) {
    use crate::constants::exit_codes;

    if err.is_user_facing() {
        eprintln!("Error: {err}");
        std::process::exit(exit_codes::FAILURE);
    }
    eprintln!("Internal error: {err:?}");
    std::process::exit(exit_codes::DEFECT);
}
