use crate::constants::{exit_codes, verbosity, DEFAULT_PACKAGE_VERSION};
use clap::{error::ErrorKind, ArgAction, Args, CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Wrap BMI libraries with Python bindings.
#[derive(Parser, Debug)]
#[command(name = "babelize", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Don't emit non-error messages to stderr. Errors are still emitted,
    /// silence those with 2>/dev/null.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Change to directory, then execute.
    #[arg(long = "cd", value_name = "DIR", default_value = ".", global = true)]
    pub cd: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a repository with babelized project files.
    Init(InitArgs),
    /// Update an existing babelized project.
    Update(UpdateArgs),
    /// Print a sample babelizer configuration file.
    SampleConfig,
    /// Print a sample .gitignore file.
    SampleGitignore,
    /// Print a sample license file.
    SampleLicense,
    /// Print a sample meson.build file.
    SampleMesonBuild {
        /// Cython extensions to build, e.g. `pkg/lib/heat.pyx`.
        #[arg(value_name = "EXTENSION")]
        extension: Vec<String>,
    },
    /// Print a sample README file.
    SampleReadme,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Babelizer configuration file (TOML or YAML).
    #[arg(value_name = "META")]
    pub meta: PathBuf,

    /// Location of templates.
    #[arg(long, value_name = "DIR")]
    pub template: Option<PathBuf>,

    /// The initial version of the babelized package.
    #[arg(
        long = "package-version",
        value_name = "VERSION",
        default_value = DEFAULT_PACKAGE_VERSION
    )]
    pub package_version: String,

    /// Directory of the new project. Defaults to the package name.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Render into the output directory even if it already exists.
    #[arg(long)]
    pub clobber: bool,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Location of templates.
    #[arg(long, value_name = "DIR")]
    pub template: Option<PathBuf>,

    /// Set the version of the updated package.
    #[arg(long = "set-version", value_name = "VERSION")]
    pub set_version: Option<String>,

    /// Additional glob of files never reported as extra (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl Cli {
    /// Log level selected by `-q` and `-v`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else {
            get_log_level_from_verbose(self.verbose)
        }
    }
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if matches!(
            e.kind(),
            ErrorKind::MissingRequiredArgument | ErrorKind::MissingSubcommand
        ) {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
///
/// Without `-v` warnings are still shown, so deprecated configuration keys are reported.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Warn,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
