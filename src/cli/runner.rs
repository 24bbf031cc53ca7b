use log::info;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, InitArgs, UpdateArgs};
use crate::cli::samples;
use crate::config::BabelConfig;
use crate::error::Result;
use crate::render::render;
use crate::template::embedded::BUILTIN_NAME;
use crate::template::TemplateTree;
use crate::update::{update, UpdateOptions};
use crate::vcs;

/// Message of the commit created by `init`.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let runner = Runner::new(cli.cd, cli.quiet);
    match cli.command {
        Commands::Init(args) => {
            let path = runner.init(&args)?;
            println!("{}", path.display());
        }
        Commands::Update(args) => {
            let path = runner.update(&args)?;
            println!("{}", path.display());
        }
        Commands::SampleConfig => print!("{}", samples::SAMPLE_CONFIG),
        Commands::SampleGitignore => println!("{}", samples::sample_gitignore()?),
        Commands::SampleLicense => println!("{}", samples::sample_license()?),
        Commands::SampleMesonBuild { extension } => {
            println!("{}", samples::sample_meson_build(&extension)?)
        }
        Commands::SampleReadme => println!("{}", samples::sample_readme()?),
    }
    Ok(())
}

/// Runs the project commands relative to a base directory.
///
/// Paths given on the command line are resolved against `base_dir` instead of
/// changing the working directory of the process.
pub struct Runner {
    base_dir: PathBuf,
    quiet: bool,
}

impl Runner {
    pub fn new<P: Into<PathBuf>>(base_dir: P, quiet: bool) -> Self {
        Self { base_dir: base_dir.into(), quiet }
    }

    /// Creates a new project and commits its files.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Absolute path of the new project
    pub fn init(&self, args: &InitArgs) -> Result<PathBuf> {
        let templates = self.templates(args.template.as_deref())?;
        self.status(&format!("reading template from {}", templates.describe()));

        let config = BabelConfig::from_path(self.base_dir.join(&args.meta))?;
        let output = match &args.output {
            Some(output) => self.base_dir.join(output),
            None => self.base_dir.join(config.package_name()),
        };

        let path =
            render(&config, &output, templates.path(), args.clobber, &args.package_version)?;
        let commit = vcs::commit_all(&path, INITIAL_COMMIT_MESSAGE)?;
        info!("Created commit {commit} in '{}'", path.display());

        self.remind_metadata(&path);
        Ok(path)
    }

    /// Re-renders the project at the base directory.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Absolute path of the project
    pub fn update(&self, args: &UpdateArgs) -> Result<PathBuf> {
        let mut options = UpdateOptions::new(&self.base_dir);
        options.template = args.template.as_ref().map(|template| self.base_dir.join(template));
        let source = match &options.template {
            Some(template) => template.display().to_string(),
            None => BUILTIN_NAME.to_string(),
        };
        self.status(&format!("reading template from {source}"));
        options.set_version = args.set_version.clone();
        options.exclude.extend(args.exclude.iter().cloned());

        let report = update(&options)?;
        if !report.extra_files.is_empty() {
            eprintln!("found extra files in {}:", report.project_path.display());
            for name in &report.extra_files {
                eprintln!("  {name}");
            }
        }

        self.remind_metadata(&report.project_path);
        Ok(report.project_path)
    }

    fn templates(&self, template: Option<&Path>) -> Result<TemplateTree> {
        TemplateTree::resolve(template.map(|template| self.base_dir.join(template)).as_deref())
    }

    fn remind_metadata(&self, project_path: &Path) {
        self.status(&format!(
            "Don't forget to drop model metadata files into {}",
            project_path.join("meta").display()
        ));
    }

    fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}
