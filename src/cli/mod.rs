pub mod args;
pub mod runner;
pub mod samples;

pub use args::{get_log_level_from_verbose, parse_cli, Cli, Commands, InitArgs, UpdateArgs};
pub use runner::{run, Runner};
