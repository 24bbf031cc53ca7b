use babelizer::{
    cli::{parse_cli, run},
    error::default_error_handler,
};

fn main() {
    let cli = parse_cli();
    env_logger::Builder::new().filter_level(cli.log_level()).init();

    if let Err(err) = run(cli) {
        default_error_handler(err);
    }
}
