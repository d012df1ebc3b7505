mod cli;
mod commands;
mod config;
mod effects;
mod logging;

use clap::Parser;

use cli::Cli;
use logging::LogDestination;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = blog_logging::level_for_verbosity(cli.verbose);
    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, level);

    let config = config::load(cli.config.as_deref())?;
    commands::execute(cli.command, &config)
}
