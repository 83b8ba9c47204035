use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;

use args::{Cli, Commands};
use cli::{AppContext, CliError};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        cli::print_error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut ctx = AppContext::new(cli.config_dir)?;

    match cli.command {
        Commands::Cat { file } => cli::handle_cat(&ctx, &file),
        Commands::Lines { file } => cli::handle_lines(&ctx, &file),
        Commands::Write { file, text } => cli::handle_write(&ctx, &file, text),
        Commands::Append { file, text } => cli::handle_append(&ctx, &file, text),
        Commands::Config { key, value } => cli::handle_config(&mut ctx, key, value),
    }
}
