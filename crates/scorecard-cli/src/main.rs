//! Scorecard CLI - exam statistics and item analysis.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still wins over the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Analyze {
            file,
            json,
            output,
            histogram,
            group_fraction,
        } => commands::analyze::run(file, json, output, histogram, group_fraction, cli.verbose),

        Commands::Serve {
            port,
            no_open,
            idle_timeout,
            group_fraction,
        } => commands::serve::run(port, no_open, idle_timeout, group_fraction, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
