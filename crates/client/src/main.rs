//! Keyport command-line client

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = commands::Cli::parse();
    if let Err(err) = commands::execute(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
