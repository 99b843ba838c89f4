//! CLI entry point for the grid level editor

use clap::Parser;
use gridlevel::io::cli::{Cli, CommandRunner};
use tracing_subscriber::EnvFilter;

fn main() -> gridlevel::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let runner = CommandRunner::new(cli);
    runner.run(&mut std::io::stdout().lock())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
