mod args;
mod generator;
mod writer;

use args::CliArgs;
use clap::Parser;
use std::{io::IsTerminal, path::Path};
use tracing_subscriber::EnvFilter;
use writer::{OUTPUT_FILE, create_log};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging();

    let mut rng = rand::rng();
    create_log(Path::new(OUTPUT_FILE), *args.count(), &mut rng)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
