use clap::Parser;
use derive_getters::Getters;

#[derive(Parser, Debug, Getters)]
#[command(name = "log-maker")]
#[command(about = "Generate a fake JSON-lines log file for testing", long_about = None)]
pub struct CliArgs {
    /// Number of entries to write
    count: u64,
}
