mod analytics;
mod ingest;
mod invariants;
mod models;
mod report;

use analytics::Analytics;
use anyhow::Context;
use clap::Parser;
use ingest::Records;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, IsTerminal, Write},
    path::PathBuf,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const PROGRESS_INTERVAL: u64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(version, about = "Summarize a JSON-lines log file", long_about = None)]
struct Args {
    /// Log file to inspect
    #[arg(default_value = "example.json")]
    path: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Rows to show from each end of the file
    #[arg(long, default_value_t = analytics::MAX_DISPLAY_ROWS / 2)]
    rows: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();
    debug!(?args, "starting up");

    let file = File::open(&args.path).with_context(|| format!("opening {}", args.path.display()))?;
    let mut analytics = Analytics::with_rows(args.rows);
    for record in Records::new(BufReader::new(file)) {
        let record = record.with_context(|| format!("reading {}", args.path.display()))?;
        analytics.record(record);
        if analytics.total() % PROGRESS_INTERVAL == 0 {
            info!(entries = analytics.total(), "reading");
        }
    }
    info!(entries = analytics.total(), "done");

    let summary = analytics.summary();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.json {
        report::write_json(&summary, &mut out)?;
    } else {
        report::write_text(&args.path.display().to_string(), &summary, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}
