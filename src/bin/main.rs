use anyhow::Context;
use clap::Parser;
use median_degree::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rolling-median")]
#[command(about = "Rolling median vertex degree over a sliding window of payments")]
#[command(version)]
struct Cli {
    /// JSON-lines file of payments
    input: PathBuf,
    /// File receiving one median per accepted payment
    output: PathBuf,
    /// JSON file with `window_seconds` / `timestamp_format` overrides
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Width of the trailing window in seconds
    #[arg(short, long)]
    window_seconds: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StreamConfig::from_json_file(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => StreamConfig::default(),
    };
    if let Some(window_seconds) = cli.window_seconds {
        config = config.with_window_seconds(window_seconds);
    }
    config.validate()?;

    let summary = process_file(&cli.input, &cli.output, &config).with_context(|| {
        format!("processing {:?} into {:?}", cli.input, cli.output)
    })?;

    log::info!(
        "Read {} lines: {} accepted, {} rejected, {} malformed",
        summary.lines_read,
        summary.accepted,
        summary.rejected,
        summary.malformed
    );

    Ok(())
}
