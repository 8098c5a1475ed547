//! pcaptab CLI entry point.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pcaptab::cli::{print_info, print_layers, Args};
use pcaptab::config::ConfigDocument;
use pcaptab::pipeline;
use pcaptab::protocol::default_registry;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_level().into()),
        )
        .with_writer(io::stderr)
        .init();

    if args.list_layers {
        let mut stdout = io::stdout().lock();
        print_layers(&mut stdout, &default_registry())?;
        stdout.flush()?;
        return Ok(());
    }

    let doc = ConfigDocument::load(&args.config)
        .with_context(|| format!("Failed to load configuration: {}", args.config.display()))?;
    info!(config = %args.config.display(), "Using configuration");

    if args.info {
        let mut stdout = io::stdout().lock();
        print_info(&mut stdout, &args.config, &doc)?;
        stdout.flush()?;
        return Ok(());
    }

    let target = args.target.context(
        "Capture target required: provide a capture file (\"pcaptab web.pcap\") or an interface",
    )?;

    let summary = pipeline::run(&doc, &target)
        .with_context(|| format!("Failed to tabulate {target}"))?;

    if doc.config.print_stats {
        println!("{summary}");
    } else {
        eprintln!(
            "Exported {} rows to {}",
            summary.rows_written,
            summary.output.display()
        );
    }

    Ok(())
}
