//! One tabulation run: validate, read, tabulate, export.

use std::fmt;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::{CaptureSpec, ConfigDocument};
use crate::export::{Exporter, OutputTarget};
use crate::pcap::CaptureTarget;
use crate::protocol::{default_registry, LINKTYPE_ETHERNET};
use crate::tabulate::{unknown_fields, TabulateStats, Tabulator};
use crate::Result;

/// Refresh the spinner every this many packets.
const PROGRESS_INTERVAL: usize = 1000;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub rows_written: usize,
    pub columns_discovered: usize,
    pub columns_exported: usize,
    pub stats: TabulateStats,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "packets processed:  {}", self.stats.packets)?;
        writeln!(f, "rows written:       {}", self.rows_written)?;
        writeln!(f, "columns discovered: {}", self.columns_discovered)?;
        writeln!(f, "columns exported:   {}", self.columns_exported)?;
        writeln!(f, "fields appended:    {}", self.stats.appended)?;
        writeln!(f, "fields dropped:     {}", self.stats.dropped)?;
        writeln!(f, "decode failures:    {}", self.stats.decode_failures)?;
        write!(f, "output:             {}", self.output.display())
    }
}

/// Tabulate `target` according to `doc` and write the CSV export.
///
/// Configuration and output problems are reported before the capture is
/// opened. A capture cut off in its last record is exported up to that
/// record; any other read error part-way through aborts the run without
/// writing the export.
pub fn run(doc: &ConfigDocument, target: &str) -> Result<RunSummary> {
    let spec = CaptureSpec::resolve(&doc.capture)?;
    let target = CaptureTarget::parse(target);
    let output = OutputTarget::resolve(&doc.config.output, &target.base_name())?;

    let registry = default_registry();
    for column in unknown_fields(&spec, &registry) {
        warn!(column = %column, "Declared column is not produced by any decoder, it will be empty");
    }

    let mut reader = target.open()?;
    info!(capture = ?target, output = %output.path().display(), "Processing capture");

    let progress = doc.config.progress.then(spinner);
    let mut tabulator = Tabulator::new(&spec, registry);
    let mut warned_link_type = false;

    while let Some(packet) = reader.next_packet()? {
        if packet.link_type != LINKTYPE_ETHERNET && !warned_link_type {
            warn!(
                link_type = packet.link_type,
                "Unsupported link type, frames are tabulated as raw payload"
            );
            warned_link_type = true;
        }

        let index = tabulator.ingest(&packet);

        if let Some(pb) = &progress {
            if (index + 1) % PROGRESS_INTERVAL == 0 {
                pb.set_message(format!("{} packets processed", index + 1));
                pb.tick();
            }
        }
    }

    let (frame, stats) = tabulator.finish();
    if let Some(pb) = progress {
        pb.finish_with_message(format!("{} packets processed", stats.packets));
    }

    let rows_written = Exporter::export(&output, spec.schema(), &frame, stats.packets)?;

    Ok(RunSummary {
        output: output.path().to_path_buf(),
        rows_written,
        columns_discovered: frame.column_count(),
        columns_exported: spec.schema().len(),
        stats,
    })
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg} ({per_sec})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
    pb.set_style(style);
    pb.set_message("Reading packets...");
    pb
}
