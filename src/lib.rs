//! pcaptab - Tabulate packet captures into CSV.
//!
//! Every packet becomes a row and every declared `Layer.Field` a column.
//! Columns are discovered as packets are decoded and kept row-aligned, then
//! written in the order the configuration declares them.
//!
//! # Example
//!
//! ```no_run
//! use pcaptab::config::ConfigDocument;
//!
//! fn main() -> anyhow::Result<()> {
//!     let doc = ConfigDocument::from_yaml(
//!         "Config:\n  Output: web.csv\nCapture:\n  - IPv4: [SrcIP, DstIP]\n",
//!     )?;
//!     let summary = pcaptab::pipeline::run(&doc, "web.pcap")?;
//!     println!("{} rows", summary.rows_written);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod frame;
pub mod payload;
pub mod pcap;
pub mod pipeline;
pub mod protocol;
pub mod tabulate;

pub use error::{Error, Result};
