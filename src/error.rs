//! Error types for pcaptab.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for pcaptab operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading or parsing a capture file
    #[error("PCAP error: {0}")]
    Pcap(#[from] PcapError),

    /// Error loading or resolving the configuration document
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error writing the tabular export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to opening and reading capture sources.
#[derive(Error, Debug)]
pub enum PcapError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Invalid PCAP format
    #[error("Invalid PCAP format: {reason}")]
    InvalidFormat { reason: String },

    /// Target names a network interface; only capture files are read
    #[error("Live capture on interface '{interface}' is not supported, provide a .pcap or .pcapng file")]
    LiveCaptureUnsupported { interface: String },
}

/// Errors related to the configuration document and its `Capture` section.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Cannot read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration document is not valid YAML for the expected shape
    #[error("Cannot parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `Capture` entry has an unexpected shape
    #[error("Invalid capture entry #{entry}: {reason}")]
    InvalidCapture { entry: usize, reason: String },

    /// `Payload.filter` bounds are malformed
    #[error("Invalid Payload.filter: {reason}")]
    PayloadFilter { reason: String },
}

/// Errors related to the tabular export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Output is neither a `.csv` path nor an existing directory
    #[error("Invalid output {path}: expected a path ending in .{extension} or an existing directory")]
    InvalidOutput {
        path: PathBuf,
        extension: &'static str,
    },

    /// Writing the output file failed
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
