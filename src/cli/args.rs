//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Tabulate packet captures into CSV.
#[derive(Parser, Debug)]
#[command(name = "pcaptab")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Capture file (.pcap, .pcapng, .cap, optionally .gz) or interface name
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Print the parsed configuration and exit without reading packets
    #[arg(long = "info")]
    pub info: bool,

    /// List decodable layers and their fields
    #[arg(long = "list-layers")]
    pub list_layers: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter directive for the verbosity count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pcaptab", "web.pcap"]);

        assert_eq!(args.target.as_deref(), Some("web.pcap"));
        assert_eq!(args.config, PathBuf::from("pcaptab.conf.yml"));
        assert!(!args.info);
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["pcaptab", "-c", "alt.yml", "--info", "-vv"]);

        assert!(args.target.is_none());
        assert_eq!(args.config, PathBuf::from("alt.yml"));
        assert!(args.info);
        assert_eq!(args.log_level(), "debug");
    }
}
