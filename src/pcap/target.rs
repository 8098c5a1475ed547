//! Capture target classification.

use std::path::{Path, PathBuf};

use super::PcapReader;
use crate::error::{Error, PcapError};

/// Suffixes that mark a target as a capture file (checked after `.gz`).
const CAPTURE_SUFFIXES: [&str; 3] = [".pcapng", ".pcap", ".cap"];

/// What the positional CLI argument names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    /// A capture file, recognised by its suffix.
    File(PathBuf),
    /// Anything else is taken as a network interface name.
    Interface(String),
}

impl CaptureTarget {
    /// Classify a target string.
    pub fn parse(target: &str) -> Self {
        let lower = target.to_lowercase();
        let lower = lower.strip_suffix(".gz").unwrap_or(&lower);
        if CAPTURE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            CaptureTarget::File(PathBuf::from(target))
        } else {
            CaptureTarget::Interface(target.to_string())
        }
    }

    /// Name used to derive the output file name: the file name without
    /// capture and compression suffixes, or the interface name.
    pub fn base_name(&self) -> String {
        match self {
            CaptureTarget::File(path) => strip_capture_suffixes(path),
            CaptureTarget::Interface(name) => name.clone(),
        }
    }

    /// Open the target for reading.
    pub fn open(&self) -> Result<PcapReader, Error> {
        match self {
            CaptureTarget::File(path) => PcapReader::open(path),
            CaptureTarget::Interface(name) => Err(Error::Pcap(PcapError::LiveCaptureUnsupported {
                interface: name.clone(),
            })),
        }
    }
}

fn strip_capture_suffixes(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "capture".to_string());

    let mut stem = name.as_str();
    if stem.to_lowercase().ends_with(".gz") {
        stem = &stem[..stem.len() - 3];
    }
    let lower = stem.to_lowercase();
    for suffix in CAPTURE_SUFFIXES {
        if lower.ends_with(suffix) {
            stem = &stem[..stem.len() - suffix.len()];
            break;
        }
    }
    stem.to_string()
}
