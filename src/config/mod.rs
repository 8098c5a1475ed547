//! Configuration: the YAML document and the capture declaration it carries.

mod capture;
mod document;

pub use capture::CaptureSpec;
pub use document::{ConfigDocument, PolicySettings, RunSettings};

/// Configuration file looked up when `-c` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pcaptab.conf.yml";
