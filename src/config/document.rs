//! The YAML configuration document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::error::ConfigError;

/// A complete configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConfigDocument {
    /// Run settings
    pub config: RunSettings,

    /// Policy section; parsed and shown by `--info`, not applied
    pub policy: PolicySettings,

    /// Plugin declarations; parsed and shown by `--info`, never executed
    pub plugins: Vec<BTreeMap<String, String>>,

    /// Ordered layer -> fields declarations
    pub capture: Vec<Mapping>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RunSettings {
    /// Snapshot length for live capture
    pub snaplen: u32,

    /// Promiscuous mode for live capture
    pub promiscuous: bool,

    /// Print a summary at the end of the run
    pub print_stats: bool,

    /// Show a progress spinner while reading
    pub progress: bool,

    /// Output CSV file or directory
    pub output: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            snaplen: 1500,
            promiscuous: false,
            print_stats: false,
            progress: false,
            output: "output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PolicySettings {
    pub filter: Vec<Mapping>,
    pub unmatched: String,
    pub output: Vec<Mapping>,
}

impl ConfigDocument {
    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parse a configuration document from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid, all-defaults document.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
Config:
  Snaplen: 65535
  Promiscuous: true
  PrintStats: true
  Output: out/
Policy:
  Filter:
    - Ethernet: [SrcMAC]
  Unmatched: drop
Plugins:
  - Name: geoip
Capture:
  - Ethernet: [SrcMAC, DstMAC]
  - IPv4: [SrcIP, DstIP]
  - Payload:
      - Length
      - filter: [2, 5]
"#;

    #[test]
    fn test_parse_full_document() {
        let doc = ConfigDocument::from_yaml(SAMPLE).unwrap();

        assert_eq!(doc.config.snaplen, 65535);
        assert!(doc.config.promiscuous);
        assert!(doc.config.print_stats);
        assert!(!doc.config.progress);
        assert_eq!(doc.config.output, "out/");
        assert_eq!(doc.policy.unmatched, "drop");
        assert_eq!(doc.policy.filter.len(), 1);
        assert_eq!(doc.plugins[0].get("Name").map(String::as_str), Some("geoip"));
        assert_eq!(doc.capture.len(), 3);
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let doc = ConfigDocument::from_yaml("Capture: []\n").unwrap();

        assert_eq!(doc.config.snaplen, 1500);
        assert_eq!(doc.config.output, "output");
        assert!(doc.capture.is_empty());
        assert!(doc.plugins.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let doc = ConfigDocument::from_yaml("").unwrap();
        assert!(doc.capture.is_empty());
    }

    #[test]
    fn test_malformed_yaml() {
        let err = ConfigDocument::from_yaml("Config: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigDocument::load("/nonexistent/pcaptab.conf.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcaptab.conf.yml");
        std::fs::write(&path, SAMPLE).unwrap();

        let doc = ConfigDocument::load(&path).unwrap();
        assert_eq!(doc.capture.len(), 3);
    }
}
