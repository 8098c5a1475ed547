//! Dry-run and layer listing output.

use std::io::{self, Write};
use std::path::Path;

use crate::config::{CaptureSpec, ConfigDocument};
use crate::protocol::{Protocol, ProtocolRegistry, PAYLOAD_LAYER};
use crate::tabulate::{
    METADATA_FIELDS, METADATA_LAYER, PACKET_FIELDS, PACKET_LAYER, PAYLOAD_FIELDS,
};

/// Print the parsed configuration without touching any capture.
pub fn print_info<W: Write>(out: &mut W, config_path: &Path, doc: &ConfigDocument) -> io::Result<()> {
    let settings = &doc.config;
    writeln!(out, "config: file: {}", config_path.display())?;
    writeln!(out, "config: snaplen: {}", settings.snaplen)?;
    writeln!(out, "config: promiscuous: {}", settings.promiscuous)?;
    writeln!(out, "config: printstats: {}", settings.print_stats)?;
    writeln!(out, "config: progress: {}", settings.progress)?;
    writeln!(out, "config: output: {}", settings.output)?;
    writeln!(out, "policy: filter: {}", inline_yaml(&doc.policy.filter))?;
    writeln!(out, "policy: unmatched: {}", doc.policy.unmatched)?;
    writeln!(out, "policy: output: {}", inline_yaml(&doc.policy.output))?;
    writeln!(out, "plugins: {}", inline_yaml(&doc.plugins))?;

    match CaptureSpec::resolve(&doc.capture) {
        Ok(spec) => {
            writeln!(out, "capture: {} columns", spec.schema().len())?;
            for column in spec.schema() {
                writeln!(out, "  {column}")?;
            }
            if let Some(window) = spec.window() {
                writeln!(out, "capture: payload window: [{}, {}]", window.lo(), window.hi())?;
            }
        }
        Err(e) => writeln!(out, "capture: invalid: {e}")?,
    }
    Ok(())
}

/// List every layer a capture declaration can name, with its fields.
pub fn print_layers<W: Write>(out: &mut W, registry: &ProtocolRegistry) -> io::Result<()> {
    writeln!(out, "Decoded layers:")?;
    writeln!(out, "{:-<50}", "")?;
    for parser in registry.all_parsers() {
        writeln!(out, "  {}: {}", parser.name(), parser.field_names().join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Derived layers:")?;
    writeln!(out, "{:-<50}", "")?;
    for (layer, fields) in [
        (PAYLOAD_LAYER, PAYLOAD_FIELDS),
        (PACKET_LAYER, PACKET_FIELDS),
        (METADATA_LAYER, METADATA_FIELDS),
    ] {
        writeln!(out, "  {layer}: {}", fields.join(", "))?;
    }
    Ok(())
}

/// Render a section as single-line YAML flow text.
fn inline_yaml<T: serde::Serialize>(value: &T) -> String {
    match serde_yaml::to_string(value) {
        Ok(text) => text.trim_end().replace('\n', " "),
        Err(e) => format!("<{e}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::default_registry;

    fn render_info(yaml: &str) -> String {
        let doc = ConfigDocument::from_yaml(yaml).unwrap();
        let mut out = Vec::new();
        print_info(&mut out, Path::new("test.yml"), &doc).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_info_lists_resolved_columns() {
        let text = render_info(
            "Config:\n  Snaplen: 96\nCapture:\n  - TCP: [SrcPort]\n  - Payload: [{filter: [0, 3]}]\n",
        );

        assert!(text.contains("config: snaplen: 96"));
        assert!(text.contains("config: output: output"));
        assert!(text.contains("capture: 2 columns"));
        assert!(text.contains("  TCP.SrcPort\n"));
        assert!(text.contains("payload window: [0, 3]"));
    }

    #[test]
    fn test_info_reports_invalid_capture() {
        let text = render_info("Capture:\n  - Payload: [{filter: [9, 1]}]\n");
        assert!(text.contains("capture: invalid:"));
    }

    #[test]
    fn test_print_layers() {
        let mut out = Vec::new();
        print_layers(&mut out, &default_registry()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("  TCP: SrcPort, DstPort"));
        assert!(text.contains("  Payload: Length, filter"));
        assert!(text.contains("  Metadata: Timestamp"));
        assert!(text.contains("  gopacket: layers, DecodeFailure"));
    }
}
