//! Tabular export of the accumulated frame.

mod csv;
mod target;

use std::fs::File;
use std::io::BufWriter;

use tracing::info;

use crate::error::ExportError;
use crate::frame::Frame;

pub use self::csv::write_csv;
pub use target::{OutputTarget, CSV_EXTENSION};

/// Writes the frame to the resolved output file.
pub struct Exporter;

impl Exporter {
    /// Create the output file and write `rows` rows in `schema` order.
    pub fn export(
        target: &OutputTarget,
        schema: &[String],
        frame: &Frame,
        rows: usize,
    ) -> Result<usize, ExportError> {
        let path = target.path();
        let write_err = |source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let written = write_csv(BufWriter::new(file), schema, frame, rows).map_err(write_err)?;

        info!(path = %path.display(), rows = written, columns = schema.len(), "Export complete");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Value;
    use tempfile::tempdir;

    #[test]
    fn test_export_csv_file() {
        let dir = tempdir().unwrap();
        let target = OutputTarget::resolve(dir.path(), "cap").unwrap();

        let mut frame = Frame::new();
        frame.append(0, "TCP", "SrcPort", "u16", Value::UInt(80));
        frame.even_out(0);
        frame.even_out(1);

        let schema = vec!["TCP.SrcPort".to_string()];
        let rows = Exporter::export(&target, &schema, &frame, 2).unwrap();

        assert_eq!(rows, 2);
        let content = std::fs::read_to_string(dir.path().join("cap.csv")).unwrap();
        assert_eq!(content, "TCP.SrcPort\n80\n\n");
    }

    #[test]
    fn test_export_into_missing_parent_fails() {
        let dir = tempdir().unwrap();
        let target = OutputTarget::resolve(dir.path().join("no/such/out.csv"), "cap").unwrap();

        let err = Exporter::export(&target, &[], &Frame::new(), 0).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
