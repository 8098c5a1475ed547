//! Output file resolution.

use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// Extension of the exported file.
pub const CSV_EXTENSION: &str = "csv";

/// Where the CSV export is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
}

impl OutputTarget {
    /// Resolve the configured output against the capture's base name.
    ///
    /// A path ending in `.csv` is used as-is; an existing directory receives
    /// `<base>.csv`. Anything else is rejected.
    pub fn resolve(output: impl AsRef<Path>, capture_base: &str) -> Result<Self, ExportError> {
        let output = output.as_ref();

        let is_csv = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));
        if is_csv {
            return Ok(Self {
                path: output.to_path_buf(),
            });
        }

        if output.is_dir() {
            return Ok(Self {
                path: output.join(format!("{capture_base}.{CSV_EXTENSION}")),
            });
        }

        Err(ExportError::InvalidOutput {
            path: output.to_path_buf(),
            extension: CSV_EXTENSION,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_csv_path_used_verbatim() {
        let target = OutputTarget::resolve("results/run1.csv", "web").unwrap();
        assert_eq!(target.path(), Path::new("results/run1.csv"));

        let upper = OutputTarget::resolve("RUN.CSV", "web").unwrap();
        assert_eq!(upper.path(), Path::new("RUN.CSV"));
    }

    #[test]
    fn test_directory_gets_capture_name() {
        let dir = tempdir().unwrap();
        let target = OutputTarget::resolve(dir.path(), "web").unwrap();
        assert_eq!(target.path(), dir.path().join("web.csv"));
    }

    #[test]
    fn test_missing_directory_rejected() {
        let dir = tempdir().unwrap();
        let err = OutputTarget::resolve(dir.path().join("nope"), "web").unwrap_err();
        assert!(matches!(err, ExportError::InvalidOutput { .. }));
    }

    #[test]
    fn test_existing_file_without_csv_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("out.txt");
        std::fs::write(&file, "").unwrap();

        assert!(OutputTarget::resolve(&file, "web").is_err());
    }
}
