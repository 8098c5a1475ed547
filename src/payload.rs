//! Payload window filter.
//!
//! Derives two columns from the raw application payload: its full length,
//! and a colon-terminated hex rendering of an inclusive byte range.

use std::fmt::Write as _;

use crate::frame::Value;

/// Field name of the payload length column.
pub const LENGTH_FIELD: &str = "Length";

/// Field name of the windowed hex column.
pub const FILTER_FIELD: &str = "filter";

/// Inclusive byte-offset bounds `[lo, hi]`, `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadWindow {
    lo: usize,
    hi: usize,
}

impl PayloadWindow {
    /// Returns `None` unless `lo < hi`.
    pub fn new(lo: usize, hi: usize) -> Option<Self> {
        (lo < hi).then_some(Self { lo, hi })
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    /// Render the bytes at offsets `lo..=hi` as `xx:` groups.
    ///
    /// A window reaching past the payload yields a shorter (possibly empty)
    /// string.
    pub fn render(&self, payload: &[u8]) -> String {
        let end = self.hi.saturating_add(1).min(payload.len());
        let selected = payload.get(self.lo..end).unwrap_or(&[]);

        let mut out = String::with_capacity(selected.len() * 3);
        for b in selected {
            let _ = write!(out, "{b:02x}:");
        }
        out
    }

    /// The two derived columns for one payload: `(field, type label, value)`.
    pub fn columns(&self, payload: &[u8]) -> [(&'static str, &'static str, Value); 2] {
        [
            length_column(payload),
            (FILTER_FIELD, "string", Value::Text(self.render(payload))),
        ]
    }
}

/// The payload length column, produced with or without a window.
pub fn length_column(payload: &[u8]) -> (&'static str, &'static str, Value) {
    (LENGTH_FIELD, "u64", Value::UInt(payload.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_bytes() -> Vec<u8> {
        (0u8..10).map(|i| 0xa0 + i).collect()
    }

    #[test]
    fn test_window_must_be_ordered() {
        assert!(PayloadWindow::new(2, 5).is_some());
        assert!(PayloadWindow::new(5, 5).is_none());
        assert!(PayloadWindow::new(10, 5).is_none());
    }

    #[test]
    fn test_render_inner_window() {
        let window = PayloadWindow::new(2, 5).unwrap();
        assert_eq!(window.render(&ten_bytes()), "a2:a3:a4:a5:");
    }

    #[test]
    fn test_render_full_window() {
        let payload = ten_bytes();
        let window = PayloadWindow::new(0, payload.len() - 1).unwrap();

        let rendered = window.render(&payload);

        assert_eq!(rendered, "a0:a1:a2:a3:a4:a5:a6:a7:a8:a9:");
        assert_eq!(rendered.len(), payload.len() * 3);
    }

    #[test]
    fn test_window_past_end_is_truncated() {
        let window = PayloadWindow::new(8, 20).unwrap();
        assert_eq!(window.render(&ten_bytes()), "a8:a9:");
    }

    #[test]
    fn test_window_outside_payload_is_empty() {
        let window = PayloadWindow::new(12, 20).unwrap();
        assert_eq!(window.render(&ten_bytes()), "");
        assert_eq!(window.render(&[]), "");
    }

    #[test]
    fn test_huge_upper_bound() {
        let window = PayloadWindow::new(0, usize::MAX).unwrap();
        assert_eq!(window.render(&[0x01, 0xff]), "01:ff:");
    }

    #[test]
    fn test_columns() {
        let window = PayloadWindow::new(2, 5).unwrap();
        let [length, filter] = window.columns(&ten_bytes());

        assert_eq!(length, ("Length", "u64", Value::UInt(10)));
        assert_eq!(filter, ("filter", "string", Value::Text("a2:a3:a4:a5:".into())));
    }
}
