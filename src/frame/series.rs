//! A single column of per-packet cells.

use super::{Cell, Value};

/// Per-column array of per-packet values.
///
/// Cell `i` belongs to packet index `i`.
#[derive(Debug, Clone)]
pub struct Series {
    layer: String,
    type_label: &'static str,
    last_index: usize,
    cells: Vec<Cell>,
}

impl Series {
    /// Create a series whose first value belongs to `packet_index`; earlier
    /// packets are back-filled as absent.
    pub(super) fn starting_at(
        packet_index: usize,
        layer: &str,
        type_label: &'static str,
        value: Value,
    ) -> Self {
        let mut cells = Vec::with_capacity(packet_index + 1);
        cells.resize(packet_index, None);
        cells.push(Some(value));
        Self {
            layer: layer.to_string(),
            type_label,
            last_index: packet_index,
            cells,
        }
    }

    pub(super) fn push(&mut self, packet_index: usize, value: Value) {
        // A well-behaved caller has already evened this series out to
        // `packet_index`; any remaining gap is absent cells.
        if self.cells.len() < packet_index {
            self.cells.resize(packet_index, None);
        }
        self.cells.push(Some(value));
        self.last_index = packet_index;
    }

    pub(super) fn pad_to(&mut self, len: usize) {
        if self.cells.len() < len {
            self.cells.resize(len, None);
        }
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Diagnostic type label of the first value appended.
    pub fn type_label(&self) -> &'static str {
        self.type_label
    }

    /// Index of the last packet that appended a value.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell for `index`, or `None` when the series is shorter than that.
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_at_backfills() {
        let series = Series::starting_at(3, "TCP", "u16", Value::UInt(80));

        assert_eq!(series.len(), 4);
        assert_eq!(series.cells()[..3], [None, None, None]);
        assert_eq!(series.get(3), Some(&Some(Value::UInt(80))));
        assert_eq!(series.last_index(), 3);
        assert_eq!(series.layer(), "TCP");
    }

    #[test]
    fn test_push_after_gap() {
        let mut series = Series::starting_at(0, "TCP", "u16", Value::UInt(1));
        series.push(2, Value::UInt(3));

        assert_eq!(series.cells(), [Some(Value::UInt(1)), None, Some(Value::UInt(3))]);
        assert_eq!(series.last_index(), 2);
    }

    #[test]
    fn test_pad_never_shrinks() {
        let mut series = Series::starting_at(4, "IPv4", "u8", Value::UInt(64));
        series.pad_to(2);
        assert_eq!(series.len(), 5);
        series.pad_to(7);
        assert_eq!(series.len(), 7);
        assert_eq!(series.get(7), None);
    }
}
