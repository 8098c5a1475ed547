//! The columnar accumulator.

use std::collections::HashMap;

use super::{column_key, Series, Value};

/// Result of looking up one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// No series exists for the key.
    NoColumn,
    /// The series has not been evened out to this index.
    Missing,
    /// The field was not observed for this packet.
    Absent,
    Value(&'a Value),
}

/// Per-column series of per-packet values, discovered as packets arrive.
///
/// Rows are kept aligned by calling [`Frame::even_out`] once per packet
/// after all of that packet's [`Frame::append`] calls.
#[derive(Debug, Default)]
pub struct Frame {
    series: HashMap<String, Series>,
    /// Keys in first-seen order.
    order: Vec<String>,
    rows: usize,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `layer.field` at `packet_index`.
    ///
    /// Calls for one key must come in increasing `packet_index` order.
    pub fn append(
        &mut self,
        packet_index: usize,
        layer: &str,
        field: &str,
        type_label: &'static str,
        value: Value,
    ) {
        let key = column_key(layer, field);
        match self.series.get_mut(&key) {
            Some(series) => series.push(packet_index, value),
            None => {
                let series = Series::starting_at(packet_index, layer, type_label, value);
                self.order.push(key.clone());
                self.series.insert(key, series);
            }
        }
    }

    /// Pad every series with absent cells up to length `packet_index + 1`.
    ///
    /// A no-op for series that are already long enough.
    pub fn even_out(&mut self, packet_index: usize) {
        let len = packet_index + 1;
        for series in self.series.values_mut() {
            series.pad_to(len);
        }
        self.rows = self.rows.max(len);
    }

    pub fn series(&self, key: &str) -> Option<&Series> {
        self.series.get(key)
    }

    pub fn lookup(&self, key: &str, index: usize) -> Lookup<'_> {
        match self.series.get(key) {
            None => Lookup::NoColumn,
            Some(series) => match series.get(index) {
                None => Lookup::Missing,
                Some(None) => Lookup::Absent,
                Some(Some(value)) => Lookup::Value(value),
            },
        }
    }

    /// Column keys in the order they were first observed.
    pub fn column_keys(&self) -> &[String] {
        &self.order
    }

    /// Number of rows evened out so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.order.len()
    }

    /// One diagnostic line per column for row `index`.
    pub fn describe_row(&self, index: usize) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|key| {
                let series = self.series.get(key)?;
                let cell = match series.get(index) {
                    None => "<missing>".to_string(),
                    Some(None) => String::new(),
                    Some(Some(value)) => value.to_string(),
                };
                Some(format!(
                    "{key} last={} layer={} type={} len={} value={cell}",
                    series.last_index(),
                    series.layer(),
                    series.type_label(),
                    series.len(),
                ))
            })
            .collect()
    }
}
