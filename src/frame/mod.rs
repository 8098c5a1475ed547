//! Columnar accumulator.
//!
//! Columns are keyed `"<Layer>.<Field>"` and created the first time a
//! packet carries that field; older packets read as absent.

mod dataframe;
mod series;
mod value;

pub use dataframe::{Frame, Lookup};
pub use series::Series;
pub use value::{Cell, Value};

/// Column key for a layer field.
pub fn column_key(layer: &str, field: &str) -> String {
    format!("{layer}.{field}")
}
