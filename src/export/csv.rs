//! CSV rendering of the accumulator.

use std::borrow::Cow;
use std::io::{self, Write};

use tracing::debug;

use crate::frame::{Frame, Lookup};

const DELIMITER: char = ',';

/// Write the header and `rows` data rows to `writer`.
///
/// Columns follow `schema` exactly. Absent values and columns that were
/// never observed render as empty cells. The writer is flushed after the
/// header and after every row. Returns the number of data rows written.
pub fn write_csv<W: Write>(
    mut writer: W,
    schema: &[String],
    frame: &Frame,
    rows: usize,
) -> io::Result<usize> {
    let header: Vec<Cow<'_, str>> = schema.iter().map(|k| escape(k)).collect();
    writeln!(writer, "{}", header.join(","))?;
    writer.flush()?;

    let mut values = Vec::with_capacity(schema.len());
    for row in 0..rows {
        values.clear();
        for key in schema {
            let value = match frame.lookup(key, row) {
                Lookup::Value(value) => value.to_string(),
                Lookup::Absent | Lookup::NoColumn => String::new(),
                Lookup::Missing => {
                    debug!(column = %key, row, "Missing cell");
                    String::new()
                }
            };
            values.push(escape(&value).into_owned());
        }
        writeln!(writer, "{}", values.join(","))?;
        writer.flush()?;
    }

    Ok(rows)
}

/// Quote a value that contains the delimiter, a quote or a line break.
fn escape(value: &str) -> Cow<'_, str> {
    if value.contains([DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
