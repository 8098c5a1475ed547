//! Resolution of the `Capture` section into the eligible field set, the
//! output schema and the payload window.
//!
//! ```yaml
//! Capture:
//!   - Ethernet: [SrcMAC, DstMAC]
//!   - Payload:
//!       - Length
//!       - filter: [2, 5]
//! ```

use std::collections::{HashMap, HashSet};

use serde_yaml::{Mapping, Value as Yaml};
use tracing::debug;

use crate::error::ConfigError;
use crate::frame::column_key;
use crate::payload::{PayloadWindow, FILTER_FIELD};
use crate::protocol::PAYLOAD_LAYER;

/// The resolved capture declaration.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CaptureSpec {
    /// layer -> eligible field names
    fields: HashMap<String, HashSet<String>>,
    /// column keys in declaration order, duplicates kept
    schema: Vec<String>,
    window: Option<PayloadWindow>,
}

impl CaptureSpec {
    /// Resolve the ordered `Capture` entries.
    pub fn resolve(entries: &[Mapping]) -> Result<Self, ConfigError> {
        let mut spec = CaptureSpec::default();

        for (index, entry) in entries.iter().enumerate() {
            let entry_no = index + 1;
            for (layer, declared) in entry {
                let layer = layer.as_str().ok_or_else(|| ConfigError::InvalidCapture {
                    entry: entry_no,
                    reason: format!("layer name must be a string, got {}", describe(layer)),
                })?;
                let declared = declared
                    .as_sequence()
                    .ok_or_else(|| ConfigError::InvalidCapture {
                        entry: entry_no,
                        reason: format!(
                            "fields of {layer} must be a list, got {}",
                            describe(declared)
                        ),
                    })?;

                for field in declared {
                    spec.resolve_field(entry_no, layer, field)?;
                }
            }
        }

        debug!(
            columns = spec.schema.len(),
            window = ?spec.window,
            "Resolved capture declaration"
        );
        Ok(spec)
    }

    fn resolve_field(&mut self, entry: usize, layer: &str, field: &Yaml) -> Result<(), ConfigError> {
        match field {
            Yaml::String(name) if layer == PAYLOAD_LAYER && name == FILTER_FIELD => {
                Err(ConfigError::PayloadFilter {
                    reason: "filter needs bounds, e.g. `filter: [2, 5]`".to_string(),
                })
            }
            Yaml::String(name) => {
                self.declare(layer, name);
                Ok(())
            }
            Yaml::Mapping(params) if layer == PAYLOAD_LAYER => {
                let bounds = single_filter_param(params).ok_or_else(|| {
                    ConfigError::InvalidCapture {
                        entry,
                        reason: "the only parameterised Payload field is `filter: [lo, hi]`"
                            .to_string(),
                    }
                })?;
                if self.window.is_some() {
                    return Err(ConfigError::PayloadFilter {
                        reason: "declared more than once".to_string(),
                    });
                }
                self.window = Some(parse_window(bounds)?);
                self.declare(layer, FILTER_FIELD);
                Ok(())
            }
            Yaml::Mapping(_) => Err(ConfigError::InvalidCapture {
                entry,
                reason: format!("parameterised fields are only accepted under {PAYLOAD_LAYER}"),
            }),
            other => Err(ConfigError::InvalidCapture {
                entry,
                reason: format!("field names must be strings, got {}", describe(other)),
            }),
        }
    }

    fn declare(&mut self, layer: &str, field: &str) {
        self.fields
            .entry(layer.to_string())
            .or_default()
            .insert(field.to_string());
        self.schema.push(column_key(layer, field));
    }

    /// Whether `layer.field` was declared.
    pub fn is_eligible(&self, layer: &str, field: &str) -> bool {
        self.fields
            .get(layer)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Whether any field of `layer` was declared.
    pub fn declares_layer(&self, layer: &str) -> bool {
        self.fields.contains_key(layer)
    }

    /// Output columns in declaration order.
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn window(&self) -> Option<PayloadWindow> {
        self.window
    }

    /// Distinct declared (layer, field) pairs, in no particular order.
    pub fn declared_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().flat_map(|(layer, fields)| {
            fields.iter().map(move |f| (layer.as_str(), f.as_str()))
        })
    }
}

/// Returns the bounds if `params` is exactly `{filter: <value>}`.
fn single_filter_param(params: &Mapping) -> Option<&Yaml> {
    if params.len() != 1 {
        return None;
    }
    params.get(FILTER_FIELD)
}

fn parse_window(bounds: &Yaml) -> Result<PayloadWindow, ConfigError> {
    let invalid = |reason: String| ConfigError::PayloadFilter { reason };

    let pair = match bounds.as_sequence() {
        Some(seq) if seq.len() == 2 => seq,
        _ => {
            return Err(invalid(format!(
                "expected exactly two integers [lo, hi], got {}",
                describe(bounds)
            )))
        }
    };

    let mut ints = [0usize; 2];
    for (slot, value) in ints.iter_mut().zip(pair) {
        let n = value
            .as_i64()
            .ok_or_else(|| invalid(format!("bound {} is not an integer", describe(value))))?;
        *slot = usize::try_from(n).map_err(|_| invalid(format!("bound {n} is negative")))?;
    }

    let [lo, hi] = ints;
    PayloadWindow::new(lo, hi)
        .ok_or_else(|| invalid(format!("lower bound {lo} must be below upper bound {hi}")))
}

fn describe(value: &Yaml) -> String {
    match value {
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::String(s) => format!("{s:?}"),
        Yaml::Sequence(s) => format!("a list of {}", s.len()),
        Yaml::Mapping(_) => "a mapping".to_string(),
        Yaml::Tagged(t) => format!("tagged value {}", t.tag),
    }
}
