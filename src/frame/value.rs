//! Cell values.

use std::fmt;

use crate::format::format_mac;
use crate::protocol::FieldValue;

/// An owned, exportable value.
///
/// Each variant has exactly one textual rendering, used verbatim in the
/// exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Text(String),
    Bool(bool),
    /// Rendered as contiguous lowercase hex.
    Bytes(Vec<u8>),
}

/// One packet's entry in a series; `None` means the field was not observed.
pub type Cell = Option<Value>;

impl Value {
    /// Convert a decoded field. `Null` fields produce no value.
    pub fn from_field(field: &FieldValue<'_>) -> Option<Self> {
        let value = match field {
            FieldValue::UInt8(v) => Value::UInt(*v as u64),
            FieldValue::UInt16(v) => Value::UInt(*v as u64),
            FieldValue::UInt32(v) => Value::UInt(*v as u64),
            FieldValue::UInt64(v) => Value::UInt(*v),
            FieldValue::Int64(v) => Value::Int(*v),
            FieldValue::Bool(v) => Value::Bool(*v),
            FieldValue::IpAddr(addr) => Value::Text(addr.to_string()),
            FieldValue::MacAddr(mac) => Value::Text(format_mac(mac)?),
            FieldValue::Str(s) => Value::Text((*s).to_string()),
            FieldValue::String(s) => Value::Text(s.clone()),
            FieldValue::Bytes(b) => Value::Bytes(b.to_vec()),
            FieldValue::Null => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Bytes(b) => f.write_str(&hex::encode(b)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_variants() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::UInt(443).to_string(), "443");
        assert_eq!(Value::Text("a b".into()).to_string(), "a b");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Bytes(vec![0x00, 0xab, 0x10]).to_string(), "00ab10");
    }

    #[test]
    fn test_from_field() {
        assert_eq!(
            Value::from_field(&FieldValue::UInt16(80)),
            Some(Value::UInt(80))
        );
        assert_eq!(
            Value::from_field(&FieldValue::ipv4(&[10, 0, 0, 1])),
            Some(Value::Text("10.0.0.1".into()))
        );
        assert_eq!(
            Value::from_field(&FieldValue::mac(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff])),
            Some(Value::Text("aa:bb:cc:dd:ee:ff".into()))
        );
        assert_eq!(
            Value::from_field(&FieldValue::Bytes(&[1, 2])),
            Some(Value::Bytes(vec![1, 2]))
        );
        assert_eq!(Value::from_field(&FieldValue::Null), None);
    }
}
