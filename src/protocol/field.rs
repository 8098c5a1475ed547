//! Field value types produced by the header decoders.
//!
//! Values may borrow from the packet buffer (`Str`, `Bytes`) so decoding a
//! layer does not copy payload data; the accumulator converts them to owned
//! cells only for eligible fields.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::format::format_mac;

/// Possible field value types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'data> {
    /// Unsigned 8-bit integer
    UInt8(u8),
    /// Unsigned 16-bit integer
    UInt16(u16),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// Signed 64-bit integer
    Int64(i64),
    /// Boolean value
    Bool(bool),
    /// IP address (v4 or v6)
    IpAddr(IpAddr),
    /// MAC address (6 bytes)
    MacAddr([u8; 6]),
    /// String borrowed from static tables or packet data
    Str(&'data str),
    /// Constructed string
    String(String),
    /// Raw bytes borrowed from packet data
    Bytes(&'data [u8]),
    /// Null/missing value
    Null,
}

impl<'data> FieldValue<'data> {
    /// Create a MAC address from bytes.
    pub fn mac(bytes: &[u8]) -> Self {
        if bytes.len() >= 6 {
            let mut mac = [0u8; 6];
            mac.copy_from_slice(&bytes[..6]);
            FieldValue::MacAddr(mac)
        } else {
            FieldValue::Null
        }
    }

    /// Create an IPv4 address from bytes.
    pub fn ipv4(bytes: &[u8]) -> Self {
        if bytes.len() >= 4 {
            FieldValue::IpAddr(IpAddr::V4(Ipv4Addr::new(
                bytes[0], bytes[1], bytes[2], bytes[3],
            )))
        } else {
            FieldValue::Null
        }
    }

    /// Create an IPv6 address from bytes.
    pub fn ipv6(bytes: &[u8]) -> Self {
        if bytes.len() >= 16 {
            let mut arr = [0u8; 16];
            arr.copy_from_slice(&bytes[..16]);
            FieldValue::IpAddr(IpAddr::V6(Ipv6Addr::from(arr)))
        } else {
            FieldValue::Null
        }
    }

    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Diagnostic label for the value's type, carried alongside each column.
    pub fn type_label(&self) -> &'static str {
        match self {
            FieldValue::UInt8(_) => "u8",
            FieldValue::UInt16(_) => "u16",
            FieldValue::UInt32(_) => "u32",
            FieldValue::UInt64(_) => "u64",
            FieldValue::Int64(_) => "i64",
            FieldValue::Bool(_) => "bool",
            FieldValue::IpAddr(IpAddr::V4(_)) => "ipv4",
            FieldValue::IpAddr(IpAddr::V6(_)) => "ipv6",
            FieldValue::MacAddr(_) => "mac",
            FieldValue::Str(_) | FieldValue::String(_) => "string",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Null => "null",
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::UInt8(v) => Some(*v as u64),
            FieldValue::UInt16(v) => Some(*v as u64),
            FieldValue::UInt32(v) => Some(*v as u64),
            FieldValue::UInt64(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::UInt8(v) => write!(f, "{v}"),
            FieldValue::UInt16(v) => write!(f, "{v}"),
            FieldValue::UInt32(v) => write!(f, "{v}"),
            FieldValue::UInt64(v) => write!(f, "{v}"),
            FieldValue::Int64(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::IpAddr(addr) => write!(f, "{addr}"),
            FieldValue::MacAddr(mac) => write!(f, "{}", format_mac(mac).unwrap_or_default()),
            FieldValue::Str(s) => write!(f, "{s}"),
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Bytes(b) => write!(f, "[{} bytes]", b.len()),
            FieldValue::Null => write!(f, "NULL"),
        }
    }
}
