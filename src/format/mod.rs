//! Value formatting utilities.
//!
//! Canonical text renderings shared by the decoder and the exporter:
//! - MAC addresses (6 bytes -> colon-separated hex)
//! - Capture timestamps (microseconds -> RFC 3339, UTC)

mod address;
mod time;

pub use address::format_mac;
pub use time::format_timestamp_us;
