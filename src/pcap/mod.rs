//! Capture file reading.
//!
//! Reads PCAP and PCAPNG files (optionally gzip-compressed) and exposes
//! raw records for decoding. Also classifies the CLI target as a capture
//! file or a live interface name.

mod packet;
mod reader;
mod target;

pub use packet::RawPacket;
pub use reader::{is_gzip_extension, PcapReader};
pub use target::CaptureTarget;
