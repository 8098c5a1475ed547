//! UDP decoder.

use etherparse::UdpHeaderSlice;
use smallvec::SmallVec;

use super::{FieldValue, Hints, ParseContext, ParseResult, Protocol};

/// IP protocol number for UDP.
pub const IP_PROTO_UDP: u8 = 17;

/// UDP decoder.
#[derive(Debug, Clone, Copy)]
pub struct UdpProtocol;

impl Protocol for UdpProtocol {
    fn name(&self) -> &'static str {
        "UDP"
    }

    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        match context.hint("ip_protocol") {
            Some(proto) if proto == IP_PROTO_UDP as u64 => Some(100),
            _ => None,
        }
    }

    fn parse<'a>(&self, data: &'a [u8], _context: &ParseContext) -> ParseResult<'a> {
        match UdpHeaderSlice::from_slice(data) {
            Ok(udp) => {
                let mut fields = SmallVec::new();
                fields.push(("SrcPort", FieldValue::UInt16(udp.source_port())));
                fields.push(("DstPort", FieldValue::UInt16(udp.destination_port())));
                fields.push(("Length", FieldValue::UInt16(udp.length())));
                fields.push(("Checksum", FieldValue::UInt16(udp.checksum())));

                // UDP header is always 8 bytes
                ParseResult::success(fields, &data[8..], Hints::new())
            }
            Err(e) => ParseResult::error(format!("UDP parse error: {e}"), data),
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["SrcPort", "DstPort", "Length", "Checksum"]
    }
}
