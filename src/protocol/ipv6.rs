//! IPv6 decoder.

use etherparse::Ipv6HeaderSlice;
use smallvec::SmallVec;

use super::ethernet::ethertype;
use super::{FieldValue, ParseContext, ParseResult, Protocol};

/// IPv6 decoder.
///
/// Extension headers are not walked; `NextHeader` is handed to the
/// transport decoders as-is.
#[derive(Debug, Clone, Copy)]
pub struct Ipv6Protocol;

impl Protocol for Ipv6Protocol {
    fn name(&self) -> &'static str {
        "IPv6"
    }

    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        match context.hint("ethertype") {
            Some(et) if et == ethertype::IPV6 as u64 => Some(100),
            _ => None,
        }
    }

    fn parse<'a>(&self, data: &'a [u8], _context: &ParseContext) -> ParseResult<'a> {
        match Ipv6HeaderSlice::from_slice(data) {
            Ok(ipv6) => {
                let mut fields = SmallVec::new();
                fields.push(("Version", FieldValue::UInt8(6)));
                fields.push(("TrafficClass", FieldValue::UInt8(ipv6.traffic_class())));
                fields.push(("FlowLabel", FieldValue::UInt32(ipv6.flow_label().value())));
                fields.push(("Length", FieldValue::UInt16(ipv6.payload_length())));
                fields.push(("NextHeader", FieldValue::UInt8(ipv6.next_header().0)));
                fields.push(("HopLimit", FieldValue::UInt8(ipv6.hop_limit())));
                fields.push(("SrcIP", FieldValue::ipv6(&ipv6.source())));
                fields.push(("DstIP", FieldValue::ipv6(&ipv6.destination())));

                let mut child_hints = SmallVec::new();
                child_hints.push(("ip_protocol", ipv6.next_header().0 as u64));
                child_hints.push(("ip_version", 6));

                let header_len = ipv6.slice().len();
                let end = (header_len + ipv6.payload_length() as usize).min(data.len());
                ParseResult::success(fields, &data[header_len..end], child_hints)
            }
            Err(e) => ParseResult::error(format!("IPv6 parse error: {e}"), data),
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "Version",
            "TrafficClass",
            "FlowLabel",
            "Length",
            "NextHeader",
            "HopLimit",
            "SrcIP",
            "DstIP",
        ]
    }
}
