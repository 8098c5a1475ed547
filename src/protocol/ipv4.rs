//! IPv4 decoder.

use etherparse::Ipv4HeaderSlice;
use smallvec::SmallVec;

use super::ethernet::ethertype;
use super::{FieldValue, ParseContext, ParseResult, Protocol};

/// IPv4 decoder.
#[derive(Debug, Clone, Copy)]
pub struct Ipv4Protocol;

impl Protocol for Ipv4Protocol {
    fn name(&self) -> &'static str {
        "IPv4"
    }

    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        match context.hint("ethertype") {
            Some(et) if et == ethertype::IPV4 as u64 => Some(100),
            _ => None,
        }
    }

    fn parse<'a>(&self, data: &'a [u8], _context: &ParseContext) -> ParseResult<'a> {
        match Ipv4HeaderSlice::from_slice(data) {
            Ok(ipv4) => {
                let mut fields = SmallVec::new();
                fields.push(("Version", FieldValue::UInt8(4)));
                fields.push(("IHL", FieldValue::UInt8(ipv4.ihl())));
                fields.push(("DSCP", FieldValue::UInt8(ipv4.dcp().value())));
                fields.push(("ECN", FieldValue::UInt8(ipv4.ecn().value())));
                fields.push(("Length", FieldValue::UInt16(ipv4.total_len())));
                fields.push(("Id", FieldValue::UInt16(ipv4.identification())));
                fields.push(("DontFragment", FieldValue::Bool(ipv4.dont_fragment())));
                fields.push(("MoreFragments", FieldValue::Bool(ipv4.more_fragments())));
                fields.push((
                    "FragOffset",
                    FieldValue::UInt16(ipv4.fragments_offset().value()),
                ));
                fields.push(("TTL", FieldValue::UInt8(ipv4.ttl())));
                fields.push(("Protocol", FieldValue::UInt8(ipv4.protocol().0)));
                fields.push(("Checksum", FieldValue::UInt16(ipv4.header_checksum())));
                fields.push(("SrcIP", FieldValue::ipv4(&ipv4.source())));
                fields.push(("DstIP", FieldValue::ipv4(&ipv4.destination())));

                let mut child_hints = SmallVec::new();
                child_hints.push(("ip_protocol", ipv4.protocol().0 as u64));
                child_hints.push(("ip_version", 4));

                // Bytes past total_len are link-layer padding.
                let header_len = ipv4.slice().len();
                let end = (ipv4.total_len() as usize).clamp(header_len, data.len());
                ParseResult::success(fields, &data[header_len..end], child_hints)
            }
            Err(e) => ParseResult::error(format!("IPv4 parse error: {e}"), data),
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "Version",
            "IHL",
            "DSCP",
            "ECN",
            "Length",
            "Id",
            "DontFragment",
            "MoreFragments",
            "FragOffset",
            "TTL",
            "Protocol",
            "Checksum",
            "SrcIP",
            "DstIP",
        ]
    }
}
