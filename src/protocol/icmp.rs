//! ICMPv4 decoder.

use smallvec::SmallVec;

use super::{FieldValue, ParseContext, ParseResult, Protocol};

/// IP protocol number for ICMP.
pub const IP_PROTO_ICMP: u8 = 1;

/// ICMP type constants.
pub mod icmp_type {
    pub const ECHO_REPLY: u8 = 0;
    pub const ECHO_REQUEST: u8 = 8;
}

/// ICMPv4 decoder.
#[derive(Debug, Clone, Copy)]
pub struct IcmpProtocol;

impl Protocol for IcmpProtocol {
    fn name(&self) -> &'static str {
        "ICMPv4"
    }

    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        match (context.hint("ip_protocol"), context.hint("ip_version")) {
            (Some(proto), Some(4)) if proto == IP_PROTO_ICMP as u64 => Some(100),
            _ => None,
        }
    }

    fn parse<'a>(&self, data: &'a [u8], _context: &ParseContext) -> ParseResult<'a> {
        if data.len() < 8 {
            return ParseResult::error(
                format!("ICMP header too short: {} bytes", data.len()),
                data,
            );
        }

        let icmp_type = data[0];
        let icmp_code = data[1];
        let checksum = u16::from_be_bytes([data[2], data[3]]);

        let mut fields = SmallVec::new();
        fields.push(("Type", FieldValue::UInt8(icmp_type)));
        fields.push(("Code", FieldValue::UInt8(icmp_code)));
        fields.push(("Checksum", FieldValue::UInt16(checksum)));

        match icmp_type {
            icmp_type::ECHO_REQUEST | icmp_type::ECHO_REPLY => {
                fields.push(("Id", FieldValue::UInt16(u16::from_be_bytes([data[4], data[5]]))));
                fields.push(("Seq", FieldValue::UInt16(u16::from_be_bytes([data[6], data[7]]))));
            }
            _ => {
                let rest = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
                fields.push(("RestOfHeader", FieldValue::UInt32(rest)));
            }
        }

        ParseResult::success(fields, &data[8..], SmallVec::new())
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["Type", "Code", "Checksum", "Id", "Seq", "RestOfHeader"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn icmp_context() -> ParseContext {
        ParseContext::new(1).child(
            "IPv4",
            smallvec![("ip_protocol", IP_PROTO_ICMP as u64), ("ip_version", 4)],
        )
    }

    #[test]
    fn test_parse_echo_request() {
        let packet = [
            0x08, 0x00, // Echo request, code 0
            0xf7, 0xfd, // Checksum
            0x00, 0x01, // Id
            0x00, 0x02, // Seq
            0x61, 0x62, // data
        ];

        let context = icmp_context();
        assert!(IcmpProtocol.can_parse(&context).is_some());

        let result = IcmpProtocol.parse(&packet, &context);

        assert!(result.is_ok());
        assert_eq!(result.get("Type"), Some(&FieldValue::UInt8(8)));
        assert_eq!(result.get("Seq"), Some(&FieldValue::UInt16(2)));
        assert!(result.get("RestOfHeader").is_none());
        assert_eq!(result.remaining, b"ab");
    }

    #[test]
    fn test_parse_unreachable() {
        let packet = [0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x05, 0xdc];

        let result = IcmpProtocol.parse(&packet, &icmp_context());

        assert_eq!(result.get("RestOfHeader"), Some(&FieldValue::UInt32(1500)));
        assert!(result.get("Id").is_none());
    }

    #[test]
    fn test_not_parsed_over_ipv6() {
        let context = ParseContext::new(1).child(
            "IPv6",
            smallvec![("ip_protocol", IP_PROTO_ICMP as u64), ("ip_version", 6)],
        );
        assert!(IcmpProtocol.can_parse(&context).is_none());
    }

    #[test]
    fn test_icmp_too_short() {
        let result = IcmpProtocol.parse(&[0x08, 0x00], &icmp_context());
        assert!(!result.is_ok());
    }
}
