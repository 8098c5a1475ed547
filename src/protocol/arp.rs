//! ARP decoder.

use smallvec::SmallVec;

use super::ethernet::ethertype;
use super::{FieldValue, ParseContext, ParseResult, Protocol};

/// Fixed length of an Ethernet/IPv4 ARP message.
const ARP_LEN: usize = 28;

/// ARP decoder.
#[derive(Debug, Clone, Copy)]
pub struct ArpProtocol;

impl Protocol for ArpProtocol {
    fn name(&self) -> &'static str {
        "ARP"
    }

    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        match context.hint("ethertype") {
            Some(et) if et == ethertype::ARP as u64 => Some(100),
            _ => None,
        }
    }

    fn parse<'a>(&self, data: &'a [u8], _context: &ParseContext) -> ParseResult<'a> {
        if data.len() < ARP_LEN {
            return ParseResult::error(format!("ARP packet too short: {} bytes", data.len()), data);
        }

        let hardware_type = u16::from_be_bytes([data[0], data[1]]);
        let protocol_type = u16::from_be_bytes([data[2], data[3]]);
        let hardware_size = data[4];
        let protocol_size = data[5];
        let operation = u16::from_be_bytes([data[6], data[7]]);

        let mut fields = SmallVec::new();
        fields.push(("AddrType", FieldValue::UInt16(hardware_type)));
        fields.push(("Protocol", FieldValue::UInt16(protocol_type)));
        fields.push(("HwAddressSize", FieldValue::UInt8(hardware_size)));
        fields.push(("ProtAddressSize", FieldValue::UInt8(protocol_size)));
        fields.push(("Operation", FieldValue::UInt16(operation)));

        if hardware_type == 1
            && protocol_type == ethertype::IPV4
            && hardware_size == 6
            && protocol_size == 4
        {
            fields.push(("SourceHwAddress", FieldValue::mac(&data[8..14])));
            fields.push(("SourceProtAddress", FieldValue::ipv4(&data[14..18])));
            fields.push(("DstHwAddress", FieldValue::mac(&data[18..24])));
            fields.push(("DstProtAddress", FieldValue::ipv4(&data[24..28])));
        }

        // Anything after the message is link-layer padding, not payload.
        ParseResult::success(fields, &data[ARP_LEN..ARP_LEN], SmallVec::new())
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "AddrType",
            "Protocol",
            "HwAddressSize",
            "ProtAddressSize",
            "Operation",
            "SourceHwAddress",
            "SourceProtAddress",
            "DstHwAddress",
            "DstProtAddress",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;
    use std::net::{IpAddr, Ipv4Addr};

    fn arp_context() -> ParseContext {
        ParseContext::new(1).child("Ethernet", smallvec![("ethertype", ethertype::ARP as u64)])
    }

    #[test]
    fn test_parse_arp_request() {
        let mut packet = vec![
            0x00, 0x01, // Hardware type: Ethernet
            0x08, 0x00, // Protocol type: IPv4
            0x06, 0x04, // sizes
            0x00, 0x01, // Operation: Request
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // Sender MAC
            0xc0, 0xa8, 0x01, 0x01, // Sender IP
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Target MAC
            0xc0, 0xa8, 0x01, 0x02, // Target IP
        ];
        // Ethernet minimum-frame padding
        packet.extend_from_slice(&[0u8; 18]);

        let context = arp_context();
        assert!(ArpProtocol.can_parse(&context).is_some());

        let result = ArpProtocol.parse(&packet, &context);

        assert!(result.is_ok());
        assert_eq!(result.get("Operation"), Some(&FieldValue::UInt16(1)));
        assert_eq!(
            result.get("SourceProtAddress"),
            Some(&FieldValue::IpAddr(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))))
        );
        assert!(result.remaining.is_empty());
    }

    #[test]
    fn test_non_ipv4_arp_omits_addresses() {
        let mut packet = [0u8; ARP_LEN];
        packet[1] = 6; // IEEE 802 hardware type
        packet[2] = 0x08;

        let result = ArpProtocol.parse(&packet, &arp_context());

        assert!(result.is_ok());
        assert!(result.get("SourceHwAddress").is_none());
        assert_eq!(result.fields.len(), 5);
    }

    #[test]
    fn test_arp_too_short() {
        let result = ArpProtocol.parse(&[0x00, 0x01, 0x08], &arp_context());
        assert!(!result.is_ok());
    }
}
