//! IEEE 802.1Q VLAN tag decoder.

use smallvec::{smallvec, SmallVec};

use super::ethernet::ethertype;
use super::{FieldValue, ParseContext, ParseResult, Protocol};

/// 802.1Q VLAN tag decoder.
#[derive(Debug, Clone, Copy)]
pub struct VlanProtocol;

impl Protocol for VlanProtocol {
    fn name(&self) -> &'static str {
        "Dot1Q"
    }

    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        match context.hint("ethertype") {
            Some(etype) if etype == ethertype::VLAN as u64 => Some(100),
            Some(etype) if etype == ethertype::QINQ as u64 => Some(100),
            _ => None,
        }
    }

    fn parse<'a>(&self, data: &'a [u8], _context: &ParseContext) -> ParseResult<'a> {
        // The TPID was consumed as the outer EtherType; what is left is the
        // TCI followed by the inner EtherType.
        if data.len() < 4 {
            return ParseResult::error("VLAN tag too short".to_string(), data);
        }

        let tci = u16::from_be_bytes([data[0], data[1]]);
        let priority = ((tci >> 13) & 0x07) as u8;
        let drop_eligible = (tci >> 12) & 0x01 != 0;
        let vlan_id = tci & 0x0FFF;
        let inner_ethertype = u16::from_be_bytes([data[2], data[3]]);

        let mut fields = SmallVec::new();
        fields.push(("Priority", FieldValue::UInt8(priority)));
        fields.push(("DropEligible", FieldValue::Bool(drop_eligible)));
        fields.push(("VLANIdentifier", FieldValue::UInt16(vlan_id)));
        fields.push(("Type", FieldValue::UInt16(inner_ethertype)));

        let child_hints = smallvec![("ethertype", inner_ethertype as u64)];

        ParseResult::success(fields, &data[4..], child_hints)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["Priority", "DropEligible", "VLANIdentifier", "Type"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vlan_tag() {
        // PCP=5, DEI=0, VID=100, inner ethertype IPv4
        let data = [0xa0, 0x64, 0x08, 0x00, 0x45];

        let context =
            ParseContext::new(1).child("Ethernet", smallvec![("ethertype", ethertype::VLAN as u64)]);
        assert!(VlanProtocol.can_parse(&context).is_some());

        let result = VlanProtocol.parse(&data, &context);

        assert!(result.is_ok());
        assert_eq!(result.get("Priority"), Some(&FieldValue::UInt8(5)));
        assert_eq!(result.get("DropEligible"), Some(&FieldValue::Bool(false)));
        assert_eq!(result.get("VLANIdentifier"), Some(&FieldValue::UInt16(100)));
        assert_eq!(result.hint("ethertype"), Some(0x0800));
        assert_eq!(result.remaining, &[0x45]);
    }

    #[test]
    fn test_vlan_too_short() {
        let result = VlanProtocol.parse(&[0x00, 0x64], &ParseContext::new(1));
        assert!(!result.is_ok());
    }

    #[test]
    fn test_not_vlan_ethertype() {
        let context =
            ParseContext::new(1).child("Ethernet", smallvec![("ethertype", ethertype::IPV4 as u64)]);
        assert!(VlanProtocol.can_parse(&context).is_none());
    }
}
