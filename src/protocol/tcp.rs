//! TCP decoder.

use etherparse::TcpHeaderSlice;
use smallvec::SmallVec;

use super::{FieldValue, Hints, ParseContext, ParseResult, Protocol};

/// IP protocol number for TCP.
pub const IP_PROTO_TCP: u8 = 6;

/// TCP decoder.
#[derive(Debug, Clone, Copy)]
pub struct TcpProtocol;

impl Protocol for TcpProtocol {
    fn name(&self) -> &'static str {
        "TCP"
    }

    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        match context.hint("ip_protocol") {
            Some(proto) if proto == IP_PROTO_TCP as u64 => Some(100),
            _ => None,
        }
    }

    fn parse<'a>(&self, data: &'a [u8], _context: &ParseContext) -> ParseResult<'a> {
        match TcpHeaderSlice::from_slice(data) {
            Ok(tcp) => {
                let header_len = tcp.slice().len();

                let mut fields = SmallVec::new();
                fields.push(("SrcPort", FieldValue::UInt16(tcp.source_port())));
                fields.push(("DstPort", FieldValue::UInt16(tcp.destination_port())));
                fields.push(("Seq", FieldValue::UInt32(tcp.sequence_number())));
                fields.push(("Ack", FieldValue::UInt32(tcp.acknowledgment_number())));
                fields.push(("DataOffset", FieldValue::UInt8(tcp.data_offset())));
                fields.push(("FIN", FieldValue::Bool(tcp.fin())));
                fields.push(("SYN", FieldValue::Bool(tcp.syn())));
                fields.push(("RST", FieldValue::Bool(tcp.rst())));
                fields.push(("PSH", FieldValue::Bool(tcp.psh())));
                fields.push(("ACK", FieldValue::Bool(tcp.ack())));
                fields.push(("URG", FieldValue::Bool(tcp.urg())));
                fields.push(("ECE", FieldValue::Bool(tcp.ece())));
                fields.push(("CWR", FieldValue::Bool(tcp.cwr())));
                fields.push(("NS", FieldValue::Bool(tcp.ns())));
                fields.push(("Window", FieldValue::UInt16(tcp.window_size())));
                fields.push(("Checksum", FieldValue::UInt16(tcp.checksum())));
                fields.push(("Urgent", FieldValue::UInt16(tcp.urgent_pointer())));
                fields.push((
                    "OptionsLength",
                    FieldValue::UInt8(header_len.saturating_sub(20) as u8),
                ));

                // Segment data is never decoded further.
                ParseResult::success(fields, &data[header_len..], Hints::new())
            }
            Err(e) => ParseResult::error(format!("TCP parse error: {e}"), data),
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "SrcPort",
            "DstPort",
            "Seq",
            "Ack",
            "DataOffset",
            "FIN",
            "SYN",
            "RST",
            "PSH",
            "ACK",
            "URG",
            "ECE",
            "CWR",
            "NS",
            "Window",
            "Checksum",
            "Urgent",
            "OptionsLength",
        ]
    }
}
