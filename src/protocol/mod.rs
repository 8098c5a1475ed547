//! Layer decoding.
//!
//! This module provides:
//! - Core `Protocol` trait for header decoders
//! - `ProtocolRegistry` for managing registered decoders
//! - `decode_packet`, which turns a raw frame into an ordered list of `Layer`s

mod context;
mod field;
mod layer;
mod registry;

mod arp;
mod ethernet;
mod icmp;
mod ipv4;
mod ipv6;
mod tcp;
mod udp;
mod vlan;

pub use context::{FieldEntry, HintEntry, Hints, ParseContext, ParseResult};
pub use field::FieldValue;
pub use layer::{Layer, LayerBody, DECODE_FAILURE_LAYER, PAYLOAD_LAYER};
pub use registry::{BuiltinProtocol, Protocol, ProtocolRegistry};

pub use arp::ArpProtocol;
pub use ethernet::{EthernetProtocol, LINKTYPE_ETHERNET};
pub use icmp::IcmpProtocol;
pub use ipv4::Ipv4Protocol;
pub use ipv6::Ipv6Protocol;
pub use tcp::TcpProtocol;
pub use udp::UdpProtocol;
pub use vlan::VlanProtocol;

/// Create a registry with all built-in decoders.
pub fn default_registry() -> ProtocolRegistry {
    let mut registry = ProtocolRegistry::new();

    // Layer 2
    registry.register(EthernetProtocol);
    registry.register(ArpProtocol);
    registry.register(VlanProtocol);

    // Layer 3
    registry.register(Ipv4Protocol);
    registry.register(Ipv6Protocol);

    // Layer 4
    registry.register(TcpProtocol);
    registry.register(UdpProtocol);
    registry.register(IcmpProtocol);

    registry
}

/// Decode a frame through all known layers.
///
/// Decoding stops at the first header that fails (recorded as a
/// `DecodeFailure` layer) or when no decoder claims the remaining bytes, in
/// which case those bytes become the `Payload` layer.
pub fn decode_packet<'a>(
    registry: &ProtocolRegistry,
    link_type: u16,
    data: &'a [u8],
) -> Vec<Layer<'a>> {
    let mut layers = Vec::new();
    let mut context = ParseContext::new(link_type);
    let mut remaining = data;

    while !remaining.is_empty() {
        let Some(parser) = registry.find_parser(&context) else {
            layers.push(Layer::payload(remaining));
            break;
        };

        let result = parser.parse(remaining, &context);
        if let Some(error) = result.error {
            layers.push(Layer::decode_failure(parser.name(), error));
            break;
        }

        context = context.child(parser.name(), result.child_hints);
        remaining = result.remaining;

        layers.push(Layer::fields(parser.name(), result.fields));
    }

    layers
}
