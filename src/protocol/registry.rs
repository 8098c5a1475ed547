//! Protocol registry for managing decoders.

use super::{
    ArpProtocol, EthernetProtocol, IcmpProtocol, Ipv4Protocol, Ipv6Protocol, ParseContext,
    ParseResult, TcpProtocol, UdpProtocol, VlanProtocol,
};

/// Core trait all layer decoders implement.
pub trait Protocol: Send + Sync {
    /// Layer name as it appears in capture declarations (e.g., "TCP", "IPv4").
    fn name(&self) -> &'static str;

    /// Check if this decoder can handle the given context.
    /// Returns a priority score (higher = more specific match).
    /// Returns `None` if this decoder cannot handle the context.
    fn can_parse(&self, context: &ParseContext) -> Option<u32>;

    /// Decode bytes into ordered fields.
    fn parse<'a>(&self, data: &'a [u8], context: &ParseContext) -> ParseResult<'a>;

    /// Field names this decoder can emit, in emission order.
    fn field_names(&self) -> &'static [&'static str];
}

/// Enum of all built-in decoders.
///
/// Static dispatch for every built-in layer; match arms inline.
#[derive(Debug, Clone, Copy)]
pub enum BuiltinProtocol {
    Ethernet(EthernetProtocol),
    Arp(ArpProtocol),
    Vlan(VlanProtocol),
    Ipv4(Ipv4Protocol),
    Ipv6(Ipv6Protocol),
    Tcp(TcpProtocol),
    Udp(UdpProtocol),
    Icmp(IcmpProtocol),
}

macro_rules! delegate_protocol {
    ($self:expr, $method:ident $(, $arg:expr)*) => {
        match $self {
            BuiltinProtocol::Ethernet(p) => p.$method($($arg),*),
            BuiltinProtocol::Arp(p) => p.$method($($arg),*),
            BuiltinProtocol::Vlan(p) => p.$method($($arg),*),
            BuiltinProtocol::Ipv4(p) => p.$method($($arg),*),
            BuiltinProtocol::Ipv6(p) => p.$method($($arg),*),
            BuiltinProtocol::Tcp(p) => p.$method($($arg),*),
            BuiltinProtocol::Udp(p) => p.$method($($arg),*),
            BuiltinProtocol::Icmp(p) => p.$method($($arg),*),
        }
    };
}

impl Protocol for BuiltinProtocol {
    #[inline]
    fn name(&self) -> &'static str {
        delegate_protocol!(self, name)
    }

    #[inline]
    fn can_parse(&self, context: &ParseContext) -> Option<u32> {
        delegate_protocol!(self, can_parse, context)
    }

    #[inline]
    fn parse<'a>(&self, data: &'a [u8], context: &ParseContext) -> ParseResult<'a> {
        delegate_protocol!(self, parse, data, context)
    }

    #[inline]
    fn field_names(&self) -> &'static [&'static str] {
        delegate_protocol!(self, field_names)
    }
}

macro_rules! builtin_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for BuiltinProtocol {
                fn from(p: $ty) -> Self {
                    BuiltinProtocol::$variant(p)
                }
            }
        )*
    };
}

builtin_from! {
    EthernetProtocol => Ethernet,
    ArpProtocol => Arp,
    VlanProtocol => Vlan,
    Ipv4Protocol => Ipv4,
    Ipv6Protocol => Ipv6,
    TcpProtocol => Tcp,
    UdpProtocol => Udp,
    IcmpProtocol => Icmp,
}

/// Registry for decoders with priority-based selection.
pub struct ProtocolRegistry {
    parsers: Vec<BuiltinProtocol>,
}

impl ProtocolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a decoder.
    pub fn register<P: Into<BuiltinProtocol>>(&mut self, parser: P) {
        self.parsers.push(parser.into());
    }

    /// Find the best decoder for the given context.
    #[inline]
    pub fn find_parser(&self, context: &ParseContext) -> Option<&BuiltinProtocol> {
        self.parsers
            .iter()
            .filter_map(|p| p.can_parse(context).map(|priority| (p, priority)))
            .max_by_key(|(_, priority)| *priority)
            .map(|(parser, _)| parser)
    }

    /// Get all registered decoders.
    pub fn all_parsers(&self) -> impl Iterator<Item = &BuiltinProtocol> {
        self.parsers.iter()
    }

    /// Get a decoder by layer name.
    pub fn get_parser(&self, name: &str) -> Option<&BuiltinProtocol> {
        self.parsers.iter().find(|p| p.name() == name)
    }

    /// Whether any registered decoder emits `layer.field`.
    pub fn knows_field(&self, layer: &str, field: &str) -> bool {
        self.get_parser(layer)
            .is_some_and(|p| p.field_names().contains(&field))
    }

    /// Get the number of registered decoders.
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_protocol_size() {
        // All decoders are unit structs, so the enum is just the discriminant.
        let size = std::mem::size_of::<BuiltinProtocol>();
        assert!(size <= 8, "BuiltinProtocol is {} bytes, expected <= 8", size);
    }

    #[test]
    fn test_registry_static_dispatch() {
        let mut registry = ProtocolRegistry::new();
        registry.register(EthernetProtocol);
        registry.register(Ipv4Protocol);
        registry.register(TcpProtocol);

        assert_eq!(registry.len(), 3);

        let ctx = ParseContext::new(1);
        let parser = registry.find_parser(&ctx);
        assert_eq!(parser.map(|p| p.name()), Some("Ethernet"));
    }

    #[test]
    fn test_get_parser_by_name() {
        let mut registry = ProtocolRegistry::new();
        registry.register(TcpProtocol);
        registry.register(UdpProtocol);

        assert!(registry.get_parser("TCP").is_some());
        assert!(registry.get_parser("UDP").is_some());
        assert!(registry.get_parser("tcp").is_none());
    }

    #[test]
    fn test_knows_field() {
        let mut registry = ProtocolRegistry::new();
        registry.register(TcpProtocol);

        assert!(registry.knows_field("TCP", "DstPort"));
        assert!(!registry.knows_field("TCP", "Bogus"));
        assert!(!registry.knows_field("UDP", "DstPort"));
    }
}
