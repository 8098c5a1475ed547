//! State handed from one decoder to the next.

use smallvec::SmallVec;

use super::FieldValue;

/// One decoded field: (field_name, value). Names are static per decoder.
pub type FieldEntry<'data> = (&'static str, FieldValue<'data>);

/// A dispatch hint for the next layer, such as `("ethertype", 0x0800)`.
pub type HintEntry = (&'static str, u64);

/// Hints a decoder passes down to select its child.
pub type Hints = SmallVec<[HintEntry; 4]>;

/// What the next decoder may know about the bytes it is offered.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Capture link type (1 = Ethernet).
    pub link_type: u16,

    /// Name of the layer decoded just before, `None` at the start of a frame.
    pub parent_protocol: Option<&'static str>,

    pub hints: Hints,
}

impl ParseContext {
    /// Context for the first header of a frame.
    pub fn new(link_type: u16) -> Self {
        Self {
            link_type,
            parent_protocol: None,
            hints: Hints::new(),
        }
    }

    /// Context for the header following `parent`.
    pub fn child(&self, parent: &'static str, hints: Hints) -> Self {
        Self {
            link_type: self.link_type,
            parent_protocol: Some(parent),
            hints,
        }
    }

    #[inline]
    pub fn hint(&self, key: &str) -> Option<u64> {
        self.hints.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn is_root(&self) -> bool {
        self.parent_protocol.is_none()
    }
}

/// Outcome of decoding one header.
///
/// Fields keep the order the decoder emitted them in; that order is what
/// the layer exposes to the tabulator.
#[derive(Debug, Clone)]
pub struct ParseResult<'data> {
    pub fields: SmallVec<[FieldEntry<'data>; 16]>,

    /// Bytes left for the next layer.
    pub remaining: &'data [u8],

    pub child_hints: Hints,

    /// Set when the header could not be decoded.
    pub error: Option<String>,
}

impl<'data> ParseResult<'data> {
    pub fn success(
        fields: SmallVec<[FieldEntry<'data>; 16]>,
        remaining: &'data [u8],
        child_hints: Hints,
    ) -> Self {
        Self {
            fields,
            remaining,
            child_hints,
            error: None,
        }
    }

    pub fn error(error: String, remaining: &'data [u8]) -> Self {
        Self {
            fields: SmallVec::new(),
            remaining,
            child_hints: Hints::new(),
            error: Some(error),
        }
    }
}

/// Lookups used by the decoder unit tests.
#[cfg(test)]
impl<'data> ParseResult<'data> {
    pub fn get(&self, name: &str) -> Option<&FieldValue<'data>> {
        self.fields.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    pub fn hint(&self, name: &str) -> Option<u64> {
        self.child_hints
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
