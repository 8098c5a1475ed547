//! Decoded layers as handed to the tabulator.

use smallvec::SmallVec;

use super::context::FieldEntry;

/// Layer name of the catch-all raw payload.
pub const PAYLOAD_LAYER: &str = "Payload";

/// Layer name recorded when a header fails to decode.
pub const DECODE_FAILURE_LAYER: &str = "DecodeFailure";

/// What a decoded layer carries.
#[derive(Debug, Clone)]
pub enum LayerBody<'data> {
    /// Header fields in decoder order.
    Fields(SmallVec<[FieldEntry<'data>; 16]>),
    /// Bytes left over after the last recognised header.
    Payload(&'data [u8]),
    /// The decoder for `protocol` rejected the bytes it was given.
    DecodeFailure {
        protocol: &'static str,
        error: String,
    },
}

/// One layer of a decoded packet.
#[derive(Debug, Clone)]
pub struct Layer<'data> {
    name: &'static str,
    body: LayerBody<'data>,
}

impl<'data> Layer<'data> {
    pub fn fields(name: &'static str, fields: SmallVec<[FieldEntry<'data>; 16]>) -> Self {
        Self {
            name,
            body: LayerBody::Fields(fields),
        }
    }

    pub fn payload(data: &'data [u8]) -> Self {
        Self {
            name: PAYLOAD_LAYER,
            body: LayerBody::Payload(data),
        }
    }

    pub fn decode_failure(protocol: &'static str, error: String) -> Self {
        Self {
            name: DECODE_FAILURE_LAYER,
            body: LayerBody::DecodeFailure { protocol, error },
        }
    }

    /// Layer name as used in capture declarations.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn body(&self) -> &LayerBody<'data> {
        &self.body
    }

    /// Ordered (field name, value) pairs. Payload and failure layers have none.
    pub fn field_entries(&self) -> &[FieldEntry<'data>] {
        match &self.body {
            LayerBody::Fields(fields) => fields,
            _ => &[],
        }
    }

    pub fn payload_bytes(&self) -> Option<&'data [u8]> {
        match self.body {
            LayerBody::Payload(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_decode_failure(&self) -> bool {
        matches!(self.body, LayerBody::DecodeFailure { .. })
    }
}
