//! Per-packet driver feeding decoded layers into the accumulator.
//!
//! For each packet: decode, keep the outermost occurrence of every layer,
//! offer each field to the capture declaration, derive payload and synthetic
//! columns, then even the frame out.

use smallvec::SmallVec;
use tracing::{debug, enabled, trace, Level};

use crate::config::CaptureSpec;
use crate::format::format_timestamp_us;
use crate::frame::{Frame, Value};
use crate::payload;
use crate::pcap::RawPacket;
use crate::protocol::{decode_packet, Layer, LayerBody, ProtocolRegistry, PAYLOAD_LAYER};

/// Layer name of per-packet decoding facts, as gopacket-based tooling
/// names its decoder summary columns.
pub const PACKET_LAYER: &str = "gopacket";

/// Layer name of capture record metadata.
pub const METADATA_LAYER: &str = "Metadata";

/// Fields of the `gopacket` layer.
pub const PACKET_FIELDS: &[&str] = &["layers", "DecodeFailure"];

/// Fields of the `Metadata` layer.
pub const METADATA_FIELDS: &[&str] = &["Timestamp", "Length", "CaptureLength", "Truncated"];

/// Fields of the `Payload` layer.
pub const PAYLOAD_FIELDS: &[&str] = &[payload::LENGTH_FIELD, payload::FILTER_FIELD];

/// Counters kept while tabulating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabulateStats {
    /// Packets ingested (also the next packet index).
    pub packets: usize,
    /// Values stored in the frame.
    pub appended: u64,
    /// Decoded fields not declared in the capture section.
    pub dropped: u64,
    /// Packets with a header that failed to decode.
    pub decode_failures: u64,
    /// Inner repeats of a layer already seen in the same packet.
    pub repeated_layers: u64,
}

/// Builds the frame one packet at a time.
pub struct Tabulator<'spec> {
    spec: &'spec CaptureSpec,
    registry: ProtocolRegistry,
    frame: Frame,
    stats: TabulateStats,
}

impl<'spec> Tabulator<'spec> {
    pub fn new(spec: &'spec CaptureSpec, registry: ProtocolRegistry) -> Self {
        Self {
            spec,
            registry,
            frame: Frame::new(),
            stats: TabulateStats::default(),
        }
    }

    /// Decode and tabulate one packet. Returns its packet index.
    pub fn ingest(&mut self, packet: &RawPacket) -> usize {
        let index = self.stats.packets;
        let layers = decode_packet(&self.registry, packet.link_type, &packet.data);

        self.tabulate_layers(index, packet.frame_number, &layers);
        self.tabulate_metadata(index, packet);
        self.frame.even_out(index);

        if enabled!(Level::TRACE) {
            for line in self.frame.describe_row(index) {
                trace!(packet = index, frame = packet.frame_number, "{line}");
            }
        }

        self.stats.packets += 1;
        index
    }

    fn tabulate_layers(&mut self, index: usize, frame: u64, layers: &[Layer<'_>]) {
        let mut seen: SmallVec<[&'static str; 8]> = SmallVec::new();
        let mut failed = false;

        for layer in layers {
            let name = layer.name();
            if let LayerBody::DecodeFailure { protocol, error } = layer.body() {
                debug!(frame, protocol, error = %error, "Decode failure");
                failed = true;
                continue;
            }
            if seen.contains(&name) {
                debug!(frame, layer = name, "Skipping repeated layer");
                self.stats.repeated_layers += 1;
                continue;
            }
            seen.push(name);

            match layer.body() {
                LayerBody::Fields(fields) => {
                    for (field, value) in fields {
                        self.offer(index, name, field, value.type_label(), Value::from_field(value));
                    }
                }
                LayerBody::Payload(bytes) => self.tabulate_payload(index, bytes),
                LayerBody::DecodeFailure { .. } => {}
            }
        }

        let names: Vec<&str> = layers.iter().map(|l| l.name()).collect();
        self.offer(
            index,
            PACKET_LAYER,
            "layers",
            "string",
            Some(Value::Text(names.join("/"))),
        );
        if failed {
            self.stats.decode_failures += 1;
            self.offer(index, PACKET_LAYER, "DecodeFailure", "bool", Some(Value::Bool(true)));
        }
    }

    fn tabulate_payload(&mut self, index: usize, bytes: &[u8]) {
        match self.spec.window() {
            Some(window) => {
                for (field, label, value) in window.columns(bytes) {
                    self.offer(index, PAYLOAD_LAYER, field, label, Some(value));
                }
            }
            None => {
                let (field, label, value) = payload::length_column(bytes);
                self.offer(index, PAYLOAD_LAYER, field, label, Some(value));
            }
        }
    }

    fn tabulate_metadata(&mut self, index: usize, packet: &RawPacket) {
        let columns = [
            ("Timestamp", "string", Value::Text(format_timestamp_us(packet.timestamp_us))),
            ("Length", "u32", Value::UInt(packet.original_length as u64)),
            ("CaptureLength", "u32", Value::UInt(packet.captured_length as u64)),
            ("Truncated", "bool", Value::Bool(packet.is_truncated())),
        ];
        for (field, label, value) in columns {
            self.offer(index, METADATA_LAYER, field, label, Some(value));
        }
    }

    fn offer(
        &mut self,
        index: usize,
        layer: &str,
        field: &str,
        type_label: &'static str,
        value: Option<Value>,
    ) {
        if !self.spec.is_eligible(layer, field) {
            self.stats.dropped += 1;
            return;
        }
        if let Some(value) = value {
            self.frame.append(index, layer, field, type_label, value);
            self.stats.appended += 1;
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn stats(&self) -> TabulateStats {
        self.stats
    }

    pub fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    /// Consume the tabulator, returning the frame and final counters.
    pub fn finish(self) -> (Frame, TabulateStats) {
        (self.frame, self.stats)
    }
}

/// Declared fields that neither a decoder nor a synthetic layer produces.
///
/// They are still exported, as empty columns.
pub fn unknown_fields(spec: &CaptureSpec, registry: &ProtocolRegistry) -> Vec<String> {
    let mut unknown: Vec<String> = spec
        .declared_fields()
        .filter(|(layer, field)| {
            let known = match *layer {
                PACKET_LAYER => PACKET_FIELDS.contains(field),
                METADATA_LAYER => METADATA_FIELDS.contains(field),
                PAYLOAD_LAYER => PAYLOAD_FIELDS.contains(field),
                _ => registry.knows_field(layer, field),
            };
            !known
        })
        .map(|(layer, field)| crate::frame::column_key(layer, field))
        .collect();
    unknown.sort();
    unknown
}
