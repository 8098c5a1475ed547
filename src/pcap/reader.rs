//! PCAP file reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, PcapBlockOwned, PcapError, PcapNGReader};
use tracing::warn;

use super::RawPacket;
use crate::error::{Error, PcapError as OurPcapError};

/// Buffer size for reading PCAP files (64KB).
const BUFFER_SIZE: usize = 65536;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Default PCAPNG timestamp resolution (10^-6 s).
const DEFAULT_TSRESOL: u8 = 6;

/// Reader for PCAP and PCAPNG files, with optional gzip decompression.
///
/// The underlying file handle is owned by the reader and closed on drop.
pub struct PcapReader {
    inner: ReaderInner,
    frame_number: u64,
    link_type: u16,
    nanosecond: bool,
    tsresol: u8,
}

enum ReaderInner {
    Legacy(LegacyPcapReader<BufReader<Box<dyn Read + Send>>>),
    Ng(PcapNGReader<BufReader<Box<dyn Read + Send>>>),
}

impl PcapReader {
    /// Open a PCAP file for reading.
    ///
    /// Automatically detects and decompresses gzipped files.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let is_gzipped = is_gzip_file(path)?;

        let mut buf_reader = open_buffered(path, is_gzipped)?;

        // Peek at magic number to determine PCAP format
        let mut magic = [0u8; 4];
        buf_reader.read_exact(&mut magic).map_err(|_| {
            Error::Pcap(OurPcapError::InvalidFormat {
                reason: "File too short to read magic number".to_string(),
            })
        })?;

        // Re-open since the magic bytes were consumed
        drop(buf_reader);
        let buf_reader = open_buffered(path, is_gzipped)?;

        match &magic {
            // PCAP magic, microsecond and nanosecond, both byte orders
            [0xd4, 0xc3, 0xb2, 0xa1]
            | [0xa1, 0xb2, 0xc3, 0xd4]
            | [0x4d, 0x3c, 0xb2, 0xa1]
            | [0xa1, 0xb2, 0x3c, 0x4d] => Self::open_legacy(buf_reader),
            // PCAPNG section header block
            [0x0a, 0x0d, 0x0d, 0x0a] => Self::open_ng(buf_reader),
            _ => Err(Error::Pcap(OurPcapError::InvalidFormat {
                reason: format!("Unknown magic number: {magic:02x?}"),
            })),
        }
    }

    fn open_legacy(reader: BufReader<Box<dyn Read + Send>>) -> Result<Self, Error> {
        let pcap_reader = LegacyPcapReader::new(BUFFER_SIZE, reader).map_err(|e| {
            Error::Pcap(OurPcapError::InvalidFormat {
                reason: format!("Failed to parse PCAP header: {e}"),
            })
        })?;

        Ok(Self {
            inner: ReaderInner::Legacy(pcap_reader),
            frame_number: 0,
            link_type: 1, // updated from the file header
            nanosecond: false,
            tsresol: DEFAULT_TSRESOL,
        })
    }

    fn open_ng(reader: BufReader<Box<dyn Read + Send>>) -> Result<Self, Error> {
        let pcap_reader = PcapNGReader::new(BUFFER_SIZE, reader).map_err(|e| {
            Error::Pcap(OurPcapError::InvalidFormat {
                reason: format!("Failed to parse PCAPNG header: {e}"),
            })
        })?;

        Ok(Self {
            inner: ReaderInner::Ng(pcap_reader),
            frame_number: 0,
            link_type: 1, // updated from the interface description block
            nanosecond: false,
            tsresol: DEFAULT_TSRESOL,
        })
    }

    /// Get the link type of the capture.
    pub fn link_type(&self) -> u16 {
        self.link_type
    }

    /// Get the number of packets read so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_number
    }

    /// Read the next packet.
    pub fn next_packet(&mut self) -> Result<Option<RawPacket>, Error> {
        if matches!(self.inner, ReaderInner::Legacy(_)) {
            self.next_legacy()
        } else {
            self.next_ng()
        }
    }

    fn next_legacy(&mut self) -> Result<Option<RawPacket>, Error> {
        let reader = match &mut self.inner {
            ReaderInner::Legacy(r) => r,
            ReaderInner::Ng(_) => unreachable!(),
        };
        loop {
            match reader.next() {
                Ok((offset, block)) => match block {
                    PcapBlockOwned::Legacy(packet) => {
                        self.frame_number += 1;

                        let fraction_us = if self.nanosecond {
                            (packet.ts_usec / 1_000) as i64
                        } else {
                            packet.ts_usec as i64
                        };
                        let timestamp_us = (packet.ts_sec as i64) * 1_000_000 + fraction_us;

                        let raw = RawPacket::new(
                            self.frame_number,
                            timestamp_us,
                            packet.caplen,
                            packet.origlen,
                            self.link_type,
                            packet.data.to_vec(),
                        );

                        reader.consume(offset);
                        return Ok(Some(raw));
                    }
                    PcapBlockOwned::LegacyHeader(header) => {
                        self.link_type = header.network.0 as u16;
                        self.nanosecond = header.is_nanosecond_precision();
                        reader.consume(offset);
                    }
                    _ => reader.consume(offset),
                },
                Err(PcapError::Eof) => return Ok(None),
                Err(PcapError::UnexpectedEof) => {
                    warn_truncated_tail(self.frame_number);
                    return Ok(None);
                }
                Err(PcapError::Incomplete(_)) => {
                    reader.refill().map_err(|e| {
                        Error::Pcap(OurPcapError::InvalidFormat {
                            reason: format!("Refill error: {e}"),
                        })
                    })?;
                }
                Err(e) => {
                    return Err(Error::Pcap(OurPcapError::InvalidFormat {
                        reason: format!("Parse error at frame {}: {e}", self.frame_number + 1),
                    }))
                }
            }
        }
    }

    fn next_ng(&mut self) -> Result<Option<RawPacket>, Error> {
        let reader = match &mut self.inner {
            ReaderInner::Ng(r) => r,
            ReaderInner::Legacy(_) => unreachable!(),
        };
        loop {
            match reader.next() {
                Ok((offset, block)) => {
                    use pcap_parser::pcapng::Block;

                    match block {
                        PcapBlockOwned::NG(Block::InterfaceDescription(idb)) => {
                            self.link_type = idb.linktype.0 as u16;
                            self.tsresol = idb.if_tsresol;
                            reader.consume(offset);
                        }
                        PcapBlockOwned::NG(Block::EnhancedPacket(epb)) => {
                            self.frame_number += 1;

                            let ticks = ((epb.ts_high as u64) << 32) | (epb.ts_low as u64);
                            let raw = RawPacket::new(
                                self.frame_number,
                                ticks_to_micros(ticks, self.tsresol),
                                epb.caplen,
                                epb.origlen,
                                self.link_type,
                                unpadded(epb.data, epb.caplen as usize).to_vec(),
                            );

                            reader.consume(offset);
                            return Ok(Some(raw));
                        }
                        PcapBlockOwned::NG(Block::SimplePacket(spb)) => {
                            self.frame_number += 1;

                            let data = unpadded(spb.data, spb.origlen as usize);
                            let raw = RawPacket::new(
                                self.frame_number,
                                0, // simple packets carry no timestamp
                                data.len() as u32,
                                spb.origlen,
                                self.link_type,
                                data.to_vec(),
                            );

                            reader.consume(offset);
                            return Ok(Some(raw));
                        }
                        _ => reader.consume(offset),
                    }
                }
                Err(PcapError::Eof) => return Ok(None),
                Err(PcapError::UnexpectedEof) => {
                    warn_truncated_tail(self.frame_number);
                    return Ok(None);
                }
                Err(PcapError::Incomplete(_)) => {
                    reader.refill().map_err(|e| {
                        Error::Pcap(OurPcapError::InvalidFormat {
                            reason: format!("Refill error: {e}"),
                        })
                    })?;
                }
                Err(e) => {
                    return Err(Error::Pcap(OurPcapError::InvalidFormat {
                        reason: format!("Parse error at frame {}: {e}", self.frame_number + 1),
                    }))
                }
            }
        }
    }
}

/// A capture stopped mid-write ends in a partial record. Everything before
/// it is kept.
fn warn_truncated_tail(frames_read: u64) {
    warn!(
        frames_read,
        "Capture ends with a truncated record, ignoring it"
    );
}

/// PCAPNG block data is padded to 32 bits; keep only the captured bytes.
fn unpadded(data: &[u8], len: usize) -> &[u8] {
    &data[..len.min(data.len())]
}

/// Convert PCAPNG timestamp ticks to microseconds using `if_tsresol`.
///
/// The high bit selects a power of two instead of a power of ten.
fn ticks_to_micros(ticks: u64, tsresol: u8) -> i64 {
    let exponent = (tsresol & 0x7f) as u32;
    let ticks_per_sec: u128 = if tsresol & 0x80 != 0 {
        1u128.checked_shl(exponent).unwrap_or(u128::MAX)
    } else {
        10u128.checked_pow(exponent).unwrap_or(u128::MAX)
    };
    if ticks_per_sec == 0 {
        return ticks as i64;
    }
    ((ticks as u128) * 1_000_000 / ticks_per_sec) as i64
}

fn open_buffered(path: &Path, is_gzipped: bool) -> Result<BufReader<Box<dyn Read + Send>>, Error> {
    let file = File::open(path).map_err(|_| {
        Error::Pcap(OurPcapError::FileNotFound {
            path: path.display().to_string(),
        })
    })?;

    let reader: Box<dyn Read + Send> = if is_gzipped {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(BufReader::with_capacity(BUFFER_SIZE, reader))
}

/// Check if a file is gzipped by extension or magic bytes.
fn is_gzip_file<P: AsRef<Path>>(path: P) -> Result<bool, Error> {
    let path = path.as_ref();

    if is_gzip_extension(path) {
        return Ok(true);
    }

    let mut file = File::open(path).map_err(|_| {
        Error::Pcap(OurPcapError::FileNotFound {
            path: path.display().to_string(),
        })
    })?;

    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(_) => Ok(false), // too short to be gzipped
    }
}

/// Check if a path appears to be a gzip file by extension only.
pub fn is_gzip_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|f| f.to_str())
        .map(|name| name.to_lowercase().ends_with(".gz"))
        .unwrap_or(false)
}

/// Iterator adapter for PcapReader.
impl Iterator for PcapReader {
    type Item = Result<RawPacket, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_packet().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Minimal little-endian PCAP with one Ethernet header-only frame.
    fn create_minimal_pcap(magic: [u8; 4], ts_frac: u32) -> Vec<u8> {
        let mut data = Vec::new();

        data.extend_from_slice(&magic);
        data.extend_from_slice(&[0x02, 0x00]); // Version major (2)
        data.extend_from_slice(&[0x04, 0x00]); // Version minor (4)
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // Thiszone
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // Sigfigs
        data.extend_from_slice(&[0xff, 0xff, 0x00, 0x00]); // Snaplen (65535)
        data.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // Network (Ethernet)

        let packet_data = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // Dst MAC
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // Src MAC
            0x08, 0x00, // EtherType (IPv4)
        ];

        data.extend_from_slice(&1_000_000_000u32.to_le_bytes());
        data.extend_from_slice(&ts_frac.to_le_bytes());
        data.extend_from_slice(&(packet_data.len() as u32).to_le_bytes());
        data.extend_from_slice(&(packet_data.len() as u32).to_le_bytes());
        data.extend_from_slice(&packet_data);

        data
    }

    #[test]
    fn test_detect_gzip_by_extension() {
        assert!(is_gzip_extension("test.pcap.gz"));
        assert!(is_gzip_extension("TEST.PCAP.GZ"));
        assert!(!is_gzip_extension("test.pcap"));
        assert!(!is_gzip_extension("test.pcapng"));
    }

    #[test]
    fn test_detect_gzip_by_magic_bytes() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&GZIP_MAGIC).unwrap();
        temp.write_all(&[0x00, 0x00]).unwrap();
        temp.flush().unwrap();

        assert!(is_gzip_file(temp.path()).unwrap());
    }

    #[test]
    fn test_read_single_packet() {
        let mut temp = NamedTempFile::with_suffix(".pcap").unwrap();
        temp.write_all(&create_minimal_pcap([0xd4, 0xc3, 0xb2, 0xa1], 250))
            .unwrap();
        temp.flush().unwrap();

        let mut reader = PcapReader::open(temp.path()).unwrap();
        let packet = reader.next_packet().unwrap().unwrap();

        assert_eq!(packet.frame_number, 1);
        assert_eq!(packet.link_type, 1);
        assert_eq!(packet.captured_length, 14);
        assert_eq!(packet.timestamp_us, 1_000_000_000 * 1_000_000 + 250);
        assert!(reader.next_packet().unwrap().is_none());
        assert_eq!(reader.frame_count(), 1);
    }

    #[test]
    fn test_nanosecond_timestamps_are_scaled() {
        let mut temp = NamedTempFile::with_suffix(".pcap").unwrap();
        temp.write_all(&create_minimal_pcap([0x4d, 0x3c, 0xb2, 0xa1], 250_000))
            .unwrap();
        temp.flush().unwrap();

        let mut reader = PcapReader::open(temp.path()).unwrap();
        let packet = reader.next_packet().unwrap().unwrap();
        assert_eq!(packet.timestamp_us, 1_000_000_000 * 1_000_000 + 250);
    }

    #[test]
    fn test_create_and_read_gzip_pcap() {
        let temp = NamedTempFile::with_suffix(".pcap.gz").unwrap();
        {
            let file = File::create(temp.path()).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder
                .write_all(&create_minimal_pcap([0xd4, 0xc3, 0xb2, 0xa1], 0))
                .unwrap();
            encoder.finish().unwrap();
        }

        let reader = PcapReader::open(temp.path());
        assert!(reader.is_ok(), "Failed to open gzipped PCAP: {:?}", reader.err());
        assert_eq!(reader.unwrap().count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = PcapReader::open("/nonexistent/capture.pcap").err().unwrap();
        assert!(matches!(err, Error::Pcap(OurPcapError::FileNotFound { .. })));
    }

    #[test]
    fn test_unknown_magic() {
        let mut temp = NamedTempFile::with_suffix(".pcap").unwrap();
        temp.write_all(b"not a capture file").unwrap();
        temp.flush().unwrap();

        let err = PcapReader::open(temp.path()).err().unwrap();
        assert!(matches!(err, Error::Pcap(OurPcapError::InvalidFormat { .. })));
    }

    #[test]
    fn test_truncated_last_record_ends_stream() {
        let mut data = create_minimal_pcap([0xd4, 0xc3, 0xb2, 0xa1], 0);
        // Record header promising 100 bytes, followed by only 10.
        data.extend_from_slice(&1_000_000_001u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&[0xab; 10]);

        let mut temp = NamedTempFile::with_suffix(".pcap").unwrap();
        temp.write_all(&data).unwrap();
        temp.flush().unwrap();

        let mut reader = PcapReader::open(temp.path()).unwrap();
        assert!(reader.next_packet().unwrap().is_some());
        assert!(reader.next_packet().unwrap().is_none());
        assert_eq!(reader.frame_count(), 1);
    }

    #[test]
    fn test_ticks_to_micros() {
        assert_eq!(ticks_to_micros(1_500_000, 6), 1_500_000);
        assert_eq!(ticks_to_micros(1_500_000_000, 9), 1_500_000);
        assert_eq!(ticks_to_micros(15, 1), 1_500_000);
        // 2^-10 resolution: 1024 ticks per second
        assert_eq!(ticks_to_micros(1024, 0x80 | 10), 1_000_000);
    }
}
