//! UDP header construction and parsing

use bytes::{BufMut, BytesMut};
use udpspoof_core::{Error, Result};

/// UDP header descriptor
///
/// `length` and `checksum` are `None` until the serializer resolves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpLayer {
    /// Source port
    pub source_port: u16,
    /// Destination port
    pub destination_port: u16,
    /// Length (header + data)
    pub length: Option<u16>,
    /// Checksum
    pub checksum: Option<u16>,
}

impl UdpLayer {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = 8;

    /// Create a UDP header with unresolved length and checksum
    pub fn new(source_port: u16, destination_port: u16) -> Self {
        UdpLayer {
            source_port,
            destination_port,
            length: None,
            checksum: None,
        }
    }

    /// Append the 8-byte header to `buffer`.
    ///
    /// An unresolved checksum is written as zero, which is the form the
    /// checksum itself is computed over.
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<()> {
        let length = self.length.ok_or_else(|| Error::unresolved("udp.length"))?;

        buffer.put_u16(self.source_port);
        buffer.put_u16(self.destination_port);
        buffer.put_u16(length);
        buffer.put_u16(self.checksum.unwrap_or(0));
        Ok(())
    }

    /// Parse a UDP header, returning it with the datagram payload.
    ///
    /// The payload is bounded by the header's length field, so trailing link
    /// padding is not mistaken for data.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::parsing(format!(
                "UDP header needs {} bytes, got {}",
                Self::HEADER_SIZE,
                data.len()
            )));
        }

        let length = u16::from_be_bytes([data[4], data[5]]);
        let end = length as usize;
        if end < Self::HEADER_SIZE || end > data.len() {
            return Err(Error::parsing(format!(
                "UDP length {} does not fit {} available bytes",
                length,
                data.len()
            )));
        }

        let layer = UdpLayer {
            source_port: u16::from_be_bytes([data[0], data[1]]),
            destination_port: u16::from_be_bytes([data[2], data[3]]),
            length: Some(length),
            checksum: Some(u16::from_be_bytes([data[6], data[7]])),
        };

        Ok((layer, &data[Self::HEADER_SIZE..end]))
    }
}
