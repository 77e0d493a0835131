//! Ethernet II header construction and parsing

use bytes::{BufMut, BytesMut};
use std::fmt;
use udpspoof_core::{Error, MacAddr, Result};

/// EtherType values understood by the frame engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (0x0800)
    IPv4,
    /// IPv6 (0x86DD)
    IPv6,
    /// Any other EtherType
    Custom(u16),
}

impl EtherType {
    /// Convert EtherType to u16 value
    pub fn to_u16(self) -> u16 {
        match self {
            EtherType::IPv4 => 0x0800,
            EtherType::IPv6 => 0x86DD,
            EtherType::Custom(val) => val,
        }
    }

    /// Create EtherType from u16 value
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0800 => EtherType::IPv4,
            0x86DD => EtherType::IPv6,
            val => EtherType::Custom(val),
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtherType::IPv4 => write!(f, "IPv4"),
            EtherType::IPv6 => write!(f, "IPv6"),
            EtherType::Custom(val) => write!(f, "0x{:04X}", val),
        }
    }
}

/// Ethernet II header descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetLayer {
    /// Destination MAC address
    pub destination: MacAddr,
    /// Source MAC address
    pub source: MacAddr,
    /// EtherType of the encapsulated packet
    pub ethertype: EtherType,
}

impl EthernetLayer {
    /// Ethernet header size (dst + src + type)
    pub const HEADER_SIZE: usize = 14;

    /// Create a new Ethernet header descriptor
    pub fn new(destination: MacAddr, source: MacAddr, ethertype: EtherType) -> Self {
        EthernetLayer {
            destination,
            source,
            ethertype,
        }
    }

    /// Append the 14-byte header to `buffer`
    pub fn write_to(&self, buffer: &mut BytesMut) {
        buffer.put_slice(self.destination.as_bytes());
        buffer.put_slice(self.source.as_bytes());
        buffer.put_u16(self.ethertype.to_u16());
    }

    /// Parse an Ethernet header, returning it with the remaining bytes
    pub fn from_bytes(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::parsing(format!(
                "Ethernet header needs {} bytes, got {}",
                Self::HEADER_SIZE,
                data.len()
            )));
        }

        let destination = MacAddr::from_slice("ethernet.destination", &data[0..6])?;
        let source = MacAddr::from_slice("ethernet.source", &data[6..12])?;
        let ethertype = EtherType::from_u16(u16::from_be_bytes([data[12], data[13]]));

        Ok((
            EthernetLayer {
                destination,
                source,
                ethertype,
            },
            &data[Self::HEADER_SIZE..],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethertype_conversion() {
        assert_eq!(EtherType::IPv4.to_u16(), 0x0800);
        assert_eq!(EtherType::IPv6.to_u16(), 0x86DD);
        assert_eq!(EtherType::from_u16(0x86DD), EtherType::IPv6);
        assert_eq!(EtherType::from_u16(0x0806), EtherType::Custom(0x0806));
        assert_eq!(EtherType::Custom(0x0806).to_string(), "0x0806");
    }

    #[test]
    fn test_ethernet_write_to() {
        let src = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
        let dst = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x02]);

        let mut buffer = BytesMut::new();
        EthernetLayer::new(dst, src, EtherType::IPv6).write_to(&mut buffer);

        assert_eq!(buffer.len(), EthernetLayer::HEADER_SIZE);
        assert_eq!(&buffer[0..6], dst.as_bytes());
        assert_eq!(&buffer[6..12], src.as_bytes());
        assert_eq!(&buffer[12..14], &[0x86, 0xDD]);
    }

    #[test]
    fn test_ethernet_from_bytes() {
        let data = [
            0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, // dst
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
            0x08, 0x00, // IPv4
            0x45, 0x00, // start of payload
        ];

        let (header, rest) = EthernetLayer::from_bytes(&data).unwrap();
        assert_eq!(header.destination.octets(), [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(header.source.octets(), [0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(header.ethertype, EtherType::IPv4);
        assert_eq!(rest, &[0x45, 0x00]);
    }

    #[test]
    fn test_ethernet_from_bytes_truncated() {
        let result = EthernetLayer::from_bytes(&[0u8; 13]);
        assert!(matches!(result, Err(Error::PacketParsing(_))));
    }
}
