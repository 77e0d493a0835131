//! IPv4 and IPv6 header construction and parsing
//!
//! The network layer of a spoofed frame is either an IPv4 or an IPv6 header.
//! [`IpLayer`] models the choice as a sum type so that length resolution and
//! pseudo-header selection dispatch on the variant.

use bytes::{BufMut, BytesMut};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use udpspoof_core::{Error, Result};

use crate::ethernet::EtherType;

/// TTL / hop limit written into every injected packet
pub const DEFAULT_HOP_LIMIT: u8 = 32;

/// IP Protocol numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    /// TCP (6)
    TCP,
    /// UDP (17)
    UDP,
    /// Custom protocol number
    Custom(u8),
}

impl IpProtocol {
    pub fn to_u8(self) -> u8 {
        match self {
            IpProtocol::TCP => 6,
            IpProtocol::UDP => 17,
            IpProtocol::Custom(val) => val,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            6 => IpProtocol::TCP,
            17 => IpProtocol::UDP,
            val => IpProtocol::Custom(val),
        }
    }
}

/// IP version of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Version tag of an address
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }

    /// EtherType announcing this version in the Ethernet header
    pub fn ethertype(self) -> EtherType {
        match self {
            IpVersion::V4 => EtherType::IPv4,
            IpVersion::V6 => EtherType::IPv6,
        }
    }

    /// Size of the fixed header for this version
    pub fn header_size(self) -> usize {
        match self {
            IpVersion::V4 => Ipv4Layer::HEADER_SIZE,
            IpVersion::V6 => Ipv6Layer::HEADER_SIZE,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}

/// IPv4 header descriptor (20 bytes, no options)
///
/// `total_length` and `checksum` are `None` until the serializer resolves
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Layer {
    /// Type of Service / DSCP
    pub tos: u8,
    /// Total length (header + data) in bytes
    pub total_length: Option<u16>,
    /// Identification
    pub identification: u16,
    /// Flags (3 bits) and fragment offset (13 bits)
    pub flags_fragment: u16,
    /// Time to Live
    pub ttl: u8,
    /// Protocol
    pub protocol: IpProtocol,
    /// Header checksum
    pub checksum: Option<u16>,
    /// Source IP address
    pub source: Ipv4Addr,
    /// Destination IP address
    pub destination: Ipv4Addr,
}

impl Ipv4Layer {
    /// IPv4 header size without options
    pub const HEADER_SIZE: usize = 20;

    /// Version (4) and IHL (5 words)
    const VERSION_IHL: u8 = 0x45;

    /// Create a UDP-carrying IPv4 header with unresolved length and checksum
    pub fn new(source: Ipv4Addr, destination: Ipv4Addr) -> Self {
        Ipv4Layer {
            tos: 0,
            total_length: None,
            identification: 0,
            flags_fragment: 0,
            ttl: DEFAULT_HOP_LIMIT,
            protocol: IpProtocol::UDP,
            checksum: None,
            source,
            destination,
        }
    }

    /// Append the 20-byte header to `buffer`.
    ///
    /// An unresolved total length is an error; an unresolved checksum is
    /// written as zero so the header can be summed.
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<()> {
        let total_length = self
            .total_length
            .ok_or_else(|| Error::unresolved("ipv4.total_length"))?;

        buffer.put_u8(Self::VERSION_IHL);
        buffer.put_u8(self.tos);
        buffer.put_u16(total_length);
        buffer.put_u16(self.identification);
        buffer.put_u16(self.flags_fragment);
        buffer.put_u8(self.ttl);
        buffer.put_u8(self.protocol.to_u8());
        buffer.put_u16(self.checksum.unwrap_or(0));
        buffer.put_slice(&self.source.octets());
        buffer.put_slice(&self.destination.octets());
        Ok(())
    }

    /// Parse an IPv4 header, returning it with the remaining bytes
    pub fn from_bytes(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::parsing(format!(
                "IPv4 header needs {} bytes, got {}",
                Self::HEADER_SIZE,
                data.len()
            )));
        }

        let version = data[0] >> 4;
        if version != 4 {
            return Err(Error::parsing(format!("IPv4 header has version {}", version)));
        }

        let header_len = ((data[0] & 0x0F) as usize) * 4;
        if header_len < Self::HEADER_SIZE || data.len() < header_len {
            return Err(Error::parsing(format!(
                "IPv4 header length {} is invalid for {} bytes",
                header_len,
                data.len()
            )));
        }

        let layer = Ipv4Layer {
            tos: data[1],
            total_length: Some(u16::from_be_bytes([data[2], data[3]])),
            identification: u16::from_be_bytes([data[4], data[5]]),
            flags_fragment: u16::from_be_bytes([data[6], data[7]]),
            ttl: data[8],
            protocol: IpProtocol::from_u8(data[9]),
            checksum: Some(u16::from_be_bytes([data[10], data[11]])),
            source: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            destination: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
        };

        Ok((layer, &data[header_len..]))
    }
}

/// IPv6 fixed header descriptor (40 bytes)
///
/// `payload_length` is `None` until the serializer resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Layer {
    /// Traffic class
    pub traffic_class: u8,
    /// Flow label (20 bits)
    pub flow_label: u32,
    /// Length of everything after the fixed header
    pub payload_length: Option<u16>,
    /// Next header
    pub next_header: IpProtocol,
    /// Hop limit
    pub hop_limit: u8,
    /// Source IP address
    pub source: Ipv6Addr,
    /// Destination IP address
    pub destination: Ipv6Addr,
}

impl Ipv6Layer {
    /// IPv6 fixed header size
    pub const HEADER_SIZE: usize = 40;

    /// Create a UDP-carrying IPv6 header with unresolved payload length
    pub fn new(source: Ipv6Addr, destination: Ipv6Addr) -> Self {
        Ipv6Layer {
            traffic_class: 0,
            flow_label: 0,
            payload_length: None,
            next_header: IpProtocol::UDP,
            hop_limit: DEFAULT_HOP_LIMIT,
            source,
            destination,
        }
    }

    /// Append the 40-byte header to `buffer`
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<()> {
        let payload_length = self
            .payload_length
            .ok_or_else(|| Error::unresolved("ipv6.payload_length"))?;

        // Version (4 bits) + Traffic Class (8 bits) + Flow Label (20 bits)
        let first_word =
            (6u32 << 28) | ((self.traffic_class as u32) << 20) | (self.flow_label & 0x000F_FFFF);
        buffer.put_u32(first_word);
        buffer.put_u16(payload_length);
        buffer.put_u8(self.next_header.to_u8());
        buffer.put_u8(self.hop_limit);
        buffer.put_slice(&self.source.octets());
        buffer.put_slice(&self.destination.octets());
        Ok(())
    }

    /// Parse an IPv6 fixed header, returning it with the remaining bytes
    pub fn from_bytes(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::parsing(format!(
                "IPv6 header needs {} bytes, got {}",
                Self::HEADER_SIZE,
                data.len()
            )));
        }

        let first_word = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let version = first_word >> 28;
        if version != 6 {
            return Err(Error::parsing(format!("IPv6 header has version {}", version)));
        }

        let mut source = [0u8; 16];
        source.copy_from_slice(&data[8..24]);
        let mut destination = [0u8; 16];
        destination.copy_from_slice(&data[24..40]);

        let layer = Ipv6Layer {
            traffic_class: ((first_word >> 20) & 0xFF) as u8,
            flow_label: first_word & 0x000F_FFFF,
            payload_length: Some(u16::from_be_bytes([data[4], data[5]])),
            next_header: IpProtocol::from_u8(data[6]),
            hop_limit: data[7],
            source: Ipv6Addr::from(source),
            destination: Ipv6Addr::from(destination),
        };

        Ok((layer, &data[Self::HEADER_SIZE..]))
    }
}

/// Network layer of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpLayer {
    V4(Ipv4Layer),
    V6(Ipv6Layer),
}

impl IpLayer {
    /// Version of this layer
    pub fn version(&self) -> IpVersion {
        match self {
            IpLayer::V4(_) => IpVersion::V4,
            IpLayer::V6(_) => IpVersion::V6,
        }
    }

    /// Size of the header this layer serializes to
    pub fn header_size(&self) -> usize {
        self.version().header_size()
    }

    /// Source address
    pub fn source(&self) -> IpAddr {
        match self {
            IpLayer::V4(v4) => IpAddr::V4(v4.source),
            IpLayer::V6(v6) => IpAddr::V6(v6.source),
        }
    }

    /// Destination address
    pub fn destination(&self) -> IpAddr {
        match self {
            IpLayer::V4(v4) => IpAddr::V4(v4.destination),
            IpLayer::V6(v6) => IpAddr::V6(v6.destination),
        }
    }

    /// TTL (IPv4) or hop limit (IPv6)
    pub fn hop_limit(&self) -> u8 {
        match self {
            IpLayer::V4(v4) => v4.ttl,
            IpLayer::V6(v6) => v6.hop_limit,
        }
    }

    /// Protocol (IPv4) or next header (IPv6)
    pub fn protocol(&self) -> IpProtocol {
        match self {
            IpLayer::V4(v4) => v4.protocol,
            IpLayer::V6(v6) => v6.next_header,
        }
    }

    /// Append the header to `buffer`
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<()> {
        match self {
            IpLayer::V4(v4) => v4.write_to(buffer),
            IpLayer::V6(v6) => v6.write_to(buffer),
        }
    }
}
