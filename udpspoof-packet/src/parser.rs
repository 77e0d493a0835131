//! Decoding of Ethernet/IP/UDP frames
//!
//! Used to inspect frames produced by the serializer and to verify their
//! checksums from the receiving side.

use udpspoof_core::{Error, Result};

use crate::checksum::{ipv4_pseudo_header, ipv6_pseudo_header, transport_checksum, validate_checksum};
use crate::ethernet::{EtherType, EthernetLayer};
use crate::ip::{IpLayer, IpProtocol, Ipv4Layer, Ipv6Layer};
use crate::udp::UdpLayer;

/// A decoded Ethernet + IP + UDP frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFrame {
    pub ethernet: EthernetLayer,
    pub ip: IpLayer,
    pub udp: UdpLayer,
    pub payload: Vec<u8>,
    /// Raw IP header bytes, kept for checksum verification
    ip_header: Vec<u8>,
    /// Raw UDP header plus payload, kept for checksum verification
    segment: Vec<u8>,
}

impl ParsedFrame {
    /// Decode `data` as a UDP frame over IPv4 or IPv6
    ///
    /// Bytes past the IP length field (link padding) are ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (ethernet, rest) = EthernetLayer::from_bytes(data)?;

        let (ip, ip_header, rest) = match ethernet.ethertype {
            EtherType::IPv4 => {
                let (v4, after) = Ipv4Layer::from_bytes(rest)?;
                let header_len = rest.len() - after.len();
                let total = v4.total_length.unwrap_or(0) as usize;
                if total < header_len || total > rest.len() {
                    return Err(Error::parsing(format!(
                        "IPv4 total length {} does not fit {} available bytes",
                        total,
                        rest.len()
                    )));
                }
                (IpLayer::V4(v4), &rest[..header_len], &rest[header_len..total])
            }
            EtherType::IPv6 => {
                let (v6, after) = Ipv6Layer::from_bytes(rest)?;
                let payload_len = v6.payload_length.unwrap_or(0) as usize;
                if payload_len > after.len() {
                    return Err(Error::parsing(format!(
                        "IPv6 payload length {} does not fit {} available bytes",
                        payload_len,
                        after.len()
                    )));
                }
                (
                    IpLayer::V6(v6),
                    &rest[..Ipv6Layer::HEADER_SIZE],
                    &after[..payload_len],
                )
            }
            other => {
                return Err(Error::parsing(format!("Unsupported EtherType {}", other)));
            }
        };

        if ip.protocol() != IpProtocol::UDP {
            return Err(Error::parsing(format!(
                "Expected UDP, got protocol {}",
                ip.protocol().to_u8()
            )));
        }

        let (udp, payload) = UdpLayer::from_bytes(rest)?;
        let segment_len = UdpLayer::HEADER_SIZE + payload.len();

        Ok(ParsedFrame {
            ethernet,
            udp,
            payload: payload.to_vec(),
            ip_header: ip_header.to_vec(),
            segment: rest[..segment_len].to_vec(),
            ip,
        })
    }

    /// True if the IPv4 header checksum is valid. IPv6 has no header checksum.
    pub fn verify_ip_checksum(&self) -> bool {
        match self.ip {
            IpLayer::V4(_) => validate_checksum(&self.ip_header),
            IpLayer::V6(_) => true,
        }
    }

    /// True if the UDP checksum is valid over the pseudo-header
    ///
    /// An IPv4 datagram carrying a zero checksum is accepted unchecked.
    pub fn verify_udp_checksum(&self) -> bool {
        let length = self.segment.len();
        match &self.ip {
            IpLayer::V4(_) if self.udp.checksum == Some(0) => true,
            IpLayer::V4(v4) => {
                let pseudo =
                    ipv4_pseudo_header(v4.source, v4.destination, v4.protocol, length as u16);
                transport_checksum(&pseudo, &self.segment) == 0
            }
            IpLayer::V6(v6) => {
                let pseudo =
                    ipv6_pseudo_header(v6.source, v6.destination, v6.next_header, length as u32);
                self.udp.checksum != Some(0) && transport_checksum(&pseudo, &self.segment) == 0
            }
        }
    }

    pub fn verify_checksums(&self) -> bool {
        self.verify_ip_checksum() && self.verify_udp_checksum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_frame() -> Vec<u8> {
        vec![
            0x02, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00,
            0x45, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x20, 0x11, 0x86, 0xCB, 0x0A, 0x00,
            0x00, 0x01, 0x0A, 0x00, 0x00, 0x02, 0x27, 0x0F, 0x22, 0xB8, 0x00, 0x0C, 0x04, 0x6F,
            0xDE, 0xAD, 0xBE, 0xEF,
        ]
    }

    #[test]
    fn test_parse_example_frame() {
        let parsed = ParsedFrame::parse(&example_frame()).unwrap();

        assert_eq!(parsed.ethernet.ethertype, EtherType::IPv4);
        assert_eq!(parsed.ip.source().to_string(), "10.0.0.1");
        assert_eq!(parsed.ip.destination().to_string(), "10.0.0.2");
        assert_eq!(parsed.udp.source_port, 9999);
        assert_eq!(parsed.udp.destination_port, 8888);
        assert_eq!(parsed.payload, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(parsed.verify_checksums());
    }

    #[test]
    fn test_link_padding_ignored() {
        let mut frame = example_frame();
        frame.extend_from_slice(&[0u8; 14]);

        let parsed = ParsedFrame::parse(&frame).unwrap();
        assert_eq!(parsed.payload, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(parsed.verify_checksums());
    }

    #[test]
    fn test_corrupted_checksums_detected() {
        let mut frame = example_frame();
        frame[45] ^= 0x01;
        let parsed = ParsedFrame::parse(&frame).unwrap();
        assert!(parsed.verify_ip_checksum());
        assert!(!parsed.verify_udp_checksum());

        let mut frame = example_frame();
        frame[22] = 0x40; // TTL changed without fixing the header checksum
        let parsed = ParsedFrame::parse(&frame).unwrap();
        assert!(!parsed.verify_ip_checksum());
    }

    #[test]
    fn test_ipv4_zero_udp_checksum_accepted() {
        let mut frame = example_frame();
        frame[40] = 0;
        frame[41] = 0;
        let parsed = ParsedFrame::parse(&frame).unwrap();
        assert!(parsed.verify_udp_checksum());
    }

    #[test]
    fn test_unsupported_ethertype() {
        let mut frame = example_frame();
        frame[12] = 0x08;
        frame[13] = 0x06; // ARP
        assert!(matches!(
            ParsedFrame::parse(&frame),
            Err(Error::PacketParsing(_))
        ));
    }

    #[test]
    fn test_non_udp_protocol_rejected() {
        let mut frame = example_frame();
        frame[23] = 0x06;
        assert!(matches!(
            ParsedFrame::parse(&frame),
            Err(Error::PacketParsing(_))
        ));
    }

    #[test]
    fn test_truncated_frame() {
        let frame = example_frame();
        assert!(ParsedFrame::parse(&frame[..40]).is_err());
        assert!(ParsedFrame::parse(&frame[..10]).is_err());
    }
}
