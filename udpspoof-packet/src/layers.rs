//! Layer descriptors for a spoofed UDP frame
//!
//! [`Layers::from_spec`] turns a [`FrameSpec`] into the Ethernet, IP, UDP and
//! payload descriptors the serializer consumes. Addresses, ports and fixed
//! header values are filled in here; lengths and checksums stay unresolved.

use std::net::IpAddr;
use udpspoof_core::Result;

use crate::ethernet::EthernetLayer;
use crate::frame_spec::{version_mismatch, FrameSpec};
use crate::ip::{IpLayer, IpVersion, Ipv4Layer, Ipv6Layer};
use crate::udp::UdpLayer;

/// Application data carried by the UDP datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(pub Vec<u8>);

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The four layers of a frame, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layers {
    pub ethernet: EthernetLayer,
    pub ip: IpLayer,
    pub udp: UdpLayer,
    pub payload: Payload,
}

impl Layers {
    /// Build the layer descriptors for `spec`
    ///
    /// # Errors
    ///
    /// Returns a validation error if either address does not match the
    /// spec's IP version.
    pub fn from_spec(spec: &FrameSpec) -> Result<Self> {
        let version = spec.ip_version();

        let ip = match (version, spec.source_ip(), spec.dest_ip()) {
            (IpVersion::V4, IpAddr::V4(src), IpAddr::V4(dst)) => {
                IpLayer::V4(Ipv4Layer::new(src, dst))
            }
            (IpVersion::V6, IpAddr::V6(src), IpAddr::V6(dst)) => {
                IpLayer::V6(Ipv6Layer::new(src, dst))
            }
            (version, src, dst) => {
                return Err(if IpVersion::of(&src) != version {
                    version_mismatch("source_ip", &src, version)
                } else {
                    version_mismatch("dest_ip", &dst, version)
                });
            }
        };

        Ok(Layers {
            ethernet: EthernetLayer::new(spec.dest_mac(), spec.source_mac(), version.ethertype()),
            ip,
            udp: UdpLayer::new(spec.source_port(), spec.dest_port()),
            payload: Payload(spec.payload().to_vec()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethernet::EtherType;
    use crate::ip::IpProtocol;
    use udpspoof_core::MacAddr;

    #[test]
    fn test_from_spec_ipv4() {
        let spec = FrameSpec::builder()
            .source_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x01]))
            .dest_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x02]))
            .source_ip("10.0.0.1".parse().unwrap())
            .dest_ip("10.0.0.2".parse().unwrap())
            .source_port(9999)
            .dest_port(8888)
            .payload(vec![0xDE, 0xAD])
            .build()
            .unwrap();

        let layers = Layers::from_spec(&spec).unwrap();

        assert_eq!(layers.ethernet.source, spec.source_mac());
        assert_eq!(layers.ethernet.destination, spec.dest_mac());
        assert_eq!(layers.ethernet.ethertype, EtherType::IPv4);

        match &layers.ip {
            IpLayer::V4(v4) => {
                assert_eq!(v4.ttl, 32);
                assert_eq!(v4.protocol, IpProtocol::UDP);
                assert_eq!(v4.total_length, None);
                assert_eq!(v4.checksum, None);
            }
            other => panic!("Expected IPv4 layer, got {:?}", other),
        }

        assert_eq!(layers.udp.source_port, 9999);
        assert_eq!(layers.udp.destination_port, 8888);
        assert_eq!(layers.udp.length, None);
        assert_eq!(layers.udp.checksum, None);
        assert_eq!(layers.payload.as_bytes(), &[0xDE, 0xAD]);
    }

    #[test]
    fn test_from_spec_ipv6() {
        let spec = FrameSpec::builder()
            .source_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x01]))
            .dest_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x02]))
            .source_ip("fe80::1".parse().unwrap())
            .dest_ip("fe80::2".parse().unwrap())
            .source_port(1)
            .dest_port(2)
            .build()
            .unwrap();

        let layers = Layers::from_spec(&spec).unwrap();

        assert_eq!(layers.ethernet.ethertype, EtherType::IPv6);
        match &layers.ip {
            IpLayer::V6(v6) => {
                assert_eq!(v6.hop_limit, 32);
                assert_eq!(v6.next_header, IpProtocol::UDP);
                assert_eq!(v6.payload_length, None);
            }
            other => panic!("Expected IPv6 layer, got {:?}", other),
        }
        assert!(layers.payload.is_empty());
    }
}
