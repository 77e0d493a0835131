//! Checksum calculations for the injected frame
//!
//! This module implements the Internet Checksum (RFC 1071) and the two
//! checksums a spoofed UDP frame carries: the IPv4 header checksum and the
//! UDP checksum over the IPv4 or IPv6 pseudo-header.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::ip::{IpLayer, IpProtocol};

/// Offset of the checksum field inside an IPv4 header
const IPV4_CHECKSUM_OFFSET: usize = 10;

/// Offset of the checksum field inside a UDP header
const UDP_CHECKSUM_OFFSET: usize = 6;

/// Sums `data` as big-endian 16-bit words with end-around carry.
///
/// A trailing odd byte is summed as if followed by a zero byte; the padding
/// exists only for the sum and never touches the caller's buffer.
pub fn ones_complement_sum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    let mut chunks = data.chunks_exact(2);
    for chunk in &mut chunks {
        sum += u16::from_be_bytes([chunk[0], chunk[1]]) as u32;
    }

    if let Some(&byte) = chunks.remainder().first() {
        sum += u16::from_be_bytes([byte, 0]) as u32;
    }

    fold(sum)
}

/// Folds carries above bit 15 back into the low 16 bits.
fn fold(mut sum: u32) -> u16 {
    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    sum as u16
}

/// Calculates the Internet Checksum as defined in RFC 1071.
///
/// # Examples
///
/// ```
/// use udpspoof_packet::checksum::internet_checksum;
///
/// let header = [
///     0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11,
///     0x00, 0x00, 0xc0, 0xa8, 0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
/// ];
/// assert_eq!(internet_checksum(&header), 0xb861);
/// ```
pub fn internet_checksum(data: &[u8]) -> u16 {
    !ones_complement_sum(data)
}

/// Validates an Internet checksum.
///
/// Summing data that already carries its checksum yields all-ones, so the
/// complemented result is 0 (0xFFFF is accepted as the negative zero).
pub fn validate_checksum(data: &[u8]) -> bool {
    let result = internet_checksum(data);
    result == 0 || result == 0xFFFF
}

/// Computes the IPv4 header checksum.
///
/// The checksum field (bytes 10..12) is treated as zero during summation, so
/// the header may be passed with a stale or placeholder value in place.
pub fn ipv4_header_checksum(header: &[u8]) -> u16 {
    let mut sum = ones_complement_sum(&header[..IPV4_CHECKSUM_OFFSET.min(header.len())]) as u32;
    if header.len() > IPV4_CHECKSUM_OFFSET + 2 {
        sum += ones_complement_sum(&header[IPV4_CHECKSUM_OFFSET + 2..]) as u32;
    }
    !fold(sum)
}

/// Builds the 12-byte IPv4 pseudo-header used by TCP and UDP checksums.
pub fn ipv4_pseudo_header(
    source: Ipv4Addr,
    destination: Ipv4Addr,
    protocol: IpProtocol,
    length: u16,
) -> [u8; 12] {
    let mut header = [0u8; 12];
    header[0..4].copy_from_slice(&source.octets());
    header[4..8].copy_from_slice(&destination.octets());
    // header[8] stays zero
    header[9] = protocol.to_u8();
    header[10..12].copy_from_slice(&length.to_be_bytes());
    header
}

/// Builds the 40-byte IPv6 pseudo-header (RFC 8200 section 8.1).
///
/// The upper-layer length is a 32-bit field followed by three zero bytes and
/// the next-header value.
pub fn ipv6_pseudo_header(
    source: Ipv6Addr,
    destination: Ipv6Addr,
    next_header: IpProtocol,
    length: u32,
) -> [u8; 40] {
    let mut header = [0u8; 40];
    header[0..16].copy_from_slice(&source.octets());
    header[16..32].copy_from_slice(&destination.octets());
    header[32..36].copy_from_slice(&length.to_be_bytes());
    // header[36..39] stays zero
    header[39] = next_header.to_u8();
    header
}

/// Calculates a transport checksum over `pseudo_header` followed by `segment`.
///
/// The segment's own checksum field must already be zero. The value returned
/// is the raw complement; callers apply any protocol-specific zero rule.
pub fn transport_checksum(pseudo_header: &[u8], segment: &[u8]) -> u16 {
    // Pseudo-headers are always an even number of bytes, so the two sums can
    // be combined without realigning the segment.
    debug_assert!(pseudo_header.len() % 2 == 0);
    let sum = ones_complement_sum(pseudo_header) as u32 + ones_complement_sum(segment) as u32;
    !fold(sum)
}

/// Calculates the UDP checksum for `segment` (UDP header plus payload) carried
/// by `ip`.
///
/// The pseudo-header is chosen by the IP version. The UDP length is read from
/// the segment itself, so it must already be resolved. For IPv6 a computed
/// value of zero is transmitted as 0xFFFF; for IPv4 the value is used as-is.
pub fn udp_checksum(ip: &IpLayer, segment: &[u8]) -> u16 {
    let length = segment.len();
    let mut zeroed = segment.to_vec();
    if zeroed.len() >= UDP_CHECKSUM_OFFSET + 2 {
        zeroed[UDP_CHECKSUM_OFFSET] = 0;
        zeroed[UDP_CHECKSUM_OFFSET + 1] = 0;
    }

    match ip {
        IpLayer::V4(v4) => {
            let pseudo =
                ipv4_pseudo_header(v4.source, v4.destination, v4.protocol, length as u16);
            transport_checksum(&pseudo, &zeroed)
        }
        IpLayer::V6(v6) => {
            let pseudo =
                ipv6_pseudo_header(v6.source, v6.destination, v6.next_header, length as u32);
            match transport_checksum(&pseudo, &zeroed) {
                0 => 0xFFFF,
                checksum => checksum,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::{Ipv4Layer, Ipv6Layer};

    /// Widely published IPv4 header example (192.168.0.1 -> 192.168.0.199)
    const REFERENCE_HEADER: [u8; 20] = [
        0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0xb8, 0x61, 0xc0, 0xa8, 0x00,
        0x01, 0xc0, 0xa8, 0x00, 0xc7,
    ];

    #[test]
    fn test_internet_checksum_empty() {
        assert_eq!(internet_checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_ones_complement_sum_carry() {
        // 0xFFFF + 0x0001 wraps to 0x0001 with end-around carry
        assert_eq!(ones_complement_sum(&[0xFF, 0xFF, 0x00, 0x01]), 0x0001);
        assert_eq!(ones_complement_sum(&[0x00, 0x01, 0x00, 0x02]), 0x0003);
    }

    #[test]
    fn test_odd_length_pads_with_zero() {
        assert_eq!(
            internet_checksum(&[0x01, 0x02, 0x03]),
            internet_checksum(&[0x01, 0x02, 0x03, 0x00])
        );
    }

    #[test]
    fn test_ipv4_header_checksum_reference() {
        assert_eq!(ipv4_header_checksum(&REFERENCE_HEADER), 0xb861);
    }

    #[test]
    fn test_ipv4_header_checksum_ignores_stale_field() {
        let mut header = REFERENCE_HEADER;
        header[10] = 0x12;
        header[11] = 0x34;
        assert_eq!(ipv4_header_checksum(&header), 0xb861);
    }

    #[test]
    fn test_validate_checksum() {
        assert!(validate_checksum(&REFERENCE_HEADER));

        let mut corrupted = REFERENCE_HEADER;
        corrupted[8] = 0x3f;
        assert!(!validate_checksum(&corrupted));
    }

    #[test]
    fn test_ipv4_pseudo_header_layout() {
        let pseudo = ipv4_pseudo_header(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            IpProtocol::UDP,
            12,
        );
        assert_eq!(pseudo, [10, 0, 0, 1, 10, 0, 0, 2, 0, 17, 0, 12]);
    }

    #[test]
    fn test_ipv6_pseudo_header_layout() {
        let src: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let dst: Ipv6Addr = "2001:db8::2".parse().unwrap();
        let pseudo = ipv6_pseudo_header(src, dst, IpProtocol::UDP, 12);

        assert_eq!(&pseudo[0..16], &src.octets());
        assert_eq!(&pseudo[16..32], &dst.octets());
        assert_eq!(&pseudo[32..36], &[0, 0, 0, 12]);
        assert_eq!(&pseudo[36..40], &[0, 0, 0, 17]);
    }

    #[test]
    fn test_udp_checksum_ipv4() {
        let ip = IpLayer::V4(Ipv4Layer::new(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        ));
        let segment = [
            0x27, 0x0f, 0x22, 0xb8, 0x00, 0x0c, 0x00, 0x00, 0xde, 0xad, 0xbe, 0xef,
        ];
        assert_eq!(udp_checksum(&ip, &segment), 0x046f);
    }

    #[test]
    fn test_udp_checksum_ipv4_odd_payload() {
        let ip = IpLayer::V4(Ipv4Layer::new(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        ));
        let segment = [0x27, 0x0f, 0x22, 0xb8, 0x00, 0x0b, 0x00, 0x00, 0x01, 0x02, 0x03];
        assert_eq!(udp_checksum(&ip, &segment), 0x9e0c);
    }

    #[test]
    fn test_udp_checksum_ipv6() {
        let ip = IpLayer::V6(Ipv6Layer::new(
            "2001:db8::1".parse().unwrap(),
            "2001:db8::2".parse().unwrap(),
        ));
        let segment = [
            0x27, 0x0f, 0x22, 0xb8, 0x00, 0x0c, 0x00, 0x00, 0xde, 0xad, 0xbe, 0xef,
        ];
        assert_eq!(udp_checksum(&ip, &segment), 0xbcfc);
    }

    #[test]
    fn test_udp_checksum_ignores_existing_field() {
        let ip = IpLayer::V4(Ipv4Layer::new(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        ));
        let segment = [
            0x27, 0x0f, 0x22, 0xb8, 0x00, 0x0c, 0xaa, 0xbb, 0xde, 0xad, 0xbe, 0xef,
        ];
        assert_eq!(udp_checksum(&ip, &segment), 0x046f);
    }

    #[test]
    fn test_udp_checksum_zero_rule() {
        let src: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let dst: Ipv6Addr = "2001:db8::2".parse().unwrap();
        let v4 = IpLayer::V4(Ipv4Layer::new(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        ));
        let v6 = IpLayer::V6(Ipv6Layer::new(src, dst));

        // With a two-byte payload equal to the checksum of the zero payload,
        // the sum becomes all-ones and the raw checksum becomes zero.
        for ip in [v4, v6] {
            let mut segment = vec![0x27, 0x0f, 0x22, 0xb8, 0x00, 0x0a, 0x00, 0x00, 0x00, 0x00];
            let first = udp_checksum(&ip, &segment);
            segment[8..10].copy_from_slice(&first.to_be_bytes());

            let expected = match ip {
                IpLayer::V4(_) => 0x0000,
                IpLayer::V6(_) => 0xFFFF,
            };
            assert_eq!(udp_checksum(&ip, &segment), expected);
        }
    }
}
