//! Frame serialization
//!
//! Serialization runs in two phases. [`resolve`] fills every length and
//! checksum field bottom-up: UDP length, then the IP length field, then the
//! UDP checksum over the final pseudo-header, then (IPv4 only) the header
//! checksum. [`emit`] writes the resolved layers into one contiguous buffer.
//! Either phase fails as a whole; no partial frame is ever returned.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};
use udpspoof_core::{Error, Result};

use crate::checksum::{ipv4_header_checksum, udp_checksum};
use crate::ethernet::EthernetLayer;
use crate::frame_spec::FrameSpec;
use crate::ip::{IpLayer, Ipv4Layer};
use crate::layers::Layers;
use crate::udp::UdpLayer;

/// Converts a computed size into a 16-bit length field
fn fit_u16(field: &'static str, size: usize) -> Result<u16> {
    u16::try_from(size).map_err(|_| Error::length_overflow(field, size, u16::MAX as usize))
}

/// Fill in all length and checksum fields of `layers`
pub fn resolve(mut layers: Layers) -> Result<Layers> {
    let udp_length = fit_u16("udp.length", UdpLayer::HEADER_SIZE + layers.payload.len())?;
    layers.udp.length = Some(udp_length);

    match &mut layers.ip {
        IpLayer::V4(v4) => {
            v4.total_length = Some(fit_u16(
                "ipv4.total_length",
                Ipv4Layer::HEADER_SIZE + udp_length as usize,
            )?);
        }
        // The fixed IPv6 header is not counted in its own payload length.
        IpLayer::V6(v6) => v6.payload_length = Some(udp_length),
    }

    let mut segment = BytesMut::with_capacity(udp_length as usize);
    layers.udp.checksum = None;
    layers.udp.write_to(&mut segment)?;
    segment.put_slice(layers.payload.as_bytes());
    let checksum = udp_checksum(&layers.ip, &segment);
    layers.udp.checksum = Some(checksum);
    trace!(udp_length, checksum, "Resolved UDP header");

    if let IpLayer::V4(v4) = &mut layers.ip {
        let mut header = BytesMut::with_capacity(Ipv4Layer::HEADER_SIZE);
        v4.checksum = None;
        v4.write_to(&mut header)?;
        let checksum = ipv4_header_checksum(&header);
        v4.checksum = Some(checksum);
        trace!(checksum, "Resolved IPv4 header checksum");
    }

    Ok(layers)
}

/// Write resolved layers as Ethernet + IP + UDP + payload
pub fn emit(layers: &Layers) -> Result<Bytes> {
    let capacity = EthernetLayer::HEADER_SIZE
        + layers.ip.header_size()
        + UdpLayer::HEADER_SIZE
        + layers.payload.len();
    let mut frame = BytesMut::with_capacity(capacity);

    layers.ethernet.write_to(&mut frame);
    layers.ip.write_to(&mut frame)?;
    if layers.udp.checksum.is_none() {
        return Err(Error::unresolved("udp.checksum"));
    }
    layers.udp.write_to(&mut frame)?;
    frame.put_slice(layers.payload.as_bytes());

    Ok(frame.freeze())
}

/// Resolve and emit `layers` in one step
pub fn serialize(layers: Layers) -> Result<Bytes> {
    let resolved = resolve(layers)?;
    emit(&resolved)
}

/// Build the complete frame described by `spec`
///
/// # Examples
///
/// ```
/// use udpspoof_core::MacAddr;
/// use udpspoof_packet::{build_frame, FrameSpec};
///
/// let spec = FrameSpec::builder()
///     .source_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x01]))
///     .dest_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x02]))
///     .source_ip("2001:db8::1".parse().unwrap())
///     .dest_ip("2001:db8::2".parse().unwrap())
///     .source_port(9999)
///     .dest_port(8888)
///     .payload(b"hello".to_vec())
///     .build()
///     .unwrap();
///
/// let frame = build_frame(&spec).unwrap();
/// assert_eq!(frame.len(), 14 + 40 + 8 + 5);
/// ```
pub fn build_frame(spec: &FrameSpec) -> Result<Bytes> {
    let layers = Layers::from_spec(spec)?;
    let frame = serialize(layers)?;
    debug!(
        version = %spec.ip_version(),
        payload = spec.payload().len(),
        size = frame.len(),
        "Built frame"
    );
    Ok(frame)
}
