//! Immutable description of the single frame to inject

use std::net::IpAddr;
use udpspoof_core::{Error, MacAddr, Result};

use crate::ip::IpVersion;

/// Everything needed to build one spoofed UDP frame.
///
/// A `FrameSpec` can only be obtained through [`FrameSpecBuilder::build`],
/// which guarantees that both addresses carry the same version as
/// [`FrameSpec::ip_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpec {
    source_mac: MacAddr,
    dest_mac: MacAddr,
    source_ip: IpAddr,
    dest_ip: IpAddr,
    source_port: u16,
    dest_port: u16,
    payload: Vec<u8>,
    ip_version: IpVersion,
}

impl FrameSpec {
    /// Start describing a frame
    pub fn builder() -> FrameSpecBuilder {
        FrameSpecBuilder::new()
    }

    pub fn source_mac(&self) -> MacAddr {
        self.source_mac
    }

    pub fn dest_mac(&self) -> MacAddr {
        self.dest_mac
    }

    pub fn source_ip(&self) -> IpAddr {
        self.source_ip
    }

    pub fn dest_ip(&self) -> IpAddr {
        self.dest_ip
    }

    pub fn source_port(&self) -> u16 {
        self.source_port
    }

    pub fn dest_port(&self) -> u16 {
        self.dest_port
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    /// Frame size this spec serializes to
    pub fn frame_len(&self) -> usize {
        crate::ethernet::EthernetLayer::HEADER_SIZE
            + self.ip_version.header_size()
            + crate::udp::UdpLayer::HEADER_SIZE
            + self.payload.len()
    }
}

/// Checks that `addr` carries `version`, naming `field` on failure.
pub(crate) fn check_version(field: &str, addr: &IpAddr, version: IpVersion) -> Result<()> {
    if IpVersion::of(addr) != version {
        return Err(version_mismatch(field, addr, version));
    }
    Ok(())
}

pub(crate) fn version_mismatch(field: &str, addr: &IpAddr, version: IpVersion) -> Error {
    Error::validation(
        field,
        format!(
            "expected {} address, got {} ({})",
            version,
            addr,
            IpVersion::of(addr)
        ),
    )
}

/// Fluent builder for [`FrameSpec`]
///
/// # Examples
///
/// ```
/// use udpspoof_core::MacAddr;
/// use udpspoof_packet::FrameSpec;
///
/// let spec = FrameSpec::builder()
///     .source_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x01]))
///     .dest_mac(MacAddr::new([0x02, 0, 0, 0, 0, 0x02]))
///     .source_ip("10.0.0.1".parse().unwrap())
///     .dest_ip("10.0.0.2".parse().unwrap())
///     .source_port(9999)
///     .dest_port(8888)
///     .payload(vec![0xDE, 0xAD, 0xBE, 0xEF])
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.frame_len(), 46);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameSpecBuilder {
    source_mac: Option<MacAddr>,
    dest_mac: Option<MacAddr>,
    source_ip: Option<IpAddr>,
    dest_ip: Option<IpAddr>,
    source_port: Option<u16>,
    dest_port: Option<u16>,
    payload: Vec<u8>,
    ip_version: Option<IpVersion>,
}

impl FrameSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_mac(mut self, mac: MacAddr) -> Self {
        self.source_mac = Some(mac);
        self
    }

    pub fn dest_mac(mut self, mac: MacAddr) -> Self {
        self.dest_mac = Some(mac);
        self
    }

    /// Set the source MAC from raw bytes, which must be exactly six long
    pub fn source_mac_bytes(mut self, bytes: &[u8]) -> Result<Self> {
        self.source_mac = Some(MacAddr::from_slice("source_mac", bytes)?);
        Ok(self)
    }

    /// Set the destination MAC from raw bytes, which must be exactly six long
    pub fn dest_mac_bytes(mut self, bytes: &[u8]) -> Result<Self> {
        self.dest_mac = Some(MacAddr::from_slice("dest_mac", bytes)?);
        Ok(self)
    }

    pub fn source_ip(mut self, ip: IpAddr) -> Self {
        self.source_ip = Some(ip);
        self
    }

    pub fn dest_ip(mut self, ip: IpAddr) -> Self {
        self.dest_ip = Some(ip);
        self
    }

    pub fn source_port(mut self, port: u16) -> Self {
        self.source_port = Some(port);
        self
    }

    pub fn dest_port(mut self, port: u16) -> Self {
        self.dest_port = Some(port);
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// Pin the IP version. Without it the version follows the destination
    /// address.
    pub fn ip_version(mut self, version: IpVersion) -> Self {
        self.ip_version = Some(version);
        self
    }

    /// Validate and freeze the description
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a required field is missing or if
    /// either address disagrees with the IP version.
    pub fn build(self) -> Result<FrameSpec> {
        let source_mac = self.source_mac.ok_or_else(|| missing("source_mac"))?;
        let dest_mac = self.dest_mac.ok_or_else(|| missing("dest_mac"))?;
        let source_ip = self.source_ip.ok_or_else(|| missing("source_ip"))?;
        let dest_ip = self.dest_ip.ok_or_else(|| missing("dest_ip"))?;
        let source_port = self.source_port.ok_or_else(|| missing("source_port"))?;
        let dest_port = self.dest_port.ok_or_else(|| missing("dest_port"))?;

        let ip_version = self.ip_version.unwrap_or_else(|| IpVersion::of(&dest_ip));
        check_version("source_ip", &source_ip, ip_version)?;
        check_version("dest_ip", &dest_ip, ip_version)?;

        Ok(FrameSpec {
            source_mac,
            dest_mac,
            source_ip,
            dest_ip,
            source_port,
            dest_port,
            payload: self.payload,
            ip_version,
        })
    }
}

fn missing(field: &str) -> Error {
    Error::validation(field, "is required")
}
