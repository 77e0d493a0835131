//! Turning command-line flags into a validated [`FrameSpec`]
//!
//! Every failure here is reported as [`Error::InvalidParameter`] naming the
//! offending flag, so the binary can print it as-is.

use std::net::IpAddr;
use udpspoof_core::{Error, MacAddr, Result};
use udpspoof_link::{get_interface, InterfaceInfo};
use udpspoof_packet::{FrameSpec, IpVersion};

use crate::args::SpoofArgs;

/// Rewrite a MAC address into the colon form with two digits per octet.
///
/// Accepts the dash-separated form printed by Windows `ipconfig` and the
/// unpadded octets printed by macOS `arp` (`1:2:ff:4:5:6`). Case is kept.
pub fn normalize_mac(mac: &str) -> String {
    mac.trim()
        .split(|c| c == ':' || c == '-')
        .map(|octet| {
            if octet.len() == 1 {
                format!("0{}", octet)
            } else {
                octet.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(":")
}

fn parse_mac(flag: &str, value: &str) -> Result<MacAddr> {
    normalize_mac(value)
        .parse()
        .map_err(|_| Error::invalid_parameter(flag, format!("invalid MAC address '{}'", value)))
}

fn parse_ip(flag: &str, value: &str) -> Result<IpAddr> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_parameter(flag, format!("invalid IP address '{}'", value)))
}

/// Decode a hex payload, tolerating a leading `0x`
pub fn decode_payload(hex_payload: &str) -> Result<Vec<u8>> {
    let digits = hex_payload.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    hex::decode(digits).map_err(|e| {
        Error::invalid_parameter("payload", format!("unable to decode hex payload: {}", e))
    })
}

/// Look up the injection interface named on the command line
pub fn resolve_interface(name: &str) -> Result<InterfaceInfo> {
    if name.is_empty() {
        return Err(Error::invalid_parameter(
            "interface",
            "a network interface is required, e.g. udpspoof -i eth0 ...",
        ));
    }

    let iface = get_interface(name).map_err(|e| {
        Error::invalid_parameter("interface", format!("invalid network interface: {}", e))
    })?;

    if iface.mac.is_none() {
        return Err(Error::invalid_parameter(
            "interface",
            format!("network interface '{}' has no MAC address", name),
        ));
    }

    Ok(iface)
}

/// Build the frame description from `args` and the injection interface
///
/// Unset source fields default to the interface's own MAC and to its first
/// address of the destination's family.
pub fn resolve_frame_spec(args: &SpoofArgs, iface: &InterfaceInfo) -> Result<FrameSpec> {
    let iface_mac = iface.mac.ok_or_else(|| {
        Error::invalid_parameter(
            "interface",
            format!("network interface '{}' has no MAC address", iface.name),
        )
    })?;

    if args.dest_mac.trim().is_empty() {
        return Err(Error::invalid_parameter("dest-mac", "destination MAC is required"));
    }
    let dest_mac = parse_mac("dest-mac", &args.dest_mac)?;
    if dest_mac == iface_mac {
        return Err(Error::invalid_parameter(
            "dest-mac",
            "destination MAC must differ from the injecting interface's MAC",
        ));
    }

    let source_mac = match args.source_mac.as_deref() {
        None | Some("") => iface_mac,
        Some(value) => parse_mac("source-mac", value)?,
    };

    if args.dest_ip.trim().is_empty() {
        return Err(Error::invalid_parameter("dest-ip", "destination IP is required"));
    }
    let dest_ip = parse_ip("dest-ip", &args.dest_ip)?;
    let version = IpVersion::of(&dest_ip);

    let source_ip = match args.source_ip.as_deref() {
        None | Some("") => iface.first_address(version).ok_or_else(|| {
            Error::invalid_parameter(
                "source-ip",
                format!("no {} address on interface '{}'", version, iface.name),
            )
        })?,
        Some(value) => {
            let ip = parse_ip("source-ip", value)?;
            if IpVersion::of(&ip) != version {
                return Err(Error::invalid_parameter(
                    "source-ip",
                    format!(
                        "source and destination IP must be the same family (got {} and {})",
                        IpVersion::of(&ip),
                        version
                    ),
                ));
            }
            ip
        }
    };

    let payload = decode_payload(&args.payload)?;

    FrameSpec::builder()
        .source_mac(source_mac)
        .dest_mac(dest_mac)
        .source_ip(source_ip)
        .dest_ip(dest_ip)
        .source_port(args.source_port)
        .dest_port(args.dest_port)
        .payload(payload)
        .ip_version(version)
        .build()
}
