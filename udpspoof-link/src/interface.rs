//! Network interface enumeration and information

use ipnetwork::IpNetwork;
use pnet_datalink::{self, NetworkInterface};
use std::fmt;
use std::net::IpAddr;
use udpspoof_core::{Error, MacAddr, Result};
use udpspoof_packet::IpVersion;

/// Information about a network interface
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface name (e.g., "eth0", "en0")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Interface index
    pub index: u32,
    /// MAC address if the interface has one
    pub mac: Option<MacAddr>,
    /// Networks assigned to this interface, in kernel order
    pub networks: Vec<IpNetwork>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether the interface is a loopback
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for InterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        // Some platforms report all-zero hardware addresses for interfaces
        // without a link layer.
        let mac = iface
            .mac
            .map(|mac| MacAddr::new([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]))
            .filter(|mac| *mac != MacAddr::zero());

        InterfaceInfo {
            name: iface.name.clone(),
            description: iface.description.clone(),
            index: iface.index,
            mac,
            networks: iface.ips.clone(),
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

impl InterfaceInfo {
    /// All addresses assigned to the interface
    pub fn addresses(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.networks.iter().map(|network| network.ip())
    }

    /// First assigned address of the requested family
    pub fn first_address(&self, version: IpVersion) -> Option<IpAddr> {
        self.addresses().find(|ip| IpVersion::of(ip) == version)
    }

    /// MAC address, or an error naming the interface if it has none
    pub fn require_mac(&self) -> Result<MacAddr> {
        self.mac.ok_or_else(|| {
            Error::Interface(format!("Interface {} has no MAC address", self.name))
        })
    }

    /// Check if the interface can put frames on a wire
    pub fn is_injection_capable(&self) -> bool {
        self.is_up && !self.is_loopback && self.mac.is_some()
    }
}

impl fmt::Display for InterfaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mac {
            Some(mac) => write!(f, "{} ({})", self.name, mac)?,
            None => write!(f, "{} (no MAC)", self.name)?,
        }
        for network in &self.networks {
            write!(f, " {}", network)?;
        }
        Ok(())
    }
}

/// Look up the pnet interface with the given name
pub(crate) fn find_network_interface(name: &str) -> Result<NetworkInterface> {
    pnet_datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))
}

/// List all available network interfaces
pub fn list_interfaces() -> Result<Vec<InterfaceInfo>> {
    let interfaces = pnet_datalink::interfaces();

    if interfaces.is_empty() {
        return Err(Error::Interface(
            "No network interfaces found. Are you running with sufficient privileges?".to_string(),
        ));
    }

    Ok(interfaces.iter().map(InterfaceInfo::from).collect())
}

/// Get information about a specific interface by name
pub fn get_interface(name: &str) -> Result<InterfaceInfo> {
    find_network_interface(name).map(|iface| InterfaceInfo::from(&iface))
}
