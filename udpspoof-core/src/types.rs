//! Common types used throughout udpspoof-rs

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Length of a MAC address in bytes
    pub const LEN: usize = 6;

    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const fn broadcast() -> Self {
        Self([0xff; 6])
    }

    /// Zero MAC address (00:00:00:00:00:00)
    pub const fn zero() -> Self {
        Self([0x00; 6])
    }

    /// Build a MAC address from a slice, rejecting anything that is not
    /// exactly six bytes. `field` names the offending input in the error.
    pub fn from_slice(field: &str, slice: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 6] = slice.try_into().map_err(|_| {
            Error::validation(
                field,
                format!("MAC address must be {} bytes, got {}", Self::LEN, slice.len()),
            )
        })?;
        Ok(Self(bytes))
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Check if this is a multicast address (bit 0 of first octet is 1)
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = Error;

    /// Parses the canonical colon-separated form (`aa:bb:cc:dd:ee:ff`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != Self::LEN {
            return Err(Error::validation(
                "mac",
                format!("'{}' is not six colon-separated octets", s),
            ));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 {
                return Err(Error::validation(
                    "mac",
                    format!("octet '{}' in '{}' is not two hex digits", part, s),
                ));
            }
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| {
                Error::validation("mac", format!("octet '{}' in '{}' is not hex", part, s))
            })?;
        }

        Ok(MacAddr(bytes))
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }
}

impl From<MacAddr> for [u8; 6] {
    fn from(mac: MacAddr) -> Self {
        mac.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_display() {
        let mac = MacAddr::new([0x02, 0x00, 0x00, 0xAB, 0xCD, 0x01]);
        assert_eq!(mac.to_string(), "02:00:00:ab:cd:01");
    }

    #[test]
    fn test_mac_from_str() {
        let mac: MacAddr = "02:00:00:AB:cd:01".parse().unwrap();
        assert_eq!(mac.octets(), [0x02, 0x00, 0x00, 0xAB, 0xCD, 0x01]);
    }

    #[test]
    fn test_mac_from_str_rejects_short_octet() {
        assert!("2:00:00:00:00:01".parse::<MacAddr>().is_err());
        assert!("02:00:00:00:00".parse::<MacAddr>().is_err());
        assert!("02:00:00:00:00:zz".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_mac_from_slice() {
        let mac = MacAddr::from_slice("source_mac", &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(mac, MacAddr::new([1, 2, 3, 4, 5, 6]));

        match MacAddr::from_slice("source_mac", &[1, 2, 3, 4, 5]) {
            Err(Error::Validation { field, reason }) => {
                assert_eq!(field, "source_mac");
                assert!(reason.contains("got 5"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_mac_multicast() {
        assert!(MacAddr::broadcast().is_multicast());
        assert!(!MacAddr::new([0x02, 0, 0, 0, 0, 1]).is_multicast());
        assert_eq!(MacAddr::zero().octets(), [0u8; 6]);
    }
}
