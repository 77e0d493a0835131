//! Frame construction and parsing library for udpspoof-rs
//!
//! This crate turns a [`FrameSpec`] into the exact bytes of one Ethernet II
//! frame carrying an IPv4 or IPv6 UDP datagram. Every length and checksum
//! field is computed from the layers themselves, so the frame is valid on the
//! wire even though its addresses are arbitrary.
//!
//! # Architecture
//!
//! - [`frame_spec`] - Validated description of the frame to build
//! - [`layers`] - Per-layer descriptors derived from a spec
//! - [`serializer`] - Bottom-up resolution of lengths and checksums, then emission
//! - [`ethernet`] - Ethernet II header
//! - [`ip`] - IPv4 and IPv6 headers
//! - [`udp`] - UDP header
//! - [`checksum`] - Internet checksum and pseudo-headers
//! - [`parser`] - Decoding and checksum verification of built frames
//!
//! # Quick Start
//!
//! ```rust
//! use udpspoof_core::MacAddr;
//! use udpspoof_packet::{build_frame, FrameSpec, ParsedFrame};
//!
//! let spec = FrameSpec::builder()
//!     .source_mac(MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]))
//!     .dest_mac(MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x02]))
//!     .source_ip("10.0.0.1".parse().unwrap())
//!     .dest_ip("10.0.0.2".parse().unwrap())
//!     .source_port(9999)
//!     .dest_port(8888)
//!     .payload(vec![0xDE, 0xAD, 0xBE, 0xEF])
//!     .build()
//!     .unwrap();
//!
//! let frame = build_frame(&spec).unwrap();
//! assert_eq!(frame.len(), 46);
//!
//! let parsed = ParsedFrame::parse(&frame).unwrap();
//! assert!(parsed.verify_checksums());
//! ```

pub mod checksum;
pub mod ethernet;
pub mod frame_spec;
pub mod ip;
pub mod layers;
pub mod parser;
pub mod serializer;
pub mod udp;

// Re-export commonly used types for convenience
pub use checksum::{internet_checksum, transport_checksum};
pub use ethernet::{EtherType, EthernetLayer};
pub use frame_spec::{FrameSpec, FrameSpecBuilder};
pub use ip::{IpLayer, IpProtocol, IpVersion, Ipv4Layer, Ipv6Layer};
pub use layers::{Layers, Payload};
pub use parser::ParsedFrame;
pub use serializer::{build_frame, serialize};
pub use udp::UdpLayer;
