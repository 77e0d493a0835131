//! Link-layer access for udpspoof-rs
//!
//! Interface discovery backed by `pnet_datalink`, and the [`FrameSink`]
//! boundary through which finished frames are written to the wire.

pub mod inject;
pub mod interface;

pub use inject::{send_frame, DatalinkInjector, FrameSink};
pub use interface::{get_interface, list_interfaces, InterfaceInfo};
