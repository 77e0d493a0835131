//! Raw frame injection
//!
//! A [`FrameSink`] writes exactly one fully formed frame to the link. The
//! live implementation, [`DatalinkInjector`], uses a `pnet_datalink`
//! Ethernet channel so the frame leaves the interface byte for byte as
//! built, bypassing the kernel's IP and UDP stack.

use pnet_datalink::{self, Channel, DataLinkSender};
use tracing::{debug, info};
use udpspoof_core::{Error, Result};
use udpspoof_packet::{build_frame, FrameSpec};

use crate::interface::{find_network_interface, InterfaceInfo};

/// Destination for serialized frames
pub trait FrameSink {
    /// Name of the link the sink writes to, used in error reports
    fn interface_name(&self) -> &str;

    /// Write one frame, blocking until the link accepts it
    ///
    /// There is no retry; a failure is reported as [`Error::Injection`].
    fn inject(&mut self, frame: &[u8]) -> Result<()>;
}

/// Injects frames through a datalink Ethernet channel
pub struct DatalinkInjector {
    interface: String,
    tx: Box<dyn DataLinkSender>,
}

impl DatalinkInjector {
    /// Open an Ethernet channel on the named interface
    pub fn open(name: &str) -> Result<Self> {
        let interface = find_network_interface(name)?;

        let tx = match pnet_datalink::channel(&interface, Default::default()) {
            Ok(Channel::Ethernet(tx, _rx)) => tx,
            Ok(_) => return Err(Error::injection(name, "Unsupported channel type")),
            Err(e) => {
                return Err(Error::injection(
                    name,
                    format!("Failed to create channel: {}", e),
                ))
            }
        };

        debug!(interface = name, "Opened datalink channel");
        Ok(DatalinkInjector {
            interface: name.to_string(),
            tx,
        })
    }

    /// Open an Ethernet channel on a previously discovered interface
    pub fn for_interface(info: &InterfaceInfo) -> Result<Self> {
        Self::open(&info.name)
    }
}

impl FrameSink for DatalinkInjector {
    fn interface_name(&self) -> &str {
        &self.interface
    }

    fn inject(&mut self, frame: &[u8]) -> Result<()> {
        self.tx
            .send_to(frame, None)
            .ok_or_else(|| Error::injection(&self.interface, "Failed to send frame"))?
            .map_err(|e| Error::injection(&self.interface, format!("Send error: {}", e)))?;

        debug!(interface = %self.interface, size = frame.len(), "Injected frame");
        Ok(())
    }
}

/// Build the frame for `spec` and write it to `sink`
///
/// Returns the number of bytes injected. Nothing reaches the sink if the
/// frame cannot be built.
pub fn send_frame<S: FrameSink + ?Sized>(sink: &mut S, spec: &FrameSpec) -> Result<usize> {
    let frame = build_frame(spec)?;
    sink.inject(&frame)?;

    info!(
        interface = sink.interface_name(),
        size = frame.len(),
        "Frame injected"
    );
    Ok(frame.len())
}
