//! Passive UDP listener used to observe injected datagrams

use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, info};
use udpspoof_core::Result;

/// Receive buffer size; a datagram filling it completely is reported as
/// possibly truncated
pub const MAX_DATAGRAM: usize = 1040;

/// True if a receive of `size` bytes may have been cut short.
///
/// A datagram of exactly [`MAX_DATAGRAM`] bytes is indistinguishable from a
/// longer one and is flagged as well.
pub fn is_truncated(size: usize) -> bool {
    size == MAX_DATAGRAM
}

/// One received datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub sender: SocketAddr,
    pub payload: Vec<u8>,
    pub truncated: bool,
}

impl Datagram {
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }
}

/// Listener bound to a local UDP address
pub struct Receiver {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl Receiver {
    /// Bind the listening socket
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        debug!(%addr, "Bound UDP socket");
        Ok(Receiver {
            socket,
            buf: vec![0u8; MAX_DATAGRAM],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Wait for the next datagram
    pub async fn recv(&mut self) -> Result<Datagram> {
        let (size, sender) = self.socket.recv_from(&mut self.buf).await?;
        Ok(Datagram {
            sender,
            payload: self.buf[..size].to_vec(),
            truncated: is_truncated(size),
        })
    }

    /// Log every datagram until a receive fails
    pub async fn run(mut self) -> Result<()> {
        info!(addr = %self.local_addr()?, "Listening for UDP datagrams");
        loop {
            let datagram = self.recv().await?;
            info!(
                sender = %datagram.sender,
                truncated = datagram.truncated,
                payload = %datagram.payload_hex(),
                "Received datagram"
            );
        }
    }
}
