//! CLI interface for udpspoof-rs
//!
//! Argument parsing and flag resolution for the `udpspoof` injector, the
//! `udpreceiver` listener, and the logging setup both binaries share.

pub mod args;
pub mod receiver;
pub mod resolve;

pub use args::{ReceiverArgs, SpoofArgs};
pub use receiver::{is_truncated, Datagram, Receiver, MAX_DATAGRAM};
pub use resolve::{decode_payload, normalize_mac, resolve_frame_spec, resolve_interface};

use tracing::Level;

/// Map the `-v` count to a log level
pub fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global `tracing` subscriber
pub fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), Level::INFO);
        assert_eq!(log_level(1), Level::DEBUG);
        assert_eq!(log_level(2), Level::TRACE);
        assert_eq!(log_level(7), Level::TRACE);
    }
}
